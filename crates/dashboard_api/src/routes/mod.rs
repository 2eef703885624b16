use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

pub(crate) mod dataset;
pub(crate) mod events;
pub(crate) mod view;

pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .route("/meta", get(dataset::fetch_meta))
        .route("/dataset/load", post(dataset::load_dataset))
        .route("/facets", get(events::list_facets))
        .route("/stats", get(events::fetch_stats))
        .route("/events", get(events::list_events))
        .route("/events/in-bounds", get(events::events_in_bounds))
        .route("/events/:id", get(events::get_event))
        .nest("/view", view::router())
}

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
