//! HTTP surface of the incident map: a JSON API over the frozen dataset and
//! one shared dashboard session, plus optional static file serving.

use anyhow::Result;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get_service;
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

pub use state::{AppState, DashboardServerSettings, SourceHandle};

pub async fn run_dashboard_server(settings: DashboardServerSettings) -> Result<()> {
    let state = AppState::initialize(&settings).await;

    let api_router = routes::build_api_router().with_state(state);
    let mut app = Router::new()
        .nest("/api", api_router)
        .layer(routes::cors_layer());

    if let Some(static_dir) = &settings.static_dir {
        let static_service = ServeDir::new(static_dir.clone())
            .not_found_service(ServeFile::new(static_dir.join("index.html")));
        app = app.fallback_service(get_service(static_service));
    } else {
        app = app.fallback(handler_not_found);
    }

    info!("Starting dashboard server on {}", settings.bind);
    let listener = tokio::net::TcpListener::bind(settings.bind).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

async fn handler_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}
