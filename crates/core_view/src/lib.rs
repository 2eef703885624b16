//! Everything the dashboard derives from the frozen dataset: the filtered
//! record list, the selection, the map viewport and summary statistics.

pub mod filter;
pub mod selection;
pub mod session;
pub mod stats;
pub mod viewport;

#[cfg(test)]
pub(crate) mod testing;

pub use filter::{apply, apply_positions, matches};
pub use selection::{Selection, SelectionError};
pub use session::{DashboardSession, MarkerView, ViewSnapshot};
pub use stats::Statistics;
pub use viewport::{compute_viewport, ResolvedView, Viewport, ViewportPolicy};
