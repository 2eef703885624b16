pub mod filter;
pub mod geo;
pub mod incident;
pub mod metadata;
pub mod region;
pub mod source;
pub mod style;
pub mod time;

pub use core_types::Severity;
