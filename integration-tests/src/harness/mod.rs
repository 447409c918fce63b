mod config;
pub mod tracing;

pub use config::write_config;
pub use tracing::{CapturedEvent, capture_events};
