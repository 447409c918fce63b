mod error;
mod loader;
pub mod types;
mod validation;

pub use error::{ConfigError, config_error_hint};
pub use loader::{ValidatedConfig, load_config, validate_config};
pub use types::{EntrypointConfig, ForwardedSpec};
pub use validation::{ValidationIssue, ValidationReport};
