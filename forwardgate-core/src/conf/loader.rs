use crate::conf::error::ConfigError;
use crate::conf::types::{EntrypointConfig, ForwardedSpec};
use crate::conf::validation::{ValidationReport, validate_spec};
use crate::resolver::TrustResolver;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// A configuration that produced a working resolver.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub spec: ForwardedSpec,
    pub resolver: Arc<TrustResolver>,
    pub validation: ValidationReport,
}

pub fn load_config(path: &Path) -> Result<ValidatedConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

    let entry: EntrypointConfig =
        hcl::from_str(&raw).map_err(|e| ConfigError::parse(path, e))?;

    //--------------------------------------------------------------------------
    // Build the resolver (hard fail), collect warnings (soft)
    //--------------------------------------------------------------------------
    let validated = validate_config(entry.forwarded)?;

    info!(
        path = %path.display(),
        trusted_networks = %validated.resolver.networks(),
        use_forwarded = validated.resolver.use_forwarded(),
        warnings = validated.validation.warnings.len(),
        "configuration loaded"
    );

    Ok(validated)
}

pub fn validate_config(spec: ForwardedSpec) -> Result<ValidatedConfig, ConfigError> {
    let (resolver, validation) = validate_spec(&spec)?;

    Ok(ValidatedConfig {
        spec,
        resolver: Arc::new(resolver),
        validation,
    })
}
