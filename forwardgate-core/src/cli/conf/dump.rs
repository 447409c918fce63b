use crate::conf::{EntrypointConfig, ForwardedSpec, ValidatedConfig, load_config};
use anyhow::Context;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    Hcl,
    Json,
    Yaml,
}

pub fn dump(path: PathBuf, format: DumpFormat) -> anyhow::Result<()> {
    let cfg = load_config(&path)
        .with_context(|| format!("failed to load config {}", path.display()))?;

    println!("{}", render(&cfg, format)?);
    Ok(())
}

/// Render the configuration as the resolver sees it: networks in canonical
/// form, disabled header names empty.
pub fn render(cfg: &ValidatedConfig, format: DumpFormat) -> anyhow::Result<String> {
    let resolver = &cfg.resolver;
    let resolved = EntrypointConfig {
        forwarded: ForwardedSpec {
            trusted_networks: resolver.networks().render(),
            allow_empty_source: resolver.allow_empty_source(),
            use_forwarded: resolver.use_forwarded(),
            for_header: resolver.for_header().unwrap_or_default().to_string(),
            proto_header: resolver.proto_header().unwrap_or_default().to_string(),
        },
    };

    let out = match format {
        DumpFormat::Hcl => hcl::to_string(&resolved)?,
        DumpFormat::Json => serde_json::to_string_pretty(&resolved)?,
        DumpFormat::Yaml => serde_yaml::to_string(&resolved)?,
    };

    Ok(out)
}
