use crate::conf::error::ConfigError;
use crate::conf::types::{DEFAULT_FOR_HEADER, DEFAULT_PROTO_HEADER, ForwardedSpec};
use crate::net::{Network, NetworkSet};
use crate::resolver::TrustResolver;
use http::HeaderName;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::net::IpAddr;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub message: String,
    pub help: Option<String>,
}

/// Findings that do not stop the resolver from being built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    fn warning(&mut self, message: String, help: Option<String>) {
        warn!(%message, "configuration warning");
        self.warnings.push(ValidationIssue { message, help });
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_plain(&self) {
        for issue in &self.warnings {
            println!("warning: {}", issue.message);
            if let Some(help) = &issue.help {
                println!("  help: {}", help);
            }
        }
    }

    pub fn render_pretty(&self) {
        for issue in &self.warnings {
            println!("  {}: {}", "warning".yellow().bold(), issue.message);
            if let Some(help) = &issue.help {
                println!("  {}: {}", "help".cyan(), help);
            }
            println!();
        }
    }
}

/// Trusted networks
impl ValidationReport {
    pub fn trusted_networks_trust_all(&mut self, network: &Network) {
        self.warning(
            format!("trusted_networks contains a catch-all network: {network}"),
            Some("Every peer of this address family may spoof its client address.".to_string()),
        )
    }

    pub fn trusted_networks_contains_public_range(&mut self, network: &Network) {
        self.warning(
            format!("trusted_networks contains a public IP range: {network}"),
            None,
        )
    }
}

/// Header selection
impl ValidationReport {
    pub fn legacy_headers_unset(&mut self) {
        self.warning(
            "use_forwarded is off and both for_header and proto_header are empty: \
             requests are never rewritten"
                .to_string(),
            Some("Set use_forwarded = true or configure a legacy header.".to_string()),
        )
    }

    pub fn legacy_headers_ignored(&mut self) {
        self.warning(
            "use_forwarded is on: for_header and proto_header are ignored".to_string(),
            None,
        )
    }
}

/// Build the resolver described by `spec`, collecting warnings along the way.
pub fn validate_spec(spec: &ForwardedSpec) -> Result<(TrustResolver, ValidationReport), ConfigError> {
    let mut report = ValidationReport::default();

    let networks = NetworkSet::parse(&spec.trusted_networks)?;
    validate_trusted_networks(&networks, &mut report);

    let for_header = validate_header_name("for_header", &spec.for_header)?;
    let proto_header = validate_header_name("proto_header", &spec.proto_header)?;

    // Defaults are always filled in, so only customized names are worth a warning.
    let customized = |name: &str, default: &str| !name.is_empty() && name != default;

    if spec.use_forwarded {
        if customized(for_header, DEFAULT_FOR_HEADER)
            || customized(proto_header, DEFAULT_PROTO_HEADER)
        {
            report.legacy_headers_ignored();
        }
    } else if for_header.is_empty() && proto_header.is_empty() {
        report.legacy_headers_unset();
    }

    let resolver = TrustResolver::from_parts(
        networks,
        spec.allow_empty_source,
        spec.use_forwarded,
        for_header,
        proto_header,
    );

    Ok((resolver, report))
}

fn validate_trusted_networks(networks: &NetworkSet, report: &mut ValidationReport) {
    for network in networks.iter() {
        if network.prefix_len() == 0 {
            report.trusted_networks_trust_all(network);
        } else if !is_non_public_infra_network(network) {
            report.trusted_networks_contains_public_range(network);
        }
    }
}

fn validate_header_name<'a>(field: &'static str, name: &'a str) -> Result<&'a str, ConfigError> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(name);
    }
    HeaderName::from_bytes(name.as_bytes()).map_err(|_| ConfigError::InvalidHeaderName {
        field,
        name: name.to_string(),
    })?;
    Ok(name)
}

/// NOTE: identifies non-globally-routable infrastructure address space
/// (RFC1918, ULA, loopback, link-local). It says nothing about whether a
/// given peer is trustworthy.
fn is_non_public_infra_network(net: &Network) -> bool {
    match net.addr() {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback() || v4.is_link_local(),
        IpAddr::V6(v6) => v6.is_loopback() || v6.is_unique_local() || v6.is_unicast_link_local(),
    }
}
