use serde::{Deserialize, Serialize};

pub const DEFAULT_TRUSTED_NETWORKS: &str = "127.0.0.1, ::1";
pub const DEFAULT_FOR_HEADER: &str = "X-Forwarded-For";
pub const DEFAULT_PROTO_HEADER: &str = "X-Forwarded-Proto";

/// Top level of a forwardgate HCL file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EntrypointConfig {
    #[serde(default)]
    pub forwarded: ForwardedSpec,
}

/// The `forwarded { ... }` block, as written by the operator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForwardedSpec {
    /// Comma-separated CIDRs or bare addresses allowed to set forwarding headers.
    pub trusted_networks: String,

    /// Trust peers without a numeric address (Unix domain sockets).
    pub allow_empty_source: bool,

    /// Parse the RFC 7239 `Forwarded` header instead of the legacy pair.
    pub use_forwarded: bool,

    /// Legacy header carrying the client address. Empty disables it.
    pub for_header: String,

    /// Legacy header carrying the client protocol. Empty disables it.
    pub proto_header: String,
}

impl Default for ForwardedSpec {
    fn default() -> Self {
        Self {
            trusted_networks: DEFAULT_TRUSTED_NETWORKS.to_string(),
            allow_empty_source: false,
            use_forwarded: false,
            for_header: DEFAULT_FOR_HEADER.to_string(),
            proto_header: DEFAULT_PROTO_HEADER.to_string(),
        }
    }
}
