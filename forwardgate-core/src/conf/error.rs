use crate::net::NetworkParseError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    //-------------------------------------------------------------------------
    // IO
    //-------------------------------------------------------------------------
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    //-------------------------------------------------------------------------
    // Parsing
    //-------------------------------------------------------------------------
    #[error("invalid configuration file: {path}\n\n{source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: hcl::Error,
    },

    //-------------------------------------------------------------------------
    // Forwarded block
    //-------------------------------------------------------------------------
    #[error("invalid trusted_networks: {source}")]
    InvalidTrustedNetworks {
        #[from]
        source: NetworkParseError,
    },

    #[error("invalid {field} '{name}': not a valid HTTP header name")]
    InvalidHeaderName { field: &'static str, name: String },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: hcl::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::InvalidTrustedNetworks { .. } => Some(
            "trusted_networks is a comma-separated list of CIDRs or bare addresses.\n\
             \n\
             Example:\n\
             \n\
             forwarded {\n\
             \x20 trusted_networks = \"127.0.0.1, 10.0.0.0/8, fd00::/8\"\n\
             }",
        ),

        ConfigError::InvalidHeaderName { .. } => Some(
            "Header names must be HTTP field names without spaces or separators.\n\
             \n\
             Use an empty string to disable a legacy header:\n\
             \n\
             forwarded {\n\
             \x20 for_header   = \"X-Forwarded-For\"\n\
             \x20 proto_header = \"\"\n\
             }",
        ),

        _ => None,
    }
}
