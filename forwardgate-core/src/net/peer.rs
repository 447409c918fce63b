use crate::net::split_host_port;
use std::fmt::{Display, Formatter};
use std::net::IpAddr;
use std::str::FromStr;
use thiserror::Error;

/// Peer address reported by local-socket transports that have no numeric source.
pub const EMPTY_SOURCE: &str = "@";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse peer address '{addr}'")]
pub struct PeerAddrError {
    pub addr: String,
}

/// Source of the connection as seen by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerSource {
    /// Unix domain socket or similar, no IP to check.
    Empty,
    Ip(IpAddr),
}

impl FromStr for PeerSource {
    type Err = PeerAddrError;

    /// Accepts `@`, `ip`, `ip:port` and `[ipv6]:port`.
    fn from_str(addr: &str) -> Result<Self, Self::Err> {
        if addr == EMPTY_SOURCE {
            return Ok(PeerSource::Empty);
        }

        let host = split_host_port(addr).map(|(host, _)| host).unwrap_or(addr);

        host.parse::<IpAddr>()
            .map(PeerSource::Ip)
            .map_err(|_| PeerAddrError {
                addr: addr.to_string(),
            })
    }
}

impl Display for PeerSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PeerSource::Empty => f.write_str(EMPTY_SOURCE),
            PeerSource::Ip(ip) => write!(f, "{ip}"),
        }
    }
}
