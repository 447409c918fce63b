use ipnet::IpNet;
use std::fmt::{Display, Formatter};
use std::net::IpAddr;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkParseError {
    #[error("invalid network address '{entry}'")]
    InvalidAddress { entry: String },

    #[error("invalid prefix length '{prefix}' in '{entry}' (expected 0-{max})")]
    InvalidPrefixLength {
        entry: String,
        prefix: String,
        max: u8,
    },

    #[error("empty entry in network list '{list}'")]
    EmptyEntry { list: String },
}

/// A single trusted IP prefix.
///
/// The base address always has its host bits cleared, so `172.17.4.127/24`
/// is stored and rendered as `172.17.4.0/24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Network(IpNet);

impl Network {
    pub fn addr(&self) -> IpAddr {
        self.0.addr()
    }

    pub fn prefix_len(&self) -> u8 {
        self.0.prefix_len()
    }

    pub fn is_host_route(&self) -> bool {
        self.0.prefix_len() == self.0.max_prefix_len()
    }

    /// Family-exact membership: an IPv4 address never matches an IPv6 network,
    /// IPv4-mapped IPv6 addresses included.
    pub fn contains(&self, ip: &IpAddr) -> bool {
        self.0.contains(ip)
    }
}

impl FromStr for Network {
    type Err = NetworkParseError;

    fn from_str(entry: &str) -> Result<Self, Self::Err> {
        let (raw_addr, raw_prefix) = match entry.split_once('/') {
            Some((addr, prefix)) => (addr, Some(prefix)),
            None => (entry, None),
        };

        let addr: IpAddr = raw_addr
            .parse()
            .map_err(|_| NetworkParseError::InvalidAddress {
                entry: entry.to_string(),
            })?;

        let max = match addr {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        };

        let invalid_prefix = || NetworkParseError::InvalidPrefixLength {
            entry: entry.to_string(),
            prefix: raw_prefix.unwrap_or_default().to_string(),
            max,
        };

        let prefix_len = match raw_prefix {
            None => max,
            Some(raw) => parse_prefix_len(raw)
                .filter(|len| *len <= max)
                .ok_or_else(invalid_prefix)?,
        };

        let net = IpNet::new(addr, prefix_len).map_err(|_| invalid_prefix())?;

        Ok(Self(net.trunc()))
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0.addr(), self.0.prefix_len())
    }
}

/// Digits only: `u8::from_str` would also take a leading `+`.
fn parse_prefix_len(raw: &str) -> Option<u8> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// The set of networks whose peers may rewrite the client address.
///
/// Built once from configuration and shared read-only between requests.
/// Order follows the configured list but carries no meaning for membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetworkSet {
    networks: Vec<Network>,
}

impl NetworkSet {
    /// Parse a comma-separated list such as `"10.0.0.0/8, 192.168.3.4, ::1"`.
    ///
    /// Each entry is trimmed. An entry without a prefix is a host route.
    /// Blank entries are rejected, so a blank list is an error too.
    pub fn parse(list: &str) -> Result<Self, NetworkParseError> {
        let networks = list
            .split(',')
            .map(str::trim)
            .map(|entry| {
                if entry.is_empty() {
                    return Err(NetworkParseError::EmptyEntry {
                        list: list.to_string(),
                    });
                }
                entry.parse::<Network>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { networks })
    }

    pub fn contains(&self, ip: &IpAddr) -> bool {
        self.networks.iter().any(|net| net.contains(ip))
    }

    /// Canonical `addr/prefix` listing, comma separated.
    pub fn render(&self) -> String {
        self.networks
            .iter()
            .map(Network::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn iter(&self) -> impl Iterator<Item = &Network> {
        self.networks.iter()
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

impl FromStr for NetworkSet {
    type Err = NetworkParseError;

    fn from_str(list: &str) -> Result<Self, Self::Err> {
        Self::parse(list)
    }
}

impl Display for NetworkSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
