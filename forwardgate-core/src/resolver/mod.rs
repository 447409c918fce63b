//! Trust resolution for forwarding headers.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → TrustGate (peer address → PeerSource)
//!     → NetworkSet membership / empty-source allowance
//!     → TrustResolver::resolve (Forwarded or X-Forwarded-* pair)
//!     → Resolution::settle → RequestCtx
//!     → wrapped handler (always)
//! ```

mod gate;
mod state;

pub use gate::*;
pub use state::*;

use crate::ctx::RequestCtx;
use crate::headers::{FORWARDED, HeaderLookup, parse_forwarded_element, select_latest, unquote};
use crate::net::{NetworkParseError, NetworkSet, PeerSource, with_sentinel_port};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustResolver {
    networks: NetworkSet,
    allow_empty_source: bool,
    use_forwarded: bool,
    for_header: Option<String>,
    proto_header: Option<String>,
}

impl TrustResolver {
    /// Build a resolver from its configuration.
    ///
    /// `network_list` is a comma-separated list of CIDRs or bare addresses.
    /// An empty header name leaves that legacy header unused. Header names
    /// are ignored when `use_forwarded` is set.
    pub fn new(
        network_list: &str,
        allow_empty_source: bool,
        use_forwarded: bool,
        for_header: &str,
        proto_header: &str,
    ) -> Result<Self, NetworkParseError> {
        let networks = NetworkSet::parse(network_list)?;

        Ok(Self::from_parts(
            networks,
            allow_empty_source,
            use_forwarded,
            for_header,
            proto_header,
        ))
    }

    pub fn from_parts(
        networks: NetworkSet,
        allow_empty_source: bool,
        use_forwarded: bool,
        for_header: &str,
        proto_header: &str,
    ) -> Self {
        let header_name = |name: &str| {
            let name = name.trim();
            (!name.is_empty()).then(|| name.to_string())
        };

        Self {
            networks,
            allow_empty_source,
            use_forwarded,
            for_header: header_name(for_header),
            proto_header: header_name(proto_header),
        }
    }

    pub fn networks(&self) -> &NetworkSet {
        &self.networks
    }

    pub fn allow_empty_source(&self) -> bool {
        self.allow_empty_source
    }

    pub fn use_forwarded(&self) -> bool {
        self.use_forwarded
    }

    pub fn for_header(&self) -> Option<&str> {
        self.for_header.as_deref()
    }

    pub fn proto_header(&self) -> Option<&str> {
        self.proto_header.as_deref()
    }

    /// Whether a peer reported as `peer_addr` may rewrite its client address.
    ///
    /// Unparseable peers are never trusted.
    pub fn is_trusted_source(&self, peer_addr: &str) -> bool {
        match peer_addr.parse::<PeerSource>() {
            Ok(PeerSource::Empty) => self.allow_empty_source,
            Ok(PeerSource::Ip(ip)) => self.networks.contains(&ip),
            Err(err) => {
                debug!(error = %err, "peer address rejected");
                false
            }
        }
    }

    /// Read the client address and protocol from the configured headers.
    pub fn resolve<H>(&self, headers: &H) -> Resolution
    where
        H: HeaderLookup + ?Sized,
    {
        let (addr, proto) = if self.use_forwarded {
            let element = parse_forwarded_element(select_latest(headers, FORWARDED));
            (element.addr, element.proto)
        } else {
            let addr = self
                .for_header
                .as_deref()
                .map(|name| unquote(select_latest(headers, name)))
                .unwrap_or_default();
            let proto = self
                .proto_header
                .as_deref()
                .map(|name| select_latest(headers, name).trim())
                .unwrap_or_default();
            (addr, proto)
        };

        let peer_addr = match addr {
            "" => None,
            addr => with_sentinel_port(addr).or_else(|| {
                debug!(addr, "forwarded address is not a valid host:port, ignored");
                None
            }),
        };

        Resolution {
            peer_addr,
            proto: (!proto.is_empty()).then(|| proto.to_string()),
        }
    }

    /// Apply the forwarding headers to `ctx` without checking the peer.
    ///
    /// The address is overwritten when one was resolved and `secure` is
    /// raised on https. This never lowers `secure`; see [`TrustResolver::evaluate`].
    pub fn update(&self, ctx: &mut RequestCtx) -> Resolution {
        let resolution = self.resolve(&ctx.headers);
        let state = resolution.upgrade(ctx.peer_state());
        ctx.apply(state);
        resolution
    }

    /// Decide what a request looks like after the trust gate.
    ///
    /// Untrusted peers get `current` back unchanged. Trusted peers get the
    /// resolved address, and `secure` follows the resolved protocol when
    /// there is one.
    pub fn evaluate<H>(&self, headers: &H, current: PeerState) -> PeerState
    where
        H: HeaderLookup + ?Sized,
    {
        if !self.is_trusted_source(&current.peer_addr) {
            debug!(peer = %current.peer_addr, "untrusted peer, forwarding headers ignored");
            return current;
        }

        let resolution = self.resolve(headers);
        let settled = resolution.settle(current);

        debug!(
            peer_addr = %settled.peer_addr,
            secure = settled.secure,
            resolved = !resolution.is_empty(),
            "trusted peer, forwarding headers applied"
        );

        settled
    }

    /// Put the trust gate in front of `downstream`.
    pub fn wrap<H: Handler>(self: &Arc<Self>, downstream: H) -> TrustGate<H> {
        TrustGate::new(Arc::clone(self), downstream)
    }
}
