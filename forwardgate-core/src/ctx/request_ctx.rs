use crate::net::EMPTY_SOURCE;
use crate::resolver::PeerState;
use http::{HeaderMap, HeaderName, HeaderValue};
use pingora::prelude::Session;
use pingora::protocols::l4::socket::SocketAddr as PingoraSocketAddr;

/// Per-request view the trust gate reads and rewrites.
///
/// Owned by the single flow handling the request. Only `peer_addr` and
/// `secure` are ever written by the gate.
#[derive(Debug, Clone, Default)]
pub struct RequestCtx {
    /// Request headers as received.
    pub headers: HeaderMap,

    /// Peer address as text, `ip:port`, bare `ip` or the `@` local-socket marker.
    pub peer_addr: String,

    /// Whether the request is treated as having arrived over TLS.
    pub secure: bool,
}

impl RequestCtx {
    pub fn new(peer_addr: impl Into<String>) -> Self {
        Self {
            headers: HeaderMap::new(),
            peer_addr: peer_addr.into(),
            secure: false,
        }
    }

    /// Create a boundary between the pingora session and the trust logic.
    ///
    /// Inet peers become `ip:port`, Unix domain sockets become `@`. A session
    /// without a known client address gets an empty peer, which is never trusted.
    pub fn from_session(session: &Session) -> Self {
        let peer_addr = match session.client_addr() {
            Some(PingoraSocketAddr::Inet(addr)) => addr.to_string(),
            Some(PingoraSocketAddr::Unix(_)) => EMPTY_SOURCE.to_string(),
            None => String::new(),
        };

        let secure = session
            .digest()
            .and_then(|digest| digest.ssl_digest.as_ref())
            .is_some();

        Self {
            headers: session.req_header().headers.clone(),
            peer_addr,
            secure,
        }
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn append_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.append(name, value);
    }

    pub fn peer_state(&self) -> PeerState {
        PeerState {
            peer_addr: self.peer_addr.clone(),
            secure: self.secure,
        }
    }

    pub fn apply(&mut self, state: PeerState) {
        self.peer_addr = state.peer_addr;
        self.secure = state.secure;
    }
}
