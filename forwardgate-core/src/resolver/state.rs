/// What downstream code should believe about the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerState {
    pub peer_addr: String,
    pub secure: bool,
}

impl PeerState {
    pub fn new(peer_addr: impl Into<String>, secure: bool) -> Self {
        Self {
            peer_addr: peer_addr.into(),
            secure,
        }
    }
}

/// Outcome of reading the forwarding headers of one request.
///
/// `peer_addr` is already normalized to `host:port`. Either field is `None`
/// when the headers did not provide it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub peer_addr: Option<String>,
    pub proto: Option<String>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.peer_addr.is_none() && self.proto.is_none()
    }

    pub fn is_https(&self) -> bool {
        self.proto
            .as_deref()
            .is_some_and(|proto| proto.eq_ignore_ascii_case("https"))
    }

    /// Overwrite the address when one was resolved and raise `secure` on
    /// https. Never lowers `secure`.
    pub fn upgrade(&self, state: PeerState) -> PeerState {
        PeerState {
            peer_addr: self.peer_addr.clone().unwrap_or(state.peer_addr),
            secure: state.secure || self.is_https(),
        }
    }

    /// Like [`Resolution::upgrade`], but a resolved protocol other than https
    /// also lowers `secure`. Without a resolved protocol `secure` is kept.
    pub fn settle(&self, state: PeerState) -> PeerState {
        let upgraded = self.upgrade(state);
        match self.proto {
            Some(_) => PeerState {
                secure: self.is_https(),
                ..upgraded
            },
            None => upgraded,
        }
    }
}
