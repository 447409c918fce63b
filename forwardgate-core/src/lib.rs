//! Re-derive a client's address and transport security from forwarding
//! headers, but only for requests arriving from trusted proxies.

pub mod cli;
pub mod conf;
pub mod ctx;
pub mod headers;
pub mod logging;
pub mod net;
pub mod resolver;

pub use ctx::RequestCtx;
pub use net::{Network, NetworkParseError, NetworkSet};
pub use resolver::{Handler, PeerState, Resolution, TrustGate, TrustResolver, handler_fn};
