mod host_port;
mod network_set;
mod peer;

pub use host_port::*;
pub use network_set::*;
pub use peer::*;
