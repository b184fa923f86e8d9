//! Network probes: ICMP through the system `ping`, HTTP/HTTPS through
//! `reqwest`, and the combined fallback probe.

mod combo;
mod http;
mod icmp;

pub use combo::ComboProbe;
pub use http::{HttpProbe, Scheme};
pub use icmp::{DEFAULT_PING_PROGRAM, IcmpProbe, PING_GRACE, PingFlavor};
