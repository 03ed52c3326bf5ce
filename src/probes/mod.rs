pub mod icmp;
pub mod recognize;
pub mod tcp;
pub mod udp;

pub use tcp::tcp_probe;
pub use udp::udp_probe;
