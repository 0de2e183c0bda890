//! Transport implementations

#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "tcp")]
pub mod tcp;
#[cfg(feature = "udp")]
pub mod udp;

#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpTransport};
#[cfg(feature = "tcp")]
pub use tcp::{TcpConfig, TcpTransport};
#[cfg(feature = "udp")]
pub use udp::{UdpConfig, UdpTransport, CHUNK_SIZE_LAN, CHUNK_SIZE_WAN};

// Re-export the trait for convenience
pub use crate::core::Transport;
