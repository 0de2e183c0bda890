//! UDP transport
//!
//! Sends each message as one datagram, or as a sequence of GELF chunks when
//! the (optionally compressed) payload is larger than the chunk size. Every
//! chunk carries a 12 byte header: the magic bytes `0x1e 0x0f`, an 8 byte
//! message id, the sequence number and the sequence count.

use crate::core::transport::{resolve, Compression, Transport};
use crate::core::{GelfError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::net::{SocketAddr, UdpSocket};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 12201;

/// Chunk size suited to paths crossing the internet
pub const CHUNK_SIZE_WAN: usize = 1420;
/// Chunk size suited to local networks with jumbo-ish frames
pub const CHUNK_SIZE_LAN: usize = 8154;

/// Most chunks a single GELF message may be split into
pub const MAX_CHUNKS: usize = 128;

const CHUNK_MAGIC: [u8; 2] = [0x1e, 0x0f];
const CHUNK_HEADER_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UdpConfig {
    pub host: String,
    pub port: u16,
    pub chunk_size: usize,
    pub compression: Compression,
}

impl Default for UdpConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            chunk_size: CHUNK_SIZE_WAN,
            compression: Compression::Zlib,
        }
    }
}

/// UDP transport that chunks oversized messages
///
/// # Example
///
/// ```no_run
/// use rust_gelf_target::transports::UdpTransport;
/// use rust_gelf_target::core::Compression;
///
/// let transport = UdpTransport::new("127.0.0.1", 12201)
///     .expect("Failed to open UDP socket")
///     .with_compression(Compression::Gzip);
/// ```
pub struct UdpTransport {
    socket: UdpSocket,
    target: SocketAddr,
    chunk_size: usize,
    compression: Compression,
}

impl UdpTransport {
    /// Create a transport with the default chunk size and zlib compression
    pub fn new(host: &str, port: u16) -> Result<Self> {
        Self::from_config(&UdpConfig {
            host: host.to_string(),
            port,
            ..UdpConfig::default()
        })
    }

    pub fn from_config(config: &UdpConfig) -> Result<Self> {
        if config.chunk_size == 0 {
            return Err(GelfError::config("UdpTransport", "chunk_size must be positive"));
        }

        let target = resolve("udp", &config.host, config.port)?;
        let bind_addr = if target.is_ipv4() {
            "0.0.0.0:0"
        } else {
            "[::]:0"
        };
        let socket = UdpSocket::bind(bind_addr)
            .map_err(|e| GelfError::transport_io("udp", "bind local socket", e))?;

        tracing::debug!(%target, chunk_size = config.chunk_size, "UDP transport ready");

        Ok(Self {
            socket,
            target,
            chunk_size: config.chunk_size,
            compression: config.compression,
        })
    }

    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Override the chunk size; zero is treated as one byte
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, payload: &[u8]) -> Result<()> {
        let data = self.compression.compress(payload)?;

        let mut message_id = [0u8; 8];
        rand::thread_rng().fill(&mut message_id);

        let datagrams = chunk_datagrams(&data, self.chunk_size, message_id)?;
        if datagrams.len() > 1 {
            tracing::trace!(chunks = datagrams.len(), "sending chunked GELF message");
        }

        for datagram in &datagrams {
            self.socket.send_to(datagram, self.target).map_err(|e| {
                GelfError::transport_io("udp", format!("send to {}", self.target), e)
            })?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "udp"
    }
}

/// Split a payload into datagrams, chunking when it exceeds `chunk_size`
pub fn chunk_datagrams(
    payload: &[u8],
    chunk_size: usize,
    message_id: [u8; 8],
) -> Result<Vec<Vec<u8>>> {
    if payload.len() <= chunk_size {
        return Ok(vec![payload.to_vec()]);
    }

    let count = payload.len().div_ceil(chunk_size);
    if count > MAX_CHUNKS {
        return Err(GelfError::ChunkLimitExceeded {
            chunks: count,
            max: MAX_CHUNKS,
        });
    }

    Ok(payload
        .chunks(chunk_size)
        .enumerate()
        .map(|(seq, chunk)| {
            let mut datagram = Vec::with_capacity(CHUNK_HEADER_LEN + chunk.len());
            datagram.extend_from_slice(&CHUNK_MAGIC);
            datagram.extend_from_slice(&message_id);
            datagram.push(seq as u8);
            datagram.push(count as u8);
            datagram.extend_from_slice(chunk);
            datagram
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const ID: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

    #[test]
    fn test_small_payload_is_not_chunked() {
        let datagrams = chunk_datagrams(b"hello", 10, ID).unwrap();
        assert_eq!(datagrams, vec![b"hello".to_vec()]);
    }

    #[test]
    fn test_chunk_headers() {
        let payload: Vec<u8> = (0..25u8).collect();
        let datagrams = chunk_datagrams(&payload, 10, ID).unwrap();

        assert_eq!(datagrams.len(), 3);
        for (seq, datagram) in datagrams.iter().enumerate() {
            assert_eq!(&datagram[..2], &CHUNK_MAGIC);
            assert_eq!(&datagram[2..10], &ID);
            assert_eq!(datagram[10] as usize, seq);
            assert_eq!(datagram[11], 3);
        }
        assert_eq!(datagrams[2].len(), CHUNK_HEADER_LEN + 5);

        let joined: Vec<u8> = datagrams
            .iter()
            .flat_map(|d| d[CHUNK_HEADER_LEN..].to_vec())
            .collect();
        assert_eq!(joined, payload);
    }

    #[test]
    fn test_chunk_limit() {
        let payload = vec![b'x'; MAX_CHUNKS * 2 + 1];
        let datagrams = chunk_datagrams(&payload[..MAX_CHUNKS * 2], 2, ID).unwrap();
        assert_eq!(datagrams.len(), MAX_CHUNKS);

        let err = chunk_datagrams(&payload, 2, ID).unwrap_err();
        assert!(matches!(
            err,
            GelfError::ChunkLimitExceeded { chunks: 129, max: MAX_CHUNKS }
        ));
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = UdpConfig {
            chunk_size: 0,
            ..UdpConfig::default()
        };
        assert!(matches!(
            UdpTransport::from_config(&config),
            Err(GelfError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_send_datagram() {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        receiver
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        let port = receiver.local_addr().unwrap().port();

        let mut transport = UdpTransport::new("127.0.0.1", port)
            .unwrap()
            .with_compression(Compression::None);
        transport.send(br#"{"short_message":"hi"}"#).unwrap();

        let mut buf = [0u8; 1024];
        let (len, _) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..len], br#"{"short_message":"hi"}"#);
    }
}
