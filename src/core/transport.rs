//! Transport trait for GELF delivery endpoints

use super::error::{GelfError, Result};
use flate2::write::{GzEncoder, ZlibEncoder};
use serde::{Deserialize, Serialize};
use std::io::Write;

pub trait Transport: Send + Sync {
    /// Deliver one encoded message
    fn send(&mut self, payload: &[u8]) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// Payload compression applied before a message is written to the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    #[default]
    None,
    Gzip,
    Zlib,
}

impl Compression {
    pub fn compress(&self, payload: &[u8]) -> Result<Vec<u8>> {
        match self {
            Compression::None => Ok(payload.to_vec()),
            Compression::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
                encoder.write_all(payload)?;
                Ok(encoder.finish()?)
            }
            Compression::Zlib => {
                let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
                encoder.write_all(payload)?;
                Ok(encoder.finish()?)
            }
        }
    }

    /// HTTP `Content-Encoding` value, if the compression has one
    pub fn content_encoding(&self) -> Option<&'static str> {
        match self {
            Compression::None => None,
            Compression::Gzip => Some("gzip"),
            Compression::Zlib => Some("deflate"),
        }
    }
}

/// Resolve `host:port` for a transport, mapping failures to `TransportFailed`
pub(crate) fn resolve(transport: &str, host: &str, port: u16) -> Result<std::net::SocketAddr> {
    use std::net::ToSocketAddrs;

    let host = host.trim_start_matches('[').trim_end_matches(']');
    (host, port)
        .to_socket_addrs()
        .map_err(|e| GelfError::transport_io(transport, format!("resolve {}", host), e))?
        .next()
        .ok_or_else(|| GelfError::transport(transport, format!("no address for {}", host)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::{GzDecoder, ZlibDecoder};
    use std::io::Read;

    #[test]
    fn test_resolve_ipv6_literal() {
        let plain = resolve("test", "::1", 12201).unwrap();
        assert!(plain.is_ipv6());
        assert_eq!(plain.port(), 12201);
        assert_eq!(resolve("test", "[::1]", 12201).unwrap(), plain);
        assert!(resolve("test", "127.0.0.1", 80).unwrap().is_ipv4());
    }

    #[test]
    fn test_compression_none_is_identity() {
        let data = br#"{"short_message":"hello"}"#;
        assert_eq!(Compression::None.compress(data).unwrap(), data.to_vec());
    }

    #[test]
    fn test_gzip_roundtrip() {
        let data = br#"{"short_message":"hello"}"#;
        let compressed = Compression::Gzip.compress(data).unwrap();
        assert_eq!(&compressed[..2], &[0x1f, 0x8b]);

        let mut decoded = Vec::new();
        GzDecoder::new(&compressed[..]).read_to_end(&mut decoded).unwrap();
        assert_eq!(decoded, data.to_vec());
    }

    #[test]
    fn test_zlib_roundtrip() {
        let data = br#"{"short_message":"hello"}"#;
        let compressed = Compression::Zlib.compress(data).unwrap();
        assert_eq!(compressed[0], 0x78);

        let mut decoded = Vec::new();
        ZlibDecoder::new(&compressed[..]).read_to_end(&mut decoded).unwrap();
        assert_eq!(decoded, data.to_vec());
    }

    #[test]
    fn test_resolve() {
        let addr = resolve("udp", "127.0.0.1", 12201).unwrap();
        assert_eq!(addr.port(), 12201);
    }
}
