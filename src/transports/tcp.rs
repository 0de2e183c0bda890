//! TCP transport for GELF
//!
//! Writes each message as a null-byte terminated frame over a persistent
//! connection. GELF over TCP does not support compression.

use crate::core::transport::{resolve, Transport};
use crate::core::{GelfError, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 12201;

const FRAME_DELIMITER: u8 = 0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TcpConfig {
    pub host: String,
    pub port: u16,
    pub timeout_secs: u64,
    pub reconnect: bool,
}

impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout_secs: 5,
            reconnect: true,
        }
    }
}

/// TCP transport that keeps one connection open to the GELF input
///
/// # Example
///
/// ```no_run
/// use rust_gelf_target::transports::TcpTransport;
///
/// let transport = TcpTransport::new("127.0.0.1", 12201)
///     .expect("Failed to connect to GELF input")
///     .with_reconnect(false);
/// ```
pub struct TcpTransport {
    stream: Option<TcpStream>,
    address: SocketAddr,
    timeout: Duration,
    reconnect_on_error: bool,
}

impl TcpTransport {
    /// Connect with a five second timeout and reconnection enabled
    ///
    /// # Errors
    ///
    /// Returns error if the address does not resolve or the connection fails
    pub fn new(host: &str, port: u16) -> Result<Self> {
        Self::from_config(&TcpConfig {
            host: host.to_string(),
            port,
            ..TcpConfig::default()
        })
    }

    pub fn from_config(config: &TcpConfig) -> Result<Self> {
        let address = resolve("tcp", &config.host, config.port)?;
        let timeout = Duration::from_secs(config.timeout_secs.max(1));
        let stream = Self::connect(address, timeout)?;

        Ok(Self {
            stream: Some(stream),
            address,
            timeout,
            reconnect_on_error: config.reconnect,
        })
    }

    /// Enable or disable automatic reconnection on errors
    ///
    /// Default: enabled
    #[must_use]
    pub fn with_reconnect(mut self, enable: bool) -> Self {
        self.reconnect_on_error = enable;
        self
    }

    fn connect(address: SocketAddr, timeout: Duration) -> Result<TcpStream> {
        let configure = |stream: &TcpStream| -> std::io::Result<()> {
            stream.set_write_timeout(Some(timeout))?;
            stream.set_read_timeout(Some(timeout))?;
            stream.set_nodelay(true)
        };

        let stream = TcpStream::connect_timeout(&address, timeout)
            .map_err(|e| GelfError::transport_io("tcp", format!("connect to {}", address), e))?;
        configure(&stream)
            .map_err(|e| GelfError::transport_io("tcp", "configure socket", e))?;

        tracing::debug!(%address, "TCP transport connected");
        Ok(stream)
    }

    fn write_frame(&mut self, frame: &[u8]) -> std::io::Result<()> {
        match self.stream {
            Some(ref mut stream) => stream.write_all(frame),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "GELF stream not connected",
            )),
        }
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, payload: &[u8]) -> Result<()> {
        let mut frame = Vec::with_capacity(payload.len() + 1);
        frame.extend_from_slice(payload);
        frame.push(FRAME_DELIMITER);

        let err = match self.write_frame(&frame) {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        // Connection lost
        self.stream = None;
        if !self.reconnect_on_error {
            return Err(GelfError::transport_io("tcp", "write frame", err));
        }

        tracing::debug!(address = %self.address, error = %err, "reconnecting TCP transport");
        match Self::connect(self.address, self.timeout) {
            Ok(stream) => {
                self.stream = Some(stream);
                self.write_frame(&frame)
                    .map_err(|e| GelfError::transport_io("tcp", "write frame after reconnect", e))
            }
            Err(reconnect_err) => Err(GelfError::transport(
                "tcp",
                format!(
                    "Failed to send message and reconnect: {} (reconnect: {})",
                    err, reconnect_err
                ),
            )),
        }
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut stream) = self.stream {
            stream.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "tcp"
    }
}

impl Drop for TcpTransport {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
