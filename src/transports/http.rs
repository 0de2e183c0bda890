//! HTTP transport for GELF
//!
//! Each message is sent as the body of a `POST` to the GELF HTTP input over a
//! fresh connection. Any status outside `2xx` is a delivery failure.

use crate::core::transport::{resolve, Compression, Transport};
use crate::core::{GelfError, Result};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 12201;
pub const DEFAULT_PATH: &str = "/gelf";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub timeout_secs: u64,
    pub compression: Compression,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_string(),
            timeout_secs: 5,
            compression: Compression::None,
        }
    }
}

pub struct HttpTransport {
    host: String,
    port: u16,
    path: String,
    address: SocketAddr,
    timeout: Duration,
    compression: Compression,
}

impl HttpTransport {
    pub fn new(host: &str, port: u16) -> Result<Self> {
        Self::from_config(&HttpConfig {
            host: host.to_string(),
            port,
            ..HttpConfig::default()
        })
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        if !config.path.starts_with('/') {
            return Err(GelfError::config(
                "HttpTransport",
                format!("path '{}' must start with '/'", config.path),
            ));
        }
        if config.compression == Compression::Zlib {
            return Err(GelfError::config(
                "HttpTransport",
                "zlib bodies are not accepted by GELF HTTP inputs, use gzip",
            ));
        }

        Ok(Self {
            host: config.host.clone(),
            port: config.port,
            path: config.path.clone(),
            address: resolve("http", &config.host, config.port)?,
            timeout: Duration::from_secs(config.timeout_secs.max(1)),
            compression: config.compression,
        })
    }

    /// Only gzip and no compression are accepted
    #[must_use]
    pub fn with_gzip(mut self, enable: bool) -> Self {
        self.compression = if enable {
            Compression::Gzip
        } else {
            Compression::None
        };
        self
    }

    /// Endpoint URL the transport posts to
    pub fn url(&self) -> String {
        format!("http://{}{}", self.authority(), self.path)
    }

    /// `host:port`, with IPv6 literals in brackets
    fn authority(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    fn request_head(&self, body_len: usize) -> String {
        let mut head = format!("POST {} HTTP/1.1\r\n", self.path);
        head.push_str(&format!("Host: {}\r\n", self.authority()));
        head.push_str("Content-Type: application/json\r\n");
        head.push_str(&format!("Content-Length: {}\r\n", body_len));
        head.push_str("Connection: close\r\n");
        if let Some(encoding) = self.compression.content_encoding() {
            head.push_str(&format!("Content-Encoding: {}\r\n", encoding));
        }
        head.push_str("\r\n");
        head
    }

    fn io_error(&self, action: &str, err: std::io::Error) -> GelfError {
        GelfError::transport_io("http", format!("{} {}", action, self.url()), err)
    }
}

impl Transport for HttpTransport {
    fn send(&mut self, payload: &[u8]) -> Result<()> {
        let body = self.compression.compress(payload)?;

        let mut stream = TcpStream::connect_timeout(&self.address, self.timeout)
            .map_err(|e| self.io_error("connect to", e))?;
        stream
            .set_write_timeout(Some(self.timeout))
            .and_then(|_| stream.set_read_timeout(Some(self.timeout)))
            .map_err(|e| self.io_error("configure connection to", e))?;

        stream
            .write_all(self.request_head(body.len()).as_bytes())
            .and_then(|_| stream.write_all(&body))
            .and_then(|_| stream.flush())
            .map_err(|e| self.io_error("post to", e))?;

        let mut status_line = String::new();
        BufReader::new(&stream)
            .read_line(&mut status_line)
            .map_err(|e| self.io_error("read response from", e))?;

        match parse_status_line(&status_line) {
            Some(status) if (200..300).contains(&status) => Ok(()),
            Some(status) => Err(GelfError::transport(
                "http",
                format!("{} answered with status {}", self.url(), status),
            )),
            None => Err(GelfError::transport(
                "http",
                format!("malformed response from {}: {:?}", self.url(), status_line.trim_end()),
            )),
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Status code of an `HTTP/1.x <code> <reason>` line
fn parse_status_line(line: &str) -> Option<u16> {
    let mut parts = line.split_whitespace();
    let version = parts.next()?;
    if !version.starts_with("HTTP/") {
        return None;
    }
    parts.next()?.parse().ok()
}
