//! Declarative target configuration
//!
//! A [`GelfTargetConfig`] describes a target in JSON: the application name and
//! identifier used as the message host, the GELF version, and the transports
//! to deliver to. Every field has a default.
//!
//! ```
//! use rust_gelf_target::config::GelfTargetConfig;
//!
//! let config = GelfTargetConfig::from_json(r#"{
//!     "app_name": "billing",
//!     "version": "1.0",
//!     "transports": [
//!         { "type": "udp", "host": "127.0.0.1", "chunk_size": 8154 }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(config.app_name.as_deref(), Some("billing"));
//! assert_eq!(config.transports.len(), 1);
//! ```

use crate::core::{GelfTarget, GelfTargetBuilder, GelfVersion, Result, Transport};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[cfg(feature = "http")]
use crate::transports::{HttpConfig, HttpTransport};
#[cfg(feature = "tcp")]
use crate::transports::{TcpConfig, TcpTransport};
#[cfg(feature = "udp")]
use crate::transports::{UdpConfig, UdpTransport};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GelfTargetConfig {
    pub app_name: Option<String>,
    pub app_id: Option<String>,
    pub version: GelfVersion,
    pub transports: Vec<TransportConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    #[cfg(feature = "udp")]
    Udp(UdpConfig),
    #[cfg(feature = "tcp")]
    Tcp(TcpConfig),
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

impl TransportConfig {
    /// Open the configured transport
    ///
    /// With every transport feature disabled the enum has no variants and no
    /// value of it can exist.
    pub fn open(&self) -> Result<Box<dyn Transport>> {
        match *self {
            #[cfg(feature = "udp")]
            TransportConfig::Udp(ref config) => Ok(Box::new(UdpTransport::from_config(config)?)),
            #[cfg(feature = "tcp")]
            TransportConfig::Tcp(ref config) => Ok(Box::new(TcpTransport::from_config(config)?)),
            #[cfg(feature = "http")]
            TransportConfig::Http(ref config) => {
                Ok(Box::new(HttpTransport::from_config(config)?))
            }
        }
    }
}

impl GelfTargetConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Open every transport and return a builder ready for hooks or a validator
    pub fn into_builder(self) -> Result<GelfTargetBuilder> {
        let mut builder = GelfTarget::builder().version(self.version);
        if let Some(name) = self.app_name {
            builder = builder.app_name(name);
        }
        if let Some(id) = self.app_id {
            builder = builder.app_id(id);
        }
        for transport in &self.transports {
            builder = builder.boxed_transport(transport.open()?);
        }
        Ok(builder)
    }

    pub fn build(self) -> Result<GelfTarget> {
        self.into_builder()?.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GelfError;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GelfTargetConfig::from_json("{}").unwrap();
        assert_eq!(config, GelfTargetConfig::default());
        assert_eq!(config.version, GelfVersion::V1_1);
        assert!(config.transports.is_empty());
    }

    #[test]
    #[cfg(all(feature = "udp", feature = "tcp", feature = "http"))]
    fn test_transport_defaults() {
        use crate::core::Compression;

        let config = GelfTargetConfig::from_json(
            r#"{"transports": [{"type": "udp"}, {"type": "tcp"}, {"type": "http", "port": 8080}]}"#,
        )
        .unwrap();

        match &config.transports[0] {
            TransportConfig::Udp(udp) => {
                assert_eq!(udp.port, 12201);
                assert_eq!(udp.chunk_size, crate::transports::CHUNK_SIZE_WAN);
                assert_eq!(udp.compression, Compression::Zlib);
            }
            other => panic!("Expected udp transport, got {:?}", other),
        }
        match &config.transports[2] {
            TransportConfig::Http(http) => {
                assert_eq!(http.port, 8080);
                assert_eq!(http.path, "/gelf");
            }
            other => panic!("Expected http transport, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_fields() {
        assert!(matches!(
            GelfTargetConfig::from_json(r#"{"app": "x"}"#),
            Err(GelfError::JsonError(_))
        ));
        assert!(GelfTargetConfig::from_json(r#"{"version": "2.0"}"#).is_err());
        assert!(GelfTargetConfig::from_json(r#"{"transports": [{"type": "smtp"}]}"#).is_err());
    }

    #[test]
    fn test_disabled_or_unknown_transport_is_rejected() {
        #[cfg(not(feature = "http"))]
        assert!(GelfTargetConfig::from_json(r#"{"transports": [{"type": "http"}]}"#).is_err());
        assert!(GelfTargetConfig::from_json(r#"{"transports": [{"type": "amqp"}]}"#).is_err());
    }

    #[test]
    fn test_build_without_transports() {
        let err = GelfTargetConfig::default().build().err().unwrap();
        assert!(matches!(err, GelfError::InvalidConfiguration { .. }));
    }

    #[test]
    #[cfg(feature = "udp")]
    fn test_build_udp_target() {
        let target = GelfTargetConfig::from_json(
            r#"{"app_name": "svc1", "transports": [{"type": "udp", "port": 12201}]}"#,
        )
        .unwrap()
        .build()
        .unwrap();
        assert_eq!(target.factory().host(), "svc1");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"app_id": "worker-7", "version": "1.0"}}"#).unwrap();

        let config = GelfTargetConfig::from_file(file.path()).unwrap();
        assert_eq!(config.app_id.as_deref(), Some("worker-7"));
        assert_eq!(config.version, GelfVersion::V1_0);
    }
}
