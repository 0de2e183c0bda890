//! # Rust GELF Target
//!
//! Exports application log records as GELF (Graylog Extended Log Format)
//! messages over UDP, TCP or HTTP.
//!
//! ## Features
//!
//! - **Message model**: GELF 1.0 and 1.1 payloads, including the 1.1 move of
//!   `facility`, `file` and `line` into additional fields
//! - **Record conversion**: text, structured and fault payloads become messages
//! - **Pluggable delivery**: validator and transports are injected explicitly
//! - **Chunking and compression**: oversized UDP messages are split into GELF chunks
//!
//! ```
//! use rust_gelf_target::prelude::*;
//! use rust_gelf_target::structured;
//!
//! let factory = MessageFactory::new(Some("svc1".to_string()), "app", GelfVersion::V1_1);
//! let record = LogRecord::new(
//!     structured! { "short" => "login failed", "user" => "alice", "attempt" => 3 },
//!     LogLevel::Warning,
//!     "auth",
//! );
//!
//! let payload = factory.create_message(&record)?.to_payload();
//! assert_eq!(payload["short_message"], "login failed");
//! assert_eq!(payload["_user"], "alice");
//! assert_eq!(payload["level"], 4);
//! # Ok::<(), GelfError>(())
//! ```

pub mod config;
pub mod core;
pub mod macros;
pub mod transports;

pub mod prelude {
    pub use crate::config::{GelfTargetConfig, TransportConfig};
    pub use crate::core::{
        Compression, Fault, FaultKind, FieldValue, GelfError, GelfTarget, GelfTargetBuilder,
        GelfValidator, GelfVersion, LevelMapper, LogLevel, LogRecord, Message, MessageFactory,
        MessageValidator, Payload, PayloadKey, RecordPayload, Result, StructuredPayload,
        SyslogLevel, TargetMetrics, Transport,
    };
}

pub use config::{GelfTargetConfig, TransportConfig};
pub use core::{
    Compression, Fault, FaultKind, FieldValue, GelfError, GelfTarget, GelfTargetBuilder,
    GelfValidator, GelfVersion, LevelMapper, LogLevel, LogRecord, Message, MessageFactory,
    MessageValidator, Payload, PayloadKey, RecordPayload, Result, StructuredPayload, SyslogLevel,
    TargetMetrics, Transport,
};
