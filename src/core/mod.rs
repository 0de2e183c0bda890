//! Core GELF types and traits

pub mod error;
pub mod fault;
pub mod field_value;
pub mod log_level;
pub mod log_record;
pub mod message;
pub mod message_factory;
pub mod metrics;
pub mod publisher;
pub mod target;
pub mod transport;
pub mod validator;

pub use error::{GelfError, Result};
pub use fault::{Fault, FaultKind};
pub use field_value::FieldValue;
pub use log_level::{LevelMapper, LogLevel, SyslogLevel};
pub use log_record::{LogRecord, PayloadKey, RecordPayload, StructuredPayload};
pub use message::{GelfVersion, Message, Payload};
pub use message_factory::{MessageFactory, CATEGORY_FIELD};
pub use metrics::TargetMetrics;
pub use publisher::Publisher;
pub use target::{AfterPublishHook, BeforePublishHook, GelfTarget, GelfTargetBuilder};
pub use transport::{Compression, Transport};
pub use validator::{GelfValidator, MessageValidator, NoopValidator};
