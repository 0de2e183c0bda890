//! GELF message model and its wire mapping
//!
//! A [`Message`] holds one log event. [`Message::to_payload`] produces the field
//! mapping that is JSON-encoded and handed to a transport:
//!
//! - base fields `version`, `host`, `short_message`, `full_message`, `level`,
//!   `timestamp`, `facility`, `file`, `line`
//! - for GELF 1.1, `facility`, `file` and `line` move to `_facility`, `_file`
//!   and `_line`
//! - every additional field is emitted as `_<key>`
//! - null and empty-string values are dropped; `false` and numeric zero are kept
//!
//! A populated base field wins over an additional field that lands on the same
//! key after renaming.

use super::error::{GelfError, Result};
use super::field_value::FieldValue;
use super::log_level::{LevelMapper, LogLevel, SyslogLevel};
use chrono::Utc;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Wire-ready field mapping produced by [`Message::to_payload`]
pub type Payload = serde_json::Map<String, Value>;

/// Base fields that GELF 1.1 moved into the additional-field namespace
const LEGACY_FIELDS: [&str; 3] = ["line", "facility", "file"];

/// GELF protocol revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GelfVersion {
    #[serde(rename = "1.0")]
    V1_0,
    #[default]
    #[serde(rename = "1.1")]
    V1_1,
}

impl GelfVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            GelfVersion::V1_0 => "1.0",
            GelfVersion::V1_1 => "1.1",
        }
    }

    /// Whether `facility`, `file` and `line` are emitted as additional fields
    fn prefixes_legacy_fields(&self) -> bool {
        matches!(self, GelfVersion::V1_1)
    }
}

impl fmt::Display for GelfVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GelfVersion {
    type Err = GelfError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1.0" => Ok(GelfVersion::V1_0),
            "1.1" => Ok(GelfVersion::V1_1),
            other => Err(GelfError::config(
                "version",
                format!("unsupported GELF version '{}'", other),
            )),
        }
    }
}

/// Local host name, or `localhost` when it cannot be resolved
pub(crate) fn local_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}

/// Current time as fractional seconds since the epoch
pub(crate) fn now_seconds() -> f64 {
    let now = Utc::now();
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_micros()) / 1_000_000.0
}

/// One GELF log event
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    version: GelfVersion,
    host: String,
    timestamp: f64,
    level: LogLevel,
    short_message: String,
    full_message: Option<String>,
    facility: Option<String>,
    file: Option<String>,
    line: Option<u32>,
    additionals: HashMap<String, FieldValue>,
}

impl Message {
    /// Create a message stamped with the current time and local host name
    pub fn new() -> Self {
        Self {
            version: GelfVersion::default(),
            host: local_hostname(),
            timestamp: now_seconds(),
            level: LogLevel::default(),
            short_message: String::new(),
            full_message: None,
            facility: None,
            file: None,
            line: None,
            additionals: HashMap::new(),
        }
    }

    pub fn version(&self) -> GelfVersion {
        self.version
    }

    pub fn set_version(&mut self, version: GelfVersion) {
        self.version = version;
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
    }

    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: f64) {
        self.timestamp = timestamp;
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    /// Set the level from a raw framework code
    ///
    /// Fails with `InvalidLevel` and keeps the current level if the code is not
    /// a recognized level.
    pub fn set_level_code(&mut self, code: u32) -> Result<()> {
        self.level = LogLevel::from_code(code)?;
        Ok(())
    }

    /// Syslog severity sent in the `level` field
    pub fn syslog_level(&self) -> SyslogLevel {
        LevelMapper::syslog_level_for(self.level)
    }

    pub fn short_message(&self) -> &str {
        &self.short_message
    }

    pub fn set_short_message(&mut self, message: impl Into<String>) {
        self.short_message = message.into();
    }

    pub fn full_message(&self) -> Option<&str> {
        self.full_message.as_deref()
    }

    pub fn set_full_message(&mut self, message: impl Into<String>) {
        self.full_message = Some(message.into());
    }

    pub fn facility(&self) -> Option<&str> {
        self.facility.as_deref()
    }

    pub fn set_facility(&mut self, facility: impl Into<String>) {
        self.facility = Some(facility.into());
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn set_file(&mut self, file: impl Into<String>) {
        self.file = Some(file.into());
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }

    pub fn set_line(&mut self, line: u32) {
        self.line = Some(line);
    }

    /// Upsert an additional field; the key is stored without the `_` wire prefix
    pub fn set_additional<K, V>(&mut self, key: K, value: V) -> Result<()>
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let key = key.into();
        if key.is_empty() {
            return Err(GelfError::EmptyKey);
        }
        self.additionals.insert(key, value.into());
        Ok(())
    }

    pub fn get_additional(&self, key: &str) -> Result<&FieldValue> {
        self.additionals
            .get(key)
            .ok_or_else(|| GelfError::undefined_key(key))
    }

    pub fn has_additional(&self, key: &str) -> bool {
        self.additionals.contains_key(key)
    }

    pub fn additionals(&self) -> &HashMap<String, FieldValue> {
        &self.additionals
    }

    /// Build the wire mapping for this message
    pub fn to_payload(&self) -> Payload {
        let optional_text =
            |value: &Option<String>| value.clone().map(Value::String).unwrap_or(Value::Null);

        let base = [
            ("version", Value::String(self.version.as_str().to_string())),
            ("host", Value::String(self.host.clone())),
            ("short_message", Value::String(self.short_message.clone())),
            ("full_message", optional_text(&self.full_message)),
            ("level", Value::from(self.syslog_level().severity())),
            ("timestamp", FieldValue::Float(self.timestamp).to_json_value()),
            ("facility", optional_text(&self.facility)),
            ("file", optional_text(&self.file)),
            ("line", self.line.map(Value::from).unwrap_or(Value::Null)),
        ];

        let mut payload: Payload = self
            .additionals
            .iter()
            .map(|(key, value)| (format!("_{}", key), value.to_json_value()))
            .collect();

        for (key, value) in base {
            if is_empty_value(&value) {
                continue;
            }
            let key = if self.version.prefixes_legacy_fields() && LEGACY_FIELDS.contains(&key) {
                format!("_{}", key)
            } else {
                key.to_string()
            };
            payload.insert(key, value);
        }

        payload.retain(|_, value| !is_empty_value(value));
        payload
    }

    /// Encode the payload as a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_payload())?)
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_payload().serialize(serializer)
    }
}

/// Values the payload never carries; `false` and zero are significant
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
