//! Conversion of raw log records into GELF messages

use super::error::Result;
use super::fault::Fault;
use super::field_value::FieldValue;
use super::log_record::{LogRecord, RecordPayload, StructuredPayload};
use super::message::{GelfVersion, Message};

/// Named keys of a structured payload that feed the message text
const SHORT_KEY: &str = "short";
const FULL_KEY: &str = "full";

/// Additional field carrying the record's category
pub const CATEGORY_FIELD: &str = "category";

/// Builds [`Message`]s from [`LogRecord`]s
///
/// The message host is the configured application name, falling back to the
/// application identifier.
#[derive(Debug, Clone)]
pub struct MessageFactory {
    host: String,
    version: GelfVersion,
}

impl MessageFactory {
    pub fn new(app_name: Option<String>, app_id: impl Into<String>, version: GelfVersion) -> Self {
        let host = app_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| app_id.into());
        Self { host, version }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn version(&self) -> GelfVersion {
        self.version
    }

    pub fn create_message(&self, record: &LogRecord) -> Result<Message> {
        let mut message = Message::new();
        message.set_level(record.level);
        message.set_timestamp(record.time);
        message.set_version(self.version);
        message.set_host(self.host.clone());

        match &record.payload {
            RecordPayload::Fault(fault) => apply_fault(&mut message, fault),
            RecordPayload::Text(text) => message.set_short_message(text.clone()),
            RecordPayload::Structured(payload) => {
                apply_structured(&mut message, payload.clone())?
            }
        }

        message.set_additional(CATEGORY_FIELD, record.category.clone())?;
        Ok(message)
    }
}

fn apply_fault(message: &mut Message, fault: &Fault) {
    message.set_short_message(fault.summary());
    message.set_full_message(fault.trace());
    if let Some(file) = fault.file() {
        message.set_file(file);
    }
    if let Some(line) = fault.line() {
        message.set_line(line);
    }
}

fn apply_structured(message: &mut Message, mut payload: StructuredPayload) -> Result<()> {
    let preferred = payload
        .get_named(SHORT_KEY)
        .filter(|short| short.is_truthy())
        .or_else(|| payload.get_index(0).filter(|first| first.is_truthy()))
        .map(FieldValue::to_text);
    let short = match preferred {
        Some(short) => short,
        None => payload.shift().map(|v| v.to_text()).unwrap_or_default(),
    };
    message.set_short_message(short);

    if let Some(full) = payload.get_named(FULL_KEY).filter(|full| full.is_truthy()) {
        message.set_full_message(full.to_text());
    }

    for (key, value) in payload.iter() {
        if key.is_name(SHORT_KEY) || key.is_name(FULL_KEY) || key.is_index(0) {
            continue;
        }
        // An empty name has no field to land on; the rest of the record still goes out
        if key.is_name("") {
            tracing::debug!("skipping structured entry with an empty key");
            continue;
        }
        message.set_additional(key.to_string(), value.clone())?;
    }
    Ok(())
}
