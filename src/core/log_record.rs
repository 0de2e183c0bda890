//! Raw application log records
//!
//! A [`LogRecord`] is what the host logging framework hands over for export:
//! a payload, its internal level, a category and the time it was produced.

use super::fault::Fault;
use super::field_value::FieldValue;
use super::log_level::LogLevel;
use super::message::now_seconds;
use std::fmt;

/// Key of an entry in a [`StructuredPayload`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PayloadKey {
    Index(usize),
    Name(String),
}

impl PayloadKey {
    pub fn is_index(&self, index: usize) -> bool {
        matches!(self, PayloadKey::Index(i) if *i == index)
    }

    pub fn is_name(&self, name: &str) -> bool {
        matches!(self, PayloadKey::Name(n) if n == name)
    }
}

impl fmt::Display for PayloadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadKey::Index(i) => write!(f, "{}", i),
            PayloadKey::Name(n) => write!(f, "{}", n),
        }
    }
}

impl From<usize> for PayloadKey {
    fn from(index: usize) -> Self {
        PayloadKey::Index(index)
    }
}

impl From<&str> for PayloadKey {
    fn from(name: &str) -> Self {
        PayloadKey::Name(name.to_string())
    }
}

impl From<String> for PayloadKey {
    fn from(name: String) -> Self {
        PayloadKey::Name(name)
    }
}

/// Ordered mapping mixing positional and named entries
///
/// Entries keep insertion order. Pushing appends at the next free position
/// index, one past the highest index in use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredPayload {
    entries: Vec<(PayloadKey, FieldValue)>,
}

impl StructuredPayload {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a value at the next positional index
    pub fn push(&mut self, value: impl Into<FieldValue>) {
        let index = self.next_index();
        self.entries.push((PayloadKey::Index(index), value.into()));
    }

    /// Insert or replace the value stored under `key`
    pub fn insert(&mut self, key: impl Into<PayloadKey>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<PayloadKey>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &PayloadKey) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_named(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.is_name(name))
            .map(|(_, v)| v)
    }

    pub fn get_index(&self, index: usize) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.is_index(index))
            .map(|(_, v)| v)
    }

    /// Remove and return the first entry's value
    ///
    /// Remaining positional entries are renumbered from zero in order; named
    /// entries keep their keys.
    pub fn shift(&mut self) -> Option<FieldValue> {
        if self.entries.is_empty() {
            return None;
        }
        let (_, value) = self.entries.remove(0);

        let mut next = 0;
        for (key, _) in self.entries.iter_mut() {
            if let PayloadKey::Index(i) = key {
                *i = next;
                next += 1;
            }
        }
        Some(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PayloadKey, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn next_index(&self) -> usize {
        self.entries
            .iter()
            .filter_map(|(k, _)| match k {
                PayloadKey::Index(i) => Some(i + 1),
                PayloadKey::Name(_) => None,
            })
            .max()
            .unwrap_or(0)
    }
}

impl<V: Into<FieldValue>> From<Vec<V>> for StructuredPayload {
    fn from(values: Vec<V>) -> Self {
        let mut payload = StructuredPayload::new();
        for value in values {
            payload.push(value);
        }
        payload
    }
}

impl<K, V> FromIterator<(K, V)> for StructuredPayload
where
    K: Into<PayloadKey>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = StructuredPayload::new();
        for (key, value) in iter {
            payload.insert(key, value);
        }
        payload
    }
}

/// What a log record carries
#[derive(Debug, Clone, PartialEq)]
pub enum RecordPayload {
    Text(String),
    Fault(Fault),
    Structured(StructuredPayload),
}

impl From<String> for RecordPayload {
    fn from(s: String) -> Self {
        RecordPayload::Text(s)
    }
}

impl From<&str> for RecordPayload {
    fn from(s: &str) -> Self {
        RecordPayload::Text(s.to_string())
    }
}

impl From<Fault> for RecordPayload {
    fn from(fault: Fault) -> Self {
        RecordPayload::Fault(fault)
    }
}

impl From<StructuredPayload> for RecordPayload {
    fn from(payload: StructuredPayload) -> Self {
        RecordPayload::Structured(payload)
    }
}

/// One record handed over by the host logging framework
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub payload: RecordPayload,
    pub level: LogLevel,
    pub category: String,
    /// Seconds since the epoch, fractional
    pub time: f64,
}

impl LogRecord {
    /// Create a record stamped with the current time
    pub fn new(
        payload: impl Into<RecordPayload>,
        level: LogLevel,
        category: impl Into<String>,
    ) -> Self {
        Self {
            payload: payload.into(),
            level,
            category: category.into(),
            time: now_seconds(),
        }
    }

    #[must_use]
    pub fn at(mut self, time: f64) -> Self {
        self.time = time;
        self
    }
}
