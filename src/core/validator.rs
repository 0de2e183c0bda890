//! Message validation before dispatch

use super::error::{GelfError, Result};
use super::message::Message;

/// Checks a message before it is handed to any transport
pub trait MessageValidator: Send + Sync {
    fn validate(&self, message: &Message) -> Result<()>;
}

/// Default GELF rules
///
/// `version`, `host` and `short_message` must be non-empty, and every
/// additional field key must consist of ASCII letters, digits, `_`, `.` or `-`
/// and must not be `id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GelfValidator;

impl GelfValidator {
    pub fn new() -> Self {
        Self
    }

    fn is_valid_key(key: &str) -> bool {
        !key.is_empty()
            && key != "id"
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    }
}

impl MessageValidator for GelfValidator {
    fn validate(&self, message: &Message) -> Result<()> {
        if message.host().is_empty() {
            return Err(GelfError::validation("host not set"));
        }
        if message.short_message().is_empty() {
            return Err(GelfError::validation("short_message not set"));
        }

        let mut keys: Vec<&String> = message.additionals().keys().collect();
        keys.sort();
        if let Some(key) = keys.into_iter().find(|key| !Self::is_valid_key(key)) {
            return Err(GelfError::validation(format!(
                "additional field key '{}' is invalid",
                key
            )));
        }
        Ok(())
    }
}

/// Accepts every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopValidator;

impl MessageValidator for NoopValidator {
    fn validate(&self, _message: &Message) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_message() -> Message {
        let mut message = Message::new();
        message.set_host("svc1");
        message.set_short_message("hello");
        message
    }

    #[test]
    fn test_valid_message() {
        let mut message = valid_message();
        message.set_additional("request.id", "abc").unwrap();
        message.set_additional("user-name_2", "bob").unwrap();
        assert!(GelfValidator::new().validate(&message).is_ok());
    }

    #[test]
    fn test_missing_short_message() {
        let mut message = valid_message();
        message.set_short_message("");
        let err = GelfValidator::new().validate(&message).unwrap_err();
        assert!(matches!(err, GelfError::ValidationFailed { .. }));
        assert!(err.to_string().contains("short_message"));
    }

    #[test]
    fn test_missing_host() {
        let mut message = valid_message();
        message.set_host("");
        assert!(GelfValidator::new().validate(&message).is_err());
    }

    #[test]
    fn test_reserved_and_malformed_keys() {
        let mut message = valid_message();
        message.set_additional("id", 1).unwrap();
        assert!(GelfValidator::new().validate(&message).is_err());

        let mut message = valid_message();
        message.set_additional("with space", 1).unwrap();
        assert!(GelfValidator::new().validate(&message).is_err());
    }

    #[test]
    fn test_noop_validator() {
        let mut message = Message::new();
        message.set_short_message("");
        assert!(NoopValidator.validate(&message).is_ok());
    }
}
