//! Validates messages and fans them out to transports

use super::error::{GelfError, Result};
use super::message::Message;
use super::transport::Transport;
use super::validator::{GelfValidator, MessageValidator};

pub struct Publisher {
    validator: Box<dyn MessageValidator>,
    transports: Vec<Box<dyn Transport>>,
}

impl Publisher {
    pub fn new(validator: Box<dyn MessageValidator>) -> Self {
        Self {
            validator,
            transports: Vec::new(),
        }
    }

    pub fn add_transport(&mut self, transport: Box<dyn Transport>) {
        self.transports.push(transport);
    }

    pub fn transport_count(&self) -> usize {
        self.transports.len()
    }

    /// Validate, encode once, and send to every transport in order
    ///
    /// The first transport failure stops delivery and is returned as-is.
    pub fn publish(&mut self, message: &Message) -> Result<()> {
        if self.transports.is_empty() {
            return Err(GelfError::config(
                "Publisher",
                "at least one transport is required",
            ));
        }

        self.validator.validate(message)?;
        let encoded = message.to_json()?;

        for transport in self.transports.iter_mut() {
            tracing::trace!(
                transport = transport.name(),
                bytes = encoded.len(),
                "sending GELF message"
            );
            transport.send(encoded.as_bytes())?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        for transport in self.transports.iter_mut() {
            transport.flush()?;
        }
        Ok(())
    }
}

impl Default for Publisher {
    fn default() -> Self {
        Self::new(Box::new(GelfValidator::new()))
    }
}
