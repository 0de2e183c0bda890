//! GELF export target
//!
//! [`GelfTarget`] drives one export cycle: each record is turned into a
//! [`Message`], passed through the optional before-publish hook, published to
//! every transport, and then shown to the optional after-publish hook.
//! Records are processed in the order they are supplied and the first error
//! ends the cycle.

use super::{
    error::{GelfError, Result},
    log_record::LogRecord,
    message::{local_hostname, GelfVersion, Message},
    message_factory::MessageFactory,
    metrics::TargetMetrics,
    publisher::Publisher,
    transport::Transport,
    validator::{GelfValidator, MessageValidator},
};
use parking_lot::Mutex;
use std::borrow::Borrow;
use std::sync::Arc;

/// Hook run before a message is published; it may adjust the message
pub type BeforePublishHook = Arc<dyn Fn(&mut Message) + Send + Sync>;

/// Hook run after a message was delivered to every transport
pub type AfterPublishHook = Arc<dyn Fn(&Message) + Send + Sync>;

pub struct GelfTarget {
    factory: MessageFactory,
    publisher: Mutex<Publisher>,
    before_publish: Option<BeforePublishHook>,
    after_publish: Option<AfterPublishHook>,
    metrics: Arc<TargetMetrics>,
}

impl GelfTarget {
    #[must_use]
    pub fn builder() -> GelfTargetBuilder {
        GelfTargetBuilder::new()
    }

    /// Export records in order, returning how many were published
    pub fn export<I>(&self, records: I) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: Borrow<LogRecord>,
    {
        let mut published = 0;
        for record in records {
            self.export_record(record.borrow())?;
            published += 1;
        }
        tracing::debug!(published, "GELF export cycle complete");
        Ok(published)
    }

    pub fn export_record(&self, record: &LogRecord) -> Result<()> {
        let message = self.factory.create_message(record).inspect_err(|_| {
            self.metrics.record_rejected();
        })?;
        self.publish_message(message)
    }

    /// Run the hooks around publishing an already built message
    pub fn publish_message(&self, mut message: Message) -> Result<()> {
        if let Some(hook) = &self.before_publish {
            hook(&mut message);
        }

        let result = self.publisher.lock().publish(&message);
        match result {
            Ok(()) => {
                self.metrics.record_published();
            }
            Err(e) => {
                if matches!(e, GelfError::ValidationFailed { .. }) {
                    self.metrics.record_rejected();
                } else {
                    self.metrics.record_failed();
                }
                tracing::debug!(error = %e, "GELF message not published");
                return Err(e);
            }
        }

        if let Some(hook) = &self.after_publish {
            hook(&message);
        }
        Ok(())
    }

    pub fn flush(&self) -> Result<()> {
        self.publisher.lock().flush()
    }

    pub fn factory(&self) -> &MessageFactory {
        &self.factory
    }

    pub fn metrics(&self) -> &TargetMetrics {
        &self.metrics
    }

    pub fn published_count(&self) -> u64 {
        self.metrics.published_count()
    }
}

/// Builder for [`GelfTarget`]
///
/// # Example
///
/// ```no_run
/// use rust_gelf_target::prelude::*;
/// use rust_gelf_target::transports::UdpTransport;
///
/// let target = GelfTarget::builder()
///     .app_name("billing")
///     .transport(UdpTransport::new("graylog.internal", 12201)?)
///     .build()?;
///
/// target.export_record(&LogRecord::new("invoice sent", LogLevel::Info, "billing"))?;
/// # Ok::<(), GelfError>(())
/// ```
pub struct GelfTargetBuilder {
    app_name: Option<String>,
    app_id: Option<String>,
    version: GelfVersion,
    validator: Option<Box<dyn MessageValidator>>,
    transports: Vec<Box<dyn Transport>>,
    before_publish: Option<BeforePublishHook>,
    after_publish: Option<AfterPublishHook>,
}

impl GelfTargetBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            app_name: None,
            app_id: None,
            version: GelfVersion::default(),
            validator: None,
            transports: Vec::new(),
            before_publish: None,
            after_publish: None,
        }
    }

    /// Application name used as the message host
    #[must_use]
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Host fallback when no application name is set
    ///
    /// Defaults to the local host name.
    #[must_use]
    pub fn app_id(mut self, id: impl Into<String>) -> Self {
        self.app_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn version(mut self, version: GelfVersion) -> Self {
        self.version = version;
        self
    }

    /// Replace the default [`GelfValidator`]
    #[must_use]
    pub fn validator<V: MessageValidator + 'static>(mut self, validator: V) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    #[must_use]
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transports.push(Box::new(transport));
        self
    }

    #[must_use]
    pub fn boxed_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transports.push(transport);
        self
    }

    #[must_use]
    pub fn before_publish<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Message) + Send + Sync + 'static,
    {
        self.before_publish = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn after_publish<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Message) + Send + Sync + 'static,
    {
        self.after_publish = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> Result<GelfTarget> {
        if self.transports.is_empty() {
            return Err(GelfError::config(
                "GelfTarget",
                "at least one transport is required",
            ));
        }

        let app_id = self.app_id.unwrap_or_else(local_hostname);
        let factory = MessageFactory::new(self.app_name, app_id, self.version);

        let validator = self
            .validator
            .unwrap_or_else(|| Box::new(GelfValidator::new()));
        let mut publisher = Publisher::new(validator);
        for transport in self.transports {
            publisher.add_transport(transport);
        }

        Ok(GelfTarget {
            factory,
            publisher: Mutex::new(publisher),
            before_publish: self.before_publish,
            after_publish: self.after_publish,
            metrics: Arc::new(TargetMetrics::new()),
        })
    }
}

impl Default for GelfTargetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_level::LogLevel;
    use crate::core::validator::NoopValidator;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Default)]
    struct RecordingTransport {
        sent: Arc<Mutex<Vec<serde_json::Value>>>,
    }

    impl Transport for RecordingTransport {
        fn send(&mut self, payload: &[u8]) -> Result<()> {
            self.sent.lock().push(serde_json::from_slice(payload)?);
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    #[test]
    fn test_build_requires_transport() {
        let result = GelfTarget::builder().app_name("svc1").build();
        assert!(matches!(
            result,
            Err(GelfError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_export_in_order() {
        let transport = RecordingTransport::default();
        let target = GelfTarget::builder()
            .app_name("svc1")
            .transport(transport.clone())
            .build()
            .unwrap();

        let records: Vec<LogRecord> = (0..3)
            .map(|i| LogRecord::new(format!("message {}", i), LogLevel::Info, "app"))
            .collect();
        assert_eq!(target.export(&records).unwrap(), 3);

        let sent = transport.sent.lock();
        let texts: Vec<&str> = sent
            .iter()
            .map(|v| v["short_message"].as_str().unwrap())
            .collect();
        assert_eq!(texts, vec!["message 0", "message 1", "message 2"]);
        assert_eq!(sent[0]["host"], "svc1");
        assert_eq!(target.published_count(), 3);
    }

    #[test]
    fn test_empty_structured_key_does_not_stop_export() {
        let transport = RecordingTransport::default();
        let target = GelfTarget::builder()
            .app_name("svc1")
            .transport(transport.clone())
            .build()
            .unwrap();

        let records = vec![
            LogRecord::new(
                crate::structured! { "short" => "S", "" => "v" },
                LogLevel::Info,
                "app",
            ),
            LogRecord::new("next", LogLevel::Info, "app"),
        ];
        assert_eq!(target.export(&records).unwrap(), 2);

        let sent = transport.sent.lock();
        assert_eq!(sent[0]["short_message"], "S");
        assert!(sent[0].get("_").is_none());
        assert_eq!(sent[1]["short_message"], "next");
        assert_eq!(target.metrics().rejected_count(), 0);
    }

    #[test]
    fn test_host_falls_back_to_app_id() {
        let target = GelfTarget::builder()
            .app_id("fallback-id")
            .transport(RecordingTransport::default())
            .build()
            .unwrap();
        assert_eq!(target.factory().host(), "fallback-id");
    }

    #[test]
    fn test_hooks_run_around_publish() {
        let transport = RecordingTransport::default();
        let after_calls = Arc::new(AtomicUsize::new(0));
        let after_clone = Arc::clone(&after_calls);

        let target = GelfTarget::builder()
            .app_name("svc1")
            .transport(transport.clone())
            .before_publish(|message| {
                message.set_additional("env", "test").unwrap();
            })
            .after_publish(move |message| {
                assert!(message.has_additional("env"));
                after_clone.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();

        target
            .export_record(&LogRecord::new("hello", LogLevel::Info, "app"))
            .unwrap();

        assert_eq!(transport.sent.lock()[0]["_env"], "test");
        assert_eq!(after_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_rejected_message_skips_after_hook() {
        let after_calls = Arc::new(AtomicUsize::new(0));
        let after_clone = Arc::clone(&after_calls);

        let target = GelfTarget::builder()
            .app_name("svc1")
            .transport(RecordingTransport::default())
            .after_publish(move |_| {
                after_clone.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();

        let err = target
            .export_record(&LogRecord::new("", LogLevel::Info, "app"))
            .unwrap_err();

        assert!(matches!(err, GelfError::ValidationFailed { .. }));
        assert_eq!(after_calls.load(Ordering::SeqCst), 0);
        assert_eq!(target.metrics().rejected_count(), 1);
    }

    #[test]
    fn test_custom_validator() {
        let transport = RecordingTransport::default();
        let target = GelfTarget::builder()
            .app_name("svc1")
            .validator(NoopValidator)
            .transport(transport.clone())
            .build()
            .unwrap();

        target
            .export_record(&LogRecord::new("", LogLevel::Info, "app"))
            .unwrap();
        assert_eq!(transport.sent.lock().len(), 1);
    }
}
