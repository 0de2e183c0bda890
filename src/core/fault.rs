//! Error and panic values captured for export
//!
//! A [`Fault`] is the snapshot of a failure taken at the point it was logged:
//! what kind of failure it was, the concrete type name, its message, a trace and
//! the source location it originated from.

use backtrace::Backtrace;
use std::any::Any;
use std::fmt;
use std::panic::Location;

/// Whether a fault is a low-level failure or an ordinary error value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Low-level fault such as a panic
    Error,
    /// Error value returned through normal control flow
    Exception,
}

impl FaultKind {
    pub fn label(&self) -> &'static str {
        match self {
            FaultKind::Error => "Error",
            FaultKind::Exception => "Exception",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    kind: FaultKind,
    type_name: String,
    message: String,
    trace: String,
    file: Option<String>,
    line: Option<u32>,
}

impl Fault {
    pub fn new(kind: FaultKind, type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            type_name: type_name.into(),
            message: message.into(),
            trace: String::new(),
            file: None,
            line: None,
        }
    }

    /// Capture an error value at the caller's location
    ///
    /// The message includes the chain of `source()` errors and the trace is a
    /// backtrace taken here. The recorded file and line are those of the call
    /// to `from_error`, not of the place the error was constructed; use
    /// [`Fault::at`] when the origin is known.
    #[track_caller]
    pub fn from_error<E>(err: &E) -> Self
    where
        E: std::error::Error + 'static,
    {
        let location = Location::caller();

        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        Self::new(FaultKind::Exception, std::any::type_name::<E>(), message)
            .with_trace(format!("{:?}", Backtrace::new()))
            .at(location.file(), location.line())
    }

    /// Capture a panic payload as returned by `std::panic::catch_unwind`
    #[track_caller]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let location = Location::caller();
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        Self::new(FaultKind::Error, "panic", message)
            .with_trace(format!("{:?}", Backtrace::new()))
            .at(location.file(), location.line())
    }

    #[must_use]
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = trace.into();
        self
    }

    #[must_use]
    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    pub fn kind(&self) -> FaultKind {
        self.kind
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace(&self) -> &str {
        &self.trace
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// One-line summary: `<Error|Exception> <type> <message>`
    pub fn summary(&self) -> String {
        format!("{} {} {}", self.kind.label(), self.type_name, self.message)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}
