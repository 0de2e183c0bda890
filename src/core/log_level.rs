//! Log level definitions
//!
//! [`LogLevel`] is the application's own severity scale, [`SyslogLevel`] is the
//! eight-step scale carried by the GELF `level` field, and [`LevelMapper`] is the
//! fixed translation between the two.

use super::error::{GelfError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Internal severity of an application log record.
///
/// The numeric codes are the bit flags used by the host logging framework, so a
/// level received as a raw integer can be checked with [`LogLevel::from_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[derive(Default)]
pub enum LogLevel {
    #[default]
    Error = 0x01,
    Warning = 0x02,
    Info = 0x04,
    Trace = 0x08,
    Profile = 0x40,
    ProfileBegin = 0x50,
    ProfileEnd = 0x60,
}

impl LogLevel {
    /// Every recognized level, in declaration order
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Trace,
        LogLevel::Profile,
        LogLevel::ProfileBegin,
        LogLevel::ProfileEnd,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Info => "info",
            LogLevel::Trace => "trace",
            LogLevel::Profile => "profile",
            LogLevel::ProfileBegin => "profile-begin",
            LogLevel::ProfileEnd => "profile-end",
        }
    }

    /// Raw framework code of this level
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Resolve a raw framework code, failing with `InvalidLevel` for anything else
    pub fn from_code(code: u32) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.code() == code)
            .ok_or_else(|| GelfError::invalid_level(format!("{:#x}", code)))
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = GelfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "info" => Ok(LogLevel::Info),
            "trace" => Ok(LogLevel::Trace),
            "profile" => Ok(LogLevel::Profile),
            "profile-begin" | "profile_begin" => Ok(LogLevel::ProfileBegin),
            "profile-end" | "profile_end" => Ok(LogLevel::ProfileEnd),
            _ => Err(GelfError::invalid_level(s)),
        }
    }
}

impl TryFrom<u32> for LogLevel {
    type Error = GelfError;

    fn try_from(code: u32) -> Result<Self> {
        LogLevel::from_code(code)
    }
}

/// Syslog severities as carried in the GELF `level` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SyslogLevel {
    /// system is unusable
    Emergency = 0,
    /// action must be taken immediately
    Alert = 1,
    /// critical conditions
    Critical = 2,
    /// error conditions
    Error = 3,
    /// warning conditions
    Warning = 4,
    /// normal, but significant condition
    Notice = 5,
    /// informational message
    Informational = 6,
    /// debug-level message
    Debug = 7,
}

impl SyslogLevel {
    /// Numeric severity in `0..=7`
    pub fn severity(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for SyslogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyslogLevel::Emergency => "EMERGENCY",
            SyslogLevel::Alert => "ALERT",
            SyslogLevel::Critical => "CRITICAL",
            SyslogLevel::Error => "ERROR",
            SyslogLevel::Warning => "WARNING",
            SyslogLevel::Notice => "NOTICE",
            SyslogLevel::Informational => "INFORMATIONAL",
            SyslogLevel::Debug => "DEBUG",
        };
        write!(f, "{}", name)
    }
}

/// Fixed translation from internal levels to syslog severities
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelMapper;

impl LevelMapper {
    pub fn syslog_level_for(level: LogLevel) -> SyslogLevel {
        match level {
            LogLevel::Error => SyslogLevel::Error,
            LogLevel::Warning => SyslogLevel::Warning,
            LogLevel::Info => SyslogLevel::Informational,
            LogLevel::Trace
            | LogLevel::Profile
            | LogLevel::ProfileBegin
            | LogLevel::ProfileEnd => SyslogLevel::Debug,
        }
    }

    /// Map a raw framework code, failing with `UnknownLevel` if it has no mapping
    pub fn syslog_level_for_code(code: u32) -> Result<SyslogLevel> {
        LogLevel::from_code(code)
            .map(Self::syslog_level_for)
            .map_err(|_| GelfError::unknown_level(format!("{:#x}", code)))
    }
}
