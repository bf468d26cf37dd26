//! Logging sink consumed by the builder, catcher and facade
//!
//! Misstep talks to a [`Logger`] with npm-style levels. RFC 5424 syslog
//! names are accepted wherever a level is parsed and map onto the closest
//! npm level. The default [`TracingLogger`] forwards everything to `tracing`,
//! so a subscriber installed by the application decides where the output
//! ends up.

use crate::logging::{log_debug, log_error, log_info, log_trace, log_warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sink for user-visible misstep output.
#[cfg_attr(test, mockall::automock)]
pub trait Logger: Send + Sync {
    fn error(&self, message: &str);
    fn warn(&self, message: &str);
    fn info(&self, message: &str);
    fn verbose(&self, message: &str);
    fn debug(&self, message: &str);
    fn silly(&self, message: &str);
}

/// npm logging levels, most severe first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    #[default]
    Info = 2,
    Verbose = 3,
    Debug = 4,
    Silly = 5,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Verbose,
        Self::Debug,
        Self::Silly,
    ];

    /// Numeric npm severity (0 = error).
    pub fn severity(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Verbose => "verbose",
            Self::Debug => "debug",
            Self::Silly => "silly",
        }
    }

    /// Closest RFC 5424 severity.
    pub fn syslog(self) -> SyslogLevel {
        match self {
            Self::Error => SyslogLevel::Error,
            Self::Warn => SyslogLevel::Warn,
            Self::Info => SyslogLevel::Info,
            Self::Verbose | Self::Debug | Self::Silly => SyslogLevel::Debug,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .map_or_else(|| s.parse::<SyslogLevel>().map(Self::from), Ok)
            .map_err(|_| format!("unknown log level: {s}"))
    }
}

/// RFC 5424 syslog severities, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyslogLevel {
    Emerg = 0,
    Alert = 1,
    Crit = 2,
    Error = 3,
    Warn = 4,
    Notice = 5,
    Info = 6,
    Debug = 7,
}

impl SyslogLevel {
    pub const ALL: [SyslogLevel; 8] = [
        Self::Emerg,
        Self::Alert,
        Self::Crit,
        Self::Error,
        Self::Warn,
        Self::Notice,
        Self::Info,
        Self::Debug,
    ];

    pub fn severity(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Emerg => "emerg",
            Self::Alert => "alert",
            Self::Crit => "crit",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Notice => "notice",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl From<SyslogLevel> for LogLevel {
    fn from(level: SyslogLevel) -> Self {
        match level {
            SyslogLevel::Emerg | SyslogLevel::Alert | SyslogLevel::Crit | SyslogLevel::Error => {
                Self::Error
            }
            SyslogLevel::Warn => Self::Warn,
            SyslogLevel::Notice | SyslogLevel::Info => Self::Info,
            SyslogLevel::Debug => Self::Debug,
        }
    }
}

impl fmt::Display for SyslogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyslogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown syslog level: {s}"))
    }
}

/// [`Logger`] backed by `tracing`.
///
/// `verbose` and `debug` map to DEBUG, `silly` to TRACE. Messages less severe
/// than `max_level` are dropped before reaching `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger {
    pub max_level: LogLevel,
}

impl TracingLogger {
    pub fn new(max_level: LogLevel) -> Self {
        Self { max_level }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.max_level
    }
}

impl Logger for TracingLogger {
    fn error(&self, message: &str) {
        if self.enabled(LogLevel::Error) {
            log_error!(target: "misstep", "{message}");
        }
    }

    fn warn(&self, message: &str) {
        if self.enabled(LogLevel::Warn) {
            log_warn!(target: "misstep", "{message}");
        }
    }

    fn info(&self, message: &str) {
        if self.enabled(LogLevel::Info) {
            log_info!(target: "misstep", "{message}");
        }
    }

    fn verbose(&self, message: &str) {
        if self.enabled(LogLevel::Verbose) {
            log_debug!(target: "misstep", npm_level = "verbose", "{message}");
        }
    }

    fn debug(&self, message: &str) {
        if self.enabled(LogLevel::Debug) {
            log_debug!(target: "misstep", "{message}");
        }
    }

    fn silly(&self, message: &str) {
        if self.enabled(LogLevel::Silly) {
            log_trace!(target: "misstep", "{message}");
        }
    }
}
