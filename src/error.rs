//! Error types for misstep configuration.
//!
//! Resolving a type string and constructing an error never fail: unknown
//! types degrade to partial resolutions and the fallback error kind. The
//! errors in this module are raised only while a [`Builder`](crate::Builder),
//! [`Catcher`](crate::Catcher) or [`Misstep`](crate::Misstep) is being set up.
//!
//! # Example
//!
//! ```rust
//! use misstep::{Builder, BuilderOptions, MisstepError};
//!
//! let options = BuilderOptions {
//!     types: Some(Vec::new()),
//!     ..Default::default()
//! };
//!
//! match Builder::new(options) {
//!     Err(MisstepError::ConfigurationError { failures, .. }) => {
//!         assert_eq!(failures[0].keyword, "minItems");
//!         assert_eq!(failures[0].path, ".types");
//!     }
//!     _ => unreachable!("empty types must be refused"),
//! }
//! ```

use crate::logging::{log_error, log_warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Convenient result type for misstep setup operations.
pub type MisstepResult<T> = std::result::Result<T, MisstepError>;

/// One violated validation rule.
///
/// `path` points at the offending field using the same notation as the
/// options it came from (`.types[0].key`, `.enum[1].children[0]`), and
/// `keyword` names the rule (`minItems`, `pattern`, `uniqueName`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub path: String,
    pub keyword: String,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(
        path: impl Into<String>,
        keyword: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            keyword: keyword.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.path, self.keyword, self.message)
    }
}

/// Errors raised while configuring misstep components.
///
/// | Variant | When |
/// |---------|------|
/// | `ConfigurationError` | Options failed validation |
/// | `InvalidEnumDocument` | An enum JSON document could not be parsed |
/// | `Io` | A configuration file could not be read |
#[derive(Error, Debug)]
pub enum MisstepError {
    /// Construction options did not pass validation.
    ///
    /// `failures` lists every violated rule, not only the first one.
    #[error("Misstep.{component} options did not pass validation: {}", summarize(.failures))]
    ConfigurationError {
        /// Component whose options were refused ("Builder", "Catcher", "Misstep").
        component: &'static str,
        /// Every rule the options violated.
        failures: Vec<ValidationFailure>,
    },

    /// An enum tree document is not valid JSON or does not match the node shape.
    #[error("Invalid enum document: {message}")]
    InvalidEnumDocument {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// A configuration file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn summarize(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl MisstepError {
    /// Keyword/path pairs of a configuration error, empty for other variants.
    pub fn failures(&self) -> &[ValidationFailure] {
        match self {
            Self::ConfigurationError { failures, .. } => failures,
            _ => &[],
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    /// Create a configuration error (logs at ERROR level).
    pub fn configuration_error(component: &'static str, failures: Vec<ValidationFailure>) -> Self {
        log_error!(
            error_type = "configuration_error",
            component = component,
            failure_count = failures.len(),
            first_path = failures.first().map(|f| f.path.as_str()).unwrap_or(""),
            "Misstep options did not pass validation"
        );
        Self::ConfigurationError {
            component,
            failures,
        }
    }

    pub fn invalid_enum_document(source: serde_json::Error) -> Self {
        let message = source.to_string();
        log_warn!(
            error_type = "invalid_enum_document",
            message = %message,
            "Enum document could not be parsed"
        );
        Self::InvalidEnumDocument { message, source }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        log_error!(
            error_type = "io",
            path = %path.display(),
            error = %source,
            "Misstep configuration file could not be read"
        );
        Self::Io { path, source }
    }
}
