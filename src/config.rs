//! Facade configuration and environment loading
//!
//! [`MisstepOptions`] gathers the logger, builder and catcher options for
//! [`Misstep`](crate::Misstep). It can be assembled in code or loaded from
//! the environment:
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `MISSTEP_ENUM_PATH` | JSON file holding an array of custom enum categories |
//! | `MISSTEP_LOG_LEVEL` | npm level for the default logger (`info` when unset) |
//! | `MISSTEP_SKIP_VALIDATE` | `true`/`1`/`yes` to skip option validation |
//! | `MISSTEP_NO_WARN` | `true`/`1`/`yes` to silence the skip-validation warning |

use crate::builder::BuilderOptions;
use crate::catcher::CatcherOptions;
use crate::core_types::enum_tree::{EnumNode, EnumTree};
use crate::error::{MisstepError, MisstepResult, ValidationFailure};
use crate::logger::{LogLevel, Logger};
use crate::logging::log_debug;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

pub const ENV_ENUM_PATH: &str = "MISSTEP_ENUM_PATH";
pub const ENV_LOG_LEVEL: &str = "MISSTEP_LOG_LEVEL";
pub const ENV_SKIP_VALIDATE: &str = "MISSTEP_SKIP_VALIDATE";
pub const ENV_NO_WARN: &str = "MISSTEP_NO_WARN";

/// Options for the [`Misstep`](crate::Misstep) facade.
///
/// When `logger` is `None` a [`TracingLogger`](crate::TracingLogger) at
/// `log_level` is created. Builder and catcher options without their own
/// logger share the facade's.
#[derive(Clone, Default)]
pub struct MisstepOptions {
    pub logger: Option<Arc<dyn Logger>>,
    pub log_level: LogLevel,
    pub builder: BuilderOptions,
    pub catcher: CatcherOptions,
    pub skip_validate: bool,
    pub no_warn: bool,
}

impl MisstepOptions {
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_builder(mut self, builder: BuilderOptions) -> Self {
        self.builder = builder;
        self
    }

    pub fn with_catcher(mut self, catcher: CatcherOptions) -> Self {
        self.catcher = catcher;
        self
    }

    /// Load options from `MISSTEP_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`MisstepError::ConfigurationError`] for an unknown log level,
    /// [`MisstepError::Io`] when the enum file cannot be read and
    /// [`MisstepError::InvalidEnumDocument`] when it cannot be parsed.
    pub fn from_env() -> MisstepResult<Self> {
        let mut options = Self::default();

        if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
            options.log_level = level.parse().map_err(|message: String| {
                MisstepError::configuration_error(
                    "Misstep",
                    vec![ValidationFailure::new(".log_level", "enum", message)],
                )
            })?;
        }

        if let Ok(path) = std::env::var(ENV_ENUM_PATH) {
            options.builder.enum_tree = Some(Self::load_enum_file(&path)?);
        }

        options.skip_validate = env_flag(ENV_SKIP_VALIDATE);
        options.no_warn = env_flag(ENV_NO_WARN);

        log_debug!(
            log_level = %options.log_level,
            has_custom_enum = options.builder.enum_tree.is_some(),
            skip_validate = options.skip_validate,
            "Loaded Misstep options from environment"
        );

        Ok(options)
    }

    /// Read a JSON array of enum categories from disk.
    pub fn load_enum_file(path: impl AsRef<Path>) -> MisstepResult<Vec<EnumNode>> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|source| MisstepError::io(path, source))?;
        EnumTree::nodes_from_json(&contents)
    }
}

impl fmt::Debug for MisstepOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MisstepOptions")
            .field("has_logger", &self.logger.is_some())
            .field("log_level", &self.log_level)
            .field("builder", &self.builder)
            .field("catcher", &self.catcher)
            .field("skip_validate", &self.skip_validate)
            .field("no_warn", &self.no_warn)
            .finish()
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}
