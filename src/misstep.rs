//! Process-wide facade wiring the logger, builder and catcher together

use crate::builder::Builder;
use crate::catcher::{BoundCatcher, CatchRequest, Catcher};
use crate::config::MisstepOptions;
use crate::core_types::errors::ErrorLike;
use crate::error::MisstepResult;
use crate::logger::{Logger, TracingLogger};
use crate::logging::log_debug;
use crate::resolver::Resolution;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

const SKIP_VALIDATE_WARNING: &str = "MisstepWarning: Overriding Misstep constructor options validation is not advised. It could result in runtime errors being thrown";

/// One logger, one builder, one catcher.
///
/// ```rust
/// use misstep::{CatchOptions, CatchRequest, Misstep, MisstepOptions};
/// use serde_json::json;
///
/// let misstep = Misstep::new(MisstepOptions::default())?;
///
/// let err = misstep.builder(json!({ "type": "RESPONSE:CLIENT:CONFLICT" }));
/// let outcome = misstep
///     .catcher(CatchRequest::named("barebone").with_options(CatchOptions::rejecting()))
///     .catch(err)?;
///
/// assert!(outcome.is_rejected());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Misstep {
    logger: Arc<dyn Logger>,
    builder: Builder,
    catcher: Catcher,
}

impl Misstep {
    /// # Errors
    ///
    /// Returns [`MisstepError::ConfigurationError`](crate::MisstepError::ConfigurationError)
    /// when the builder or catcher options fail validation.
    pub fn new(options: MisstepOptions) -> MisstepResult<Self> {
        let MisstepOptions {
            logger,
            log_level,
            mut builder,
            mut catcher,
            skip_validate,
            no_warn,
        } = options;

        let logger: Arc<dyn Logger> =
            logger.unwrap_or_else(|| Arc::new(TracingLogger::new(log_level)));

        if skip_validate && !no_warn {
            logger.warn(SKIP_VALIDATE_WARNING);
        }

        builder.logger.get_or_insert_with(|| Arc::clone(&logger));
        catcher.logger.get_or_insert_with(|| Arc::clone(&logger));
        builder.skip_validate |= skip_validate;
        catcher.skip_validate |= skip_validate;

        let builder = Builder::configure(builder, !skip_validate)?;
        let catcher = Catcher::configure(catcher, !skip_validate)?;

        log_debug!(
            log_level = %log_level,
            skip_validate = skip_validate,
            "Misstep facade configured"
        );

        Ok(Self {
            logger,
            builder,
            catcher,
        })
    }

    /// Build an error; see [`Builder::construct`].
    pub fn builder(&self, input: impl Into<Value>) -> ErrorLike {
        self.builder.construct(input)
    }

    /// Bind a recovery strategy; see [`Catcher::catcher`].
    pub fn catcher(&self, request: CatchRequest) -> BoundCatcher<'_> {
        self.catcher.catcher(request)
    }

    pub fn resolve(&self, type_string: &str) -> Resolution {
        self.builder.resolve(type_string)
    }

    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    pub fn builder_instance(&self) -> &Builder {
        &self.builder
    }

    pub fn catcher_instance(&self) -> &Catcher {
        &self.catcher
    }
}

impl fmt::Debug for Misstep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Misstep")
            .field("builder", &self.builder)
            .field("catcher", &self.catcher)
            .finish_non_exhaustive()
    }
}
