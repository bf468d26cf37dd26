//! Recovery strategies for errors coming out of failed operations
//!
//! A [`Catcher`] maps a strategy name to a callable. The caller binds options
//! and extra arguments once, then feeds caught errors through the returned
//! [`BoundCatcher`]. Two strategies are built in:
//!
//! - `barebone`: log the error, then apply the [`CatchOptions`]
//! - `response`: log the error, write `{status, type, message, payload}` to a
//!   [`ResponseSink`], then apply the [`CatchOptions`]
//!
//! Unknown names fall back to `barebone`. Custom strategies registered under
//! a built-in name override it.
//!
//! # Example
//!
//! ```rust
//! use misstep::{CatchOptions, CatchOutcome, CatchRequest, Catcher, CatcherOptions, ErrorLike};
//! use serde_json::json;
//!
//! let catcher = Catcher::new(CatcherOptions::default())?;
//! let bound = catcher.catcher(CatchRequest::new().with_options(CatchOptions::returning()));
//!
//! let outcome = bound.catch(ErrorLike::from(json!("disk full")));
//! assert!(matches!(outcome, Ok(CatchOutcome::Returned(_))));
//! # Ok::<(), misstep::MisstepError>(())
//! ```

use crate::core_types::errors::ErrorLike;
use crate::defaults::{RESPONSE_DEFAULT_TYPE, RESPONSE_FALLBACK_STATUS};
use crate::error::{MisstepError, MisstepResult};
use crate::logger::{Logger, TracingLogger};
use crate::logging::{log_debug, log_warn};
use crate::validation::validate_catcher_names;
use futures_util::future::{ready, Ready};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

const SKIP_VALIDATE_WARNING: &str = "MisstepWarning: Overriding Misstep.Catcher constructor options validation is not advised. It could result in runtime errors being thrown";

/// `Err` is the re-raised error when [`CatchOptions::throw`] is set.
pub type CatchResult = Result<CatchOutcome, ErrorLike>;

/// A recovery strategy.
pub type CatcherFn = Arc<dyn Fn(&mut CatchContext<'_>, ErrorLike) -> CatchResult + Send + Sync>;

/// How a caught error is surfaced back to the caller.
///
/// Checked in order: `throw`, `reject`, `resolve`, `return`. With none set
/// the error is considered handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatchOptions {
    #[serde(default)]
    pub throw: bool,
    #[serde(default)]
    pub reject: bool,
    #[serde(default)]
    pub resolve: bool,
    #[serde(default, rename = "return")]
    pub return_error: bool,
}

impl CatchOptions {
    pub fn throwing() -> Self {
        Self {
            throw: true,
            ..Default::default()
        }
    }

    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Default::default()
        }
    }

    pub fn resolving() -> Self {
        Self {
            resolve: true,
            ..Default::default()
        }
    }

    pub fn returning() -> Self {
        Self {
            return_error: true,
            ..Default::default()
        }
    }
}

/// Result of routing an error through a strategy.
#[derive(Debug)]
pub enum CatchOutcome {
    /// No option selected; the error was logged and swallowed.
    Handled,
    /// Continue as if the operation succeeded.
    Resolved,
    /// Continue as a failure carrying the error.
    Rejected(ErrorLike),
    /// Hand the error back as a value.
    Returned(ErrorLike),
}

impl CatchOutcome {
    /// `Rejected` becomes `Err`, `Returned` becomes `Ok(Some)`, the rest `Ok(None)`.
    pub fn into_result(self) -> Result<Option<ErrorLike>, ErrorLike> {
        match self {
            Self::Handled | Self::Resolved => Ok(None),
            Self::Rejected(err) => Err(err),
            Self::Returned(err) => Ok(Some(err)),
        }
    }

    /// Already-settled future for callers continuing an async chain.
    pub fn into_future(self) -> Ready<Result<Option<ErrorLike>, ErrorLike>> {
        ready(self.into_result())
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Apply [`CatchOptions`] to a caught error.
pub fn handle_options(options: &CatchOptions, err: ErrorLike) -> CatchResult {
    if options.throw {
        Err(err)
    } else if options.reject {
        Ok(CatchOutcome::Rejected(err))
    } else if options.resolve {
        Ok(CatchOutcome::Resolved)
    } else if options.return_error {
        Ok(CatchOutcome::Returned(err))
    } else {
        Ok(CatchOutcome::Handled)
    }
}

/// Body written by the `response` strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseBody {
    pub status: u16,
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub payload: Value,
}

impl ResponseBody {
    /// Respondable errors serialize their own fields; anything else becomes
    /// the payload of a default response error.
    pub fn from_error(err: &ErrorLike) -> Self {
        if let Some(respondable) = err.as_step_error().and_then(|e| e.as_respondable()) {
            return Self {
                status: respondable.status(),
                error_type: respondable.error_type().to_string(),
                message: Some(respondable.message().to_string()),
                payload: respondable.payload().clone(),
            };
        }
        Self {
            status: err.status_hint().unwrap_or(RESPONSE_FALLBACK_STATUS),
            error_type: RESPONSE_DEFAULT_TYPE.to_string(),
            message: None,
            payload: err.to_payload(),
        }
    }

    /// HTTP code sent with the body of `err`.
    ///
    /// Only respondable errors choose their own code; everything else is
    /// answered with 500 even when the body carries another status.
    pub fn http_status(err: &ErrorLike) -> u16 {
        err.as_step_error()
            .and_then(|e| e.as_respondable())
            .map_or(RESPONSE_FALLBACK_STATUS, |respondable| respondable.status())
    }
}

/// HTTP-response-like object the `response` strategy writes to.
pub trait ResponseSink {
    fn status(&mut self, code: u16) -> &mut dyn ResponseSink;
    fn json(&mut self, body: &ResponseBody);
}

/// Everything a strategy receives besides the error itself.
pub struct CatchContext<'a> {
    pub options: &'a CatchOptions,
    /// Extra arguments bound with [`CatchRequest::bind`].
    pub bound: &'a [Value],
    pub logger: &'a dyn Logger,
    pub response: Option<&'a mut dyn ResponseSink>,
}

impl CatchContext<'_> {
    /// Apply the bound options to `err`.
    pub fn settle(&self, err: ErrorLike) -> CatchResult {
        handle_options(self.options, err)
    }
}

fn barebone_strategy(ctx: &mut CatchContext<'_>, err: ErrorLike) -> CatchResult {
    ctx.logger.error(&err.to_string());
    ctx.settle(err)
}

fn response_strategy(ctx: &mut CatchContext<'_>, err: ErrorLike) -> CatchResult {
    ctx.logger.error(&err.to_string());
    match ctx.response.as_deref_mut() {
        Some(res) => {
            let body = ResponseBody::from_error(&err);
            res.status(ResponseBody::http_status(&err)).json(&body);
        }
        None => {
            ctx.logger
                .warn("MisstepWarning: response catcher called without a response object");
        }
    }
    ctx.settle(err)
}

/// Construction options for [`Catcher`].
#[derive(Clone, Default)]
pub struct CatcherOptions {
    pub logger: Option<Arc<dyn Logger>>,
    /// Custom strategies; an empty map is refused.
    pub catchers: Option<HashMap<String, CatcherFn>>,
    pub skip_validate: bool,
}

impl CatcherOptions {
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_catcher<F>(mut self, name: impl Into<String>, strategy: F) -> Self
    where
        F: Fn(&mut CatchContext<'_>, ErrorLike) -> CatchResult + Send + Sync + 'static,
    {
        self.catchers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), Arc::new(strategy));
        self
    }
}

impl fmt::Debug for CatcherOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatcherOptions")
            .field("has_logger", &self.logger.is_some())
            .field(
                "catchers",
                &self.catchers.as_ref().map(|c| c.keys().collect::<Vec<_>>()),
            )
            .field("skip_validate", &self.skip_validate)
            .finish()
    }
}

/// Which strategy to use and what to bind to it.
#[derive(Debug, Clone, Default)]
pub struct CatchRequest {
    pub strategy: Option<String>,
    pub options: CatchOptions,
    pub bind: Vec<Value>,
}

impl CatchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(strategy: impl Into<String>) -> Self {
        Self {
            strategy: Some(strategy.into()),
            ..Default::default()
        }
    }

    pub fn with_options(mut self, options: CatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Bind an extra argument; array values are spread into several.
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        match value.into() {
            Value::Array(values) => self.bind.extend(values),
            other => self.bind.push(other),
        }
        self
    }
}

/// Result of awaiting an operation through [`BoundCatcher::settle`].
#[derive(Debug)]
pub enum Settled<T> {
    Fulfilled(T),
    Caught(CatchOutcome),
}

/// Named-strategy dispatcher.
pub struct Catcher {
    logger: Arc<dyn Logger>,
    custom: HashMap<String, CatcherFn>,
}

impl Catcher {
    pub const BAREBONE: &'static str = "barebone";
    pub const RESPONSE: &'static str = "response";

    /// # Errors
    ///
    /// Returns [`MisstepError::ConfigurationError`] when `catchers` is an
    /// empty map or contains a blank name (unless `skip_validate` is set).
    pub fn new(options: CatcherOptions) -> MisstepResult<Self> {
        Self::configure(options, true)
    }

    pub(crate) fn configure(options: CatcherOptions, warn_on_skip: bool) -> MisstepResult<Self> {
        let logger = options
            .logger
            .unwrap_or_else(|| Arc::new(TracingLogger::default()));

        if options.skip_validate {
            if warn_on_skip {
                logger.warn(SKIP_VALIDATE_WARNING);
            }
        } else {
            let names = options
                .catchers
                .as_ref()
                .map(|c| c.keys().map(String::as_str).collect::<Vec<_>>());
            let failures = validate_catcher_names(names.as_deref());
            if !failures.is_empty() {
                return Err(MisstepError::configuration_error("Catcher", failures));
            }
        }

        let custom = options.catchers.unwrap_or_default();
        log_debug!(custom_strategies = custom.len(), "Misstep catcher configured");
        Ok(Self { logger, custom })
    }

    /// Every strategy name that resolves to something other than the fallback.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = [Self::BAREBONE, Self::RESPONSE]
            .into_iter()
            .chain(self.custom.keys().map(String::as_str))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    fn builtin(name: &str) -> Option<CatcherFn> {
        match name {
            Self::BAREBONE => Some(Arc::new(barebone_strategy)),
            Self::RESPONSE => Some(Arc::new(response_strategy)),
            _ => None,
        }
    }

    fn lookup(&self, name: &str) -> Option<CatcherFn> {
        self.custom
            .get(name)
            .cloned()
            .or_else(|| Self::builtin(name))
    }

    /// Resolve a strategy name, falling back to `barebone`.
    pub fn strategy(&self, name: Option<&str>) -> (String, CatcherFn) {
        if let Some(found) = name.and_then(|n| self.lookup(n).map(|s| (n.to_string(), s))) {
            return found;
        }
        if let Some(name) = name {
            log_warn!(strategy = %name, "Unknown catcher strategy, using barebone");
        }
        let barebone = self
            .lookup(Self::BAREBONE)
            .unwrap_or_else(|| Arc::new(barebone_strategy));
        (Self::BAREBONE.to_string(), barebone)
    }

    pub fn handle_options(&self, options: &CatchOptions, err: ErrorLike) -> CatchResult {
        handle_options(options, err)
    }

    /// Built-in `barebone` strategy, ignoring overrides.
    pub fn barebone(&self, options: &CatchOptions, err: ErrorLike) -> CatchResult {
        let mut ctx = CatchContext {
            options,
            bound: &[],
            logger: self.logger.as_ref(),
            response: None,
        };
        barebone_strategy(&mut ctx, err)
    }

    /// Built-in `response` strategy, ignoring overrides.
    pub fn response<'a>(
        &'a self,
        options: &'a CatchOptions,
        res: &'a mut dyn ResponseSink,
        err: ErrorLike,
    ) -> CatchResult {
        let mut ctx = CatchContext {
            options,
            bound: &[],
            logger: self.logger.as_ref(),
            response: Some(res),
        };
        response_strategy(&mut ctx, err)
    }

    /// Bind a strategy to options and extra arguments.
    pub fn catcher(&self, request: CatchRequest) -> BoundCatcher<'_> {
        let (name, strategy) = self.strategy(request.strategy.as_deref());
        BoundCatcher {
            catcher: self,
            name,
            strategy,
            options: request.options,
            bound: request.bind,
        }
    }

    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }
}

impl fmt::Debug for Catcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catcher")
            .field("names", &self.names())
            .finish_non_exhaustive()
    }
}

/// A strategy with its options and arguments bound.
pub struct BoundCatcher<'c> {
    catcher: &'c Catcher,
    name: String,
    strategy: CatcherFn,
    options: CatchOptions,
    bound: Vec<Value>,
}

impl<'c> BoundCatcher<'c> {
    pub fn strategy_name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &CatchOptions {
        &self.options
    }

    pub fn bound(&self) -> &[Value] {
        &self.bound
    }

    pub fn catch(&self, err: impl Into<ErrorLike>) -> CatchResult {
        self.invoke(None, err.into())
    }

    /// Invoke the strategy with a response object available to it.
    pub fn catch_with_response<'a>(
        &'a self,
        res: &'a mut dyn ResponseSink,
        err: impl Into<ErrorLike>,
    ) -> CatchResult {
        self.invoke(Some(res), err.into())
    }

    fn invoke<'a>(
        &'a self,
        response: Option<&'a mut dyn ResponseSink>,
        err: ErrorLike,
    ) -> CatchResult {
        let mut ctx = CatchContext {
            options: &self.options,
            bound: &self.bound,
            logger: self.catcher.logger.as_ref(),
            response,
        };
        (self.strategy)(&mut ctx, err)
    }

    /// Await an operation and route its failure through the strategy.
    pub async fn settle<T, E, F>(&self, operation: F) -> Result<Settled<T>, ErrorLike>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<ErrorLike>,
    {
        match operation.await {
            Ok(value) => Ok(Settled::Fulfilled(value)),
            Err(err) => self.catch(err).map(Settled::Caught),
        }
    }
}
