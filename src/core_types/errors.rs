//! Error kinds produced by the builder
//!
//! There is a single concrete error, [`StepError`], tagged with an
//! [`ErrorKind`]. Capabilities are layered through traits rather than a class
//! chain: every error is a [`BaseError`], typed and respondable errors also
//! expose [`TypedError`] and [`RespondableError`] views.

use crate::core_types::descriptor::ErrorDescriptor;
use crate::defaults::FALLBACK_TYPE;
use serde::Serialize;
use serde_json::Value;
use std::backtrace::Backtrace;
use std::borrow::Cow;
use thiserror::Error;

/// Capability level of a constructed error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// `{name, message, payload, stack}` only.
    Base,
    /// Adds a dotted `type`.
    Typed,
    /// Adds an HTTP-like `status`.
    Respondable,
}

/// Base capability shared by every constructed error.
pub trait BaseError: std::error::Error + Send + Sync {
    fn name(&self) -> &str;
    fn message(&self) -> &str;
    fn payload(&self) -> &Value;
    fn stack(&self) -> &str;
}

/// Errors carrying a `CATEGORY:SUBCATEGORY:DETAIL` type.
pub trait TypedError: BaseError {
    fn error_type(&self) -> &str;
}

/// Errors that can be serialized into an HTTP-like response.
pub trait RespondableError: TypedError {
    fn status(&self) -> u16;
}

/// The concrete error built by [`Builder`](crate::Builder) constructors.
#[derive(Error, Debug, Clone, Serialize)]
#[error("{name}: {message}")]
pub struct StepError {
    pub kind: ErrorKind,
    pub name: String,
    pub message: String,
    pub payload: Value,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip)]
    pub stack: String,
}

impl StepError {
    pub fn new(kind: ErrorKind, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            message: message.into(),
            payload: Value::Null,
            error_type: None,
            status: None,
            stack: Backtrace::capture().to_string(),
        }
    }

    pub fn with_payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = payload.into();
        self
    }

    pub fn with_type(mut self, error_type: impl Into<String>) -> Self {
        self.error_type = Some(error_type.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// `ExtendableError`: base capability only.
    pub fn extendable(descriptor: ErrorDescriptor) -> Self {
        ErrorClass::EXTENDABLE.construct(descriptor)
    }

    /// `DefaultError`: the fallback kind for unregistered categories.
    pub fn fallback(descriptor: ErrorDescriptor) -> Self {
        ErrorClass::DEFAULT.construct(descriptor)
    }

    /// `MisstepError`: errors about misstep itself.
    pub fn misstep(descriptor: ErrorDescriptor) -> Self {
        ErrorClass::MISSTEP.construct(descriptor)
    }

    /// `ResponseError`: respondable, defaults to status 400.
    pub fn response(descriptor: ErrorDescriptor) -> Self {
        ErrorClass::RESPONSE.construct(descriptor)
    }

    pub fn as_typed(&self) -> Option<&dyn TypedError> {
        match self.kind {
            ErrorKind::Base => None,
            ErrorKind::Typed | ErrorKind::Respondable => Some(self),
        }
    }

    pub fn as_respondable(&self) -> Option<&dyn RespondableError> {
        match self.kind {
            ErrorKind::Respondable => Some(self),
            ErrorKind::Base | ErrorKind::Typed => None,
        }
    }
}

impl BaseError for StepError {
    fn name(&self) -> &str {
        &self.name
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn payload(&self) -> &Value {
        &self.payload
    }

    fn stack(&self) -> &str {
        &self.stack
    }
}

impl TypedError for StepError {
    fn error_type(&self) -> &str {
        self.error_type.as_deref().unwrap_or(FALLBACK_TYPE)
    }
}

impl RespondableError for StepError {
    fn status(&self) -> u16 {
        self.status.unwrap_or(ErrorClass::DEFAULT_RESPONSE_STATUS)
    }
}

/// Data description of an error "subclass".
///
/// Registering an `ErrorClass` as a constructor gives every built error the
/// class name and kind, plus the class defaults for whatever the descriptor
/// leaves empty.
///
/// ```rust
/// use misstep::{ErrorClass, ErrorDescriptor, ErrorKind};
///
/// let validation = ErrorClass::respondable("ValidationError", "VALIDATION:DEFAULT:ERROR", 400);
/// let err = validation.construct(ErrorDescriptor::default().with_message("bad email"));
///
/// assert_eq!(err.kind, ErrorKind::Respondable);
/// assert_eq!(err.error_type.as_deref(), Some("VALIDATION:DEFAULT:ERROR"));
/// assert_eq!(err.status, Some(400));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorClass {
    pub name: Cow<'static, str>,
    pub kind: ErrorKind,
    pub default_type: Option<Cow<'static, str>>,
    pub default_status: Option<u16>,
}

impl ErrorClass {
    pub const DEFAULT_RESPONSE_STATUS: u16 = 400;

    pub const EXTENDABLE: ErrorClass = ErrorClass::base("ExtendableError");
    pub const DEFAULT: ErrorClass = ErrorClass::typed("DefaultError", FALLBACK_TYPE);
    pub const MISSTEP: ErrorClass = ErrorClass::typed("MisstepError", "MISSTEP:DEFAULT:ERROR");
    pub const RESPONSE: ErrorClass = ErrorClass::respondable(
        "ResponseError",
        "RESPONSE:DEFAULT:ERROR",
        Self::DEFAULT_RESPONSE_STATUS,
    );

    pub const fn base(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            kind: ErrorKind::Base,
            default_type: None,
            default_status: None,
        }
    }

    pub const fn typed(name: &'static str, default_type: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            kind: ErrorKind::Typed,
            default_type: Some(Cow::Borrowed(default_type)),
            default_status: None,
        }
    }

    pub const fn respondable(
        name: &'static str,
        default_type: &'static str,
        default_status: u16,
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            kind: ErrorKind::Respondable,
            default_type: Some(Cow::Borrowed(default_type)),
            default_status: Some(default_status),
        }
    }

    /// Build an error of this class from a hydrated descriptor.
    pub fn construct(&self, descriptor: ErrorDescriptor) -> StepError {
        let error_type = descriptor
            .error_type
            .filter(|t| !t.is_empty())
            .or_else(|| self.default_type.as_deref().map(str::to_string));

        StepError {
            error_type,
            status: descriptor.status.or(self.default_status),
            payload: descriptor.payload,
            ..StepError::new(
                self.kind,
                self.name.clone().into_owned(),
                descriptor.message.unwrap_or_default(),
            )
        }
    }
}

/// Anything `construct` can return or a catcher can receive.
///
/// Callbacks are an escape hatch and may return plain values; failures coming
/// from outside misstep travel as [`anyhow::Error`].
#[derive(Error, Debug)]
pub enum ErrorLike {
    #[error(transparent)]
    Error(#[from] StepError),

    #[error(transparent)]
    Foreign(#[from] anyhow::Error),

    #[error("{0}")]
    Value(Value),
}

impl From<Value> for ErrorLike {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl ErrorLike {
    /// Wrap any standard error raised outside misstep.
    pub fn foreign<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Foreign(anyhow::Error::new(error))
    }

    pub fn as_step_error(&self) -> Option<&StepError> {
        match self {
            Self::Error(e) => Some(e),
            Self::Foreign(e) => e.downcast_ref::<StepError>(),
            Self::Value(_) => None,
        }
    }

    pub fn into_step_error(self) -> Option<StepError> {
        match self {
            Self::Error(e) => Some(e),
            Self::Foreign(e) => e.downcast::<StepError>().ok(),
            Self::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Status the error carries, if any (`status` field of object values).
    pub fn status_hint(&self) -> Option<u16> {
        match self {
            Self::Value(value) => value
                .get("status")
                .and_then(Value::as_u64)
                .and_then(|s| u16::try_from(s).ok())
                .filter(|s| *s != 0),
            other => other.as_step_error().and_then(|e| e.status),
        }
    }

    /// JSON view of the error, used as a response payload.
    pub fn to_payload(&self) -> Value {
        match self {
            Self::Error(e) => serde_json::to_value(e).unwrap_or(Value::Null),
            Self::Foreign(e) => Value::String(format!("{e:#}")),
            Self::Value(v) => v.clone(),
        }
    }
}
