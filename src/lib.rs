//! # misstep
//!
//! Typed error taxonomy with configurable constructors and recovery strategies.
//!
//! ## Key Features
//!
//! - **Enum Tree**: `CATEGORY:SUBCATEGORY:DETAIL` types with inherited statuses
//! - **Builder**: Normalizes loose input and dispatches to per-category constructors
//! - **Callbacks**: Categories may be handled by a callback instead of a constructor
//! - **Catcher**: Named recovery strategies with throw/reject/resolve/return semantics
//! - **Validation**: Construction options are checked and every violation is reported
//!
//! ## Example
//!
//! ```rust
//! use misstep::{CatchOptions, CatchOutcome, CatchRequest, ErrorLike, Misstep, MisstepOptions};
//! use serde_json::json;
//!
//! let misstep = Misstep::new(MisstepOptions::default())?;
//!
//! let err = misstep.builder(json!({
//!     "type": "RESPONSE:SERVER:UNAVAILABLE",
//!     "payload": { "upstream": "billing" },
//! }));
//! if let ErrorLike::Error(step) = &err {
//!     assert_eq!(step.status, Some(503));
//! }
//!
//! let outcome = misstep
//!     .catcher(CatchRequest::named("barebone").with_options(CatchOptions::returning()))
//!     .catch(err)?;
//! assert!(matches!(outcome, CatchOutcome::Returned(_)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core data model: enum tree, descriptors, constructed errors
pub mod core_types;

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod builder;
pub mod catcher;
pub mod config;
pub mod defaults;
pub mod error;
pub mod logger;
pub mod misstep;
pub mod registry;
pub mod resolver;
pub mod validation;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use builder::{Builder, BuilderOptions};
pub use catcher::{
    handle_options, BoundCatcher, CatchContext, CatchOptions, CatchOutcome, CatchRequest,
    CatchResult, Catcher, CatcherFn, CatcherOptions, ResponseBody, ResponseSink, Settled,
};
pub use config::MisstepOptions;
pub use defaults::FALLBACK_TYPE;
pub use error::{MisstepError, MisstepResult, ValidationFailure};
pub use logger::{LogLevel, Logger, SyslogLevel, TracingLogger};
pub use misstep::Misstep;
pub use registry::{CallbackFn, ConstructorFn, Registration, TypeRegistry};
pub use resolver::{Resolution, ResolvedLevel};

// Re-export core types
pub use core_types::{
    BaseError, EnumNode, EnumTree, ErrorClass, ErrorDescriptor, ErrorKind, ErrorLike,
    RespondableError, Status, StepError, TypedError,
};
