//! Logging utilities for misstep
//!
//! Re-exports tracing macros with log_* naming so internal diagnostics read the
//! same everywhere. User-facing log output goes through [`crate::logger::Logger`].

// Re-export tracing macros with log_* naming
pub use tracing::{
    debug as log_debug, error as log_error, info as log_info, trace as log_trace,
    warn as log_warn,
};
