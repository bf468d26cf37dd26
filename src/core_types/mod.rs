//! Core data model for the error taxonomy
//!
//! ## Organization
//! - `enum_tree` - Category/subcategory/detail nodes and the configured tree
//! - `descriptor` - Caller-supplied error descriptors and normalization
//! - `errors` - Constructed error kinds and capability traits

pub mod descriptor;
pub mod enum_tree;
pub mod errors;

// Re-export commonly used types
pub use descriptor::ErrorDescriptor;
pub use enum_tree::{EnumNode, EnumTree, Status};
pub use errors::{
    BaseError, ErrorClass, ErrorKind, ErrorLike, RespondableError, StepError, TypedError,
};
