// Test modules for misstep crate
//
// Test organization follows the template pattern where each source file
// has a corresponding test file that focuses on business logic verification.

// Test helper utilities shared across unit tests
pub mod helpers;

pub mod config;
pub mod validation;
