//! Provider Directory Shared Library
//!
//! This crate contains the wire types and input validation helpers used
//! across the backend and any future client crates.

pub mod types;
pub mod validation;

// Re-export commonly used items
pub use types::*;
