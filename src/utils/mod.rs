//! Shared utilities used throughout the application.
//!
//! - [`errors`]: Application error types and handling

pub mod errors;
