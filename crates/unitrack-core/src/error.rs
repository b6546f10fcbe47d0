//! # Error Types
//!
//! Error for the foundational types: parsing a tier name or a timestamp.
//! Crates further up the stack define their own `thiserror` enums.

use thiserror::Error;

/// Errors raised while constructing or parsing core values.
#[derive(Error, Debug)]
pub enum UnitrackError {
    /// A value failed format validation.
    #[error("validation error: {0}")]
    Validation(String),
}
