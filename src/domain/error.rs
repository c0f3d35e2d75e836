//! Error types for the contact book.
//!
//! This module defines the centralized error type [`ContactbookError`] and a type alias
//! [`Result`] used throughout the crate. Only infrastructure can fail: validation
//! problems, unknown ids and out-of-range pages are treated as silent no-ops by the
//! domain layer and never surface here.

use thiserror::Error;

/// The main error type for contact book operations.
///
/// # Examples
///
/// ```
/// use contactbook::ContactbookError;
///
/// fn validate_page_size(size: usize) -> Result<(), ContactbookError> {
///     if size == 0 {
///         return Err(ContactbookError::Config("page_size must be positive".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_page_size(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum ContactbookError {
    /// Reading or writing the persisted contact collection failed.
    ///
    /// Covers malformed JSON on load and serialization failures on save.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for contact book operations.
pub type Result<T> = std::result::Result<T, ContactbookError>;
