//! Error types for the import and lookup pipelines.

use thiserror::Error;

use crate::sanitize::MIN_CODEPOINTS;

/// Per-item rejection verdict from a [`Sanitizer`](crate::Sanitizer).
///
/// A rejection is not a pipeline failure: during import the item is
/// dropped and the run continues. Only [`check`](crate::check) surfaces
/// it to the caller.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SanitizeError {
    /// Fewer than [`MIN_CODEPOINTS`] codepoints after trimming.
    #[error("password too short (minimum {MIN_CODEPOINTS} characters)")]
    TooShort,
    /// The raw bytes are not well-formed UTF-8.
    #[error("invalid utf-8 sequence")]
    InvalidEncoding,
    /// Rejection from a custom sanitizer rule layered on the default
    /// (e.g. "password matches username").
    #[error("password rejected by policy: {0}")]
    Policy(&'static str),
}

/// Terminal outcome of an import run or a lookup.
#[derive(Debug, Error)]
pub enum Error {
    /// The candidate was rejected by the sanitizer (lookup path only;
    /// import skips rejected items silently).
    #[error("password rejected: {0}")]
    Rejected(#[from] SanitizeError),

    /// The candidate is present in the dictionary. This is the expected
    /// outcome of a denylist hit, not an exceptional condition.
    #[error("password found in dictionary")]
    Found,

    /// The token source failed mid-stream. Distinct from end-of-stream,
    /// which the tokenizer signals with `Ok(None)`.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A storage backend call failed. Aborts the current run; the core
    /// never retries.
    #[error("store: {0}")]
    Store(#[source] anyhow::Error),
}

impl Error {
    /// Wrap a backend failure. Used by storage driver implementations.
    pub fn store(err: impl Into<anyhow::Error>) -> Self {
        Error::Store(err.into())
    }
}

/// Result alias used by the public pwdict API.
pub type Result<T> = std::result::Result<T, Error>;
