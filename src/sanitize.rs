//! Sanitization: normalize a raw candidate into its canonical stored form.

use unicode_normalization::UnicodeNormalization;

use crate::errors::SanitizeError;

/// Minimum number of Unicode codepoints (not bytes) a password must have
/// after trimming.
pub const MIN_CODEPOINTS: usize = 8;

/// Prepares a raw candidate for storage or lookup and checks the basic
/// properties it must satisfy.
///
/// Must be a pure function of its input: no shared mutable state, safe to
/// call concurrently and repeatedly. The same normalization runs on the
/// write and lookup paths, so two inputs that are "the same password"
/// under casing or Unicode-representation differences collide to one
/// stored form.
///
/// Custom sanitizers should delegate to [`DefaultSanitizer`] first and
/// layer extra rejection rules on its output; any layer may reject.
pub trait Sanitizer {
    /// Returns the canonical form, or the rejection verdict.
    fn sanitize(&self, raw: &[u8]) -> Result<String, SanitizeError>;
}

/// The standard sanitizer used when none is supplied.
///
/// Steps, in order:
/// 1. trim ASCII whitespace from both ends;
/// 2. reject [`SanitizeError::InvalidEncoding`] unless the bytes are
///    well-formed UTF-8;
/// 3. reject [`SanitizeError::TooShort`] under [`MIN_CODEPOINTS`]
///    codepoints;
/// 4. apply Unicode NFKD (compatibility decomposition);
/// 5. lower-case, then trim once more (normalization can reintroduce
///    boundary whitespace).
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSanitizer;

impl Sanitizer for DefaultSanitizer {
    fn sanitize(&self, raw: &[u8]) -> Result<String, SanitizeError> {
        let trimmed = raw.trim_ascii();
        let s = std::str::from_utf8(trimmed).map_err(|_| SanitizeError::InvalidEncoding)?;
        if s.chars().count() < MIN_CODEPOINTS {
            return Err(SanitizeError::TooShort);
        }
        let folded = s.nfkd().collect::<String>().to_lowercase();
        Ok(folded.trim().to_string())
    }
}
