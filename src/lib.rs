//! Pwdict: password denylist import and lookup with pluggable storage backends
//!
//! Streams a password dictionary (plain, gzip, or bzip2 newline-delimited
//! text) through a [`Tokenizer`], normalizes each candidate with a
//! [`Sanitizer`] (trim, minimum length, NFKD, lower-case), and writes the
//! surviving forms into a storage backend for later membership lookup.
//! Backends implement the capability traits in [`store`]; bulk-capable
//! backends get batched writes with bounded memory and backpressure via
//! [`import_bulk`].
//!
//! ```no_run
//! use pwdict::backends::MemStoreBulk;
//! use pwdict::{Error, ImportOpts, LineTokenizer, check, import_bulk};
//!
//! # fn main() -> pwdict::Result<()> {
//! let file = std::fs::File::open("crackstation-human-only.txt.gz")?;
//! let (db, res) = import_bulk(
//!     LineTokenizer::gzip(file),
//!     MemStoreBulk::new(),
//!     None,
//!     ImportOpts::default(),
//! );
//! res?;
//!
//! match check("Password123", &db, None) {
//!     Err(Error::Found) => println!("rejected: common password"),
//!     Err(Error::Rejected(e)) => println!("rejected: {e}"),
//!     other => other?,
//! }
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod bulk;
pub mod errors;
pub mod import;
pub mod sanitize;
pub mod store;
pub mod tokenizer;

/// Re-exports for the public pwdict API.
pub use bulk::{BULK_MAX_DEFAULT, BulkAdapter};
pub use errors::{Error, Result, SanitizeError};
pub use import::{
    ImportOpts, ImportStats, Progress, REPORT_EVERY_DEFAULT, check, import, import_bulk, sanitize,
    sanitize_ok,
};
pub use sanitize::{DefaultSanitizer, MIN_CODEPOINTS, Sanitizer};
pub use store::{BulkWriter, DictReader, DictWriter, Lifecycle};
pub use tokenizer::{LineTokenizer, Tokenizer};
