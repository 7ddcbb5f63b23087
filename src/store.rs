//! Storage capability traits implemented by backend drivers.
//!
//! A backend implements whichever capabilities it supports; the import
//! entry points select behavior from the capabilities once, at setup.
//! Items reaching a writer have always been sanitized, but the same
//! password can arrive multiple times, so writes must be idempotent.

use crate::errors::Result;

/// Optional lifecycle hooks, invoked at most once per import run, around
/// all write activity. Both default to no-ops.
pub trait Lifecycle {
    /// Called before any writes (e.g. create tables, open connections).
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called after all writes are issued, on every exit path. A close
    /// error is reported only when the run produced no primary error.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Single-item write capability.
pub trait DictWriter: Lifecycle {
    /// Add a sanitized password. Adding the same password twice must not
    /// error. Returning an error aborts the import run.
    fn add(&mut self, password: &str) -> Result<()>;
}

/// Bulk write capability, for backends where per-call overhead dominates.
///
/// Import through [`import_bulk`](crate::import_bulk) accumulates
/// sanitized passwords and delivers them in batches via `add_multiple`
/// instead of one call per item. `Send` because batches are flushed from
/// a background worker thread.
pub trait BulkWriter: Lifecycle + Send {
    /// Add a batch of sanitized passwords. Per-item idempotence as with
    /// [`DictWriter::add`]; partial application on error is acceptable as
    /// long as the error is returned.
    fn add_multiple(&mut self, passwords: &[String]) -> Result<()>;
}

/// Lookup capability.
pub trait DictReader {
    /// True iff some prior add included this exact sanitized string.
    fn has(&self, password: &str) -> Result<bool>;
}
