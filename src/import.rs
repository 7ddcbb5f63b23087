//! Import and lookup orchestration.

use log::{debug, info};
use std::time::{Duration, Instant};

use crate::bulk::{BULK_MAX_DEFAULT, BulkAdapter};
use crate::errors::{Error, Result};
use crate::sanitize::{DefaultSanitizer, Sanitizer};
use crate::store::{BulkWriter, DictReader, DictWriter};
use crate::tokenizer::Tokenizer;

/// Default progress cadence: one observation per this many items read.
pub const REPORT_EVERY_DEFAULT: usize = 10_000;

/// Throughput observation handed to the progress callback during import.
#[derive(Debug, Clone)]
pub struct Progress {
    /// Items read from the tokenizer so far (including rejected ones).
    pub read: u64,
    /// Items that passed sanitization and were forwarded to the store.
    pub added: u64,
    /// Time since the import started.
    pub elapsed: Duration,
}

impl Progress {
    /// Items read per second since the start of the run.
    pub fn per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 { self.read as f64 / secs } else { 0.0 }
    }
}

/// Options for [`import`] and [`import_bulk`].
pub struct ImportOpts {
    /// Maximum passwords per bulk flush ([`import_bulk`] only).
    pub bulk_max: usize,
    /// Report progress every this many items read. 0 disables reporting.
    pub report_every: usize,
    /// Progress observer. When `None`, observations go to `log::info!`.
    /// Observability only; never affects control flow.
    pub on_progress: Option<Box<dyn FnMut(&Progress)>>,
}

impl Default for ImportOpts {
    fn default() -> Self {
        ImportOpts {
            bulk_max: BULK_MAX_DEFAULT,
            report_every: REPORT_EVERY_DEFAULT,
            on_progress: None,
        }
    }
}

/// Counters for a completed import run.
#[derive(Debug, Clone, Copy)]
pub struct ImportStats {
    pub read: u64,
    pub added: u64,
    pub elapsed: Duration,
}

/// Populate a single-item writer with a password dictionary.
///
/// Pulls raw tokens until end-of-stream, sanitizes each (rejected items
/// are skipped silently), and forwards survivors to `store.add`. The
/// store's [`init`](crate::Lifecycle::init) hook runs before any writes
/// and [`close`](crate::Lifecycle::close) runs on every exit path; a
/// close error is reported only when the run itself succeeded.
///
/// `None` for `sanitizer` selects [`DefaultSanitizer`].
pub fn import<T, W>(
    mut tokenizer: T,
    store: &mut W,
    sanitizer: Option<&dyn Sanitizer>,
    mut opts: ImportOpts,
) -> Result<ImportStats>
where
    T: Tokenizer,
    W: DictWriter + ?Sized,
{
    let san = sanitizer.unwrap_or(&DefaultSanitizer);
    store.init()?;
    let res = run_loop(&mut tokenizer, san, &mut opts, &mut |p| store.add(&p));
    let close = store.close();
    seal(res, close)
}

/// Populate a bulk-capable writer with a password dictionary.
///
/// Same contract as [`import`], but the store is wrapped in a
/// [`BulkAdapter`] so writes reach the backend in batches of
/// `opts.bulk_max`. The store moves into the adapter's worker thread for
/// the duration of the run and is always handed back, so lifecycle close
/// and later reads remain possible even after a failure.
pub fn import_bulk<T, S>(
    mut tokenizer: T,
    mut store: S,
    sanitizer: Option<&dyn Sanitizer>,
    mut opts: ImportOpts,
) -> (S, Result<ImportStats>)
where
    T: Tokenizer,
    S: BulkWriter + 'static,
{
    let san = sanitizer.unwrap_or(&DefaultSanitizer);
    if let Err(e) = store.init() {
        return (store, Err(e));
    }

    let mut adapter = BulkAdapter::with_max(store, opts.bulk_max);
    let res = run_loop(&mut tokenizer, san, &mut opts, &mut |p| adapter.add(p));
    let (mut store, flushed) = adapter.finish();

    let res = match res {
        Ok(stats) => flushed.map(|_| stats),
        Err(e) => Err(e),
    };
    let close = store.close();
    (store, seal(res, close))
}

/// Check a candidate password against the dictionary.
///
/// The candidate is sanitized exactly as on the import path, so lookups
/// and writes compare the same canonical form. Returns:
/// - `Err(Error::Rejected(_))` when sanitization rejects the candidate;
/// - `Err(Error::Found)` when the dictionary contains it (the expected
///   outcome of a denylist hit);
/// - `Ok(())` when it is not in the dictionary.
pub fn check<R>(candidate: &str, db: &R, sanitizer: Option<&dyn Sanitizer>) -> Result<()>
where
    R: DictReader + ?Sized,
{
    let san = sanitizer.unwrap_or(&DefaultSanitizer);
    let p = san.sanitize(candidate.as_bytes())?;
    if db.has(&p)? {
        return Err(Error::Found);
    }
    Ok(())
}

/// Sanitize a password with the given (or default) sanitizer. Useful
/// before hashing and storing a new password.
pub fn sanitize(password: &str, sanitizer: Option<&dyn Sanitizer>) -> Result<String> {
    let san = sanitizer.unwrap_or(&DefaultSanitizer);
    Ok(san.sanitize(password.as_bytes())?)
}

/// Check whether a password passes the given (or default) sanitizer.
pub fn sanitize_ok(password: &str, sanitizer: Option<&dyn Sanitizer>) -> Result<()> {
    sanitize(password, sanitizer).map(|_| ())
}

/// Shared producer loop: pull, sanitize, forward. Rejected items count
/// toward `read` but not `added`.
fn run_loop<T>(
    tokenizer: &mut T,
    san: &dyn Sanitizer,
    opts: &mut ImportOpts,
    add: &mut dyn FnMut(String) -> Result<()>,
) -> Result<ImportStats>
where
    T: Tokenizer + ?Sized,
{
    let start = Instant::now();
    let mut read: u64 = 0;
    let mut added: u64 = 0;

    loop {
        let Some(raw) = tokenizer.next_token()? else {
            break;
        };
        read += 1;
        if let Ok(p) = san.sanitize(&raw) {
            add(p)?;
            added += 1;
        }
        if opts.report_every > 0 && read.is_multiple_of(opts.report_every as u64) {
            report(opts, read, added, start);
        }
    }

    let stats = ImportStats {
        read,
        added,
        elapsed: start.elapsed(),
    };
    debug!(
        "import finished: read {}, added {} in {:.2?} ({:.0} per sec)",
        stats.read,
        stats.added,
        stats.elapsed,
        Progress {
            read,
            added,
            elapsed: stats.elapsed
        }
        .per_sec()
    );
    Ok(stats)
}

fn report(opts: &mut ImportOpts, read: u64, added: u64, start: Instant) {
    let progress = Progress {
        read,
        added,
        elapsed: start.elapsed(),
    };
    match opts.on_progress.as_mut() {
        Some(f) => f(&progress),
        None => info!(
            "read {} ({:.0} per sec), added {} ({}%)",
            progress.read,
            progress.per_sec(),
            progress.added,
            (progress.added * 100) / progress.read.max(1)
        ),
    }
}

/// Primary error wins; a close error surfaces only on otherwise-clean runs.
fn seal(res: Result<ImportStats>, close: Result<()>) -> Result<ImportStats> {
    match res {
        Ok(stats) => close.map(|_| stats),
        Err(e) => Err(e),
    }
}
