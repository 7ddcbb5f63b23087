//! Import and check tests: tokenizers, orchestration, lifecycle, progress.

use anyhow::anyhow;
use pwdict::backends::{MemStore, MemStoreBulk};
use pwdict::{
    BulkWriter, DefaultSanitizer, DictReader, DictWriter, Error, ImportOpts, Lifecycle,
    LineTokenizer, Result, SanitizeError, Sanitizer, Tokenizer, check, import, import_bulk,
    sanitize, sanitize_ok,
};
use std::io::{self, Cursor, Read, Write};
use std::sync::{Arc, Mutex};

fn quiet() -> ImportOpts {
    ImportOpts {
        report_every: 0,
        ..Default::default()
    }
}

// --- tokenizers ---

#[test]
fn test_tokenizer_retains_delimiter() {
    let mut tok = LineTokenizer::plain(Cursor::new(b"one\ntwo\nthree".to_vec()));
    assert_eq!(tok.next_token().unwrap(), Some(b"one\n".to_vec()));
    assert_eq!(tok.next_token().unwrap(), Some(b"two\n".to_vec()));
    assert_eq!(tok.next_token().unwrap(), Some(b"three".to_vec()));
    assert_eq!(tok.next_token().unwrap(), None);
}

#[test]
fn test_tokenizer_empty_lines_passed_through() {
    let mut tok = LineTokenizer::plain(Cursor::new(b"\n\nlongpassword\n".to_vec()));
    assert_eq!(tok.next_token().unwrap(), Some(b"\n".to_vec()));
    assert_eq!(tok.next_token().unwrap(), Some(b"\n".to_vec()));
    assert_eq!(tok.next_token().unwrap(), Some(b"longpassword\n".to_vec()));
    assert_eq!(tok.next_token().unwrap(), None);
}

#[test]
fn test_tokenizer_gzip() {
    let mut enc = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    enc.write_all(b"Password123\nanother-pass\n").unwrap();
    let gz = enc.finish().unwrap();

    let mut tok = LineTokenizer::gzip(Cursor::new(gz));
    assert_eq!(tok.next_token().unwrap(), Some(b"Password123\n".to_vec()));
    assert_eq!(tok.next_token().unwrap(), Some(b"another-pass\n".to_vec()));
    assert_eq!(tok.next_token().unwrap(), None);
}

#[test]
fn test_tokenizer_bzip2() {
    let mut enc = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::best());
    enc.write_all(b"Password123\nanother-pass\n").unwrap();
    let bz = enc.finish().unwrap();

    let mut tok = LineTokenizer::bzip2(Cursor::new(bz));
    assert_eq!(tok.next_token().unwrap(), Some(b"Password123\n".to_vec()));
    assert_eq!(tok.next_token().unwrap(), Some(b"another-pass\n".to_vec()));
    assert_eq!(tok.next_token().unwrap(), None);
}

// --- end-to-end ---

#[test]
fn test_end_to_end_two_line_import() {
    let src = Cursor::new(b"Password123\nab\n".to_vec());
    let (db, res) = import_bulk(
        LineTokenizer::plain(src),
        MemStoreBulk::new(),
        None,
        ImportOpts::default(),
    );
    let stats = res.unwrap();
    assert_eq!(stats.read, 2);
    assert_eq!(stats.added, 1);
    assert_eq!(db.len(), 1);
    assert!(db.has("password123").unwrap());

    assert!(matches!(check("password123", &db, None), Err(Error::Found)));
    assert!(matches!(check("PASSWORD123", &db, None), Err(Error::Found)));
    assert!(matches!(
        check("ab", &db, None),
        Err(Error::Rejected(SanitizeError::TooShort))
    ));
    assert!(check("not-in-the-dictionary", &db, None).is_ok());
}

#[test]
fn test_import_gzip_source() {
    let mut enc = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    enc.write_all(b"Password123\nCorrectHorse\n").unwrap();
    let gz = enc.finish().unwrap();

    let (db, res) = import_bulk(
        LineTokenizer::gzip(Cursor::new(gz)),
        MemStoreBulk::new(),
        None,
        quiet(),
    );
    res.unwrap();
    assert!(db.has("password123").unwrap());
    assert!(db.has("correcthorse").unwrap());
}

#[test]
fn test_import_rerun_is_idempotent() {
    let mut db = MemStore::new();
    for _ in 0..2 {
        let src = Cursor::new(b"Password123\nCorrectHorse\n".to_vec());
        import(LineTokenizer::plain(src), &mut db, None, quiet()).unwrap();
    }
    assert_eq!(db.len(), 2);
}

// --- lifecycle ---

#[derive(Default)]
struct CountingWriter {
    inner: MemStore,
    inits: usize,
    closes: usize,
}

impl Lifecycle for CountingWriter {
    fn init(&mut self) -> Result<()> {
        self.inits += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closes += 1;
        Ok(())
    }
}

impl DictWriter for CountingWriter {
    fn add(&mut self, password: &str) -> Result<()> {
        self.inner.add(password)
    }
}

#[test]
fn test_lifecycle_hooks_called_once() {
    let mut db = CountingWriter::default();
    let src = Cursor::new(b"Password123\n".to_vec());
    import(LineTokenizer::plain(src), &mut db, None, quiet()).unwrap();
    assert_eq!(db.inits, 1);
    assert_eq!(db.closes, 1);
    assert_eq!(db.inner.len(), 1);
}

struct FailingReader {
    sent: bool,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.sent {
            return Err(io::Error::other("disk died"));
        }
        self.sent = true;
        let line = b"goodpassword\n";
        buf[..line.len()].copy_from_slice(line);
        Ok(line.len())
    }
}

#[test]
fn test_io_error_aborts_and_still_closes() {
    let mut db = CountingWriter::default();
    let tok = LineTokenizer::plain(FailingReader { sent: false });
    let err = import(tok, &mut db, None, quiet()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(db.closes, 1);
}

#[derive(Default)]
struct FailingBulk {
    batches: usize,
    inits: usize,
    closes: usize,
}

impl Lifecycle for FailingBulk {
    fn init(&mut self) -> Result<()> {
        self.inits += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closes += 1;
        Ok(())
    }
}

impl BulkWriter for FailingBulk {
    fn add_multiple(&mut self, _passwords: &[String]) -> Result<()> {
        self.batches += 1;
        if self.batches == 2 {
            return Err(Error::store(anyhow!("backend full")));
        }
        Ok(())
    }
}

#[test]
fn test_bulk_backend_failure_propagates_and_closes_once() {
    let lines: Vec<u8> = (0..6).flat_map(|i| format!("password{i:04}\n").into_bytes()).collect();
    let opts = ImportOpts {
        bulk_max: 2,
        report_every: 0,
        ..Default::default()
    };
    let (db, res) = import_bulk(
        LineTokenizer::plain(Cursor::new(lines)),
        FailingBulk::default(),
        None,
        opts,
    );
    assert!(matches!(res, Err(Error::Store(_))));
    assert_eq!(db.batches, 2);
    assert_eq!(db.inits, 1);
    assert_eq!(db.closes, 1);
}

// --- progress ---

#[test]
fn test_progress_observer_cadence() {
    let seen: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let opts = ImportOpts {
        report_every: 2,
        on_progress: Some(Box::new(move |p: &pwdict::Progress| {
            sink.lock().unwrap().push(p.read)
        })),
        ..Default::default()
    };

    let lines: Vec<u8> = (0..5).flat_map(|i| format!("password{i:04}\n").into_bytes()).collect();
    let mut db = MemStore::new();
    import(LineTokenizer::plain(Cursor::new(lines)), &mut db, None, opts).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![2, 4]);
}

// --- sanitizer wiring ---

#[test]
fn test_sanitize_helpers() {
    assert_eq!(sanitize("  Password123\n", None).unwrap(), "password123");
    assert!(sanitize_ok("longenoughpassword", None).is_ok());
    assert!(matches!(
        sanitize_ok("ab", None),
        Err(Error::Rejected(SanitizeError::TooShort))
    ));
}

struct NotUsername {
    user: &'static str,
}

impl Sanitizer for NotUsername {
    fn sanitize(&self, raw: &[u8]) -> std::result::Result<String, SanitizeError> {
        let p = DefaultSanitizer.sanitize(raw)?;
        if p.contains(self.user) {
            return Err(SanitizeError::Policy("password contains username"));
        }
        Ok(p)
    }
}

#[test]
fn test_custom_sanitizer_composes_with_default() {
    let san = NotUsername { user: "alice" };
    let src = Cursor::new(b"alice-secret-99\nunrelated-pass\nab\n".to_vec());
    let (db, res) = import_bulk(
        LineTokenizer::plain(src),
        MemStoreBulk::new(),
        Some(&san),
        quiet(),
    );
    let stats = res.unwrap();
    assert_eq!(stats.read, 3);
    assert_eq!(stats.added, 1);
    assert!(db.has("unrelated-pass").unwrap());

    assert!(matches!(
        check("alice-secret-99", &db, Some(&san)),
        Err(Error::Rejected(SanitizeError::Policy(_)))
    ));
    // The default layer still applies underneath.
    assert!(matches!(
        check("ab", &db, Some(&san)),
        Err(Error::Rejected(SanitizeError::TooShort))
    ));
}
