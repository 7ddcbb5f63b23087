//! Tokenizers: turn a byte source into a stream of raw candidate lines.

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use std::io::{self, BufRead, BufReader, Read};

/// Line delimiter for all tokenizer variants.
const DELIM: u8 = 0x0A;

/// Delivers raw input tokens (candidate passwords) one at a time.
///
/// `Ok(Some(token))` is the next raw line, `Ok(None)` is end-of-stream,
/// `Err(_)` is an I/O failure. Callers must stop after `Ok(None)`.
/// Empty tokens and duplicates are expected and passed through.
pub trait Tokenizer {
    fn next_token(&mut self) -> io::Result<Option<Vec<u8>>>;
}

/// Reads one candidate per line until a newline (`0x0A`) is encountered.
///
/// Input is streamed; memory use is bounded by the longest line plus
/// internal I/O buffers, so arbitrarily large dictionaries work. Tokens
/// keep their trailing newline when present; sanitization trims it.
/// Decompression state is released on drop.
pub struct LineTokenizer {
    br: BufReader<Box<dyn Read>>,
    buf: Vec<u8>,
}

impl LineTokenizer {
    /// Tokenize uncompressed newline-delimited text.
    pub fn plain(r: impl Read + 'static) -> Self {
        Self::from_reader(Box::new(r))
    }

    /// Tokenize gzip-compressed newline-delimited text. The compression
    /// layer is unwrapped transparently before line splitting.
    pub fn gzip(r: impl Read + 'static) -> Self {
        Self::from_reader(Box::new(GzDecoder::new(r)))
    }

    /// Tokenize bzip2-compressed newline-delimited text.
    pub fn bzip2(r: impl Read + 'static) -> Self {
        Self::from_reader(Box::new(BzDecoder::new(r)))
    }

    fn from_reader(r: Box<dyn Read>) -> Self {
        LineTokenizer {
            br: BufReader::new(r),
            buf: Vec::new(),
        }
    }
}

impl Tokenizer for LineTokenizer {
    fn next_token(&mut self) -> io::Result<Option<Vec<u8>>> {
        self.buf.clear();
        let n = self.br.read_until(DELIM, &mut self.buf)?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(self.buf.clone()))
    }
}
