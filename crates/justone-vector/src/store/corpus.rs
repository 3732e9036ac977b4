//! Line reader over a (possibly gzip-compressed) embedding corpus.
//!
//! Each corpus line has the form `<token> <c1> <c2> ... <cN>`. Lines are read
//! as raw bytes and only the line that matches a requested token is decoded,
//! so a scan never pays for UTF-8 validation or float parsing of lines it
//! skips.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;

use crate::error::VectorError;
use crate::types::Embedding;

/// Leading bytes of every gzip member.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Read buffer for the decompressed stream.
const READ_BUFFER_SIZE: usize = 256 * 1024;

/// How the corpus file is stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// gzip, possibly with multiple members.
    Gzip,
    /// Uncompressed text.
    Plain,
}

/// Handle to an embedding corpus file.
///
/// Opening only validates that the file is readable and detects its
/// compression. Every call to [`Corpus::lines`] opens an independent stream
/// from the start of the file, so one `Corpus` can be shared by any number of
/// concurrent readers.
#[derive(Debug, Clone)]
pub struct Corpus {
    path: PathBuf,
    compression: Compression,
}

impl Corpus {
    /// Open a corpus file and detect whether it is gzip-compressed.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::CorpusNotFound`] if the file does not exist and
    /// [`VectorError::Io`] if it cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, VectorError> {
        let path = path.as_ref().to_path_buf();
        let mut file = File::open(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => VectorError::CorpusNotFound(path.clone()),
            _ => VectorError::Io(e),
        })?;

        let mut magic = [0u8; 2];
        let mut filled = 0;
        while filled < magic.len() {
            match file.read(&mut magic[filled..])? {
                0 => break,
                n => filled += n,
            }
        }

        let compression = if filled == magic.len() && magic == GZIP_MAGIC {
            Compression::Gzip
        } else {
            Compression::Plain
        };

        Ok(Self { path, compression })
    }

    /// Detected compression.
    #[must_use]
    pub const fn compression(&self) -> Compression {
        self.compression
    }

    /// Open a fresh line reader positioned at the start of the corpus.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::Io`] if the file cannot be reopened.
    pub fn lines(&self) -> Result<CorpusLines, VectorError> {
        let file = File::open(&self.path)?;
        let reader: Box<dyn BufRead + Send> = match self.compression {
            Compression::Gzip => Box::new(BufReader::with_capacity(
                READ_BUFFER_SIZE,
                MultiGzDecoder::new(BufReader::new(file)),
            )),
            Compression::Plain => Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, file)),
        };
        Ok(CorpusLines { reader, buf: Vec::with_capacity(4096), line_number: 0 })
    }
}

/// Sequential reader over corpus lines.
///
/// The underlying stream is closed when the reader is dropped.
pub struct CorpusLines {
    reader: Box<dyn BufRead + Send>,
    buf: Vec<u8>,
    line_number: u64,
}

impl CorpusLines {
    /// Read the next line, or `None` at end of stream.
    ///
    /// The returned line borrows the reader's buffer and is valid until the
    /// next call.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::Io`] if reading or decompression fails.
    pub fn next_line(&mut self) -> Result<Option<CorpusLine<'_>>, VectorError> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let mut end = self.buf.len();
        while end > 0 && matches!(self.buf[end - 1], b'\n' | b'\r') {
            end -= 1;
        }
        Ok(Some(CorpusLine { raw: &self.buf[..end] }))
    }

    /// Number of lines read so far.
    #[must_use]
    pub const fn line_number(&self) -> u64 {
        self.line_number
    }
}

/// One corpus line without its line terminator.
#[derive(Debug, Clone, Copy)]
pub struct CorpusLine<'a> {
    raw: &'a [u8],
}

impl<'a> CorpusLine<'a> {
    /// The leading token, up to the first space.
    #[must_use]
    pub fn token(&self) -> &'a [u8] {
        let raw = self.raw;
        match raw.iter().position(|&b| b == b' ') {
            Some(split) => &raw[..split],
            None => raw,
        }
    }

    /// Whether the leading token is exactly `word`.
    #[must_use]
    pub fn has_token(&self, word: &str) -> bool {
        let word = word.as_bytes();
        self.raw.starts_with(word) && (self.raw.len() == word.len() || self.raw[word.len()] == b' ')
    }

    /// Everything after the leading token and its separator.
    #[must_use]
    pub fn components(&self) -> &'a [u8] {
        let raw = self.raw;
        raw.get(self.token().len() + 1..).unwrap_or_default()
    }

    /// Parse the components of this line as the embedding of `word`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::MalformedLine`] if the components are not valid
    /// UTF-8 numbers, and the [`Embedding::new`] errors otherwise.
    pub fn embedding(&self, word: &str) -> Result<Embedding, VectorError> {
        parse_components(word, self.components())
    }
}

/// Parse raw component bytes as the embedding of `word`.
pub(crate) fn parse_components(word: &str, components: &[u8]) -> Result<Embedding, VectorError> {
    let components =
        std::str::from_utf8(components).map_err(|e| VectorError::MalformedLine {
            word: word.to_owned(),
            index: 0,
            reason: format!("invalid UTF-8: {e}"),
        })?;
    Embedding::parse(word, components)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::write::GzEncoder;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_line_token_split() {
        let line = CorpusLine { raw: b"katze 0.1 0.2" };
        assert_eq!(line.token(), b"katze");
        assert_eq!(line.components(), b"0.1 0.2");
        assert!(line.has_token("katze"));
        assert!(!line.has_token("katz"));
        assert!(!line.has_token("katzen"));
    }

    #[test]
    fn test_line_without_components() {
        let line = CorpusLine { raw: b"katze" };
        assert_eq!(line.token(), b"katze");
        assert!(line.components().is_empty());
        assert!(line.has_token("katze"));
    }

    #[test]
    fn test_detects_gzip_and_plain() {
        let dir = tempdir().unwrap();

        let plain = dir.path().join("vectors.txt");
        std::fs::write(&plain, "a 1 2\nb 3 4\n").unwrap();

        let gz = dir.path().join("vectors.txt.gz");
        let mut encoder = GzEncoder::new(File::create(&gz).unwrap(), flate2::Compression::default());
        encoder.write_all(b"a 1 2\nb 3 4\n").unwrap();
        encoder.finish().unwrap();

        assert_eq!(Corpus::open(&plain).unwrap().compression(), Compression::Plain);
        assert_eq!(Corpus::open(&gz).unwrap().compression(), Compression::Gzip);

        for path in [&plain, &gz] {
            let corpus = Corpus::open(path).unwrap();
            let mut lines = corpus.lines().unwrap();
            let mut tokens = Vec::new();
            while let Some(line) = lines.next_line().unwrap() {
                tokens.push(line.token().to_vec());
            }
            assert_eq!(tokens, vec![b"a".to_vec(), b"b".to_vec()]);
            assert_eq!(lines.line_number(), 2);
        }
    }

    #[test]
    fn test_missing_corpus() {
        let dir = tempdir().unwrap();
        let result = Corpus::open(dir.path().join("absent.txt.gz"));
        assert!(matches!(result, Err(VectorError::CorpusNotFound(_))));
    }

    #[test]
    fn test_crlf_line_endings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vectors.txt");
        std::fs::write(&path, "a 1 2\r\n").unwrap();

        let corpus = Corpus::open(&path).unwrap();
        let mut lines = corpus.lines().unwrap();
        let line = lines.next_line().unwrap().unwrap();
        assert_eq!(line.embedding("a").unwrap().as_slice(), &[1.0, 2.0]);
    }
}
