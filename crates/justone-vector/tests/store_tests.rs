//! Integration tests for corpus lookup over gzip fixtures.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use flate2::write::GzEncoder;
use flate2::Compression;
use justone_vector::distance::cosine_distance;
use justone_vector::{Corpus, EmbeddingLookup, PreloadedStore, ScanStore, VectorError};
use tempfile::{tempdir, TempDir};

fn write_gz(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

fn fixture() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = write_gz(
        dir.path(),
        "vectors_german.txt.gz",
        "tier 1 0\nkatze 1 1\nhund 0 1\nnull 0 0\nelektrizität 0.5 -0.5\nkaputt 1 eins\n",
    );
    (dir, path)
}

#[test]
fn lookup_hit_and_miss() {
    let (_dir, path) = fixture();
    let store = ScanStore::open(&path).unwrap();

    let katze = store.lookup("katze").unwrap().unwrap();
    assert_eq!(katze.as_slice(), &[1.0, 1.0]);
    assert_eq!(katze.dimension(), 2);

    assert!(store.lookup("giraffe").unwrap().is_none());
    // Prefix of an existing token is still a miss.
    assert!(store.lookup("kat").unwrap().is_none());
}

#[test]
fn lookup_non_ascii_token() {
    let (_dir, path) = fixture();
    let store = ScanStore::open(&path).unwrap();
    let embedding = store.lookup("elektrizität").unwrap().unwrap();
    assert_eq!(embedding.as_slice(), &[0.5, -0.5]);
}

#[test]
fn repeated_lookups_are_independent() {
    let (_dir, path) = fixture();
    let store = ScanStore::open(&path).unwrap();
    let first = store.lookup("hund").unwrap();
    let second = store.lookup("hund").unwrap();
    assert_eq!(first, second);
}

#[test]
fn malformed_line_reports_parse_error() {
    let (_dir, path) = fixture();
    let store = ScanStore::open(&path).unwrap();
    let err = store.lookup("kaputt").unwrap_err();
    assert!(matches!(err, VectorError::MalformedLine { index: 1, .. }));
    assert!(err.is_word_scoped());
}

#[test]
fn zero_vector_fails_distance() {
    let (_dir, path) = fixture();
    let store = ScanStore::open(&path).unwrap();
    let null = store.lookup("null").unwrap().unwrap();
    let tier = store.lookup("tier").unwrap().unwrap();
    assert!(matches!(cosine_distance(&null, &tier), Err(VectorError::ZeroMagnitude)));
}

#[test]
fn missing_corpus_is_reported_at_open() {
    let dir = tempdir().unwrap();
    let err = ScanStore::open(dir.path().join("vectors_german.txt.gz")).unwrap_err();
    assert!(matches!(err, VectorError::CorpusNotFound(_)));
    assert!(!err.is_word_scoped());
}

#[test]
fn concurrent_scans_share_one_store() {
    let (_dir, path) = fixture();
    let store = Arc::new(ScanStore::open(&path).unwrap());

    let handles: Vec<_> = ["tier", "katze", "hund", "giraffe"]
        .into_iter()
        .map(|word| {
            let store = Arc::clone(&store);
            thread::spawn(move || (word, store.lookup(word).unwrap()))
        })
        .collect();

    for handle in handles {
        let (word, result) = handle.join().unwrap();
        assert_eq!(result.is_some(), word != "giraffe", "word {word}");
    }
}

#[test]
fn preloaded_store_matches_scan_store() {
    let (_dir, path) = fixture();
    let corpus = Corpus::open(&path).unwrap();
    let scan = ScanStore::new(corpus.clone());
    let preloaded = PreloadedStore::build(corpus, ["tier", "katze", "giraffe"]).unwrap();

    assert_eq!(preloaded.found(), 2);
    for word in ["tier", "katze", "giraffe", "hund"] {
        assert_eq!(scan.lookup(word).unwrap(), preloaded.lookup(word).unwrap(), "word {word}");
    }
}

#[test]
fn multi_member_gzip_is_read_to_the_end() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vectors.txt.gz");
    let mut file = File::create(&path).unwrap();
    for chunk in ["tier 1 0\n", "hund 0 1\n"] {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(chunk.as_bytes()).unwrap();
        file.write_all(&encoder.finish().unwrap()).unwrap();
    }
    drop(file);

    let store = ScanStore::open(&path).unwrap();
    assert!(store.lookup("hund").unwrap().is_some());
}
