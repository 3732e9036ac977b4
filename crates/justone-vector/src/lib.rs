//! justone-vector
//!
//! Word embedding lookup and cosine distance for the originality scorer.
//!
//! # Overview
//!
//! - **Corpus access**: read a gzip-compressed `word c1 c2 ... cN` text corpus
//!   line by line without loading it into memory
//! - **Lookup strategies**: a stateless full scan per word ([`ScanStore`]) or a
//!   single pass for a known word set ([`PreloadedStore`])
//! - **Distance**: cosine distance scaled to `[0, 200]`
//!
//! # Example
//!
//! ```ignore
//! use justone_vector::distance::cosine_distance;
//! use justone_vector::store::{EmbeddingLookup, ScanStore};
//!
//! let store = ScanStore::open("vectors_german.txt.gz")?;
//! let katze = store.lookup("katze")?.expect("katze in corpus");
//! let tier = store.lookup("tier")?.expect("tier in corpus");
//! println!("{}", cosine_distance(&katze, &tier)?);
//! ```
//!
//! # Modules
//!
//! - [`store`] - Corpus readers and lookup strategies
//! - [`types`] - [`Embedding`]
//! - [`distance`] - Distance functions
//! - [`error`] - Error types

pub mod distance;
pub mod error;
pub mod store;
pub mod types;

pub use distance::cosine_distance;
pub use error::VectorError;
pub use store::{Corpus, EmbeddingLookup, PreloadedStore, ScanStore};
pub use types::Embedding;
