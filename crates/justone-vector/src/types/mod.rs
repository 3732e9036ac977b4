//! Core types for embedding lookup.
//!
//! - [`Embedding`] - A validated dense word embedding parsed from the corpus

mod embedding;

pub use embedding::Embedding;
