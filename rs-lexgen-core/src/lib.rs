//! Markov text generation over lexically normalized tokens.
//!
//! This crate provides a word-level text generator, including:
//! - Treebank-style tokenization, part-of-speech tagging and lemmatization
//! - Synonym correction against a lexical knowledge base
//! - Fixed-order Markov chains with optional lower-order backoff
//! - Temperature-weighted sampling with an injectable random generator
//! - I/O and presentation helpers for front ends
//!
//! The single-call entry point is [`generate`]; [`Pipeline`] exposes the
//! same flow with custom components, settings and random generator.

/// Error types.
pub mod error;

/// I/O utilities (file loading, corpus paths).
pub mod io;

/// Tokenizer, tagger, lemmatizer, knowledge base and normalizer.
pub mod lexical;

/// Chain models, sampler and generator.
pub mod model;

/// End-to-end generation.
pub mod pipeline;

/// Capitalization and line wrapping of generated text.
pub mod present;

pub use error::{GenerateError, LexiconError};
pub use lexical::normalizer::NormalizerConfig;
pub use model::{FallbackPolicy, Generation, GenerationInput};
pub use pipeline::{DefaultPipeline, Pipeline, generate};
