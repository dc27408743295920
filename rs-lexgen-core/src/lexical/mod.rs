//! Lexical layer: tokenization, tagging, lemmatization and the synonym
//! knowledge base used to canonicalize tokens before chain construction.
//!
//! Each collaborator is a trait so a heavier backend (a statistical tagger,
//! a full WordNet binding, an embedding service) can replace the bundled
//! rule-based implementations without touching the chain logic.

use serde::Deserialize;

use crate::error::LexiconError;

/// Rule-based part-of-speech tagger.
pub mod tagger;

/// Morphy-style lemmatizer.
pub mod lemmatizer;

/// In-memory synonym table with Wu-Palmer similarity.
pub mod synonyms;

/// Treebank-style word tokenizer.
pub mod tokenizer;

/// Token canonicalization (lemma + synonym correction).
pub mod normalizer;

/// Coarse part-of-speech category.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum PosCategory {
	Noun,
	Verb,
	Adjective,
	Adverb,
	Other,
}

impl PosCategory {
	/// Whether tokens of this category go through synonym correction.
	pub fn is_correctable(self) -> bool {
		matches!(self, PosCategory::Noun | PosCategory::Verb | PosCategory::Adjective)
	}
}

/// A tagged surface token. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
	text: String,
	category: PosCategory,
}

impl Token {
	pub fn new(text: impl Into<String>, category: PosCategory) -> Self {
		Self { text: text.into(), category }
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn category(&self) -> PosCategory {
		self.category
	}
}

/// Identifier of a synonym set inside a knowledge base.
pub type SynsetId = String;

/// Splits raw text into surface tokens.
pub trait Tokenizer {
	fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Assigns a part-of-speech category to an isolated token.
pub trait PosTagger {
	fn tag(&self, token: &str) -> PosCategory;
}

/// Reduces a token to its dictionary form for a given category.
pub trait Lemmatizer {
	fn lemmatize(&self, token: &str, category: PosCategory) -> String;
}

/// Lexical knowledge base: synonym sets and a pairwise similarity between them.
pub trait KnowledgeBase {
	/// Synsets containing `lemma` for the given category, most common sense first.
	fn synsets_for(&self, lemma: &str, category: PosCategory) -> Vec<SynsetId>;

	/// Lemma names of a synset, in their stored order.
	fn lemmas_of(&self, synset: &SynsetId) -> Vec<String>;

	/// Similarity in `[0, 1]` between two synsets.
	///
	/// `Ok(None)` means the similarity is undefined for this pair.
	fn similarity(&self, a: &SynsetId, b: &SynsetId) -> Result<Option<f64>, LexiconError>;
}
