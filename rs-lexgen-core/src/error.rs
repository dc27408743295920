use std::path::PathBuf;

/// Errors surfaced by the generation pipeline.
///
/// Validation variants are raised before any tokenization, chain building
/// or random draw takes place.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
	/// The chain order must be at least 1.
	#[error("order must be >= 1, got {0}")]
	InvalidOrder(usize),

	/// At least one token must be generated.
	#[error("length must be >= 1, got {0}")]
	InvalidLength(usize),

	/// Temperature must be finite and strictly positive.
	#[error("temperature must be > 0, got {0}")]
	InvalidTemperature(f64),

	/// Normalization passes must be at least 1.
	#[error("normalization passes must be >= 1, got {0}")]
	InvalidPasses(usize),

	/// The normalized seed text is too short to observe a single transition.
	#[error("seed text has {tokens} normalized tokens, at least {required} are needed for order {order}")]
	InsufficientInput { tokens: usize, required: usize, order: usize },

	/// The source document does not exist.
	#[error("source not found: {}", .0.display())]
	SourceNotFound(PathBuf),

	/// A lexicon file could not be parsed.
	#[error("invalid lexicon: {0}")]
	Lexicon(#[from] LexiconError),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Errors raised by a lexical knowledge base.
///
/// The normalizer swallows these per token; they only propagate when a
/// lexicon is loaded.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
	#[error("unknown synset `{0}`")]
	UnknownSynset(String),

	#[error("duplicate synset `{0}`")]
	DuplicateSynset(String),

	#[error("synset `{synset}` has unknown hypernym `{hypernym}`")]
	UnknownHypernym { synset: String, hypernym: String },

	#[error("hypernym cycle through `{0}`")]
	HypernymCycle(String),

	#[error(transparent)]
	Parse(#[from] serde_json::Error),
}
