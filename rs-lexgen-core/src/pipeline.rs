use log::info;
use rand::Rng;

use crate::error::GenerateError;
use crate::lexical::lemmatizer::MorphyLemmatizer;
use crate::lexical::normalizer::{LexicalNormalizer, NormalizerConfig};
use crate::lexical::synonyms::SynonymTable;
use crate::lexical::tagger::SuffixTagger;
use crate::lexical::tokenizer::TreebankTokenizer;
use crate::lexical::{KnowledgeBase, Lemmatizer, PosTagger, Tokenizer};
use crate::model::{Generation, GenerationInput, Generator};

/// Pipeline built from the bundled lexical components.
pub type DefaultPipeline = Pipeline<TreebankTokenizer, SuffixTagger, MorphyLemmatizer, SynonymTable>;

/// Raw text to generated text: tokenize, normalize, build the chain, sample.
///
/// The pipeline owns its lexical components and holds no state between
/// runs; every call to [`generate`](Self::generate) builds its own chain model.
#[derive(Clone, Debug)]
pub struct Pipeline<Z, T, L, K> {
	tokenizer: Z,
	normalizer: LexicalNormalizer<T, L, K>,
	config: NormalizerConfig,
}

impl DefaultPipeline {
	/// Default components around a given synonym table.
	///
	/// The lemmatizer prefers lemmas known to the table.
	pub fn with_lexicon(lexicon: SynonymTable) -> Self {
		let lemmatizer = MorphyLemmatizer::with_vocabulary(lexicon.vocabulary());
		Self::new(TreebankTokenizer::new(), LexicalNormalizer::new(SuffixTagger::new(), lemmatizer, lexicon))
	}

	/// Default components around the embedded English lexicon.
	pub fn builtin() -> Result<Self, GenerateError> {
		Ok(Self::with_lexicon(SynonymTable::builtin()?))
	}
}

impl<Z, T, L, K> Pipeline<Z, T, L, K>
where
	Z: Tokenizer,
	T: PosTagger + Sync,
	L: Lemmatizer + Sync,
	K: KnowledgeBase + Sync,
{
	pub fn new(tokenizer: Z, normalizer: LexicalNormalizer<T, L, K>) -> Self {
		Self { tokenizer, normalizer, config: NormalizerConfig::default() }
	}

	pub fn with_config(mut self, config: NormalizerConfig) -> Self {
		self.config = config;
		self
	}

	pub fn config(&self) -> &NormalizerConfig {
		&self.config
	}

	pub fn normalizer(&self) -> &LexicalNormalizer<T, L, K> {
		&self.normalizer
	}

	/// Canonical token sequence of `text`.
	///
	/// Each pass tokenizes the text and normalizes the tokens; the next pass
	/// starts from those tokens joined by single spaces.
	pub fn normalize_text(&self, text: &str) -> Vec<String> {
		let mut tokens = self.normalize_tokens(&self.tokenizer.tokenize(text));
		for _ in 1..self.config.passes() {
			let joined = tokens.join(" ");
			tokens = self.normalize_tokens(&self.tokenizer.tokenize(&joined));
		}
		tokens
	}

	/// Generates `input.length()` tokens from a chain trained on `seed_text`.
	///
	/// # Errors
	/// - `InsufficientInput` if the normalized text has fewer than `order + 1` tokens
	pub fn generate<R: Rng + ?Sized>(
		&self,
		seed_text: &str,
		input: &GenerationInput,
		rng: &mut R,
	) -> Result<Generation, GenerateError> {
		info!("normalizing {} bytes of seed text ({} passes)", seed_text.len(), self.config.passes());
		let corpus = self.normalize_text(seed_text);

		info!(
			"generating {} tokens, order {}, temperature {}, fallback {}",
			input.length(),
			input.order(),
			input.temperature(),
			input.fallback
		);
		let generation = Generator::new(corpus, seed_text, input)?.run(rng);
		info!("generation done, {} fallbacks", generation.fallbacks);
		Ok(generation)
	}

	fn normalize_tokens(&self, tokens: &[String]) -> Vec<String> {
		if self.config.parallel {
			self.normalizer.normalize_parallel(tokens)
		} else {
			self.normalizer.normalize(tokens)
		}
	}
}

/// Generates `length` tokens of text in the style of `seed_text`.
///
/// Uses the bundled lexical components, the default normalization settings
/// and the thread-local random generator. Arguments are validated before any
/// other work.
///
/// # Errors
/// - `InvalidLength`, `InvalidOrder`, `InvalidTemperature` for rejected arguments
/// - `InsufficientInput` if the seed text is too short for `order`
pub fn generate(seed_text: &str, length: usize, order: usize, temperature: f64) -> Result<String, GenerateError> {
	let input = GenerationInput::new(length, order, temperature)?;
	let pipeline = DefaultPipeline::builtin()?;
	Ok(pipeline.generate(seed_text, &input, &mut rand::rng())?.text)
}
