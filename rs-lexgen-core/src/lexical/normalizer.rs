use std::collections::HashSet;
use std::thread;

use log::debug;

use super::{KnowledgeBase, Lemmatizer, PosCategory, PosTagger, Token};
use crate::error::GenerateError;

/// Normalization settings.
///
/// # Invariants
/// - `passes >= 1`
#[derive(Clone, Debug)]
pub struct NormalizerConfig {
	/// Normalize token chunks on scoped worker threads.
	pub parallel: bool,

	/// How many times the seed text goes through tokenize + normalize.
	passes: usize,
}

impl Default for NormalizerConfig {
	fn default() -> Self {
		Self { parallel: false, passes: 2 }
	}
}

impl NormalizerConfig {
	pub fn passes(&self) -> usize {
		self.passes
	}

	/// # Errors
	/// Returns an error if `passes` is 0.
	pub fn set_passes(&mut self, passes: usize) -> Result<(), GenerateError> {
		if passes == 0 {
			return Err(GenerateError::InvalidPasses(passes));
		}
		self.passes = passes;
		Ok(())
	}
}

/// Maps surface tokens to canonical tokens.
///
/// For each token: tag it, lemmatize it with that category, then try a
/// synonym correction against the knowledge base (nouns, verbs and
/// adjectives only). Knowledge-base failures degrade to the plain lemma.
///
/// One normalizer is built per pipeline run; it holds no mutable state, so
/// chunks of a token stream can be normalized concurrently.
#[derive(Clone, Debug)]
pub struct LexicalNormalizer<T, L, K> {
	tagger: T,
	lemmatizer: L,
	knowledge: K,
}

impl<T, L, K> LexicalNormalizer<T, L, K>
where
	T: PosTagger,
	L: Lemmatizer,
	K: KnowledgeBase,
{
	pub fn new(tagger: T, lemmatizer: L, knowledge: K) -> Self {
		Self { tagger, lemmatizer, knowledge }
	}

	pub fn knowledge(&self) -> &K {
		&self.knowledge
	}

	/// Tags a surface token.
	pub fn tag(&self, text: &str) -> Token {
		Token::new(text, self.tagger.tag(text))
	}

	/// Canonical form of a single tagged token.
	pub fn canonicalize(&self, token: &Token) -> String {
		let lemma = self.lemmatizer.lemmatize(token.text(), token.category());
		self.correct(&lemma, token.category())
	}

	/// Replaces `lemma` by the candidate lemma most similar to its first sense.
	///
	/// Candidates are the lemma names of every synset matching `lemma`, in
	/// synset order, first occurrence kept. Each one is scored by the
	/// similarity between the first synset and the synset it came from
	/// (undefined counts as 0); the stable sort keeps candidate order on ties.
	pub fn correct(&self, lemma: &str, category: PosCategory) -> String {
		if !category.is_correctable() {
			return lemma.to_owned();
		}

		let synsets = self.knowledge.synsets_for(lemma, category);
		let Some(reference) = synsets.first() else {
			return lemma.to_owned();
		};

		let mut scores = Vec::with_capacity(synsets.len());
		for synset in &synsets {
			match self.knowledge.similarity(reference, synset) {
				Ok(score) => scores.push(score.unwrap_or(0.0)),
				Err(e) => {
					debug!("no correction for `{lemma}`: {e}");
					return lemma.to_owned();
				}
			}
		}

		let mut seen = HashSet::new();
		let mut candidates: Vec<(String, f64)> = Vec::new();
		for (synset, score) in synsets.iter().zip(scores) {
			for name in self.knowledge.lemmas_of(synset) {
				if seen.insert(name.clone()) {
					candidates.push((name, score));
				}
			}
		}

		candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
		match candidates.into_iter().next() {
			Some((best, _)) => best,
			None => lemma.to_owned(),
		}
	}

	/// Normalizes a token sequence. Output has one canonical token per input token, in order.
	pub fn normalize<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
		tokens.iter().map(|t| self.canonicalize(&self.tag(t.as_ref()))).collect()
	}
}

impl<T, L, K> LexicalNormalizer<T, L, K>
where
	T: PosTagger + Sync,
	L: Lemmatizer + Sync,
	K: KnowledgeBase + Sync,
{
	/// Same output as [`normalize`](Self::normalize), computed on scoped threads.
	///
	/// The sequence is split into `cpus * 8` chunks; chunk results are
	/// concatenated in chunk order.
	pub fn normalize_parallel<S: AsRef<str> + Sync>(&self, tokens: &[S]) -> Vec<String> {
		if tokens.is_empty() {
			return Vec::new();
		}

		let chunks = num_cpus::get() * 8;
		let chunk_size = tokens.len().div_ceil(chunks);

		thread::scope(|scope| {
			let handles: Vec<_> = tokens
				.chunks(chunk_size)
				.map(|chunk| scope.spawn(move || self.normalize(chunk)))
				.collect();

			let mut normalized = Vec::with_capacity(tokens.len());
			for handle in handles {
				match handle.join() {
					Ok(part) => normalized.extend(part),
					Err(panic) => std::panic::resume_unwind(panic),
				}
			}
			normalized
		})
	}
}
