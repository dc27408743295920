use log::debug;
use rand::Rng;

use super::backoff::BackoffChain;
use super::chain::ChainModel;
use super::generation_input::{FallbackPolicy, GenerationInput};
use super::sampler;
use crate::error::GenerateError;

/// Suffixes glued to the previous token without a space.
const CONTRACTIONS: &[&str] = &["'s", "'t", "'ve", "n't"];

/// Tokenizer artifact removed from the final text.
const STRAY_QUOTE: &str = " ``";

/// Lifecycle of a [`Generator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// Window set to the first `order` tokens, nothing generated yet.
	Seeded,
	/// At least one token generated, fewer than `length`.
	Generating,
	/// Exactly `length` tokens generated.
	Done,
}

/// Result of a generation run.
#[derive(Clone, Debug, PartialEq)]
pub struct Generation {
	/// Generated text, seed prefix and stray quotes removed.
	pub text: String,

	/// The sampled tokens, exactly `length` of them.
	pub tokens: Vec<String>,

	/// How many times the current window was unseen and a fallback was taken.
	pub fallbacks: usize,
}

/// Drives a chain model through the sampler to produce a fixed number of tokens.
///
/// # Responsibilities
/// - Own the chain model(s) built from the normalized training sequence
/// - Track the current window and the output buffer
/// - Recover from unseen windows according to the `FallbackPolicy`
///
/// # Invariants
/// - the chain model is not empty
/// - `window` always holds exactly `order` tokens
/// - `tokens.len() <= length`, with equality exactly in `Phase::Done`
#[derive(Debug)]
pub struct Generator {
	chains: BackoffChain,
	corpus: Vec<String>,
	input: GenerationInput,
	phase: Phase,
	window: Vec<String>,
	seed_text: String,
	output: String,
	tokens: Vec<String>,
	fallbacks: usize,
}

impl Generator {
	/// Builds the chain model from `corpus` and seeds the generator.
	///
	/// `corpus` is the normalized token sequence of `seed_text`. Lower-order
	/// models are only built for `FallbackPolicy::Backoff`.
	///
	/// # Errors
	/// Returns `InsufficientInput` if `corpus` has fewer than `order + 1`
	/// tokens, since no transition could be observed.
	pub fn new(corpus: Vec<String>, seed_text: &str, input: &GenerationInput) -> Result<Self, GenerateError> {
		let order = input.order();
		if corpus.len() <= order {
			return Err(GenerateError::InsufficientInput {
				tokens: corpus.len(),
				required: order.saturating_add(1),
				order,
			});
		}

		let chains = match input.fallback {
			FallbackPolicy::Resample => BackoffChain::from_model(ChainModel::build(&corpus, order)?),
			FallbackPolicy::Backoff => BackoffChain::build(&corpus, order)?,
		};
		debug!("chain model of order {order}: {} windows from {} tokens", chains.top().len(), corpus.len());

		Ok(Self {
			window: corpus[..order].to_vec(),
			chains,
			corpus,
			input: input.clone(),
			phase: Phase::Seeded,
			seed_text: seed_text.to_owned(),
			output: seed_text.to_owned(),
			tokens: Vec::new(),
			fallbacks: 0,
		})
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	/// Current window.
	pub fn window(&self) -> &[String] {
		&self.window
	}

	/// Tokens generated so far.
	pub fn tokens(&self) -> &[String] {
		&self.tokens
	}

	/// Generates one token and advances the window.
	///
	/// Returns `None` once `length` tokens have been generated.
	pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&str> {
		match self.phase {
			Phase::Done => return None,
			Phase::Seeded => self.phase = Phase::Generating,
			Phase::Generating => (),
		}

		let token = self.next_token(rng)?;

		if joins_previous(&token) {
			self.output.push_str(&token);
		} else {
			self.output.push(' ');
			self.output.push_str(&token);
		}

		self.window.remove(0);
		self.window.push(token.clone());
		self.tokens.push(token);

		if self.tokens.len() >= self.input.length() {
			self.phase = Phase::Done;
		}
		self.tokens.last().map(String::as_str)
	}

	/// Runs the generator to completion.
	pub fn run<R: Rng + ?Sized>(mut self, rng: &mut R) -> Generation {
		while self.step(rng).is_some() {}
		self.finish()
	}

	/// Output so far, with the seed prefix and stray quotes removed.
	pub fn finish(self) -> Generation {
		let generated = self.output.strip_prefix(self.seed_text.as_str()).unwrap_or(&self.output);
		Generation {
			text: generated.replace(STRAY_QUOTE, ""),
			tokens: self.tokens,
			fallbacks: self.fallbacks,
		}
	}

	/// Samples the token following the current window, taking a fallback if
	/// the window was never observed.
	fn next_token<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
		let temperature = self.input.temperature();

		if !self.chains.top().contains(&self.window) {
			self.fallbacks += 1;

			if self.input.fallback == FallbackPolicy::Backoff {
				if let Some((order, state)) = self.chains.lookup(&self.window) {
					debug!("unseen window {:?}, backing off to {:?} (order {order})", self.window, state.window().tokens());
					return sampler::sample(state.transitions(), temperature, rng).map(str::to_owned);
				}
			}

			let window = resample(self.chains.top(), &self.corpus, self.input.max_resample_attempts, rng)?;
			debug!("unseen window {:?}, resampled {:?}", self.window, window);
			self.window = window;
		}

		let state = self.chains.top().get(&self.window)?;
		sampler::sample(state.transitions(), temperature, rng).map(str::to_owned)
	}
}

/// Draws a window of `model.order()` tokens uniformly, with replacement,
/// from `corpus`, redrawing until the model knows it.
///
/// After `attempts` misses, a uniformly random observed window is used.
/// Returns `None` only for an empty model.
pub fn resample<R: Rng + ?Sized>(
	model: &ChainModel,
	corpus: &[String],
	attempts: usize,
	rng: &mut R,
) -> Option<Vec<String>> {
	if !corpus.is_empty() {
		for _ in 0..attempts {
			let window: Vec<String> = (0..model.order())
				.map(|_| corpus[rng.random_range(0..corpus.len())].clone())
				.collect();
			if model.contains(&window) {
				return Some(window);
			}
		}
	}
	model.random_window(rng).map(|w| w.tokens().to_vec())
}

/// Punctuation marks and contraction suffixes attach to the previous token.
fn joins_previous(token: &str) -> bool {
	if CONTRACTIONS.iter().any(|c| c.eq_ignore_ascii_case(token)) {
		return true;
	}
	let mut chars = token.chars();
	matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_punctuation())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn strings(text: &str) -> Vec<String> {
		text.split(' ').map(str::to_owned).collect()
	}

	fn input(length: usize, order: usize) -> GenerationInput {
		GenerationInput::new(length, order, 1.0).unwrap()
	}

	#[test]
	fn follows_the_only_path() {
		let corpus = strings("the cat sat on the mat");
		let mut generator = Generator::new(corpus, "the cat sat on the mat", &input(2, 2)).unwrap();
		let mut rng = StdRng::seed_from_u64(0);

		assert_eq!(generator.phase(), Phase::Seeded);
		assert_eq!(generator.window(), strings("the cat").as_slice());

		assert_eq!(generator.step(&mut rng), Some("sat"));
		assert_eq!(generator.phase(), Phase::Generating);
		assert_eq!(generator.step(&mut rng), Some("on"));
		assert_eq!(generator.phase(), Phase::Done);
		assert_eq!(generator.step(&mut rng), None);

		let generation = generator.finish();
		assert_eq!(generation.tokens, strings("sat on"));
		assert_eq!(generation.text, " sat on");
		assert_eq!(generation.fallbacks, 0);
	}

	#[test]
	fn generates_exactly_length_tokens() {
		let corpus = strings("a b a c b a d . a b");
		for length in [1, 5, 40] {
			for order in 1..=3 {
				let mut rng = StdRng::seed_from_u64(length as u64 * 10 + order as u64);
				let generation = Generator::new(corpus.clone(), "", &input(length, order)).unwrap().run(&mut rng);
				assert_eq!(generation.tokens.len(), length);
			}
		}
	}

	#[test]
	fn unseen_window_is_resampled_from_the_corpus() {
		// (mat, .) ends the sequence and is never followed
		let corpus = strings("the cat sat on the mat .");
		let mut rng = StdRng::seed_from_u64(5);
		let generation = Generator::new(corpus.clone(), "", &input(30, 2)).unwrap().run(&mut rng);

		assert_eq!(generation.tokens.len(), 30);
		assert!(generation.fallbacks > 0);
		assert!(generation.tokens.iter().all(|t| corpus.contains(t)));
	}

	#[test]
	fn resample_yields_known_windows_of_order_tokens() {
		let corpus = strings("x y z x y w");
		let model = ChainModel::build(&corpus, 3).unwrap();
		let mut rng = StdRng::seed_from_u64(9);
		for attempts in [0, 1, 64] {
			for _ in 0..20 {
				let window = resample(&model, &corpus, attempts, &mut rng).unwrap();
				assert_eq!(window.len(), 3);
				assert!(window.iter().all(|t| corpus.contains(t)));
				assert!(model.contains(&window));
			}
		}
	}

	#[test]
	fn backoff_uses_shorter_windows() {
		let corpus = strings("a b c a b d");
		let mut input = input(20, 3);
		input.fallback = FallbackPolicy::Backoff;
		let mut rng = StdRng::seed_from_u64(21);
		let generation = Generator::new(corpus.clone(), "", &input).unwrap().run(&mut rng);
		assert_eq!(generation.tokens.len(), 20);
		assert!(generation.tokens.iter().all(|t| corpus.contains(t)));
	}

	#[test]
	fn too_short_corpus_is_rejected() {
		let result = Generator::new(strings("a b"), "a b", &input(3, 2));
		assert!(matches!(
			result,
			Err(GenerateError::InsufficientInput { tokens: 2, required: 3, order: 2 })
		));
	}

	#[test]
	fn huge_order_is_insufficient() {
		let input = GenerationInput::new(1, usize::MAX, 1.0).unwrap();
		let result = Generator::new(strings("a b c"), "", &input);
		assert!(matches!(
			result,
			Err(GenerateError::InsufficientInput { tokens: 3, required: usize::MAX, order: usize::MAX })
		));
	}

	#[test]
	fn huge_length_does_not_preallocate() {
		let input = GenerationInput::new(usize::MAX, 1, 1.0).unwrap();
		let mut generator = Generator::new(strings("a b a"), "", &input).unwrap();
		let mut rng = StdRng::seed_from_u64(3);
		for _ in 0..10 {
			assert!(generator.step(&mut rng).is_some());
		}
		assert_eq!(generator.phase(), Phase::Generating);
		assert_eq!(generator.tokens().len(), 10);
	}

	#[test]
	fn punctuation_and_contractions_join() {
		assert!(joins_previous(","));
		assert!(joins_previous("."));
		assert!(joins_previous("n't"));
		assert!(joins_previous("'s"));
		assert!(joins_previous("'t"));
		assert!(joins_previous("'T"));
		assert!(joins_previous("N'T"));
		assert!(!joins_previous("``"));
		assert!(!joins_previous("cat"));
		assert!(!joins_previous("..."));
	}

	#[test]
	fn output_spacing_and_stray_quotes() {
		// Order 1 over unique tokens is a single path
		let corpus = strings("`` she do n't know , he said");
		let mut rng = StdRng::seed_from_u64(1);
		let generation = Generator::new(corpus, "seed", &input(7, 1)).unwrap().run(&mut rng);
		assert_eq!(generation.tokens, strings("she do n't know , he said"));
		assert_eq!(generation.text, " she don't know, he said");

		let corpus = strings("a `` b");
		let generation = Generator::new(corpus, "a `` b", &input(2, 1)).unwrap().run(&mut rng);
		assert_eq!(generation.tokens, strings("`` b"));
		assert_eq!(generation.text, " b");
	}

	#[test]
	fn seeded_runs_are_reproducible() {
		let corpus = strings("a b a c b a d . a b c c a");
		let run = |seed| {
			let mut rng = StdRng::seed_from_u64(seed);
			Generator::new(corpus.clone(), "", &input(50, 1)).unwrap().run(&mut rng)
		};
		assert_eq!(run(42), run(42));
	}
}
