use std::collections::HashMap;
use std::collections::hash_map::Entry;

use rand::Rng;

use super::state::{State, Window};
use crate::error::GenerateError;

/// Order-`k` Markov chain over canonical tokens.
///
/// Maps every window of `k` consecutive tokens to the counts of the tokens
/// that followed it in the training sequence.
///
/// # Responsibilities
/// - Build the model from a token sequence
/// - Look up the next-token distribution of a window
/// - Pick a uniformly random observed window
///
/// # Invariants
/// - `order >= 1`
/// - Every key of `states` is a window of exactly `order` tokens
/// - Every state has at least one transition, each count is >= 1
/// - `windows` lists the keys of `states` once each, in first-seen order
#[derive(Clone, Debug)]
pub struct ChainModel {
	/// Number of tokens in a window.
	order: usize,

	/// Mapping from a window to its corresponding state.
	states: HashMap<Window, State>,

	/// Observed windows, in training order.
	windows: Vec<Window>,
}

impl ChainModel {
	/// Creates an empty model of order `order`.
	///
	/// # Errors
	/// Returns an error if `order < 1`.
	pub fn new(order: usize) -> Result<Self, GenerateError> {
		if order < 1 {
			return Err(GenerateError::InvalidOrder(order));
		}
		Ok(Self { order, states: HashMap::new(), windows: Vec::new() })
	}

	/// Builds a model of order `order` from a canonical token sequence.
	///
	/// A sequence shorter than `order + 1` tokens yields an empty model.
	pub fn build<S: AsRef<str>>(tokens: &[S], order: usize) -> Result<Self, GenerateError> {
		let mut model = Self::new(order)?;
		model.add_sequence(tokens);
		Ok(model)
	}

	/// Records every `(window, next)` pair of a token sequence.
	///
	/// For each position `i` in `0..=len - order - 1`, the window is
	/// `tokens[i..i + order]` and the next token is `tokens[i + order]`.
	pub fn add_sequence<S: AsRef<str>>(&mut self, tokens: &[S]) {
		if tokens.len() <= self.order {
			return;
		}
		for ngram in tokens.windows(self.order + 1) {
			let (prefix, next) = ngram.split_at(self.order);
			let key: Vec<String> = prefix.iter().map(|t| t.as_ref().to_owned()).collect();

			let state = match self.states.entry(Window::new(key)) {
				Entry::Occupied(entry) => entry.into_mut(),
				Entry::Vacant(entry) => {
					let window = entry.key().clone();
					self.windows.push(window.clone());
					entry.insert(State::new(window))
				}
			};
			state.add_transition(next[0].as_ref());
		}
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct windows.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// State of a window, if it was observed.
	pub fn get(&self, window: &[String]) -> Option<&State> {
		self.states.get(window)
	}

	pub fn contains(&self, window: &[String]) -> bool {
		self.states.contains_key(window)
	}

	/// Observed windows in first-seen order.
	pub fn windows(&self) -> &[Window] {
		&self.windows
	}

	/// Uniformly random observed window.
	///
	/// Returns `None` if the model is empty.
	pub fn random_window<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Window> {
		if self.windows.is_empty() {
			return None;
		}
		self.windows.get(rng.random_range(0..self.windows.len()))
	}
}
