use std::collections::BTreeMap;

use super::chain::ChainModel;
use super::state::State;
use crate::error::GenerateError;

/// A chain model together with its lower-order companions.
///
/// `top` is the order-`k` model the generator samples from; `lower` holds
/// the models of orders `1..k` used to back off when a window of the top
/// model was never observed. `lower` is empty when backoff is not wanted.
///
/// # Invariants
/// - every key of `lower` is in `1..top.order()` and matches its model's order
#[derive(Clone, Debug)]
pub struct BackoffChain {
	top: ChainModel,
	lower: BTreeMap<usize, ChainModel>,
}

impl BackoffChain {
	/// Wraps a single model, without lower orders.
	pub fn from_model(top: ChainModel) -> Self {
		Self { top, lower: BTreeMap::new() }
	}

	/// Builds the models of every order from `1` to `order`.
	pub fn build<S: AsRef<str>>(tokens: &[S], order: usize) -> Result<Self, GenerateError> {
		let top = ChainModel::build(tokens, order)?;
		let mut lower = BTreeMap::new();
		// Orders at or above the sequence length would only add empty models
		for n in 1..order.min(tokens.len()) {
			lower.insert(n, ChainModel::build(tokens, n)?);
		}
		Ok(Self { top, lower })
	}

	pub fn top(&self) -> &ChainModel {
		&self.top
	}

	pub fn order(&self) -> usize {
		self.top.order()
	}

	/// State of the longest observed suffix of `window`, with the order it was found at.
	///
	/// `window` is expected to hold `order()` tokens; shorter windows are
	/// matched against the lower orders only.
	pub fn lookup(&self, window: &[String]) -> Option<(usize, &State)> {
		if window.len() == self.top.order() {
			if let Some(state) = self.top.get(window) {
				return Some((self.top.order(), state));
			}
		}

		self.lower
			.iter()
			.rev()
			.filter(|(n, _)| **n <= window.len())
			.find_map(|(n, model)| model.get(&window[window.len() - n..]).map(|state| (*n, state)))
	}
}
