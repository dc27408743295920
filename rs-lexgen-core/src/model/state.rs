use std::borrow::Borrow;
use std::collections::BTreeMap;

/// An ordered, fixed-length run of canonical tokens used as a chain key.
///
/// Equality and hashing are structural. `Window` borrows as `[String]`, so
/// maps keyed by windows can be queried with a plain slice.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Window(Vec<String>);

impl Window {
	pub fn new(tokens: Vec<String>) -> Self {
		Self(tokens)
	}

	pub fn tokens(&self) -> &[String] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl Borrow<[String]> for Window {
	fn borrow(&self) -> &[String] {
		&self.0
	}
}

/// Represents a state in a chain model.
///
/// A `State` corresponds to one observed window and stores every token seen
/// immediately after it, with its number of observations.
///
/// Transitions are kept in a `BTreeMap` so that iterating them, and thus
/// sampling from them with a seeded generator, is reproducible.
///
/// ## Invariants
/// - All transitions belong to the same `window`
/// - A state reachable from a model has at least one transition
/// - Each transition occurrence count is strictly positive
#[derive(Clone, Debug)]
pub struct State {
	/// Identifier of the state.
	window: Window,
	/// Outgoing transitions indexed by the next token.
	/// Example: { "sat" => 2, "ran" => 1 }
	transitions: BTreeMap<String, usize>,
}

impl State {
	/// Creates a new empty state for the given window.
	pub fn new(window: Window) -> Self {
		Self { window, transitions: BTreeMap::new() }
	}

	pub fn window(&self) -> &Window {
		&self.window
	}

	/// Records an occurrence of a transition toward `next`.
	pub fn add_transition(&mut self, next: &str) {
		match self.transitions.get_mut(next) {
			Some(occurrence) => *occurrence += 1,
			None => {
				self.transitions.insert(next.to_owned(), 1);
			}
		}
	}

	/// Next-token counts.
	pub fn transitions(&self) -> &BTreeMap<String, usize> {
		&self.transitions
	}

	/// Number of observations of this window followed by any token.
	pub fn total(&self) -> usize {
		self.transitions.values().sum()
	}
}
