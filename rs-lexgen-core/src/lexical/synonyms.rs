use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use super::{KnowledgeBase, PosCategory, SynsetId};
use crate::error::{GenerateError, LexiconError};
use crate::io;

/// English lexicon shipped with the crate.
const BUILTIN_LEXICON: &str = include_str!("../../data/lexicon.json");

/// A synonym set as stored in a lexicon file.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct SynsetEntry {
	pub id: SynsetId,
	pub pos: PosCategory,
	/// Lemma names, most representative first.
	pub lemmas: Vec<String>,
	/// Parent synset in the is-a hierarchy. Roots have none.
	#[serde(default)]
	pub hypernym: Option<SynsetId>,
}

#[derive(Deserialize, Debug)]
struct LexiconFile {
	synsets: Vec<SynsetEntry>,
}

/// In-memory lexical knowledge base.
///
/// Synsets form a forest through their hypernym links; similarity between
/// two synsets of the same category is Wu-Palmer over that forest.
///
/// # Invariants
/// - synset ids are unique
/// - every hypernym refers to a synset of the table
/// - hypernym links are acyclic, so every synset has a finite depth (roots have depth 1)
#[derive(Clone, Debug)]
pub struct SynonymTable {
	synsets: Vec<SynsetEntry>,
	index: HashMap<SynsetId, usize>,
	/// `(category, lowercase lemma)` -> synset indices in table order.
	by_lemma: HashMap<(PosCategory, String), Vec<usize>>,
	parents: Vec<Option<usize>>,
	depths: Vec<usize>,
}

impl SynonymTable {
	/// Builds a table from synset entries, validating ids and hypernym links.
	pub fn new(synsets: Vec<SynsetEntry>) -> Result<Self, LexiconError> {
		let mut index = HashMap::with_capacity(synsets.len());
		for (i, synset) in synsets.iter().enumerate() {
			if index.insert(synset.id.clone(), i).is_some() {
				return Err(LexiconError::DuplicateSynset(synset.id.clone()));
			}
		}

		let mut parents = Vec::with_capacity(synsets.len());
		for synset in &synsets {
			let parent = match &synset.hypernym {
				Some(hypernym) => Some(*index.get(hypernym).ok_or_else(|| LexiconError::UnknownHypernym {
					synset: synset.id.clone(),
					hypernym: hypernym.clone(),
				})?),
				None => None,
			};
			parents.push(parent);
		}

		let mut depths = Vec::with_capacity(synsets.len());
		for (i, synset) in synsets.iter().enumerate() {
			let mut depth = 1;
			let mut current = parents[i];
			while let Some(parent) = current {
				depth += 1;
				if depth > synsets.len() {
					return Err(LexiconError::HypernymCycle(synset.id.clone()));
				}
				current = parents[parent];
			}
			depths.push(depth);
		}

		let mut by_lemma: HashMap<(PosCategory, String), Vec<usize>> = HashMap::new();
		for (i, synset) in synsets.iter().enumerate() {
			for lemma in &synset.lemmas {
				let senses = by_lemma.entry((synset.pos, lemma.to_lowercase())).or_default();
				if !senses.contains(&i) {
					senses.push(i);
				}
			}
		}

		Ok(Self { synsets, index, by_lemma, parents, depths })
	}

	/// Parses a JSON lexicon (`{"synsets": [...]}`).
	pub fn from_json(json: &str) -> Result<Self, LexiconError> {
		let file: LexiconFile = serde_json::from_str(json)?;
		Self::new(file.synsets)
	}

	/// Loads a JSON lexicon from disk.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GenerateError> {
		let json = io::load_text(path)?;
		Ok(Self::from_json(&json)?)
	}

	/// The small English lexicon embedded in the crate.
	pub fn builtin() -> Result<Self, LexiconError> {
		Self::from_json(BUILTIN_LEXICON)
	}

	pub fn len(&self) -> usize {
		self.synsets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.synsets.is_empty()
	}

	/// Every `(category, lemma)` pair known to the table, lemmas lower-cased.
	///
	/// Suitable for [`MorphyLemmatizer::with_vocabulary`](super::lemmatizer::MorphyLemmatizer::with_vocabulary).
	pub fn vocabulary(&self) -> impl Iterator<Item = (PosCategory, String)> + '_ {
		self.by_lemma.keys().cloned()
	}

	fn lookup(&self, id: &SynsetId) -> Result<usize, LexiconError> {
		self.index.get(id).copied().ok_or_else(|| LexiconError::UnknownSynset(id.clone()))
	}
}

impl KnowledgeBase for SynonymTable {
	fn synsets_for(&self, lemma: &str, category: PosCategory) -> Vec<SynsetId> {
		self.by_lemma
			.get(&(category, lemma.to_lowercase()))
			.map(|senses| senses.iter().map(|&i| self.synsets[i].id.clone()).collect())
			.unwrap_or_default()
	}

	fn lemmas_of(&self, synset: &SynsetId) -> Vec<String> {
		self.index
			.get(synset)
			.map(|&i| self.synsets[i].lemmas.clone())
			.unwrap_or_default()
	}

	/// Wu-Palmer similarity: `2 * depth(lcs) / (depth(a) + depth(b))`.
	///
	/// Undefined across categories or between trees without a common root.
	fn similarity(&self, a: &SynsetId, b: &SynsetId) -> Result<Option<f64>, LexiconError> {
		let a = self.lookup(a)?;
		let b = self.lookup(b)?;
		if self.synsets[a].pos != self.synsets[b].pos {
			return Ok(None);
		}

		let mut ancestors = HashSet::new();
		let mut current = Some(a);
		while let Some(node) = current {
			ancestors.insert(node);
			current = self.parents[node];
		}

		// Hypernym links form a tree, so the first shared node walking up from `b` is the deepest.
		let mut current = Some(b);
		while let Some(node) = current {
			if ancestors.contains(&node) {
				let lcs = self.depths[node] as f64;
				return Ok(Some(2.0 * lcs / (self.depths[a] + self.depths[b]) as f64));
			}
			current = self.parents[node];
		}
		Ok(None)
	}
}
