use std::collections::{HashMap, HashSet};

use super::{Lemmatizer, PosCategory};

/// Detachment rules `(suffix, replacement)` tried in order against a vocabulary.
const NOUN_RULES: &[(&str, &str)] = &[
	("s", ""), ("ses", "s"), ("xes", "x"), ("zes", "z"), ("ches", "ch"), ("shes", "sh"),
	("men", "man"), ("ies", "y"),
];
const VERB_RULES: &[(&str, &str)] = &[
	("s", ""), ("ies", "y"), ("es", "e"), ("es", ""), ("ed", "e"), ("ed", ""), ("ing", "e"),
	("ing", ""),
];
const ADJECTIVE_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
	("children", "child"), ("men", "man"), ("women", "woman"), ("feet", "foot"),
	("teeth", "tooth"), ("mice", "mouse"), ("geese", "goose"), ("people", "person"),
	("lives", "life"), ("wives", "wife"), ("knives", "knife"), ("leaves", "leaf"),
	("wolves", "wolf"), ("halves", "half"), ("shelves", "shelf"),
];
const VERB_EXCEPTIONS: &[(&str, &str)] = &[
	("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"), ("been", "be"),
	("being", "be"), ("has", "have"), ("had", "have"), ("having", "have"), ("does", "do"),
	("did", "do"), ("done", "do"), ("went", "go"), ("gone", "go"), ("goes", "go"),
	("saw", "see"), ("seen", "see"), ("took", "take"), ("taken", "take"), ("came", "come"),
	("said", "say"), ("made", "make"), ("got", "get"), ("gotten", "get"), ("knew", "know"),
	("known", "know"), ("thought", "think"), ("ran", "run"), ("sat", "sit"), ("stood", "stand"),
	("found", "find"), ("told", "tell"), ("gave", "give"), ("given", "give"), ("left", "leave"),
	("felt", "feel"), ("heard", "hear"), ("began", "begin"), ("begun", "begin"),
	("kept", "keep"), ("held", "hold"), ("brought", "bring"), ("wrote", "write"),
	("written", "write"), ("spoke", "speak"), ("spoken", "speak"), ("fell", "fall"),
	("fallen", "fall"), ("ate", "eat"), ("eaten", "eat"), ("lay", "lie"), ("lain", "lie"),
	("led", "lead"), ("met", "meet"), ("paid", "pay"), ("sent", "send"), ("built", "build"),
	("lost", "lose"), ("caught", "catch"), ("fought", "fight"), ("taught", "teach"),
	("bought", "buy"), ("sold", "sell"), ("stole", "steal"), ("stolen", "steal"),
	("slept", "sleep"), ("swam", "swim"), ("drank", "drink"), ("sang", "sing"),
	("threw", "throw"), ("thrown", "throw"), ("grew", "grow"), ("grown", "grow"),
	("drew", "draw"), ("drawn", "draw"), ("flew", "fly"), ("flown", "fly"), ("wore", "wear"),
	("broke", "break"), ("broken", "break"), ("chose", "choose"), ("chosen", "choose"),
	("rose", "rise"), ("risen", "rise"), ("shot", "shoot"), ("hid", "hide"),
	("hidden", "hide"), ("struck", "strike"), ("shook", "shake"), ("woke", "wake"),
	("dying", "die"), ("lying", "lie"), ("tying", "tie"),
];
const ADJECTIVE_EXCEPTIONS: &[(&str, &str)] = &[
	("better", "good"), ("best", "good"), ("worse", "bad"), ("worst", "bad"),
	("further", "far"), ("farther", "far"), ("furthest", "far"), ("farthest", "far"),
	("more", "much"), ("most", "much"), ("less", "little"), ("least", "little"),
];

/// WordNet "morphy"-style lemmatizer.
///
/// Irregular forms come from per-category exception tables. Regular forms
/// are produced by suffix detachment: when a vocabulary is attached the
/// shortest detachment that is a known lemma wins, otherwise (or when no
/// detachment is known) a spelling heuristic picks one. Words that match
/// nothing are returned unchanged.
#[derive(Clone, Debug, Default)]
pub struct MorphyLemmatizer {
	vocabulary: HashMap<PosCategory, HashSet<String>>,
}

impl MorphyLemmatizer {
	/// Creates a lemmatizer relying on exceptions and spelling rules only.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a lemmatizer that prefers lemmas from `vocabulary`.
	pub fn with_vocabulary<I, S>(vocabulary: I) -> Self
	where
		I: IntoIterator<Item = (PosCategory, S)>,
		S: Into<String>,
	{
		let mut lemmatizer = Self::new();
		for (category, lemma) in vocabulary {
			lemmatizer.vocabulary.entry(category).or_default().insert(lemma.into());
		}
		lemmatizer
	}

	fn is_known(&self, lemma: &str, category: PosCategory) -> bool {
		self.vocabulary.get(&category).is_some_and(|set| set.contains(lemma))
	}

	fn rules(category: PosCategory) -> &'static [(&'static str, &'static str)] {
		match category {
			PosCategory::Noun => NOUN_RULES,
			PosCategory::Verb => VERB_RULES,
			PosCategory::Adjective => ADJECTIVE_RULES,
			PosCategory::Adverb | PosCategory::Other => &[],
		}
	}

	fn exception(word: &str, category: PosCategory) -> Option<&'static str> {
		let table = match category {
			PosCategory::Noun => NOUN_EXCEPTIONS,
			PosCategory::Verb => VERB_EXCEPTIONS,
			PosCategory::Adjective => ADJECTIVE_EXCEPTIONS,
			PosCategory::Adverb | PosCategory::Other => return None,
		};
		table.iter().find(|(form, _)| *form == word).map(|(_, lemma)| *lemma)
	}

	/// Shortest vocabulary lemma reachable from `word` (the word itself included).
	fn from_vocabulary(&self, word: &str, category: PosCategory) -> Option<String> {
		let mut best: Option<String> = None;
		let mut consider = |candidate: String| {
			if self.is_known(&candidate, category) && best.as_ref().is_none_or(|b| candidate.len() < b.len()) {
				best = Some(candidate);
			}
		};

		consider(word.to_owned());
		for (suffix, replacement) in Self::rules(category) {
			if let Some(stem) = word.strip_suffix(suffix) {
				if !stem.is_empty() {
					consider(format!("{stem}{replacement}"));
				}
			}
		}
		best
	}

	/// Spelling-based detachment used when the vocabulary has no answer.
	fn heuristic(word: &str, category: PosCategory) -> Option<String> {
		match category {
			PosCategory::Noun => noun_stem(word),
			PosCategory::Verb => verb_stem(word),
			PosCategory::Adjective => adjective_stem(word),
			PosCategory::Adverb | PosCategory::Other => None,
		}
	}
}

impl Lemmatizer for MorphyLemmatizer {
	fn lemmatize(&self, token: &str, category: PosCategory) -> String {
		match category {
			PosCategory::Other => return token.to_owned(),
			PosCategory::Adverb => return token.to_lowercase(),
			PosCategory::Noun | PosCategory::Verb | PosCategory::Adjective => (),
		}

		let word = token.to_lowercase();
		if let Some(lemma) = Self::exception(&word, category) {
			return lemma.to_owned();
		}
		if let Some(lemma) = self.from_vocabulary(&word, category) {
			return lemma;
		}
		Self::heuristic(&word, category).unwrap_or_else(|| token.to_owned())
	}
}

fn is_vowel(c: char) -> bool {
	matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Removes a doubled final consonant (`stopp` -> `stop`), keeping `ll`, `ss`, `ff`, `zz`.
fn undouble(stem: &str) -> String {
	let chars: Vec<char> = stem.chars().collect();
	match chars.as_slice() {
		[.., a, b] if a == b && !is_vowel(*a) && !matches!(*a, 'l' | 's' | 'f' | 'z') => {
			chars[..chars.len() - 1].iter().collect()
		}
		_ => stem.to_owned(),
	}
}

/// Restores a silent `e` dropped before `-ed` / `-ing` (`mak` -> `make`, `lov` -> `love`).
fn restore_e(stem: &str) -> String {
	let chars: Vec<char> = stem.chars().collect();
	let needs_e = match chars.as_slice() {
		[.., 'v'] | [.., 'z'] => true,
		[.., v, 's'] if is_vowel(*v) => true,
		[c1, v, c2] => !is_vowel(*c1) && is_vowel(*v) && !is_vowel(*c2) && !matches!(*c2, 'w' | 'x' | 'y'),
		_ => false,
	};
	if needs_e { format!("{stem}e") } else { stem.to_owned() }
}

fn noun_stem(word: &str) -> Option<String> {
	if word.len() > 4 {
		if let Some(stem) = word.strip_suffix("ies") {
			return Some(format!("{stem}y"));
		}
	}
	for suffix in ["sses", "ches", "shes", "xes", "zes"] {
		if word.len() > suffix.len() + 1 && word.ends_with(suffix) {
			return Some(word[..word.len() - 2].to_owned());
		}
	}
	if word.len() > 3 && word.ends_with("men") {
		return Some(format!("{}man", &word[..word.len() - 3]));
	}
	if word.len() > 3 && word.ends_with('s') && !["ss", "us", "is", "'s"].iter().any(|s| word.ends_with(s)) {
		return Some(word[..word.len() - 1].to_owned());
	}
	None
}

fn verb_stem(word: &str) -> Option<String> {
	if word.len() > 4 {
		if let Some(stem) = word.strip_suffix("ies").or_else(|| word.strip_suffix("ied")) {
			return Some(format!("{stem}y"));
		}
	}
	for suffix in ["ing", "ed"] {
		if let Some(stem) = word.strip_suffix(suffix) {
			if stem.len() < 2 || !stem.chars().any(is_vowel) {
				return None;
			}
			let undoubled = undouble(stem);
			return Some(if undoubled.len() < stem.len() { undoubled } else { restore_e(stem) });
		}
	}
	for suffix in ["sses", "ches", "shes", "xes", "zes"] {
		if word.len() > suffix.len() + 1 && word.ends_with(suffix) {
			return Some(word[..word.len() - 2].to_owned());
		}
	}
	if word.len() > 3 && word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") {
		return Some(word[..word.len() - 1].to_owned());
	}
	None
}

fn adjective_stem(word: &str) -> Option<String> {
	for suffix in ["iest", "ier"] {
		if word.len() > suffix.len() + 2 {
			if let Some(stem) = word.strip_suffix(suffix) {
				return Some(format!("{stem}y"));
			}
		}
	}
	for suffix in ["est", "er"] {
		if word.len() > suffix.len() + 3 {
			if let Some(stem) = word.strip_suffix(suffix) {
				return Some(undouble(stem));
			}
		}
	}
	None
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn exceptions_win() {
		let lemmatizer = MorphyLemmatizer::new();
		assert_eq!(lemmatizer.lemmatize("was", PosCategory::Verb), "be");
		assert_eq!(lemmatizer.lemmatize("Children", PosCategory::Noun), "child");
		assert_eq!(lemmatizer.lemmatize("better", PosCategory::Adjective), "good");
	}

	#[test]
	fn regular_nouns() {
		let lemmatizer = MorphyLemmatizer::new();
		assert_eq!(lemmatizer.lemmatize("cats", PosCategory::Noun), "cat");
		assert_eq!(lemmatizer.lemmatize("stories", PosCategory::Noun), "story");
		assert_eq!(lemmatizer.lemmatize("boxes", PosCategory::Noun), "box");
		assert_eq!(lemmatizer.lemmatize("glass", PosCategory::Noun), "glass");
	}

	#[test]
	fn regular_verbs() {
		let lemmatizer = MorphyLemmatizer::new();
		assert_eq!(lemmatizer.lemmatize("jumped", PosCategory::Verb), "jump");
		assert_eq!(lemmatizer.lemmatize("stopped", PosCategory::Verb), "stop");
		assert_eq!(lemmatizer.lemmatize("making", PosCategory::Verb), "make");
		assert_eq!(lemmatizer.lemmatize("loved", PosCategory::Verb), "love");
		assert_eq!(lemmatizer.lemmatize("carried", PosCategory::Verb), "carry");
		assert_eq!(lemmatizer.lemmatize("walks", PosCategory::Verb), "walk");
	}

	#[test]
	fn adjectives() {
		let lemmatizer = MorphyLemmatizer::new();
		assert_eq!(lemmatizer.lemmatize("biggest", PosCategory::Adjective), "big");
		assert_eq!(lemmatizer.lemmatize("happier", PosCategory::Adjective), "happy");
	}

	#[test]
	fn other_passes_through_and_adverbs_are_lowercased() {
		let lemmatizer = MorphyLemmatizer::new();
		assert_eq!(lemmatizer.lemmatize("The", PosCategory::Other), "The");
		assert_eq!(lemmatizer.lemmatize("Quickly", PosCategory::Adverb), "quickly");
		assert_eq!(lemmatizer.lemmatize("N'T", PosCategory::Adverb), "n't");
	}

	#[test]
	fn vocabulary_prefers_known_lemma() {
		let lemmatizer = MorphyLemmatizer::with_vocabulary([(PosCategory::Verb, "hope"), (PosCategory::Verb, "glide")]);
		assert_eq!(lemmatizer.lemmatize("hoped", PosCategory::Verb), "hope");
		assert_eq!(lemmatizer.lemmatize("gliding", PosCategory::Verb), "glide");
	}
}
