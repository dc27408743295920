use super::{PosCategory, PosTagger};

const DETERMINERS: &[&str] = &[
	"a", "an", "the", "this", "that", "these", "those", "every", "each", "some", "any", "no",
	"all", "both", "either", "neither", "another", "such",
];

const PRONOUNS: &[&str] = &[
	"i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "he", "him", "his",
	"himself", "she", "her", "hers", "herself", "it", "its", "itself", "we", "us", "our", "ours",
	"ourselves", "they", "them", "their", "theirs", "themselves", "who", "whom", "whose",
	"which", "what", "whoever", "whatever", "there", "here", "'t",
];

const PREPOSITIONS: &[&str] = &[
	"of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
	"through", "during", "before", "after", "above", "below", "to", "from", "up", "down", "out",
	"off", "over", "under", "upon", "across", "along", "among", "around", "behind", "beside",
	"beyond", "near", "toward", "towards", "within", "without", "like",
];

const CONJUNCTIONS: &[&str] = &[
	"and", "or", "but", "nor", "so", "yet", "if", "because", "although", "though", "while",
	"when", "where", "whether", "than", "as", "until", "unless", "since", "once",
];

const AUXILIARIES: &[&str] = &[
	"be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "do",
	"does", "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
	"ca", "wo", "'s", "'ve", "'re", "'ll", "'d", "'m",
];

/// Adverbs that do not end in `-ly`.
const ADVERBS: &[&str] = &[
	"not", "n't", "very", "too", "also", "just", "then", "now", "soon", "never", "always",
	"often", "again", "still", "already", "almost", "quite", "rather", "perhaps", "away",
	"back", "ever", "even", "only", "once", "twice", "well", "much", "more", "most", "less",
	"least", "how", "why",
];

/// Common adjectives not caught by a suffix rule.
const ADJECTIVES: &[&str] = &[
	"good", "bad", "new", "old", "great", "big", "small", "little", "long", "short", "high",
	"low", "young", "large", "dark", "cold", "hot", "warm", "red", "black", "white", "green",
	"blue", "other", "same", "few", "many", "own", "last", "first", "next", "whole", "strange",
	"quiet", "loud", "rich", "poor", "dead", "alive", "true", "false", "free", "full", "sure",
];

const VERB_SUFFIXES: &[&str] = &["ing", "ed", "ize", "ise", "ify", "ate"];
const ADJECTIVE_SUFFIXES: &[&str] = &[
	"ous", "ful", "able", "ible", "ive", "less", "ish", "ical", "ic", "al", "est", "ent", "ant",
];
const NOUN_SUFFIXES: &[&str] = &["tion", "sion", "ness", "ment", "ity", "ship", "hood", "ism", "ist", "er", "or"];

/// Rule-based tagger for isolated tokens.
///
/// Closed-class lists are checked first, then suffix rules. Anything left
/// over is a noun, which is also what a statistical tagger answers for most
/// isolated unknown words.
#[derive(Clone, Copy, Debug, Default)]
pub struct SuffixTagger;

impl SuffixTagger {
	pub fn new() -> Self {
		Self
	}
}

impl PosTagger for SuffixTagger {
	fn tag(&self, token: &str) -> PosCategory {
		if !token.chars().any(char::is_alphabetic) {
			return PosCategory::Other;
		}

		let lower = token.to_lowercase();
		let word = lower.as_str();

		if DETERMINERS.contains(&word)
			|| PRONOUNS.contains(&word)
			|| PREPOSITIONS.contains(&word)
			|| CONJUNCTIONS.contains(&word)
		{
			return PosCategory::Other;
		}
		if AUXILIARIES.contains(&word) {
			return PosCategory::Verb;
		}
		if ADVERBS.contains(&word) {
			return PosCategory::Adverb;
		}
		if ADJECTIVES.contains(&word) {
			return PosCategory::Adjective;
		}

		// Short words carry too little suffix to classify.
		if word.chars().count() <= 3 {
			return PosCategory::Noun;
		}
		if (word.ends_with("ly") && !word.ends_with("ily")) || (word.ends_with("ily") && word.len() > 5) {
			return PosCategory::Adverb;
		}
		if NOUN_SUFFIXES.iter().any(|s| word.ends_with(s) && word.len() > s.len() + 2) {
			return PosCategory::Noun;
		}
		if VERB_SUFFIXES.iter().any(|s| word.ends_with(s) && word.len() > s.len() + 2) {
			return PosCategory::Verb;
		}
		if ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s) && word.len() > s.len() + 2) {
			return PosCategory::Adjective;
		}

		PosCategory::Noun
	}
}
