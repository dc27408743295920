use super::Tokenizer;

/// Characters always emitted as standalone tokens.
const SPLIT_PUNCTUATION: &[char] = &[',', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '<', '>'];

/// Clitics detached from their host word, matched case-insensitively.
const CLITICS: &[&str] = &["'s", "'ve", "'re", "'ll", "'d", "'m"];

/// Words split after a leading `'t` (`'Tis` -> `'T` `is`).
const LEADING_T: &[&str] = &["'tis", "'twas"];

/// Converted double quotes, kept whole when tokenized again.
const QUOTES: &[&str] = &["``", "''"];

/// Penn-Treebank-style word tokenizer.
///
/// - punctuation becomes its own token (commas and colons between digits
///   are kept, as in `1,000` or `10:30`)
/// - a sentence-final period is split off, abbreviations with inner
///   periods (`U.S.`, `e.g.`) are not
/// - `n't` and the clitics in [`CLITICS`] are split from their host, a
///   leading `'t` from `'tis` and `'twas`
/// - an opening double quote becomes ` `` `, a closing one `''`
#[derive(Clone, Copy, Debug, Default)]
pub struct TreebankTokenizer;

impl TreebankTokenizer {
	pub fn new() -> Self {
		Self
	}

	/// Splits one whitespace-free chunk of text.
	fn split_chunk(chunk: &str, out: &mut Vec<String>) {
		let chars: Vec<char> = chunk.chars().collect();
		let mut current = String::new();
		let mut seen_word = false;

		for (i, &c) in chars.iter().enumerate() {
			let between_digits = i > 0
				&& i + 1 < chars.len()
				&& chars[i - 1].is_ascii_digit()
				&& chars[i + 1].is_ascii_digit();

			if c == '"' {
				seen_word |= Self::flush(&mut current, out);
				out.push(if seen_word { "''" } else { "``" }.to_owned());
			} else if c == '-' && chars.get(i + 1) == Some(&'-') {
				seen_word |= Self::flush(&mut current, out);
				current.push(c);
			} else if c == '-' && current == "-" {
				current.push(c);
				out.push(std::mem::take(&mut current));
			} else if SPLIT_PUNCTUATION.contains(&c) && !(matches!(c, ',' | ':') && between_digits) {
				seen_word |= Self::flush(&mut current, out);
				out.push(c.to_string());
			} else {
				current.push(c);
			}
		}
		Self::flush(&mut current, out);
	}

	/// Emits the pending word, returns whether anything was emitted.
	fn flush(current: &mut String, out: &mut Vec<String>) -> bool {
		if current.is_empty() {
			return false;
		}
		let word = std::mem::take(current);
		Self::push_word(&word, out);
		true
	}

	/// Pushes a word after detaching quotes, final periods and clitics.
	fn push_word(word: &str, out: &mut Vec<String>) {
		if QUOTES.contains(&word) {
			out.push(word.to_owned());
			return;
		}

		let mut word = word;
		let mut tail: Option<&str> = None;

		if word.len() > 3 && word.ends_with("...") {
			tail = Some("...");
			word = &word[..word.len() - 3];
		} else if word.len() > 1 && word.ends_with('.') && !word[..word.len() - 1].contains('.') {
			tail = Some(".");
			word = &word[..word.len() - 1];
		}

		if LEADING_T.contains(&word.to_lowercase().as_str()) && word.is_char_boundary(2) {
			out.push(word[..2].to_owned());
			out.push(word[2..].to_owned());
			if let Some(t) = tail {
				out.push(t.to_owned());
			}
			return;
		}

		if word.len() > 1 && word.starts_with('\'') && !is_clitic(word) {
			out.push("'".to_owned());
			word = &word[1..];
		}

		let mut closing_quote = false;
		if word.len() > 1 && word.ends_with('\'') {
			closing_quote = true;
			word = &word[..word.len() - 1];
		}

		match split_clitic(word) {
			Some((host, clitic)) => {
				out.push(host.to_owned());
				out.push(clitic.to_owned());
			}
			None => out.push(word.to_owned()),
		}

		if closing_quote {
			out.push("'".to_owned());
		}
		if let Some(t) = tail {
			out.push(t.to_owned());
		}
	}
}

fn is_clitic(word: &str) -> bool {
	let lower = word.to_lowercase();
	lower == "n't" || lower == "'t" || CLITICS.contains(&lower.as_str())
}

/// Splits `word` into host and clitic, if it carries one.
fn split_clitic(word: &str) -> Option<(&str, &str)> {
	let lower = word.to_ascii_lowercase();
	if lower.len() > 3 && lower.ends_with("n't") && word.is_char_boundary(word.len() - 3) {
		let at = word.len() - 3;
		return Some((&word[..at], &word[at..]));
	}
	for clitic in CLITICS {
		if lower.len() > clitic.len() && lower.ends_with(clitic) && word.is_char_boundary(word.len() - clitic.len()) {
			let at = word.len() - clitic.len();
			return Some((&word[..at], &word[at..]));
		}
	}
	None
}

impl Tokenizer for TreebankTokenizer {
	fn tokenize(&self, text: &str) -> Vec<String> {
		let mut tokens = Vec::new();
		for chunk in text.split_whitespace() {
			Self::split_chunk(chunk, &mut tokens);
		}
		tokens
	}
}
