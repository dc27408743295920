/// Default line width of written output.
pub const DEFAULT_WIDTH: usize = 80;

/// Drops leading non-letter characters and upper-cases the first letter.
///
/// Generated text usually starts with the separator space of its first
/// token, or with punctuation sampled right after the seed.
pub fn capitalize(text: &str) -> String {
	let trimmed = text.trim_start_matches(|c: char| !c.is_alphabetic());
	let mut chars = trimmed.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Greedy word wrap: words are never split, lines stay within `width`
/// characters unless a single word is longer.
pub fn wrap(text: &str, width: usize) -> String {
	let mut out = String::with_capacity(text.len());
	let mut line_len = 0;

	for word in text.split_whitespace() {
		let word_len = word.chars().count();
		if line_len > 0 && line_len + 1 + word_len > width {
			out.push('\n');
			line_len = 0;
		}
		if line_len > 0 {
			out.push(' ');
			line_len += 1;
		}
		out.push_str(word);
		line_len += word_len;
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn capitalize_skips_leading_punctuation() {
		assert_eq!(capitalize(" the sea"), "The sea");
		assert_eq!(capitalize("., and then"), "And then");
		assert_eq!(capitalize("éclair"), "Éclair");
		assert_eq!(capitalize("..."), "");
	}

	#[test]
	fn wrap_respects_width() {
		let text = "fifteen men on the dead man's chest yo ho ho and a bottle of rum";
		let wrapped = wrap(text, 20);
		assert!(wrapped.lines().all(|l| l.chars().count() <= 20));
		assert_eq!(wrapped.split_whitespace().collect::<Vec<_>>(), text.split_whitespace().collect::<Vec<_>>());
		assert_eq!(wrapped.lines().next(), Some("fifteen men on the"));
	}

	#[test]
	fn wrap_keeps_long_words_whole() {
		assert_eq!(wrap("a supercalifragilistic b", 5), "a\nsupercalifragilistic\nb");
	}
}
