use std::collections::BTreeMap;

use rand::Rng;

/// Temperature-scaled weights of a next-token distribution, in map order.
///
/// Each count `c` becomes `c^(1/t)`, computed as `exp((ln c - ln c_max) / t)`:
/// same ratios, but the largest weight is always 1 so nothing overflows as
/// `t` approaches 0.
///
/// `temperature` must be finite and > 0; callers validate it.
pub fn weights(counts: &BTreeMap<String, usize>, temperature: f64) -> Vec<f64> {
	debug_assert!(temperature > 0.0, "temperature must be validated by the caller");

	let max = counts.values().copied().max().unwrap_or(0);
	if max == 0 {
		return vec![0.0; counts.len()];
	}
	let ln_max = (max as f64).ln();
	counts
		.values()
		.map(|&count| if count == 0 { 0.0 } else { (((count as f64).ln() - ln_max) / temperature).exp() })
		.collect()
}

/// Draws one token with probability proportional to its tempered weight.
///
/// - temperature 1 reproduces the raw counts
/// - temperature below 1 sharpens toward the most frequent token
/// - temperature above 1 flattens toward uniform
///
/// Returns `None` if the distribution is empty.
pub fn sample<'a, R: Rng + ?Sized>(
	counts: &'a BTreeMap<String, usize>,
	temperature: f64,
	rng: &mut R,
) -> Option<&'a str> {
	let weights = weights(counts, temperature);
	let total: f64 = weights.iter().sum();
	if total <= 0.0 {
		return None;
	}

	// Cumulative subtraction over the ordered table
	let mut r = rng.random::<f64>() * total;
	let mut fallback = None;
	for (token, weight) in counts.keys().zip(weights) {
		if r < weight {
			return Some(token.as_str());
		}
		r -= weight;
		if weight > 0.0 {
			fallback = Some(token.as_str());
		}
	}

	// Rounding can leave `r` marginally above the last bucket.
	fallback
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn counts(entries: &[(&str, usize)]) -> BTreeMap<String, usize> {
		entries.iter().map(|(t, c)| ((*t).to_owned(), *c)).collect()
	}

	fn frequencies(counts: &BTreeMap<String, usize>, temperature: f64, draws: usize) -> BTreeMap<String, f64> {
		let mut rng = StdRng::seed_from_u64(7);
		let mut seen: BTreeMap<String, f64> = BTreeMap::new();
		for _ in 0..draws {
			let token = sample(counts, temperature, &mut rng).unwrap();
			*seen.entry(token.to_owned()).or_insert(0.0) += 1.0;
		}
		seen.values_mut().for_each(|v| *v /= draws as f64);
		seen
	}

	#[test]
	fn unit_temperature_keeps_count_ratios() {
		let w = weights(&counts(&[("a", 1), ("b", 2), ("c", 4)]), 1.0);
		assert!((w[0] - 0.25).abs() < 1e-12);
		assert!((w[1] - 0.5).abs() < 1e-12);
		assert!((w[2] - 1.0).abs() < 1e-12);
	}

	#[test]
	fn unit_temperature_converges_to_raw_frequencies() {
		let table = counts(&[("a", 1), ("b", 3), ("c", 6)]);
		let seen = frequencies(&table, 1.0, 20_000);
		assert!((seen["a"] - 0.1).abs() < 0.02);
		assert!((seen["b"] - 0.3).abs() < 0.02);
		assert!((seen["c"] - 0.6).abs() < 0.02);
	}

	#[test]
	fn low_temperature_picks_the_most_frequent() {
		let table = counts(&[("a", 2), ("b", 3), ("c", 9)]);
		let seen = frequencies(&table, 0.01, 2_000);
		assert_eq!(seen.get("c"), Some(&1.0));
	}

	#[test]
	fn tiny_temperature_does_not_overflow() {
		let w = weights(&counts(&[("a", 1_000_000), ("b", 999_999)]), 1e-9);
		assert!(w.iter().all(|x| x.is_finite()));
		assert_eq!(w[0], 1.0);
	}

	#[test]
	fn high_temperature_flattens() {
		let table = counts(&[("a", 1), ("b", 100)]);
		let seen = frequencies(&table, 1_000.0, 20_000);
		assert!((seen["a"] - 0.5).abs() < 0.05);
	}

	#[test]
	fn empty_distribution_yields_nothing() {
		let mut rng = StdRng::seed_from_u64(1);
		assert_eq!(sample(&BTreeMap::new(), 1.0, &mut rng), None);
	}

	proptest! {
		#[test]
		fn always_samples_a_known_token(
			entries in prop::collection::btree_map("[a-z]{1,6}", 1usize..50, 1..8),
			temperature in 0.01f64..10.0,
			seed in any::<u64>(),
		) {
			let mut rng = StdRng::seed_from_u64(seed);
			let token = sample(&entries, temperature, &mut rng);
			prop_assert!(token.is_some_and(|t| entries.contains_key(t)));
		}
	}
}
