use std::fmt;
use std::str::FromStr;

use crate::error::GenerateError;

/// Strategy used when the current window was never observed in training.
///
/// # Variants
/// - `Resample`: replace the window by `order` tokens drawn uniformly, with
///   replacement, from the normalized training sequence.
/// - `Backoff`: sample from the longest observed suffix of the window
///   (order - 1, order - 2, ...), resampling only if no suffix was observed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
	#[default]
	Resample,
	Backoff,
}

impl FromStr for FallbackPolicy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"resample" => Ok(FallbackPolicy::Resample),
			"backoff" => Ok(FallbackPolicy::Backoff),
			other => Err(format!("unknown fallback policy `{other}`, expected `resample` or `backoff`")),
		}
	}
}

impl fmt::Display for FallbackPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FallbackPolicy::Resample => f.write_str("resample"),
			FallbackPolicy::Backoff => f.write_str("backoff"),
		}
	}
}

/// Default number of uniform redraws before falling back to a known window.
pub const DEFAULT_RESAMPLE_ATTEMPTS: usize = 64;

/// Parameters of one generation run.
///
/// # Invariants
/// - `length >= 1`
/// - `order >= 1`
/// - `temperature` is finite and > 0
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationInput {
	/// Number of tokens to generate.
	length: usize,

	/// Chain order (window size).
	order: usize,

	/// Sampling temperature.
	temperature: f64,

	/// What to do on an unseen window.
	pub fallback: FallbackPolicy,

	/// Uniform redraws tried before picking a random observed window.
	pub max_resample_attempts: usize,
}

impl GenerationInput {
	/// Creates validated generation parameters.
	///
	/// # Errors
	/// Returns the first invalid parameter among `length`, `order`, `temperature`.
	pub fn new(length: usize, order: usize, temperature: f64) -> Result<Self, GenerateError> {
		let mut input = Self {
			length: 1,
			order: 1,
			temperature: 1.0,
			fallback: FallbackPolicy::default(),
			max_resample_attempts: DEFAULT_RESAMPLE_ATTEMPTS,
		};
		input.set_length(length)?;
		input.set_order(order)?;
		input.set_temperature(temperature)?;
		Ok(input)
	}

	pub fn length(&self) -> usize {
		self.length
	}

	pub fn order(&self) -> usize {
		self.order
	}

	pub fn temperature(&self) -> f64 {
		self.temperature
	}

	/// # Errors
	/// Returns an error if `length < 1`.
	pub fn set_length(&mut self, length: usize) -> Result<(), GenerateError> {
		if length < 1 {
			return Err(GenerateError::InvalidLength(length));
		}
		self.length = length;
		Ok(())
	}

	/// # Errors
	/// Returns an error if `order < 1`.
	pub fn set_order(&mut self, order: usize) -> Result<(), GenerateError> {
		if order < 1 {
			return Err(GenerateError::InvalidOrder(order));
		}
		self.order = order;
		Ok(())
	}

	/// # Errors
	/// Returns an error if `temperature` is not finite or not strictly positive.
	pub fn set_temperature(&mut self, temperature: f64) -> Result<(), GenerateError> {
		if !temperature.is_finite() || temperature <= 0.0 {
			return Err(GenerateError::InvalidTemperature(temperature));
		}
		self.temperature = temperature;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_valid_parameters() {
		let input = GenerationInput::new(200, 1, 0.5).unwrap();
		assert_eq!(input.length(), 200);
		assert_eq!(input.order(), 1);
		assert_eq!(input.temperature(), 0.5);
		assert_eq!(input.fallback, FallbackPolicy::Resample);
		assert_eq!(input.max_resample_attempts, DEFAULT_RESAMPLE_ATTEMPTS);
	}

	#[test]
	fn rejects_invalid_parameters() {
		assert!(matches!(GenerationInput::new(0, 1, 1.0), Err(GenerateError::InvalidLength(0))));
		assert!(matches!(GenerationInput::new(1, 0, 1.0), Err(GenerateError::InvalidOrder(0))));
		assert!(matches!(GenerationInput::new(1, 1, 0.0), Err(GenerateError::InvalidTemperature(_))));
		assert!(matches!(GenerationInput::new(1, 1, -2.0), Err(GenerateError::InvalidTemperature(_))));
		assert!(matches!(GenerationInput::new(1, 1, f64::NAN), Err(GenerateError::InvalidTemperature(_))));
		assert!(matches!(GenerationInput::new(1, 1, f64::INFINITY), Err(GenerateError::InvalidTemperature(_))));
	}

	#[test]
	fn setters_keep_previous_value_on_error() {
		let mut input = GenerationInput::new(10, 2, 1.0).unwrap();
		assert!(input.set_temperature(0.0).is_err());
		assert_eq!(input.temperature(), 1.0);
		assert!(input.set_order(0).is_err());
		assert_eq!(input.order(), 2);
	}

	#[test]
	fn parses_fallback_policy() {
		assert_eq!("Backoff".parse::<FallbackPolicy>(), Ok(FallbackPolicy::Backoff));
		assert_eq!("resample".parse::<FallbackPolicy>(), Ok(FallbackPolicy::Resample));
		assert!("shorter".parse::<FallbackPolicy>().is_err());
		assert_eq!(FallbackPolicy::Backoff.to_string(), "backoff");
	}
}
