//! Markov chain models and token generation.
//!
//! This module provides:
//! - Fixed-order chain models over canonical tokens (`ChainModel`)
//! - Lower-order companions used for backoff (`BackoffChain`)
//! - Temperature-weighted sampling (`sampler`)
//! - Generation parameters (`GenerationInput`)
//! - The generation state machine (`Generator`)

/// Lower-order models queried when a window was never observed.
pub mod backoff;

/// Fixed-order chain model (`order >= 1`).
///
/// Handles sequence ingestion, transition counting and random window selection.
pub mod chain;

/// Generation parameters and unseen-window policy.
pub mod generation_input;

/// Generation state machine.
///
/// Seeds a window, samples tokens one at a time and assembles the output text.
pub mod generator;

/// Temperature-weighted draw from a next-token distribution.
pub mod sampler;

/// A window and the counts of the tokens that followed it.
pub mod state;

pub use backoff::BackoffChain;
pub use chain::ChainModel;
pub use generation_input::{FallbackPolicy, GenerationInput};
pub use generator::{Generation, Generator, Phase};
pub use state::{State, Window};
