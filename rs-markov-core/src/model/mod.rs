//! Top-level module for the Markov chain generation system.
//!
//! This module provides:
//! - The transition model (`MarkovChain`)
//! - Internal successor lists (`Successors`)
//! - The random selection capability (`Selector`)
//! - Generation configuration (`GenerationInput`)
//! - A sequence generation interface (`Generator`)

/// Sequence generation from a trained chain.
///
/// Borrows the chain read-only and walks it one sampled successor at a time.
pub mod generator;

/// First-order transition model.
///
/// Handles training, merging, and read-only lookups.
pub mod markov_chain;

/// Observed successors of a single state.
///
/// Not exposed publicly.
mod successors;

/// Injectable source of random choices.
pub mod selector;

/// Generation parameters (start strategy, length).
pub mod generation_input;

#[cfg(test)]
mod test_selectors;
