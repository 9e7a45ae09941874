//! First-order Markov chain sequence generation library.
//!
//! This crate provides:
//! - A transition model built from observed sequences of discrete states
//! - Frequency-weighted generation of new sequences from that model
//! - An injectable random source for reproducible generation
//!
//! States can be any `Eq + Hash + Clone` value: words, characters,
//! enum variants, identifiers.
//!
//! ```
//! use rs_markov_core::MarkovChain;
//!
//! let mut chain = MarkovChain::new();
//! chain.train(&["walk", "run", "jump", "walk", "run", "walk", "jump"]);
//!
//! let sequence = chain.generate("jump", 3).unwrap();
//! assert_eq!(&sequence[..2], &["jump", "walk"]);
//! ```

/// Markov chain model and generation logic.
pub mod model;

/// Error types.
pub mod error;

pub use error::{MarkovError, Result};
pub use model::generation_input::{GenerationInput, StartState};
pub use model::generator::{Generator, Walk};
pub use model::markov_chain::MarkovChain;
pub use model::selector::{RngSelector, Selector};
