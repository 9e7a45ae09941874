use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use crate::error::{MarkovError, Result};

/// Source of the uniform choices made during generation.
///
/// `select(len)` must return an index in `0..len`. Callers never pass
/// `len == 0`, and report any other answer as `InvalidArgument`.
///
/// Production code uses [`RngSelector`]; tests can plug in a seeded RNG
/// or a scripted implementation to get reproducible traces.
pub trait Selector {
	fn select(&mut self, len: usize) -> usize;
}

/// Asks `selector` for an index in `0..len` and checks the answer.
///
/// # Errors
/// Returns `InvalidArgument` if the selector answers outside `0..len`.
pub(crate) fn select_index<Sel: Selector + ?Sized>(selector: &mut Sel, len: usize) -> Result<usize> {
	let index = selector.select(len);
	if index >= len {
		log::error!("selector returned index {index} for {len} choices");
		return Err(MarkovError::invalid_argument(format!(
			"selector returned index {index}, expected < {len}"
		)));
	}
	Ok(index)
}

impl<S: Selector + ?Sized> Selector for &mut S {
	fn select(&mut self, len: usize) -> usize {
		(**self).select(len)
	}
}

/// `Selector` backed by any `rand` random number generator.
#[derive(Debug, Clone)]
pub struct RngSelector<R> {
	rng: R,
}

impl<R: Rng> RngSelector<R> {
	/// Wraps an existing random number generator.
	pub fn new(rng: R) -> Self {
		Self { rng }
	}
}

impl RngSelector<ThreadRng> {
	/// Uses the thread-local generator (non-reproducible).
	pub fn thread() -> Self {
		Self::new(rand::rng())
	}
}

impl RngSelector<StdRng> {
	/// Uses a `StdRng` seeded with `seed`.
	///
	/// Two selectors built from the same seed produce the same choices.
	pub fn seeded(seed: u64) -> Self {
		Self::new(StdRng::seed_from_u64(seed))
	}
}

impl<R: Rng> Selector for RngSelector<R> {
	fn select(&mut self, len: usize) -> usize {
		self.rng.random_range(0..len)
	}
}
