//! Selectors with fixed behavior, shared by the unit tests.

use super::selector::Selector;

/// Replays a fixed list of indices.
pub(crate) struct Scripted(pub(crate) Vec<usize>);

impl Selector for Scripted {
	fn select(&mut self, _len: usize) -> usize {
		self.0.remove(0)
	}
}

/// Fails the test if any random choice is made.
pub(crate) struct Untouched;

impl Selector for Untouched {
	fn select(&mut self, _len: usize) -> usize {
		panic!("the chain was consulted");
	}
}

/// Always answers one past the last valid index.
pub(crate) struct OutOfRange;

impl Selector for OutOfRange {
	fn select(&mut self, len: usize) -> usize {
		len
	}
}
