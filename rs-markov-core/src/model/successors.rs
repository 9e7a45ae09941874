use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::selector::{select_index, Selector};
use crate::error::Result;

/// Observed successors of a single state.
///
/// Conceptually, the outgoing edges of one node in the Markov chain.
/// Successors are kept in observation order and duplicates are preserved,
/// so a state observed twice as often is twice as likely to be sampled.
///
/// ## Invariants
/// - Once stored in a `MarkovChain`, the list is never empty
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(transparent)]
pub(crate) struct Successors<S> {
	observed: Vec<S>,
}

impl<S> Successors<S> {
	/// Creates an empty successor list.
	pub(crate) fn new() -> Self {
		Self { observed: Vec::new() }
	}

	/// Records one more observation of `next`.
	pub(crate) fn add_transition(&mut self, next: S) {
		self.observed.push(next);
	}

	pub(crate) fn as_slice(&self) -> &[S] {
		&self.observed
	}

	pub(crate) fn len(&self) -> usize {
		self.observed.len()
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.observed.is_empty()
	}

	/// Picks one successor uniformly among the stored observations.
	///
	/// Returns `Ok(None)` if nothing has been observed.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `selector` answers an index out of range.
	pub(crate) fn predict<Sel: Selector>(&self, selector: &mut Sel) -> Result<Option<&S>> {
		if self.observed.is_empty() {
			return Ok(None);
		}
		let index = select_index(selector, self.observed.len())?;
		Ok(self.observed.get(index))
	}
}

impl<S: Eq + Hash> Successors<S> {
	/// Number of times each distinct successor was observed.
	pub(crate) fn frequencies(&self) -> HashMap<&S, usize> {
		let mut counts = HashMap::new();
		for next in &self.observed {
			*counts.entry(next).or_insert(0) += 1;
		}
		counts
	}

	pub(crate) fn count(&self, next: &S) -> usize {
		self.observed.iter().filter(|s| *s == next).count()
	}
}

impl<S: Clone> Successors<S> {
	/// Appends the observations of `other` after our own.
	pub(crate) fn merge(&mut self, other: &Self) {
		self.observed.extend(other.observed.iter().cloned());
	}
}
