use std::hash::Hash;
use std::iter::FusedIterator;

use crate::error::Result;
use crate::model::generation_input::{check_length, GenerationInput, StartState};
use crate::model::markov_chain::MarkovChain;
use crate::model::selector::Selector;

/// Sequence generator over a trained `MarkovChain`.
///
/// The generator borrows the chain read-only, so any number of generators
/// can run against the same chain. All random choices go through the
/// injected `Selector`.
///
/// # Responsibilities
/// - Walk the chain from a start state, one sampled successor at a time
/// - Stop at the requested length or at the first dead end
/// - Resolve the start state from a `GenerationInput`
#[derive(Debug)]
pub struct Generator<'a, S, Sel> {
	chain: &'a MarkovChain<S>,
	selector: Sel,
}

impl<'a, S, Sel> Generator<'a, S, Sel>
where
	S: Eq + Hash + Clone,
	Sel: Selector,
{
	/// Creates a generator reading `chain` and drawing choices from `selector`.
	pub fn new(chain: &'a MarkovChain<S>, selector: Sel) -> Self {
		Self { chain, selector }
	}

	/// Lazily walks the chain from `start`.
	///
	/// The iterator yields `start` first, then one sampled successor per
	/// step, and ends at the first state without successors. On a chain
	/// containing cycles it may never end; bound it with `take`.
	///
	/// If the selector answers an index out of range, the iterator yields
	/// that `InvalidArgument` error once and then ends.
	pub fn walk(&mut self, start: S) -> Walk<'a, S, &mut Sel> {
		Walk {
			chain: self.chain,
			selector: &mut self.selector,
			current: Some(start),
			started: false,
		}
	}

	/// Generates at most `length` states starting with `start`.
	///
	/// # Returns
	/// - The generated sequence, `start` first. It is shorter than `length`
	///   when a state without successors is reached before.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `length` is 0, or if the selector answers
	/// an index out of range.
	///
	/// # Notes
	/// - `start` does not need to be a trained state: an unseen start
	///   yields `[start]`.
	/// - With `length == 1` the chain is not consulted.
	pub fn generate(&mut self, start: S, length: usize) -> Result<Vec<S>> {
		check_length(length)?;

		let sequence = self.walk(start).take(length).collect::<Result<Vec<S>>>()?;
		if sequence.len() < length {
			log::trace!("dead end after {} of {} states", sequence.len(), length);
		}
		Ok(sequence)
	}

	/// Generates a sequence configured by `input`.
	///
	/// # Errors
	/// - `EmptyModel` if a random start is requested on an empty chain.
	/// - `InvalidArgument` if the selector answers an index out of range.
	pub fn predict(&mut self, input: &GenerationInput<S>) -> Result<Vec<S>> {
		let start = match &input.start_state {
			StartState::Custom(state) => state.clone(),
			StartState::Random => self.chain.random_state(&mut self.selector)?.clone(),
		};
		self.generate(start, input.length())
	}
}

/// Iterator returned by [`Generator::walk`].
#[derive(Debug)]
pub struct Walk<'a, S, Sel> {
	chain: &'a MarkovChain<S>,
	selector: Sel,
	current: Option<S>,
	started: bool,
}

impl<S, Sel> Iterator for Walk<'_, S, Sel>
where
	S: Eq + Hash + Clone,
	Sel: Selector,
{
	type Item = Result<S>;

	fn next(&mut self) -> Option<Result<S>> {
		if !self.started {
			self.started = true;
			return self.current.clone().map(Ok);
		}

		let current = self.current.as_ref()?;
		match self.chain.predict(current, &mut self.selector) {
			Ok(Some(next)) => {
				let next = next.clone();
				self.current = Some(next.clone());
				Some(Ok(next))
			}
			Ok(None) => {
				log::trace!("no successor, walk ends");
				self.current = None;
				None
			}
			Err(e) => {
				self.current = None;
				Some(Err(e))
			}
		}
	}
}

impl<S, Sel> FusedIterator for Walk<'_, S, Sel>
where
	S: Eq + Hash + Clone,
	Sel: Selector,
{
}
