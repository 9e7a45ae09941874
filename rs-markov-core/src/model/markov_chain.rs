use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::generator::Generator;
use super::selector::{select_index, RngSelector, Selector};
use super::successors::Successors;
use crate::error::{MarkovError, Result};

/// First-order Markov chain over states of type `S`.
///
/// The chain maps each state to the list of states observed right after
/// it, in observation order and with duplicates. Sampling uniformly from
/// that list is therefore sampling proportionally to the observed
/// transition frequencies.
///
/// # Responsibilities
/// - Accumulate transitions from training sequences
/// - Answer read-only lookups (successors, counts, frequencies)
/// - Merge with another chain built from different data
/// - Entry point for generation (see [`Generator`])
///
/// # Invariants
/// - A state is a key only if at least one transition from it was recorded
/// - No successor list is empty (empty lists are dropped when deserializing)
/// - Keys keep their first-insertion order, so seeded generation only
///   depends on the training data and the seed
/// - Training accumulates, it never resets existing transitions
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(bound(
	serialize = "S: Serialize + Eq + Hash",
	deserialize = "S: Deserialize<'de> + Eq + Hash"
))]
pub struct MarkovChain<S> {
	/// Mapping from a state to its observed successors, in insertion order
	#[serde(deserialize_with = "non_empty_states")]
	states: IndexMap<S, Successors<S>>,
}

/// Deserializes the state map, dropping states without successors.
fn non_empty_states<'de, D, S>(deserializer: D) -> std::result::Result<IndexMap<S, Successors<S>>, D::Error>
where
	D: Deserializer<'de>,
	S: Deserialize<'de> + Eq + Hash,
{
	let mut states = IndexMap::<S, Successors<S>>::deserialize(deserializer)?;
	states.retain(|_, successors| !successors.is_empty());
	Ok(states)
}

impl<S> Default for MarkovChain<S> {
	fn default() -> Self {
		Self { states: IndexMap::new() }
	}
}

impl<S: Eq + Hash> PartialEq for MarkovChain<S> {
	fn eq(&self, other: &Self) -> bool {
		self.states == other.states
	}
}

impl<S: Eq + Hash> Eq for MarkovChain<S> {}

impl<S: Eq + Hash + Clone> MarkovChain<S> {
	/// Creates an empty chain.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records every adjacent pair of `sequence` as a transition.
	///
	/// # Notes
	/// - Sequences shorter than 2 states are ignored.
	/// - The last state of `sequence` does not become a key through this
	///   call, since nothing follows it here.
	/// - Calling this twice with the same input doubles every recorded
	///   transition.
	pub fn train(&mut self, sequence: &[S]) {
		if sequence.len() < 2 {
			// No transition to record
			return;
		}

		for pair in sequence.windows(2) {
			self.add_transition(pair[0].clone(), pair[1].clone());
		}

		log::debug!(
			"trained on {} transitions, chain has {} states",
			sequence.len() - 1,
			self.states.len()
		);
	}

	/// Trains on several independent sequences.
	///
	/// No transition is recorded between the end of one sequence and the
	/// start of the next.
	pub fn train_all<I>(&mut self, sequences: I)
	where
		I: IntoIterator,
		I::Item: AsRef<[S]>,
	{
		for sequence in sequences {
			self.train(sequence.as_ref());
		}
	}

	/// Records a single observed transition `from -> to`.
	pub fn add_transition(&mut self, from: S, to: S) {
		self.states.entry(from).or_insert_with(Successors::new).add_transition(to);
	}

	/// Records `a -> b` and `b -> a`.
	pub fn add_both_directions(&mut self, a: S, b: S) {
		self.add_transition(a.clone(), b.clone());
		self.add_transition(b, a);
	}

	/// Merges another chain into this one.
	///
	/// Successor lists of `other` are appended after the matching lists of
	/// `self`, so the result is the chain that training on both data sets
	/// would have produced.
	pub fn merge(&mut self, other: &Self) {
		for (key, successors) in &other.states {
			if let Some(existing) = self.states.get_mut(key) {
				existing.merge(successors);
			} else {
				self.states.insert(key.clone(), successors.clone());
			}
		}

		log::debug!("merged {} states, chain has {} states", other.states.len(), self.states.len());
	}

	/// Returns a random trained state, usable as a generation start.
	///
	/// States are indexed in first-insertion order, so the same training
	/// data and the same seeded selector always give the same state.
	///
	/// # Errors
	/// - `EmptyModel` if the chain has no state.
	/// - `InvalidArgument` if `selector` answers an index out of range.
	pub fn random_state<Sel: Selector>(&self, selector: &mut Sel) -> Result<&S> {
		if self.states.is_empty() {
			return Err(MarkovError::EmptyModel);
		}
		let index = select_index(selector, self.states.len())?;
		self.states.get_index(index).map(|(state, _)| state).ok_or(MarkovError::EmptyModel)
	}

	/// Samples the next state after `state`.
	///
	/// Returns `Ok(None)` if `state` has no recorded successor.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `selector` answers an index out of range.
	pub fn predict<Sel: Selector>(&self, state: &S, selector: &mut Sel) -> Result<Option<&S>> {
		match self.states.get(state) {
			Some(successors) => successors.predict(selector),
			None => Ok(None),
		}
	}

	/// Generates a sequence of at most `length` states starting at `start`,
	/// using the thread-local random generator.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `length` is 0, or if the selector answers
	/// an index out of range.
	pub fn generate(&self, start: S, length: usize) -> Result<Vec<S>> {
		self.generate_with(start, length, RngSelector::thread())
	}

	/// Same as [`MarkovChain::generate`] with a caller-provided selector.
	pub fn generate_with<Sel: Selector>(&self, start: S, length: usize, selector: Sel) -> Result<Vec<S>> {
		Generator::new(self, selector).generate(start, length)
	}
}

impl<S: Eq + Hash> MarkovChain<S> {
	/// Observed successors of `state`, in observation order.
	///
	/// Never creates an entry: unseen states return `None`.
	pub fn successors(&self, state: &S) -> Option<&[S]> {
		self.states.get(state).map(Successors::as_slice)
	}

	/// Number of distinct states having at least one successor.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	/// Whether no transition was recorded yet.
	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Whether `state` has at least one recorded successor.
	pub fn contains_state(&self, state: &S) -> bool {
		self.states.contains_key(state)
	}

	/// Iterates over the states having at least one successor, in
	/// first-insertion order.
	pub fn states(&self) -> impl Iterator<Item = &S> {
		self.states.keys()
	}

	/// Whether `from -> to` was observed at least once.
	pub fn has_transition(&self, from: &S, to: &S) -> bool {
		self.transition_count(from, to) > 0
	}

	/// How many times `from -> to` was observed.
	pub fn transition_count(&self, from: &S, to: &S) -> usize {
		self.states.get(from).map_or(0, |successors| successors.count(to))
	}

	/// Total number of recorded transitions.
	pub fn transition_total(&self) -> usize {
		self.states.values().map(Successors::len).sum()
	}

	/// Occurrence count of each distinct successor of `state`.
	pub fn frequencies(&self, state: &S) -> Option<HashMap<&S, usize>> {
		self.states.get(state).map(Successors::frequencies)
	}
}

/// One line per state, in first-insertion order:
/// `state -> successor, successor, ...`
impl<S: fmt::Display> fmt::Display for MarkovChain<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (state, successors) in &self.states {
			write!(f, "{state} ->")?;
			for (i, next) in successors.as_slice().iter().enumerate() {
				if i == 0 {
					write!(f, " {next}")?;
				} else {
					write!(f, ", {next}")?;
				}
			}
			writeln!(f)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::test_selectors::{OutOfRange, Scripted};

	fn activities() -> MarkovChain<&'static str> {
		let mut chain = MarkovChain::new();
		chain.train(&["walk", "run", "jump", "walk", "run", "walk", "jump"]);
		chain
	}

	#[test]
	fn train_records_successors_in_order() {
		let chain = activities();
		assert_eq!(chain.successors(&"walk"), Some(&["run", "run", "jump"][..]));
		assert_eq!(chain.successors(&"run"), Some(&["jump", "walk"][..]));
		assert_eq!(chain.successors(&"jump"), Some(&["walk"][..]));
		assert_eq!(chain.len(), 3);
		assert_eq!(chain.transition_total(), 6);
	}

	#[test]
	fn states_follow_first_insertion_order() {
		let chain = activities();
		let states: Vec<&&str> = chain.states().collect();
		assert_eq!(states, vec![&"walk", &"run", &"jump"]);
	}

	#[test]
	fn short_sequences_are_ignored() {
		let mut chain: MarkovChain<u8> = MarkovChain::new();
		chain.train(&[]);
		chain.train(&[1]);
		assert!(chain.is_empty());
	}

	#[test]
	fn last_state_is_not_a_key() {
		let mut chain = MarkovChain::new();
		chain.train(&['a', 'b']);
		assert!(chain.contains_state(&'a'));
		assert!(!chain.contains_state(&'b'));
		assert_eq!(chain.successors(&'b'), None);
	}

	#[test]
	fn training_accumulates() {
		let mut chain = MarkovChain::new();
		chain.train(&["a", "b"]);
		assert_eq!(chain.transition_count(&"a", &"b"), 1);
		chain.train(&["a", "b"]);
		assert_eq!(chain.transition_count(&"a", &"b"), 2);
		chain.train(&["b", "a"]);
		assert!(chain.contains_state(&"b"));
	}

	#[test]
	fn train_all_keeps_sequences_apart() {
		let mut chain: MarkovChain<i32> = MarkovChain::new();
		chain.train_all([vec![1, 2], vec![3, 4]]);
		assert!(!chain.has_transition(&2, &3));
		assert!(chain.has_transition(&1, &2));
		assert!(chain.has_transition(&3, &4));
	}

	#[test]
	fn lookup_never_creates_entries() {
		let chain = activities();
		assert_eq!(chain.successors(&"banana"), None);
		assert_eq!(chain.frequencies(&"banana"), None);
		assert_eq!(chain.transition_count(&"banana", &"walk"), 0);
		assert_eq!(chain.len(), 3);
	}

	#[test]
	fn add_both_directions_records_two_transitions() {
		let mut chain = MarkovChain::new();
		chain.add_both_directions("idle", "running");
		assert!(chain.has_transition(&"idle", &"running"));
		assert!(chain.has_transition(&"running", &"idle"));
		assert!(!chain.has_transition(&"idle", &"idle"));
	}

	#[test]
	fn frequencies_reflect_duplicates() {
		let chain = activities();
		let counts = chain.frequencies(&"walk").unwrap();
		assert_eq!(counts.get(&"run"), Some(&2));
		assert_eq!(counts.get(&"jump"), Some(&1));
		assert_eq!(counts.len(), 2);
	}

	#[test]
	fn merge_matches_sequential_training() {
		let mut left = MarkovChain::new();
		left.train(&["a", "b", "c"]);
		let mut right = MarkovChain::new();
		right.train(&["a", "c", "d"]);

		let mut expected = MarkovChain::new();
		expected.train(&["a", "b", "c"]);
		expected.train(&["a", "c", "d"]);

		left.merge(&right);
		assert_eq!(left, expected);
		assert_eq!(left.successors(&"a"), Some(&["b", "c"][..]));
	}

	#[test]
	fn random_state_on_empty_chain() {
		let chain: MarkovChain<u32> = MarkovChain::new();
		assert_eq!(chain.random_state(&mut RngSelector::seeded(3)), Err(MarkovError::EmptyModel));
	}

	#[test]
	fn random_state_indexes_insertion_order() {
		let chain = activities();
		assert_eq!(chain.random_state(&mut Scripted(vec![2])), Ok(&"jump"));
		assert_eq!(chain.random_state(&mut Scripted(vec![0])), Ok(&"walk"));
	}

	#[test]
	fn random_state_is_reproducible_across_chains() {
		let data: Vec<u32> = (0..50).collect();
		for seed in 0..20 {
			let mut first = MarkovChain::new();
			first.train(&data);
			let mut second = MarkovChain::new();
			second.train(&data);
			assert_eq!(
				first.random_state(&mut RngSelector::seeded(seed)),
				second.random_state(&mut RngSelector::seeded(seed))
			);
		}
	}

	#[test]
	fn out_of_range_selector_is_an_error() {
		let chain = activities();
		let err = chain.random_state(&mut OutOfRange).unwrap_err();
		assert!(matches!(err, MarkovError::InvalidArgument { .. }));
		let err = chain.predict(&"walk", &mut OutOfRange).unwrap_err();
		assert!(matches!(err, MarkovError::InvalidArgument { .. }));
		let err = chain.generate_with("walk", 10, OutOfRange).unwrap_err();
		assert!(matches!(err, MarkovError::InvalidArgument { .. }));
	}

	#[test]
	fn predict_unseen_state_is_none() {
		let chain = activities();
		assert_eq!(chain.predict(&"banana", &mut OutOfRange), Ok(None));
	}

	#[test]
	fn deserialize_drops_states_without_successors() {
		#[derive(Serialize)]
		struct Raw {
			states: IndexMap<char, Vec<char>>,
		}

		let mut states = IndexMap::new();
		states.insert('a', vec!['b']);
		states.insert('b', vec![]);
		let bytes = postcard::to_stdvec(&Raw { states }).unwrap();

		let chain: MarkovChain<char> = postcard::from_bytes(&bytes).unwrap();
		assert_eq!(chain.len(), 1);
		assert!(!chain.contains_state(&'b'));
		assert_eq!(chain.successors(&'a'), Some(&['b'][..]));
		assert_eq!(chain.random_state(&mut Scripted(vec![0])), Ok(&'a'));
	}

	#[test]
	fn random_state_is_a_key() {
		let chain = activities();
		let mut selector = RngSelector::seeded(11);
		for _ in 0..20 {
			let state = chain.random_state(&mut selector).unwrap();
			assert!(chain.contains_state(state));
		}
	}

	#[test]
	fn display_lists_successors() {
		let mut chain = MarkovChain::new();
		chain.train(&["walk", "run", "walk", "jump"]);
		let rendered = chain.to_string();
		assert_eq!(rendered, "walk -> run, jump\nrun -> walk\n");
	}

	#[test]
	fn generate_rejects_zero_length() {
		let chain = activities();
		assert!(chain.generate("walk", 0).is_err());
	}
}
