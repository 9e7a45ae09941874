use crate::error::{MarkovError, Result};

/// Strategy used to select the first state of a generated sequence.
///
/// # Variants
/// - `Custom(S)`: start from the given state, trained or not.
/// - `Random`: start from a random state among those having successors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartState<S> {
	Custom(S),
	Random,
}

/// Input parameters for a generation run.
///
/// # Invariants
/// - `length` is always >= 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationInput<S> {
	/// How the first state is chosen.
	pub start_state: StartState<S>,

	/// Maximum number of states to produce, start included.
	length: usize,
}

impl<S> GenerationInput<S> {
	/// Creates a new `GenerationInput`.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `length` is 0.
	pub fn new(start_state: StartState<S>, length: usize) -> Result<Self> {
		check_length(length)?;
		Ok(Self { start_state, length })
	}

	/// Returns the requested sequence length.
	pub fn length(&self) -> usize {
		self.length
	}

	/// Sets the requested sequence length.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `length` is 0.
	pub fn set_length(&mut self, length: usize) -> Result<()> {
		check_length(length)?;
		self.length = length;
		Ok(())
	}
}

/// Rejects lengths that cannot even hold the start state.
pub(crate) fn check_length(length: usize) -> Result<()> {
	if length == 0 {
		return Err(MarkovError::invalid_argument(format!("length must be >= 1, got {length}")));
	}
	Ok(())
}
