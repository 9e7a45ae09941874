//! Error types for chain generation.

use thiserror::Error;

/// Errors returned by the generation API.
///
/// Training never fails: empty or single-element sequences are simply
/// ignored, and unseen states or dead ends during generation end the
/// sequence early instead of producing an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkovError {
	/// A caller-supplied argument is outside its valid range.
	#[error("Invalid argument: {message}")]
	InvalidArgument {
		/// Description of what's wrong with the argument
		message: String,
	},

	/// A random start state was requested from a model with no states.
	#[error("No state available in the model")]
	EmptyModel,
}

impl MarkovError {
	/// Create an InvalidArgument error.
	pub fn invalid_argument(message: impl Into<String>) -> Self {
		Self::InvalidArgument { message: message.into() }
	}
}

pub type Result<T> = std::result::Result<T, MarkovError>;
