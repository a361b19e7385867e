use std::io;
use std::path::PathBuf;

use crate::model::automaton::StateId;

/// Failure of a length-bounded random walk.
///
/// Both walk failures are expected outcomes of a random process: a new walk
/// with different random draws may succeed, so callers are free to retry.
/// The walker itself never retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalkError {
	/// A state without outgoing transitions was reached before `min_length`.
	#[error("Reached accept state before minimum length (current = {walk_length} < min = {min_length})")]
	InsufficientLength {
		walk_length: usize,
		min_length: usize,
	},

	/// `max_length` characters were produced without reaching an accept state.
	#[error("Exceeded maximum walk length ({max_length}) before reaching an accept state: target length was {target_length} (min length = {min_length})")]
	MaxLengthExceeded {
		max_length: usize,
		target_length: usize,
		min_length: usize,
	},

	/// The requested bounds are empty (`min_length > max_length`).
	#[error("Invalid length bounds: min length {min_length} is greater than max length {max_length}")]
	InvalidBounds {
		min_length: usize,
		max_length: usize,
	},
}

/// Structural problem found while building or validating an automaton.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutomatonError {
	#[error("Unknown state {0:?}")]
	UnknownState(StateId),

	#[error("Invalid transition range: {min:?} > {max:?}")]
	InvalidRange { min: char, max: char },

	#[error("Automaton has no states")]
	MissingInitialState,

	/// A state with no outgoing transitions must accept.
	#[error("State {0:?} has no outgoing transitions and is not an accept state")]
	NonAcceptDeadEnd(StateId),

	#[error("Transitions of state {0:?} are not in ascending order")]
	UnsortedTransitions(StateId),
}

/// Error raised while loading persisted automata.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
	#[error("Expected a directory, got: {}", .0.display())]
	NotADirectory(PathBuf),

	#[error("Automaton '{0}' already loaded")]
	AlreadyLoaded(String),

	#[error(transparent)]
	Io(#[from] io::Error),

	#[error("Failed to decode automaton: {0}")]
	Decode(#[from] postcard::Error),

	#[error("Invalid automaton: {0}")]
	Invalid(#[from] AutomatonError),
}
