use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AutomatonError, LibraryError};

/// Read-only structural view of a finite automaton.
///
/// This is everything a random walk needs from an automaton compiler:
/// an initial state and, per state, an accept flag and its outgoing
/// transitions.
///
/// ## Invariants expected from implementors
/// - `transitions` returns the same slice, in the same order, on every call
///   for a given state. Reproducible walks depend on it.
/// - Every state without outgoing transitions is an accept state.
pub trait AutomatonModel {
	/// Returns the state every walk starts from.
	fn initial_state(&self) -> StateId;

	/// Returns `true` if a walk may stop at `state`.
	fn is_accept(&self, state: StateId) -> bool;

	/// Returns the deterministically ordered outgoing transitions of `state`.
	fn transitions(&self, state: StateId) -> &[Transition];
}

/// Index of a state inside the arena of one automaton.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(pub(crate) usize);

impl StateId {
	/// Position of the state in its automaton.
	pub fn index(self) -> usize {
		self.0
	}
}

/// An edge consuming one character from an inclusive range.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
	min: char,
	max: char,
	destination: StateId,
}

impl Transition {
	pub(crate) fn new(min: char, max: char, destination: StateId) -> Self {
		Self { min, max, destination }
	}

	/// Lowest character of the range (inclusive).
	pub fn min(&self) -> char {
		self.min
	}

	/// Highest character of the range (inclusive).
	pub fn max(&self) -> char {
		self.max
	}

	/// State reached after consuming a character of the range.
	pub fn destination(&self) -> StateId {
		self.destination
	}

	/// Ordering key used to keep transition lists stable.
	pub(crate) fn sort_key(&self) -> (char, char, StateId) {
		(self.min, self.max, self.destination)
	}
}

/// A node of the automaton.
///
/// ## Invariants
/// - `transitions` is sorted by `(min, max, destination)`
/// - if `transitions` is empty, `accept` is `true`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct State {
	accept: bool,
	transitions: Vec<Transition>,
}

impl State {
	pub(crate) fn new(accept: bool, transitions: Vec<Transition>) -> Self {
		Self { accept, transitions }
	}

	pub fn is_accept(&self) -> bool {
		self.accept
	}

	pub fn transitions(&self) -> &[Transition] {
		&self.transitions
	}
}

/// Arena-backed finite automaton.
///
/// States are stored in a `Vec` and refer to each other through `StateId`
/// indices, which lets the graph contain cycles and shared destinations.
/// Instances are produced by `AutomatonBuilder` or loaded from disk, both of
/// which validate the structural invariants, so an `Automaton` is always
/// safe to walk.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Automaton {
	initial: StateId,
	states: Vec<State>,
}

impl Automaton {
	pub(crate) fn from_parts(initial: StateId, states: Vec<State>) -> Self {
		Self { initial, states }
	}

	/// Builds the linear automaton accepting exactly `text`.
	///
	/// The empty string yields a single accept state.
	pub fn literal(text: &str) -> Self {
		let states = text
			.chars()
			.enumerate()
			.map(|(i, c)| State::new(false, vec![Transition::new(c, c, StateId(i + 1))]))
			.chain(std::iter::once(State::new(true, Vec::new())))
			.collect();
		Self::from_parts(StateId(0), states)
	}

	/// Number of states in the arena.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Returns the state stored at `id`, if any.
	pub fn state(&self, id: StateId) -> Option<&State> {
		self.states.get(id.index())
	}

	/// Iterates over every state with its identifier.
	pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> {
		self.states.iter().enumerate().map(|(i, state)| (StateId(i), state))
	}

	/// Checks the structural invariants.
	///
	/// # Errors
	/// - `MissingInitialState` if the arena is empty or `initial` is out of range
	/// - `UnknownState` if a transition points outside the arena
	/// - `InvalidRange` if a transition has `min > max`
	/// - `UnsortedTransitions` if a transition list is not in ascending order
	/// - `NonAcceptDeadEnd` if a state without transitions does not accept
	pub fn validate(&self) -> Result<(), AutomatonError> {
		if self.state(self.initial).is_none() {
			return Err(AutomatonError::MissingInitialState);
		}

		for (id, state) in self.states() {
			for transition in state.transitions() {
				if transition.min > transition.max {
					return Err(AutomatonError::InvalidRange { min: transition.min, max: transition.max });
				}
				if self.state(transition.destination).is_none() {
					return Err(AutomatonError::UnknownState(transition.destination));
				}
			}
			if state.transitions().windows(2).any(|pair| pair[0].sort_key() > pair[1].sort_key()) {
				return Err(AutomatonError::UnsortedTransitions(id));
			}
			if state.transitions().is_empty() && !state.is_accept() {
				return Err(AutomatonError::NonAcceptDeadEnd(id));
			}
		}

		Ok(())
	}

	/// Writes the automaton to `path` using the `postcard` encoding.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), LibraryError> {
		let bytes = postcard::to_stdvec(self)?;
		fs::write(path, bytes)?;
		Ok(())
	}

	/// Reads an automaton written by `save`.
	///
	/// The decoded automaton is validated before being returned, since the
	/// file may have been produced by another tool.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LibraryError> {
		let bytes = fs::read(path)?;
		let automaton: Automaton = postcard::from_bytes(&bytes)?;
		automaton.validate()?;
		Ok(automaton)
	}
}

impl AutomatonModel for Automaton {
	fn initial_state(&self) -> StateId {
		self.initial
	}

	fn is_accept(&self, state: StateId) -> bool {
		self.states[state.index()].is_accept()
	}

	fn transitions(&self, state: StateId) -> &[Transition] {
		self.states[state.index()].transitions()
	}
}
