use crate::error::AutomatonError;
use super::automaton::{Automaton, State, StateId, Transition};

/// Incremental constructor for `Automaton`.
///
/// The builder stands where an automaton compiler would hand over its
/// result: states are added one by one, transitions are attached between
/// them, and `build` freezes the arena.
///
/// # Responsibilities
/// - Hand out `StateId`s for new states
/// - Reject transitions with unknown endpoints or empty ranges
/// - Sort every transition list once, so walks are reproducible
/// - Check that every dead end is an accept state
///
/// # Notes
/// - The first state added is the initial state unless `set_initial` is called.
#[derive(Debug, Default)]
pub struct AutomatonBuilder {
	initial: Option<StateId>,
	accepts: Vec<bool>,
	transitions: Vec<Vec<Transition>>,
}

impl AutomatonBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a state and returns its identifier.
	pub fn add_state(&mut self, accept: bool) -> StateId {
		let id = StateId(self.accepts.len());
		self.accepts.push(accept);
		self.transitions.push(Vec::new());
		id
	}

	/// Selects the state walks start from.
	///
	/// # Errors
	/// Returns `UnknownState` if `state` was not created by this builder.
	pub fn set_initial(&mut self, state: StateId) -> Result<&mut Self, AutomatonError> {
		self.check_state(state)?;
		self.initial = Some(state);
		Ok(self)
	}

	/// Adds a transition from `from` to `to` consuming one character of `[min, max]`.
	///
	/// # Errors
	/// - `UnknownState` if either endpoint was not created by this builder
	/// - `InvalidRange` if `min > max`
	pub fn add_transition(
		&mut self,
		from: StateId,
		min: char,
		max: char,
		to: StateId,
	) -> Result<&mut Self, AutomatonError> {
		self.check_state(from)?;
		self.check_state(to)?;
		if min > max {
			return Err(AutomatonError::InvalidRange { min, max });
		}
		self.transitions[from.0].push(Transition::new(min, max, to));
		Ok(self)
	}

	/// Shorthand for a transition consuming exactly `c`.
	pub fn add_char_transition(&mut self, from: StateId, c: char, to: StateId) -> Result<&mut Self, AutomatonError> {
		self.add_transition(from, c, c, to)
	}

	/// Freezes the builder into an `Automaton`.
	///
	/// Transition lists are sorted by `(min, max, destination)`; this order
	/// never changes afterwards.
	///
	/// # Errors
	/// - `MissingInitialState` if no state was added
	/// - `NonAcceptDeadEnd` if a state without transitions is not an accept state
	pub fn build(self) -> Result<Automaton, AutomatonError> {
		let initial = match self.initial {
			Some(initial) => initial,
			None if !self.accepts.is_empty() => StateId(0),
			None => return Err(AutomatonError::MissingInitialState),
		};

		let states = self
			.accepts
			.into_iter()
			.zip(self.transitions)
			.map(|(accept, mut transitions)| {
				transitions.sort_by_key(Transition::sort_key);
				State::new(accept, transitions)
			})
			.collect();

		let automaton = Automaton::from_parts(initial, states);
		automaton.validate()?;
		Ok(automaton)
	}

	fn check_state(&self, state: StateId) -> Result<(), AutomatonError> {
		if state.0 < self.accepts.len() {
			Ok(())
		} else {
			Err(AutomatonError::UnknownState(state))
		}
	}
}
