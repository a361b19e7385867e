use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::WalkError;
use super::automaton::{AutomatonModel, StateId, Transition};
use super::range_sampler;

/// Generates strings accepted by an automaton through random walks.
///
/// A walker borrows one automaton and owns one random source. Every call to
/// `generate` or `generate_bounded` starts a fresh walk from the initial
/// state; nothing is carried over between calls except the state of the
/// random source.
///
/// # Responsibilities
/// - Walk the automaton, choosing transitions and characters uniformly
/// - Produce strings of a requested length range, or report why it failed
/// - Let callers swap the random source while keeping the automaton
///
/// # Determinism
/// Given the same automaton and a random source in the same state, a walker
/// produces the same sequence of results, failures included.
///
/// # Concurrency
/// The automaton is only read, so several walkers on different threads may
/// share it. A walker itself is driven through `&mut self`.
#[derive(Debug)]
pub struct RandomWalker<'a, A: AutomatonModel + ?Sized, R: Rng = StdRng> {
	automaton: &'a A,
	rng: R,
}

impl<'a, A: AutomatonModel + ?Sized> RandomWalker<'a, A, StdRng> {
	/// Creates a walker with a `StdRng` seeded from `seed`.
	pub fn with_seed(automaton: &'a A, seed: u64) -> Self {
		Self::new(automaton, StdRng::seed_from_u64(seed))
	}

	/// Creates a walker with a `StdRng` seeded from the operating system.
	pub fn from_os_rng(automaton: &'a A) -> Self {
		Self::new(automaton, StdRng::from_os_rng())
	}
}

impl<'a, A: AutomatonModel + ?Sized, R: Rng> RandomWalker<'a, A, R> {
	pub fn new(automaton: &'a A, rng: R) -> Self {
		Self { automaton, rng }
	}

	/// Returns the automaton this walker generates from.
	pub fn automaton(&self) -> &'a A {
		self.automaton
	}

	/// Returns the random source.
	pub fn rng(&self) -> &R {
		&self.rng
	}

	/// Returns the random source mutably, e.g. to reseed it in place.
	pub fn rng_mut(&mut self) -> &mut R {
		&mut self.rng
	}

	/// Replaces the random source and returns the previous one.
	///
	/// Building an automaton is the expensive part; this allows independent
	/// draws from the same automaton without rebuilding it.
	pub fn set_rng(&mut self, rng: R) -> R {
		std::mem::replace(&mut self.rng, rng)
	}

	/// Generates a string accepted by the automaton, with no length target.
	///
	/// At every accept state the walk may stop; stopping counts as one more
	/// option next to the outgoing transitions, and all options are equally
	/// likely.
	///
	/// # Notes
	/// - The walk ends with probability one, but its length is not bounded:
	///   an automaton with cycles may produce long strings. Use
	///   `generate_bounded` when a limit matters.
	/// - Runs as a loop, so long walks do not grow the stack.
	pub fn generate(&mut self) -> String {
		let automaton = self.automaton;
		let mut output = String::new();
		let mut state = automaton.initial_state();

		loop {
			let accept = automaton.is_accept(state);
			let transitions = automaton.transitions(state);
			if transitions.is_empty() {
				debug_assert!(accept, "state {:?} is a dead end but not an accept state", state);
				return output;
			}

			// Option 0 of an accept state means "stop here"
			let options = transitions.len() + usize::from(accept);
			let option = range_sampler::sample_index(options, &mut self.rng);
			if accept && option == 0 {
				return output;
			}

			let transition = &transitions[option - usize::from(accept)];
			state = self.append_choice(&mut output, transition);
		}
	}

	/// Generates a string accepted by the automaton whose length (in
	/// characters) lies in `[min_length, max_length]`.
	///
	/// A target length is drawn uniformly from the range. Until the target is
	/// reached, the walk prefers transitions leading to states that have
	/// outgoing transitions themselves. Past the target, every transition is
	/// equally likely and the walk stops at the first accept state.
	///
	/// # Errors
	/// - `InvalidBounds` if `min_length > max_length`
	/// - `InsufficientLength` if a dead end is reached before `min_length`
	/// - `MaxLengthExceeded` if no accept state is reached within `max_length`
	///
	/// Both walk failures depend on the random draws; another call may
	/// succeed. No retry happens here.
	///
	/// # Notes
	/// - The preference only looks one step ahead. Automata where a long
	///   enough path requires deeper lookahead can still fail.
	pub fn generate_bounded(&mut self, min_length: usize, max_length: usize) -> Result<String, WalkError> {
		if min_length > max_length {
			return Err(WalkError::InvalidBounds { min_length, max_length });
		}

		let automaton = self.automaton;
		let mut output = String::new();
		let mut walk_length = 0;
		let mut state = automaton.initial_state();

		// First get to the target length
		let target_length = self.rng.random_range(min_length..=max_length);
		while walk_length < target_length {
			let transitions = automaton.transitions(state);
			if transitions.is_empty() {
				debug_assert!(automaton.is_accept(state), "state {:?} is a dead end but not an accept state", state);
				if walk_length >= min_length {
					return Ok(output);
				}
				log::debug!("walk reached a dead end at length {} (min = {})", walk_length, min_length);
				return Err(WalkError::InsufficientLength { walk_length, min_length });
			}

			let transition = self.choose_non_terminal(transitions);
			state = self.append_choice(&mut output, transition);
			walk_length += 1;
		}

		// Then get to an accept state
		while !automaton.is_accept(state) && walk_length < max_length {
			let transitions = automaton.transitions(state);
			if transitions.is_empty() {
				debug_assert!(automaton.is_accept(state), "state {:?} is a dead end but not an accept state", state);
				return Ok(output);
			}

			let transition = &transitions[range_sampler::sample_index(transitions.len(), &mut self.rng)];
			state = self.append_choice(&mut output, transition);
			walk_length += 1;
		}

		if automaton.is_accept(state) {
			Ok(output)
		} else {
			log::debug!("walk exceeded max length {} (target = {}, min = {})", max_length, target_length, min_length);
			Err(WalkError::MaxLengthExceeded { max_length, target_length, min_length })
		}
	}

	/// Picks a transition uniformly, restricted to transitions whose
	/// destination has outgoing transitions when there is at least one.
	///
	/// Equivalent to filtering the list and sampling from the result, without
	/// allocating the filtered list.
	fn choose_non_terminal<'t>(&mut self, transitions: &'t [Transition]) -> &'t Transition {
		let automaton = self.automaton;
		let is_non_terminal = |t: &&Transition| !automaton.transitions(t.destination()).is_empty();

		let non_terminal = transitions.iter().filter(is_non_terminal).count();
		if non_terminal == 0 {
			return &transitions[range_sampler::sample_index(transitions.len(), &mut self.rng)];
		}

		let option = range_sampler::sample_index(non_terminal, &mut self.rng);
		// `option < non_terminal`, so the filtered iterator always has this element
		transitions
			.iter()
			.filter(is_non_terminal)
			.nth(option)
			.unwrap_or(&transitions[0])
	}

	/// Appends one character of `transition`'s range and returns its destination.
	fn append_choice(&mut self, output: &mut String, transition: &Transition) -> StateId {
		output.push(range_sampler::sample_char(transition.min(), transition.max(), &mut self.rng));
		transition.destination()
	}
}
