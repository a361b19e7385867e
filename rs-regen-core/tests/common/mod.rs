#![allow(dead_code)]

use std::collections::BTreeSet;

use rs_regen_core::{Automaton, AutomatonBuilder, AutomatonError, AutomatonModel, StateId};

/// Runs `text` through the automaton by tracking every reachable state.
///
/// Independent of the walker: used to check that generated strings are accepted.
pub fn accepts<A: AutomatonModel>(automaton: &A, text: &str) -> bool {
	let mut current: BTreeSet<StateId> = BTreeSet::from([automaton.initial_state()]);
	for c in text.chars() {
		current = current
			.iter()
			.flat_map(|state| automaton.transitions(*state))
			.filter(|t| t.min() <= c && c <= t.max())
			.map(|t| t.destination())
			.collect();
		if current.is_empty() {
			return false;
		}
	}
	current.iter().any(|state| automaton.is_accept(*state))
}

/// `[ab]{4,6}c`
pub fn repeated_ab_then_c() -> Result<Automaton, AutomatonError> {
	let mut builder = AutomatonBuilder::new();
	let steps: Vec<StateId> = (0..=6).map(|_| builder.add_state(false)).collect();
	let end = builder.add_state(true);
	for pair in steps.windows(2) {
		builder.add_transition(pair[0], 'a', 'b', pair[1])?;
	}
	for step in &steps[4..] {
		builder.add_char_transition(*step, 'c', end)?;
	}
	builder.build()
}

/// `[a-z]+@[a-z]+\.(com|org)`
pub fn email() -> Result<Automaton, AutomatonError> {
	let mut builder = AutomatonBuilder::new();
	let start = builder.add_state(false);
	let user = builder.add_state(false);
	let at = builder.add_state(false);
	let domain = builder.add_state(false);
	let dot = builder.add_state(false);
	let c = builder.add_state(false);
	let co = builder.add_state(false);
	let o = builder.add_state(false);
	let or = builder.add_state(false);
	let end = builder.add_state(true);
	builder
		.add_transition(start, 'a', 'z', user)?
		.add_transition(user, 'a', 'z', user)?
		.add_char_transition(user, '@', at)?
		.add_transition(at, 'a', 'z', domain)?
		.add_transition(domain, 'a', 'z', domain)?
		.add_char_transition(domain, '.', dot)?
		.add_char_transition(dot, 'c', c)?
		.add_char_transition(c, 'o', co)?
		.add_char_transition(co, 'm', end)?
		.add_char_transition(dot, 'o', o)?
		.add_char_transition(o, 'r', or)?
		.add_char_transition(or, 'g', end)?;
	builder.build()
}

/// `-?[0-9]+`
pub fn integer() -> Result<Automaton, AutomatonError> {
	let mut builder = AutomatonBuilder::new();
	let start = builder.add_state(false);
	let sign = builder.add_state(false);
	let digits = builder.add_state(true);
	builder
		.add_char_transition(start, '-', sign)?
		.add_transition(start, '0', '9', digits)?
		.add_transition(sign, '0', '9', digits)?
		.add_transition(digits, '0', '9', digits)?;
	builder.build()
}

/// `[\u{1F600}-\u{1F64F}]{2}x?`
pub fn emoji_pair() -> Result<Automaton, AutomatonError> {
	let mut builder = AutomatonBuilder::new();
	let start = builder.add_state(false);
	let one = builder.add_state(false);
	let two = builder.add_state(true);
	let end = builder.add_state(true);
	builder
		.add_transition(start, '\u{1F600}', '\u{1F64F}', one)?
		.add_transition(one, '\u{1F600}', '\u{1F64F}', two)?
		.add_char_transition(two, 'x', end)?;
	builder.build()
}
