//! Top-level module for random-walk string generation.
//!
//! This module provides:
//! - The automaton interface consumed by walks (`AutomatonModel`) and an
//!   arena-backed implementation (`Automaton`)
//! - Incremental automaton construction (`AutomatonBuilder`)
//! - Uniform sampling primitives (`range_sampler`)
//! - The generation engine (`RandomWalker`)
//! - Named collections of persisted automata (`AutomatonLibrary`)
//! - Parallel, reproducible batch generation (`generate_batch`)

/// Automaton interface, arena-backed automaton, states and transitions.
///
/// Also handles persistence of automata (`postcard` encoding).
pub mod automaton;

/// Parallel generation of many strings from one shared automaton.
pub mod batch;

/// Incremental, validating construction of automata.
pub mod builder;

/// Named automata loaded from a directory.
pub mod library;

/// Uniform integer and character sampling over inclusive ranges.
pub mod range_sampler;

/// Random walks producing strings accepted by an automaton.
///
/// Supports unconstrained generation and generation within a length range.
pub mod walker;
