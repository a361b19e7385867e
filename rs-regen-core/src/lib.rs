//! Random string generation from finite automata.
//!
//! This crate does the opposite of a regex matcher: given an automaton, it
//! produces strings the automaton is guaranteed to accept. It provides:
//! - Random walks with or without a length range
//! - Pluggable, swappable random sources for reproducible output
//! - Automaton construction, validation and persistence
//! - Parallel batch generation over a shared automaton
//!
//! Compiling regular expressions into automata is not part of this crate;
//! any compiler can feed the walker by implementing `AutomatonModel`.

/// Automata, sampling and generation.
pub mod model;

/// Error types of the crate.
pub mod error;

/// I/O utilities (file listing, path helpers).
pub mod io;

pub use error::{AutomatonError, LibraryError, WalkError};
pub use model::automaton::{Automaton, AutomatonModel, State, StateId, Transition};
pub use model::batch::generate_batch;
pub use model::builder::AutomatonBuilder;
pub use model::library::AutomatonLibrary;
pub use model::walker::RandomWalker;
