use std::collections::HashMap;
use std::path::Path;

use crate::error::LibraryError;
use crate::io;
use super::automaton::Automaton;

/// File extension of persisted automata.
pub const AUTOMATON_EXTENSION: &str = "bin";

/// Named collection of automata loaded from disk.
///
/// # Responsibilities
/// - Load every persisted automaton of a directory
/// - Look automata up by name (the file name without extension)
/// - Keep each automaton built once, so walkers can be created cheaply
#[derive(Debug, Default)]
pub struct AutomatonLibrary {
	automata: HashMap<String, Automaton>,
}

impl AutomatonLibrary {
	/// Creates a library by loading all `.bin` automata from a directory.
	///
	/// # Parameters
	/// - `folder`: Path to a directory containing automaton files.
	///   Both `"folder"` and `"folder/"` are accepted, `"."` is the current directory.
	///
	/// # Errors
	/// - `NotADirectory` if the path does not exist or is not a directory.
	/// - `Io` if `"."` is given and the working directory cannot be read.
	/// - Any error raised while loading one of the files.
	///
	/// # Notes
	/// - Only files directly contained in the directory are loaded
	///   (subdirectories are ignored).
	pub fn new<P: AsRef<Path>>(folder: P) -> Result<Self, LibraryError> {
		let mut library = Self::default();

		let folder = io::resolve_folder(folder.as_ref())?;
		if !folder.is_dir() {
			return Err(LibraryError::NotADirectory(folder));
		}

		for file in io::list_files(&folder, AUTOMATON_EXTENSION)? {
			library.load(folder.join(&file))?;
		}

		log::debug!("loaded {} automata from {}", library.len(), folder.display());
		Ok(library)
	}

	/// Loads one automaton file, named after its file stem.
	///
	/// # Errors
	/// Returns `AlreadyLoaded` if the name is taken, or the load error.
	pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<&Automaton, LibraryError> {
		let name = io::automaton_name(path.as_ref())?;
		if self.automata.contains_key(&name) {
			return Err(LibraryError::AlreadyLoaded(name));
		}
		let automaton = Automaton::load(&path)?;
		log::debug!("loaded automaton '{}' ({} states)", name, automaton.len());
		let automaton: &Automaton = self.automata.entry(name).or_insert(automaton);
		Ok(automaton)
	}

	/// Adds an automaton under `name`, returning the one it replaces.
	pub fn insert(&mut self, name: impl Into<String>, automaton: Automaton) -> Option<Automaton> {
		self.automata.insert(name.into(), automaton)
	}

	pub fn get(&self, name: &str) -> Option<&Automaton> {
		self.automata.get(name)
	}

	/// Returns the loaded names in ascending order.
	pub fn names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.automata.keys().cloned().collect();
		names.sort();
		names
	}

	pub fn len(&self) -> usize {
		self.automata.len()
	}

	pub fn is_empty(&self) -> bool {
		self.automata.is_empty()
	}
}
