use std::path::{Component, Path, PathBuf};
use std::{env, fs, io};

/// Name under which the automaton stored at `path` is registered: its
/// file stem (`"./data/email.bin"` is `"email"`).
///
/// Stems that are not valid UTF-8 are rejected, not converted lossily.
pub(crate) fn automaton_name(path: &Path) -> io::Result<String> {
	let stem = path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("{} has no file name", path.display())))?;
	stem.to_str()
		.map(str::to_owned)
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, format!("{} is not a UTF-8 name", path.display())))
}

/// Resolves the folder an automaton library is read from.
///
/// A path made only of `.` components (or empty) is the working directory.
/// Any other path is kept as given.
pub(crate) fn resolve_folder(folder: &Path) -> io::Result<PathBuf> {
	if folder.components().all(|c| c == Component::CurDir) {
		env::current_dir()
	} else {
		Ok(folder.to_path_buf())
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted so that loading order does
/// not depend on the file system.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}
