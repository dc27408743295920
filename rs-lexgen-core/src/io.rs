use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::error::GenerateError;

/// Folder searched for source documents given by bare name.
pub const CORPUS_FOLDER: &str = "corpora";

/// Reads a whole UTF-8 text file.
///
/// # Errors
/// - `SourceNotFound` if nothing exists at `path`
/// - `Io` for any other read failure (permissions, invalid UTF-8, ...)
pub fn load_text<P: AsRef<Path>>(path: P) -> Result<String, GenerateError> {
	let path = path.as_ref();
	let mut contents = String::new();
	let mut file = File::open(path).map_err(|e| match e.kind() {
		io::ErrorKind::NotFound => GenerateError::SourceNotFound(path.to_path_buf()),
		_ => GenerateError::Io(e),
	})?;
	file.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Writes `text` to `path`, replacing any existing file.
pub fn write_text<P: AsRef<Path>>(path: P, text: &str) -> Result<(), GenerateError> {
	std::fs::write(path, text)?;
	Ok(())
}

/// Resolves a document name typed by a user to a path in [`CORPUS_FOLDER`].
///
/// Example: `"treasureisland.txt"` → `corpora/treasureisland.txt`
pub fn corpus_path(name: &str) -> PathBuf {
	Path::new(CORPUS_FOLDER).join(name.trim())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_file_is_source_not_found() {
		let path = std::env::temp_dir().join("rs-lexgen-missing-source.txt");
		let _ = std::fs::remove_file(&path);
		assert!(matches!(load_text(&path), Err(GenerateError::SourceNotFound(p)) if p == path));
	}

	#[test]
	fn write_then_load() {
		let path = std::env::temp_dir().join(format!("rs-lexgen-io-{}.txt", std::process::id()));
		write_text(&path, "Fifteen men on the dead man's chest").unwrap();
		assert_eq!(load_text(&path).unwrap(), "Fifteen men on the dead man's chest");
		std::fs::remove_file(&path).unwrap();
	}

	#[test]
	fn corpus_path_trims_input() {
		assert_eq!(corpus_path(" treasure.txt\n"), PathBuf::from("corpora/treasure.txt"));
	}
}
