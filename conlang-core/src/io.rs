use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::ConfigError;

/// Reads a whole text file into memory.
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> Result<String, ConfigError> {
	let path = filename.as_ref();
	let mut contents = String::new();
	File::open(path)
		.and_then(|mut file| file.read_to_string(&mut contents))
		.map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
	Ok(contents)
}

/// Reads and deserializes a JSON rule document.
///
/// Missing required keys and type mismatches surface as `ConfigError::Parse`
/// carrying serde's description (which names the key).
pub(crate) fn read_document<T, P>(filename: P) -> Result<T, ConfigError>
where
	T: DeserializeOwned,
	P: AsRef<Path>,
{
	let path = filename.as_ref();
	let contents = read_file(path)?;
	serde_json::from_str(&contents).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
}
