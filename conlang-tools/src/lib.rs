//! Converters from flat tab-separated sources to the JSON rule-table shapes
//! consumed by `conlang-core`.
//!
//! - Root dictionaries: `root<TAB>meaning` rows to `{root: meaning}`
//! - Mood tables: `mood<TAB>prefix<TAB>elide` rows to the `verbPrefixTable`
//!   shape `{mood: {"prefix": ..., "elide": ...}}`

use std::io::Read;
use std::path::Path;

use conlang_core::model::grammar_rules::MoodRule;
use indexmap::IndexMap;
use log::warn;

fn tsv_reader<R: Read>(reader: R) -> csv::Reader<R> {
	csv::ReaderBuilder::new()
		.comment(Some(b'#'))
		.delimiter(b'\t')
		.has_headers(false)
		.flexible(true)
		.quoting(false)
		.from_reader(reader)
}

/// Reads `root<TAB>meaning` rows. Later duplicates overwrite earlier ones.
pub fn read_roots<R: Read>(reader: R) -> Result<IndexMap<String, String>, csv::Error> {
	let mut roots = IndexMap::new();
	for (line, record) in tsv_reader(reader).records().enumerate() {
		let record = record?;
		match (record.get(0), record.get(1)) {
			(Some(root), Some(meaning)) if !root.is_empty() => {
				roots.insert(root.to_owned(), meaning.trim_end().to_owned());
			}
			_ => warn!("skipping root row {}: expected root and meaning", line + 1),
		}
	}
	Ok(roots)
}

/// Reads `mood<TAB>prefix<TAB>elide` rows; a missing elide is empty.
pub fn read_moods<R: Read>(reader: R) -> Result<IndexMap<String, MoodRule>, csv::Error> {
	let mut moods = IndexMap::new();
	for (line, record) in tsv_reader(reader).records().enumerate() {
		let record = record?;
		match (record.get(0), record.get(1)) {
			(Some(mood), Some(prefix)) if !mood.is_empty() => {
				let elide = record.get(2).unwrap_or_default().trim_end().to_owned();
				moods.insert(mood.to_owned(), MoodRule { prefix: prefix.to_owned(), elide });
			}
			_ => warn!("skipping mood row {}: expected mood and prefix", line + 1),
		}
	}
	Ok(moods)
}

/// Opens `path` and reads it with `read`.
pub fn read_path<T, P, F>(path: P, read: F) -> Result<T, csv::Error>
where
	P: AsRef<Path>,
	F: FnOnce(std::fs::File) -> Result<T, csv::Error>,
{
	let file = std::fs::File::open(path)?;
	read(file)
}
