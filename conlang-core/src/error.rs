use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a rule-table document.
///
/// All of these indicate a data-authoring problem and are fatal for the
/// binaries.
#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("cannot read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("malformed rule table {path}: {source}")]
	Parse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("malformed rule table: {0}")]
	Json(#[from] serde_json::Error),

	#[error("invalid replacement pattern {pattern:?} in group {group:?}: {source}")]
	InvalidPattern {
		group: String,
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("invalid weights in {table}: {reason}")]
	InvalidWeights { table: String, reason: String },

	#[error("invalid table {table}: {reason}")]
	InvalidTable { table: String, reason: String },
}

/// Errors raised while generating or inflecting a single word.
///
/// Lookup misses carry the offending key so the table can be fixed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConlangError {
	#[error("unknown character {character:?} in {word:?}")]
	UnknownCharacter { word: String, character: char },

	#[error("nucleus vowel {0:?} is not in any harmony vowel class")]
	UngroupedVowel(String),

	#[error("no syllable template for shape symbol {0:?}")]
	UnknownSyllableShape(String),

	#[error("unknown phoneme class {0:?}")]
	UnknownPhonemeClass(String),

	#[error("phoneme class {0:?} cannot be reached from its frequency table")]
	ClassUnreachable(String),

	#[error("phoneme {0:?} is not a member of any phoneme class")]
	UnclassifiedPhoneme(String),

	#[error("no declension rule for final class {final_class:?} before initial class {initial_class:?}")]
	MissingRule { final_class: String, initial_class: String },

	#[error("word {0:?} is shorter than the conjugation ending")]
	BadRootLength(String),

	#[error("no conjugation rules for ending {0:?}")]
	UnknownEnding(String),

	#[error("tense {0:?} was not produced for this verb")]
	UnknownTense(String),

	#[error("case {0:?} was not produced by nominal inflection")]
	UnknownCase(String),

	#[error("stem {0:?} has no consonant to copy")]
	NoConsonant(String),

	#[error("stem {0:?} has no vowel to copy")]
	NoVowel(String),

	#[error("cannot inflect an empty word")]
	EmptyWord,

	#[error("case {0:?} has an empty ending")]
	EmptyEnding(String),

	#[error("word count must be at least 1, got {0}")]
	InvalidCount(usize),

	#[error("generation stalled after {attempts} attempts with {produced} of {requested} unique words")]
	GenerationStalled { attempts: usize, produced: usize, requested: usize },
}
