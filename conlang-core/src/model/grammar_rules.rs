use std::path::Path;

use indexmap::IndexMap;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::inflector::CONJUGATION_ENDING_LEN;
use crate::error::ConfigError;
use crate::io::read_document;

/// Stem adjustment applied before a case ending is attached.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InflectionAction {
	/// Drop the final token of the stem.
	#[serde(rename = "deleteLastChar")]
	DropLast,
	/// Repeat the last consonant of the stem.
	#[serde(rename = "appendLastConsonant")]
	AppendLastConsonant,
	/// Repeat the last vowel of the stem.
	#[serde(rename = "appendLastVowel")]
	AppendLastVowel,
	/// Keep the stem as is.
	#[serde(rename = "doNothing")]
	Identity,
}

/// Prefix and elision string of a verbal mood.
///
/// A prefix of `@` means the mood form is the bare verb.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MoodRule {
	pub prefix: String,
	#[serde(default)]
	pub elide: String,
}

/// Optional knobs of the grammar-rule document.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GrammarTunings {
	/// Tense whose form is declined to build converbs.
	pub apply_converb_to_verb_form: Option<String>,
}

/// Grammar-rule document, read-only once loaded.
///
/// Every table keeps its document order, which is also the order of the
/// inflected forms returned by `Inflector`.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GrammarRules {
	/// Case name to ending template (`@` = bare stem).
	pub declension_table: IndexMap<String, String>,
	/// Final stem class, then initial ending class, to stem action.
	pub declension_inflection_rules: IndexMap<String, IndexMap<String, InflectionAction>>,
	/// Two-character verb ending to `{tense: suffix}`.
	pub conjugation_table: IndexMap<String, IndexMap<String, String>>,
	/// Mood name to prefix rule.
	pub verb_prefix_table: IndexMap<String, MoodRule>,
	/// Converb type to the case it is taken from.
	pub converb_table: IndexMap<String, String>,
	#[serde(default)]
	pub tunings: Option<GrammarTunings>,
}

impl GrammarRules {
	/// Loads a grammar-rule document from disk.
	///
	/// # Errors
	/// Returns a `ConfigError` on I/O failure, malformed JSON, a missing
	/// required key or an unknown action name.
	pub fn new<P: AsRef<Path>>(filepath: P) -> Result<Self, ConfigError> {
		let rules: Self = read_document(&filepath)?;
		rules.check();
		info!(
			"loaded grammar rules from {} ({} cases, {} verb endings, {} moods)",
			filepath.as_ref().display(),
			rules.declension_table.len(),
			rules.conjugation_table.len(),
			rules.verb_prefix_table.len()
		);
		Ok(rules)
	}

	/// Parses a grammar-rule document held in memory.
	pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
		let rules: Self = serde_json::from_str(json)?;
		rules.check();
		Ok(rules)
	}

	/// Tense used as the base of converb derivation, if configured.
	pub fn converb_base_tense(&self) -> Option<&str> {
		self.tunings.as_ref()?.apply_converb_to_verb_form.as_deref()
	}

	/// Describes table entries that can never be used or will always fail.
	pub(crate) fn dead_entries(&self) -> Vec<String> {
		let mut notes = Vec::new();
		for ending in self.conjugation_table.keys() {
			if ending.chars().count() != CONJUGATION_ENDING_LEN {
				notes.push(format!(
					"conjugation ending {ending:?} is not {CONJUGATION_ENDING_LEN} characters long and will never match"
				));
			}
		}
		for (converb, case) in &self.converb_table {
			if !self.declension_table.contains_key(case) {
				notes.push(format!("converb {converb:?} refers to unknown case {case:?}"));
			}
		}
		for (case, ending) in &self.declension_table {
			if ending.is_empty() {
				notes.push(format!("case {case:?} has an empty ending"));
			}
		}
		notes
	}

	fn check(&self) {
		for note in self.dead_entries() {
			warn!("{note}");
		}
	}
}
