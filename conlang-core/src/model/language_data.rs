use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::Deserialize;

use super::phonology::{HarmonyRules, ReplacementGroup};
use super::sampler::WeightedTable;
use super::tokenizer::SigilTable;
use crate::error::{ConfigError, ConlangError};
use crate::io::read_document;

/// Name of the phoneme class that defines which phonemes are vowels.
pub const VOWEL_CLASS: &str = "V";

/// Optional scalar knobs of the language-data document (`tuning` key).
///
/// Every knob defaults to the disabled behavior.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Tunings {
	/// Probability that a sampled consonant is doubled.
	pub geminate_consonant_chance: Option<f64>,
	/// Consonants allowed to geminate. Absent or empty means all of them.
	pub geminatable_consonants: Option<Vec<String>>,
	/// Probability that a generated word also yields a reduplicated form.
	pub reduplicate_chance: Option<f64>,
	/// Whether the reduplicated half gets its onset voicing toggled.
	/// Absent behaves as `true`.
	pub reduplicate_with_initial_voicing: Option<bool>,
	/// Upper bound on rejection-sampling draws for a single phoneme.
	pub max_sample_attempts: Option<usize>,
}

impl Tunings {
	/// Gemination chance, `None` when the feature is off.
	pub fn gemination_chance(&self) -> Option<f64> {
		self.geminate_consonant_chance.filter(|chance| *chance > 0.0)
	}

	/// Reduplication chance, `None` when the feature is off.
	pub fn reduplication_chance(&self) -> Option<f64> {
		self.reduplicate_chance.filter(|chance| *chance > 0.0)
	}

	/// Returns `true` if `phoneme` may be geminated.
	pub fn is_geminatable(&self, phoneme: &str) -> bool {
		match &self.geminatable_consonants {
			Some(eligible) if !eligible.is_empty() => eligible.iter().any(|c| c == phoneme),
			_ => true,
		}
	}

	fn validate(&self) -> Result<(), ConfigError> {
		for (name, chance) in [
			("geminateConsonantChance", self.geminate_consonant_chance),
			("reduplicateChance", self.reduplicate_chance),
		] {
			if let Some(chance) = chance {
				if !(0.0..=1.0).contains(&chance) {
					return Err(ConfigError::InvalidTable {
						table: "tuning".to_owned(),
						reason: format!("{name} must be between 0.0 and 1.0, got {chance}"),
					});
				}
			}
		}
		Ok(())
	}
}

/// Language-data document as it appears on disk.
///
/// Key order is preserved: it drives sigil assignment, class lookup and
/// the order in which replacement rules run.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LanguageDataDocument {
	pub consonant_frequencies: IndexMap<String, f64>,
	pub vowel_frequencies: IndexMap<String, f64>,
	pub phoneme_classes: IndexMap<String, Vec<String>>,
	pub word_types: IndexMap<String, f64>,
	pub syllable_classes: IndexMap<String, Vec<String>>,
	#[serde(default)]
	pub voicing_rules: Option<HashMap<String, String>>,
	#[serde(default)]
	pub replacement_rules: Option<IndexMap<String, IndexMap<String, String>>>,
	#[serde(default)]
	pub harmony_rules: Option<HarmonyRules>,
	#[serde(default)]
	pub tuning: Option<Tunings>,
	#[serde(default)]
	pub syllable_count_probabilities: Option<Vec<f64>>,
}

/// Immutable in-memory language model.
///
/// Built once from a `LanguageDataDocument` and only borrowed afterwards
/// by the sampler, the phonology passes, the word builder and the inflector.
///
/// # Invariants
/// - The `V` class exists and defines vowel-hood
/// - Every frequency table has at least one positive weight
/// - Every replacement pattern compiled successfully
#[derive(Debug, Clone)]
pub struct ConlangData {
	consonants: WeightedTable<String>,
	vowels: WeightedTable<String>,
	phoneme_classes: IndexMap<String, Vec<String>>,
	word_types: WeightedTable<String>,
	syllable_types: IndexMap<String, Vec<String>>,
	syllable_counts: Option<WeightedTable<usize>>,
	voicing_rules: HashMap<String, String>,
	replacement_rules: Vec<ReplacementGroup>,
	harmony_rules: Option<HarmonyRules>,
	tunings: Tunings,
	sigils: SigilTable,
}

impl ConlangData {
	/// Loads and compiles a language-data document from disk.
	///
	/// # Errors
	/// Returns a `ConfigError` if the file cannot be read, is not valid JSON,
	/// misses a required key, or contains invalid weights or patterns.
	pub fn new<P: AsRef<Path>>(filepath: P) -> Result<Self, ConfigError> {
		let document: LanguageDataDocument = read_document(&filepath)?;
		let data = Self::from_document(document)?;
		info!(
			"loaded language data from {} ({} phonemes, {} classes, {} word types)",
			filepath.as_ref().display(),
			data.sigils.len(),
			data.phoneme_classes.len(),
			data.word_types.len()
		);
		Ok(data)
	}

	/// Parses and compiles a language-data document held in memory.
	pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
		let document: LanguageDataDocument = serde_json::from_str(json)?;
		Self::from_document(document)
	}

	/// Compiles a parsed document into the read-only model.
	pub fn from_document(document: LanguageDataDocument) -> Result<Self, ConfigError> {
		if !document.phoneme_classes.contains_key(VOWEL_CLASS) {
			return Err(ConfigError::InvalidTable {
				table: "phonemeClasses".to_owned(),
				reason: format!("missing the vowel class {VOWEL_CLASS:?}"),
			});
		}

		let sigils = SigilTable::new(
			document.vowel_frequencies.keys().chain(document.consonant_frequencies.keys()),
		)?;

		let vowels = WeightedTable::new("vowelFrequencies", document.vowel_frequencies)?;
		let consonants = WeightedTable::new("consonantFrequencies", document.consonant_frequencies)?;
		let word_types = WeightedTable::new("wordTypes", document.word_types)?;

		for shape in word_types.entries() {
			if let Some(symbol) = shape.chars().find(|s| !document.syllable_classes.contains_key(&s.to_string())) {
				warn!("word type {shape:?} uses syllable symbol {symbol:?} with no syllable class");
			}
		}

		let syllable_counts = match document.syllable_count_probabilities {
			Some(weights) => Some(WeightedTable::new(
				"syllableCountProbabilities",
				weights.into_iter().enumerate().skip(1),
			)?),
			None => None,
		};

		let replacement_rules = match document.replacement_rules {
			Some(groups) => groups
				.into_iter()
				.map(|(name, rules)| ReplacementGroup::compile(name, rules))
				.collect::<Result<Vec<_>, _>>()?,
			None => Vec::new(),
		};

		if let Some(harmony) = &document.harmony_rules {
			for class in harmony.vowel_classes.keys() {
				if !harmony.counterparts.contains_key(class) {
					warn!("harmony class {class:?} has no counterparts, it will leave words unchanged");
				}
			}
		}

		let tunings = document.tuning.unwrap_or_default();
		tunings.validate()?;
		debug!("tunings: {tunings:?}");

		Ok(Self {
			consonants,
			vowels,
			phoneme_classes: document.phoneme_classes,
			word_types,
			syllable_types: document.syllable_classes,
			syllable_counts,
			voicing_rules: document.voicing_rules.unwrap_or_default(),
			replacement_rules,
			harmony_rules: document.harmony_rules,
			tunings,
			sigils,
		})
	}

	pub fn consonants(&self) -> &WeightedTable<String> {
		&self.consonants
	}

	pub fn vowels(&self) -> &WeightedTable<String> {
		&self.vowels
	}

	pub fn word_types(&self) -> &WeightedTable<String> {
		&self.word_types
	}

	/// Syllable-count distribution, if the document provides one.
	pub fn syllable_counts(&self) -> Option<&WeightedTable<usize>> {
		self.syllable_counts.as_ref()
	}

	/// Concrete syllable shapes for a shape symbol.
	pub fn syllable_shapes(&self, symbol: &str) -> Option<&[String]> {
		self.syllable_types.get(symbol).map(Vec::as_slice)
	}

	/// Members of a named phoneme class.
	pub fn phoneme_class(&self, class: &str) -> Option<&[String]> {
		self.phoneme_classes.get(class).map(Vec::as_slice)
	}

	pub fn harmony_rules(&self) -> Option<&HarmonyRules> {
		self.harmony_rules.as_ref()
	}

	pub fn replacement_rules(&self) -> &[ReplacementGroup] {
		&self.replacement_rules
	}

	pub fn tunings(&self) -> &Tunings {
		&self.tunings
	}

	pub fn sigils(&self) -> &SigilTable {
		&self.sigils
	}

	/// Returns `true` if `phoneme` belongs to the `V` class.
	pub fn is_vowel(&self, phoneme: &str) -> bool {
		self.phoneme_classes
			.get(VOWEL_CLASS)
			.is_some_and(|vowels| vowels.iter().any(|v| v == phoneme))
	}

	/// Voiced/voiceless counterpart of `phoneme`, or the phoneme itself.
	pub fn toggle_voicing<'a>(&'a self, phoneme: &'a str) -> &'a str {
		self.voicing_rules.get(phoneme).map(String::as_str).unwrap_or(phoneme)
	}

	/// Name of the first class (in document order) listing `phoneme`.
	///
	/// # Errors
	/// `UnclassifiedPhoneme` if no class lists it.
	pub fn class_of(&self, phoneme: &str) -> Result<&str, ConlangError> {
		self.phoneme_classes
			.iter()
			.find(|(_, members)| members.iter().any(|m| m == phoneme))
			.map(|(class, _)| class.as_str())
			.ok_or_else(|| ConlangError::UnclassifiedPhoneme(phoneme.to_owned()))
	}

	/// Segments a surface word into phonemes (see `SigilTable::tokenize`).
	pub fn tokenize(&self, word: &str) -> Result<Vec<String>, ConlangError> {
		self.sigils.tokenize(word)
	}

	/// Concatenates phonemes back into a surface word.
	pub fn detokenize<S: AsRef<str>>(&self, tokens: &[S]) -> String {
		SigilTable::detokenize(tokens)
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;

	/// Small language used across the unit tests of the model.
	pub(crate) const SAMPLE_LANGUAGE: &str = r#"{
		"consonantFrequencies": {"t": 0.3, "ts": 0.1, "k": 0.2, "d": 0.1, "g": 0.1, "s": 0.2},
		"vowelFrequencies": {"a": 0.4, "i": 0.3, "u": 0.3},
		"phonemeClasses": {
			"V": ["a", "i", "u"],
			"C": ["t", "ts", "k", "d", "g", "s"],
			"S": ["s", "ts"]
		},
		"wordTypes": {"IMF": 1.0},
		"syllableClasses": {"I": ["CV"], "M": ["CV", "CVC"], "F": ["CV"]},
		"voicingRules": {"t": "d", "d": "t", "k": "g", "g": "k"}
	}"#;

	pub(crate) fn sample_data() -> ConlangData {
		ConlangData::from_json_str(SAMPLE_LANGUAGE).unwrap()
	}

	#[test]
	fn vowel_membership_uses_v_class() {
		let data = sample_data();
		assert!(data.is_vowel("a"));
		assert!(!data.is_vowel("t"));
		assert!(!data.is_vowel("x"));
	}

	#[test]
	fn class_lookup_follows_document_order() {
		let data = sample_data();
		assert_eq!(data.class_of("s").unwrap(), "C");
		assert_eq!(data.class_of("i").unwrap(), "V");
		assert_eq!(
			data.class_of("x"),
			Err(ConlangError::UnclassifiedPhoneme("x".to_owned()))
		);
	}

	#[test]
	fn every_phoneme_gets_a_sigil() {
		let data = sample_data();
		assert_eq!(data.sigils().len(), 9);
		assert_ne!(data.sigils().sigil_of("a"), data.sigils().sigil_of("t"));
		assert_eq!(data.sigils().sigil_of("x"), None);
	}

	#[test]
	fn voicing_toggle_falls_back_to_identity() {
		let data = sample_data();
		assert_eq!(data.toggle_voicing("t"), "d");
		assert_eq!(data.toggle_voicing("d"), "t");
		assert_eq!(data.toggle_voicing("s"), "s");
	}

	#[test]
	fn missing_required_key_is_reported() {
		let err = ConlangData::from_json_str(r#"{"vowelFrequencies": {"a": 1.0}}"#).unwrap_err();
		assert!(err.to_string().contains("consonantFrequencies"), "{err}");
	}

	#[test]
	fn missing_vowel_class_is_rejected() {
		let json = SAMPLE_LANGUAGE.replace("\"V\":", "\"W\":");
		assert!(matches!(
			ConlangData::from_json_str(&json),
			Err(ConfigError::InvalidTable { .. })
		));
	}

	#[test]
	fn out_of_range_tuning_is_rejected() {
		let json = SAMPLE_LANGUAGE.replacen('{', r#"{"tuning": {"reduplicateChance": 1.5},"#, 1);
		assert!(matches!(
			ConlangData::from_json_str(&json),
			Err(ConfigError::InvalidTable { .. })
		));
	}

	#[test]
	fn geminatable_list_restricts_when_present() {
		let mut tunings = Tunings::default();
		assert!(tunings.is_geminatable("t"));
		tunings.geminatable_consonants = Some(vec!["k".to_owned()]);
		assert!(tunings.is_geminatable("k"));
		assert!(!tunings.is_geminatable("t"));
	}
}
