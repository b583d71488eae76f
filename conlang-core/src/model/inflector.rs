use indexmap::IndexMap;
use log::{debug, trace};
use serde::Serialize;

use super::grammar_rules::{GrammarRules, InflectionAction, MoodRule};
use super::language_data::ConlangData;
use super::tokenizer::SigilTable;
use crate::error::ConlangError;

/// Ending template (or mood prefix) meaning "leave the word unchanged".
pub const BARE_STEM_MARKER: &str = "@";

/// Number of trailing characters that select a conjugation rule group.
pub const CONJUGATION_ENDING_LEN: usize = 2;

/// Ordered `{name: form}` mapping of inflected forms.
pub type Forms = IndexMap<String, String>;

/// All verbal forms of one verb.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct VerbInflection {
	pub tenses: Forms,
	pub moods: Forms,
	pub converbs: Forms,
}

impl InflectionAction {
	/// Applies the action to a tokenized stem, returning a new sequence.
	///
	/// # Errors
	/// `NoConsonant` / `NoVowel` when the stem has nothing to copy.
	pub fn apply(self, data: &ConlangData, stem: &[String]) -> Result<Vec<String>, ConlangError> {
		let mut adjusted = stem.to_vec();
		match self {
			InflectionAction::DropLast => {
				adjusted.pop();
			}
			InflectionAction::AppendLastConsonant => {
				let consonant = stem
					.iter()
					.rfind(|token| !data.is_vowel(token))
					.ok_or_else(|| ConlangError::NoConsonant(SigilTable::detokenize(stem)))?;
				adjusted.push(consonant.clone());
			}
			InflectionAction::AppendLastVowel => {
				let vowel = stem
					.iter()
					.rfind(|token| data.is_vowel(token))
					.ok_or_else(|| ConlangError::NoVowel(SigilTable::detokenize(stem)))?;
				adjusted.push(vowel.clone());
			}
			InflectionAction::Identity => {}
		}
		Ok(adjusted)
	}
}

/// Inflects existing words with a grammar-rule table.
///
/// Nouns are declined token by token, using the phoneme classes at the
/// stem/ending boundary to pick a stem adjustment. Verbs are conjugated on
/// characters: the final two select the tense suffixes, and mood prefixes
/// compare single characters. Converbs decline one tense form as a noun.
pub struct Inflector<'a> {
	data: &'a ConlangData,
	rules: &'a GrammarRules,
}

impl<'a> Inflector<'a> {
	pub fn new(data: &'a ConlangData, rules: &'a GrammarRules) -> Self {
		Self { data, rules }
	}

	/// Declines `word` for every case of the declension table.
	///
	/// # Errors
	/// - `UnknownCharacter` if the word or an ending cannot be tokenized
	/// - `UnclassifiedPhoneme` if a boundary phoneme is in no class
	/// - `MissingRule` if the boundary class pair has no action
	/// - `NoConsonant` / `NoVowel` from the selected action
	/// - `EmptyWord` / `EmptyEnding` when a boundary token is missing
	pub fn inflect_noun(&self, word: &str) -> Result<Forms, ConlangError> {
		let stem = self.data.tokenize(word)?;
		let mut inflections = Forms::new();

		for (case, ending) in &self.rules.declension_table {
			if ending == BARE_STEM_MARKER {
				inflections.insert(case.clone(), SigilTable::detokenize(&stem));
				continue;
			}

			let ending_tokens = self.data.tokenize(ending)?;
			let final_token = stem.last().ok_or(ConlangError::EmptyWord)?;
			let initial_token = ending_tokens
				.first()
				.ok_or_else(|| ConlangError::EmptyEnding(case.clone()))?;

			let final_class = self.data.class_of(final_token)?;
			let initial_class = self.data.class_of(initial_token)?;
			let action = self.action_for(final_class, initial_class)?;
			trace!("{case}: {final_class}+{initial_class} -> {action:?}");

			let mut form = action.apply(self.data, &stem)?;
			form.extend(ending_tokens);
			inflections.insert(case.clone(), SigilTable::detokenize(&form));
		}

		Ok(inflections)
	}

	/// Action for a stem ending in `final_class` before an ending starting
	/// in `initial_class`.
	pub fn action_for(&self, final_class: &str, initial_class: &str) -> Result<InflectionAction, ConlangError> {
		self.rules
			.declension_inflection_rules
			.get(final_class)
			.and_then(|by_initial| by_initial.get(initial_class))
			.copied()
			.ok_or_else(|| ConlangError::MissingRule {
				final_class: final_class.to_owned(),
				initial_class: initial_class.to_owned(),
			})
	}

	/// Conjugates `word`: tenses, moods and converbs.
	///
	/// # Errors
	/// - `BadRootLength` if the word is shorter than the ending
	/// - `UnknownEnding` if its final two characters have no rule group
	/// - `UnclassifiedPhoneme` from mood prefix comparison
	/// - `UnknownTense` / `UnknownCase` from converb derivation, plus any
	///   error of `inflect_noun` on the base tense form
	pub fn inflect_verb(&self, word: &str) -> Result<VerbInflection, ConlangError> {
		let chars: Vec<char> = word.chars().collect();
		if chars.len() < CONJUGATION_ENDING_LEN {
			return Err(ConlangError::BadRootLength(word.to_owned()));
		}
		let split = chars.len() - CONJUGATION_ENDING_LEN;
		let root: String = chars[..split].iter().collect();
		let ending: String = chars[split..].iter().collect();

		let tense_rules = self
			.rules
			.conjugation_table
			.get(&ending)
			.ok_or_else(|| ConlangError::UnknownEnding(ending.clone()))?;

		let tenses: Forms = tense_rules
			.iter()
			.map(|(tense, suffix)| (tense.clone(), format!("{root}{suffix}")))
			.collect();

		let moods = self
			.rules
			.verb_prefix_table
			.iter()
			.map(|(mood, rule)| Ok((mood.clone(), self.mood_form(word, rule)?)))
			.collect::<Result<Forms, ConlangError>>()?;

		let converbs = self.converbs(&tenses)?;

		Ok(VerbInflection { tenses, moods, converbs })
	}

	/// Prefixes `word` for one mood, inserting the elision string when the
	/// prefix ends in the same class the word starts with.
	fn mood_form(&self, word: &str, rule: &MoodRule) -> Result<String, ConlangError> {
		if rule.prefix == BARE_STEM_MARKER {
			return Ok(word.to_owned());
		}
		let (Some(last), Some(first)) = (rule.prefix.chars().last(), word.chars().next()) else {
			return Ok(format!("{}{word}", rule.prefix));
		};

		let prefix_class = self.data.class_of(&last.to_string())?;
		let word_class = self.data.class_of(&first.to_string())?;
		if prefix_class == word_class {
			Ok(format!("{}{}{word}", rule.prefix, rule.elide))
		} else {
			Ok(format!("{}{word}", rule.prefix))
		}
	}

	/// Declines the configured base tense and picks one case per converb.
	fn converbs(&self, tenses: &Forms) -> Result<Forms, ConlangError> {
		let Some(base) = self.rules.converb_base_tense() else {
			debug!("no converb base tense configured, skipping converbs");
			return Ok(Forms::new());
		};
		if self.rules.converb_table.is_empty() {
			return Ok(Forms::new());
		}

		let base_form = tenses
			.get(base)
			.ok_or_else(|| ConlangError::UnknownTense(base.to_owned()))?;
		let declined = self.inflect_noun(base_form)?;

		self.rules
			.converb_table
			.iter()
			.map(|(converb, case)| {
				declined
					.get(case)
					.map(|form| (converb.clone(), form.clone()))
					.ok_or_else(|| ConlangError::UnknownCase(case.clone()))
			})
			.collect()
	}
}
