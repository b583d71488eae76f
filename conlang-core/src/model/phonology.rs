use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};
use rand::Rng;
use regex::Regex;
use serde::Deserialize;

use super::language_data::ConlangData;
use super::tokenizer::SigilTable;
use crate::error::{ConfigError, ConlangError};

/// Words with this many tokens or more are never reduplicated.
pub const MAX_REDUPLICATION_TOKENS: usize = 6;

/// Vowel harmony classes and per-class substitutions (`harmonyRules` key).
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HarmonyRules {
	pub vowel_classes: IndexMap<String, Vec<String>>,
	pub counterparts: IndexMap<String, HashMap<String, String>>,
}

impl HarmonyRules {
	/// Harmony class of `vowel`. When several classes list it, the last
	/// one in document order wins.
	pub fn class_of(&self, vowel: &str) -> Option<&str> {
		self.vowel_classes
			.iter()
			.filter(|(_, members)| members.iter().any(|m| m == vowel))
			.map(|(class, _)| class.as_str())
			.last()
	}

	/// Substitute for `phoneme` under `class`, or the phoneme itself.
	pub fn counterpart<'a>(&'a self, class: &str, phoneme: &'a str) -> &'a str {
		self.counterparts
			.get(class)
			.and_then(|substitutions| substitutions.get(phoneme))
			.map(String::as_str)
			.unwrap_or(phoneme)
	}
}

/// One named group of ordered regex rewrites.
#[derive(Debug, Clone)]
pub struct ReplacementGroup {
	name: String,
	rules: Vec<(Regex, String)>,
}

impl ReplacementGroup {
	/// Compiles every `pattern -> replacement` pair of a group, in order.
	///
	/// Replacements use `\1`-style group references, which are rewritten
	/// to the `${1}` syntax of the `regex` crate.
	pub fn compile(name: String, rules: IndexMap<String, String>) -> Result<Self, ConfigError> {
		let rules = rules
			.into_iter()
			.map(|(pattern, replacement)| {
				let regex = Regex::new(&pattern).map_err(|source| ConfigError::InvalidPattern {
					group: name.clone(),
					pattern: pattern.clone(),
					source,
				})?;
				Ok((regex, translate_replacement(&replacement)))
			})
			.collect::<Result<Vec<_>, ConfigError>>()?;
		Ok(Self { name, rules })
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Applies each rule of the group in order; later rules see the output
	/// of earlier ones.
	pub fn apply(&self, surface: &str) -> String {
		self.rules.iter().fold(surface.to_owned(), |word, (regex, replacement)| {
			regex.replace_all(&word, replacement.as_str()).into_owned()
		})
	}
}

/// Rewrites `\N` group references to `${N}`, escapes `$` and folds `\\`.
fn translate_replacement(replacement: &str) -> String {
	let mut translated = String::with_capacity(replacement.len());
	let mut chars = replacement.chars().peekable();
	while let Some(c) = chars.next() {
		match c {
			'$' => translated.push_str("$$"),
			'\\' if chars.peek().is_some_and(char::is_ascii_digit) => {
				let group: String = std::iter::from_fn(|| chars.next_if(char::is_ascii_digit)).collect();
				translated.push_str(&format!("${{{group}}}"));
			}
			'\\' if chars.peek() == Some(&'\\') => {
				chars.next();
				translated.push('\\');
			}
			_ => translated.push(c),
		}
	}
	translated
}

/// Post-processing passes applied to an assembled word.
///
/// The passes run in a fixed order: harmony over the token sequence, then
/// optional reduplication, then regex replacement over every surface form.
pub struct Phonology<'a> {
	data: &'a ConlangData,
}

impl<'a> Phonology<'a> {
	pub fn new(data: &'a ConlangData) -> Self {
		Self { data }
	}

	/// First vowel of the word.
	pub fn nucleus<'w>(&self, word: &'w [String]) -> Option<&'w str> {
		word.iter().map(String::as_str).find(|token| self.data.is_vowel(token))
	}

	/// Harmonizes every token against the class of the word's nucleus.
	///
	/// Words without a nucleus, or languages without harmony rules, are
	/// returned unchanged.
	///
	/// # Errors
	/// `UngroupedVowel` if the nucleus is in no harmony class.
	pub fn harmonize(&self, word: &[String]) -> Result<Vec<String>, ConlangError> {
		let (Some(rules), Some(nucleus)) = (self.data.harmony_rules(), self.nucleus(word)) else {
			return Ok(word.to_vec());
		};

		let class = rules
			.class_of(nucleus)
			.ok_or_else(|| ConlangError::UngroupedVowel(nucleus.to_owned()))?;
		trace!("harmonizing {word:?} to class {class:?}");

		Ok(word.iter().map(|token| rules.counterpart(class, token).to_owned()).collect())
	}

	/// Reduplicated variant of `word`, when the reduplication draw fires.
	///
	/// Only words shorter than `MAX_REDUPLICATION_TOKENS` qualify.
	pub fn reduplicate<R: Rng + ?Sized>(&self, word: &[String], rng: &mut R) -> Option<Vec<String>> {
		let chance = self.data.tunings().reduplication_chance()?;
		if !rng.random_bool(chance) || word.is_empty() || word.len() >= MAX_REDUPLICATION_TOKENS {
			return None;
		}
		Some(self.reduplicated(word))
	}

	/// Doubles `word`, giving the second half a toggled onset voicing.
	///
	/// `todu` becomes `todudodu` with `t <-> d` voicing rules.
	/// With `reduplicateWithInitialVoicing` set to `false` the copy is plain.
	pub fn reduplicated(&self, word: &[String]) -> Vec<String> {
		let mut reduplicated = word.to_vec();
		if reduplicated.is_empty() {
			return reduplicated;
		}
		let voicing = self.data.tunings().reduplicate_with_initial_voicing.unwrap_or(true);

		if voicing {
			let onset = self.data.toggle_voicing(&reduplicated[0]).to_owned();
			reduplicated[0] = onset;
		}
		reduplicated.extend_from_within(..);
		if voicing {
			let onset = self.data.toggle_voicing(&reduplicated[0]).to_owned();
			reduplicated[0] = onset;
		}
		reduplicated
	}

	/// Runs every replacement group, in document order, over `surface`.
	pub fn apply_replacements(&self, surface: &str) -> String {
		self.data
			.replacement_rules()
			.iter()
			.fold(surface.to_owned(), |word, group| {
				let replaced = group.apply(&word);
				if replaced != word {
					trace!("replacement group {}: {word} -> {replaced}", group.name());
				}
				replaced
			})
	}

	/// Full post-processing of one assembled word.
	///
	/// Returns the surface form, followed by the reduplicated surface form
	/// when reduplication fires.
	pub fn process<R: Rng + ?Sized>(&self, word: &[String], rng: &mut R) -> Result<Vec<String>, ConlangError> {
		let harmonized = self.harmonize(word)?;
		let mut forms = vec![SigilTable::detokenize(&harmonized)];
		if let Some(reduplicated) = self.reduplicate(&harmonized, rng) {
			debug!("reduplicated {harmonized:?}");
			forms.push(SigilTable::detokenize(&reduplicated));
		}
		Ok(forms.iter().map(|form| self.apply_replacements(form)).collect())
	}
}
