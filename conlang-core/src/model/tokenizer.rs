use std::collections::HashMap;

use log::trace;

use crate::error::{ConfigError, ConlangError};

/// First code point handed out as a sigil (start of the BMP private use area).
pub const SIGIL_BASE: u32 = 0xE000;

/// Last code point of the BMP private use area.
const SIGIL_LAST: u32 = 0xF8FF;

/// Bijection between phonemes and single private-use code points.
///
/// Phonemes may span several characters (`"ts"`, `"ng"`), which makes a
/// plain character split ambiguous. Each known phoneme is given a sigil,
/// every occurrence is substituted longest phoneme first, and the sigils
/// are then decoded one character at a time.
///
/// ## Invariants
/// - Sigils are assigned in insertion order starting at `SIGIL_BASE`
/// - `by_length` holds every phoneme once, longest first; equal lengths
///   keep insertion order
#[derive(Debug, Clone)]
pub struct SigilTable {
	encode: HashMap<String, char>,
	decode: HashMap<char, String>,
	by_length: Vec<(String, String)>,
}

impl SigilTable {
	/// Assigns a sigil to each distinct phoneme, in iteration order.
	///
	/// A phoneme seen twice keeps its first sigil.
	///
	/// # Errors
	/// Returns an error on an empty phoneme or when the private use area
	/// is exhausted.
	pub fn new<I, S>(phonemes: I) -> Result<Self, ConfigError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut encode = HashMap::new();
		let mut decode = HashMap::new();
		let mut ordered: Vec<(String, String)> = Vec::new();
		let mut next = SIGIL_BASE;

		for phoneme in phonemes {
			let phoneme = phoneme.as_ref();
			if phoneme.is_empty() {
				return Err(ConfigError::InvalidTable {
					table: "phonemes".to_owned(),
					reason: "empty phoneme".to_owned(),
				});
			}
			if encode.contains_key(phoneme) {
				continue;
			}
			let sigil = (next <= SIGIL_LAST)
				.then(|| char::from_u32(next))
				.flatten()
				.ok_or_else(|| ConfigError::InvalidTable {
					table: "phonemes".to_owned(),
					reason: "too many phonemes for the private use area".to_owned(),
				})?;
			next += 1;

			encode.insert(phoneme.to_owned(), sigil);
			decode.insert(sigil, phoneme.to_owned());
			ordered.push((phoneme.to_owned(), sigil.to_string()));
		}

		// Stable sort: equal lengths keep table order.
		ordered.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));

		Ok(Self { encode, decode, by_length: ordered })
	}

	/// Number of known phonemes.
	pub fn len(&self) -> usize {
		self.encode.len()
	}

	pub fn is_empty(&self) -> bool {
		self.encode.is_empty()
	}

	/// Sigil assigned to `phoneme`.
	pub fn sigil_of(&self, phoneme: &str) -> Option<char> {
		self.encode.get(phoneme).copied()
	}

	/// Splits `word` into known phonemes.
	///
	/// Every phoneme occurrence is replaced by its sigil, longest phoneme
	/// first, so `"tsa"` becomes `["ts", "a"]` when both `"t"` and `"ts"`
	/// are known.
	///
	/// # Errors
	/// `UnknownCharacter` for the first character that no phoneme covers.
	/// Raw sigil characters in the input are rejected the same way.
	pub fn tokenize(&self, word: &str) -> Result<Vec<String>, ConlangError> {
		if let Some(character) = word.chars().find(|c| self.decode.contains_key(c)) {
			return Err(ConlangError::UnknownCharacter { word: word.to_owned(), character });
		}

		let mut encoded = word.to_owned();
		for (phoneme, sigil) in &self.by_length {
			if encoded.contains(phoneme.as_str()) {
				encoded = encoded.replace(phoneme.as_str(), sigil);
			}
		}

		let tokens = encoded
			.chars()
			.map(|c| {
				self.decode
					.get(&c)
					.cloned()
					.ok_or_else(|| ConlangError::UnknownCharacter { word: word.to_owned(), character: c })
			})
			.collect::<Result<Vec<_>, _>>()?;

		trace!("tokenized {word:?} into {tokens:?}");
		Ok(tokens)
	}

	/// Concatenates tokens into a surface string.
	pub fn detokenize<S: AsRef<str>>(tokens: &[S]) -> String {
		tokens.iter().map(AsRef::as_ref).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn table(phonemes: &[&str]) -> SigilTable {
		SigilTable::new(phonemes.iter().copied()).unwrap()
	}

	#[test]
	fn sigils_follow_table_order() {
		let sigils = table(&["a", "ts", "t"]);
		assert_eq!(sigils.sigil_of("a"), char::from_u32(SIGIL_BASE));
		assert_eq!(sigils.sigil_of("ts"), char::from_u32(SIGIL_BASE + 1));
		assert_eq!(sigils.sigil_of("t"), char::from_u32(SIGIL_BASE + 2));
	}

	#[test]
	fn longest_phoneme_wins() {
		// "t" is listed before "ts" on purpose.
		let sigils = table(&["a", "t", "s", "ts"]);
		assert_eq!(sigils.tokenize("tsa").unwrap(), vec!["ts", "a"]);
		assert_eq!(sigils.tokenize("tasts").unwrap(), vec!["t", "a", "s", "ts"]);
	}

	#[test]
	fn unknown_remainder_fails_instead_of_splitting() {
		let sigils = table(&["a", "t", "ts"]);
		assert_eq!(
			sigils.tokenize("tsa!"),
			Err(ConlangError::UnknownCharacter { word: "tsa!".to_owned(), character: '!' })
		);
		// "s" alone is not a phoneme, so "sa" cannot be segmented.
		assert!(matches!(sigils.tokenize("sa"), Err(ConlangError::UnknownCharacter { character: 's', .. })));
	}

	#[test]
	fn sigil_characters_in_input_are_rejected() {
		let sigils = table(&["a"]);
		let raw = char::from_u32(SIGIL_BASE).unwrap().to_string();
		assert!(sigils.tokenize(&raw).is_err());
	}

	#[test]
	fn duplicate_phonemes_keep_first_sigil() {
		let sigils = table(&["a", "a", "k"]);
		assert_eq!(sigils.len(), 2);
		assert_eq!(sigils.sigil_of("k"), char::from_u32(SIGIL_BASE + 1));
	}

	#[test]
	fn round_trip_over_known_phonemes() {
		let sigils = table(&["a", "i", "ng", "n", "g", "ts", "t", "s"]);
		for word in ["ngata", "tsing", "nagits", "a", ""] {
			let tokens = sigils.tokenize(word).unwrap();
			assert_eq!(SigilTable::detokenize(&tokens), word);
		}
	}

	#[test]
	fn empty_phoneme_is_rejected() {
		assert!(SigilTable::new(["a", ""]).is_err());
	}
}
