use log::trace;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use super::language_data::ConlangData;
use crate::error::{ConfigError, ConlangError};

/// Categorical distribution over table entries.
///
/// Weights are taken as they appear in the rule table and do not need to
/// sum to one; the probability of an entry is proportional to its weight.
///
/// ## Invariants
/// - `entries` and `weights` have the same length and order
/// - Weights are finite and non-negative, and at least one is positive
#[derive(Clone, Debug)]
pub struct WeightedTable<T> {
	entries: Vec<T>,
	weights: Vec<f64>,
	distribution: WeightedIndex<f64>,
}

impl<T> WeightedTable<T> {
	/// Builds a table from `(entry, weight)` pairs, keeping their order.
	///
	/// # Errors
	/// Returns `ConfigError::InvalidWeights` (naming `table`) if the table is
	/// empty, a weight is negative or not finite, or all weights are zero.
	pub fn new<I>(table: &str, items: I) -> Result<Self, ConfigError>
	where
		I: IntoIterator<Item = (T, f64)>,
	{
		let invalid = |reason: String| ConfigError::InvalidWeights { table: table.to_owned(), reason };

		let (entries, weights): (Vec<T>, Vec<f64>) = items.into_iter().unzip();
		if entries.is_empty() {
			return Err(invalid("table is empty".to_owned()));
		}
		if let Some(weight) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
			return Err(invalid(format!("weight {weight} is negative or not finite")));
		}
		if weights.iter().all(|w| *w == 0.0) {
			return Err(invalid("all weights are zero".to_owned()));
		}

		let distribution = WeightedIndex::new(&weights).map_err(|e| invalid(e.to_string()))?;
		Ok(Self { entries, weights, distribution })
	}

	/// Draws one entry.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
		&self.entries[self.distribution.sample(rng)]
	}

	/// Entries in table order.
	pub fn entries(&self) -> &[T] {
		&self.entries
	}

	/// `(entry, weight)` pairs in table order.
	pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> {
		self.entries.iter().zip(self.weights.iter().copied())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Returns `true` if a template symbol names a phoneme class.
///
/// Class names are upper case (`V`, `C`, `N2`); anything else is a literal
/// phoneme anchored in the template.
pub fn is_class_symbol(symbol: &str) -> bool {
	symbol.chars().any(char::is_uppercase) && !symbol.chars().any(char::is_lowercase)
}

/// Draws phonemes restricted to a phoneme class.
///
/// Sampling is rejection based: the full vowel or consonant table is drawn
/// from until the result is a member of the requested class. The class
/// must share at least one positively weighted phoneme with that table,
/// which is checked up front.
pub struct PhonemeSampler<'a> {
	data: &'a ConlangData,
}

impl<'a> PhonemeSampler<'a> {
	pub fn new(data: &'a ConlangData) -> Self {
		Self { data }
	}

	/// Draws one phoneme of `class` from the vowel (`is_vowel`) or
	/// consonant frequency table.
	///
	/// Non-class symbols are returned unchanged. Consonants may come back
	/// doubled when gemination fires.
	///
	/// # Errors
	/// - `UnknownPhonemeClass` if `class` is not defined
	/// - `ClassUnreachable` if no positively weighted phoneme of the table
	///   is in `class`, or `maxSampleAttempts` draws all missed
	pub fn sample<R: Rng + ?Sized>(&self, class: &str, is_vowel: bool, rng: &mut R) -> Result<String, ConlangError> {
		if !is_class_symbol(class) {
			return Ok(class.to_owned());
		}

		let members = self
			.data
			.phoneme_class(class)
			.ok_or_else(|| ConlangError::UnknownPhonemeClass(class.to_owned()))?;
		let table = if is_vowel { self.data.vowels() } else { self.data.consonants() };

		let reachable = table.iter().any(|(phoneme, weight)| weight > 0.0 && members.contains(phoneme));
		if !reachable {
			return Err(ConlangError::ClassUnreachable(class.to_owned()));
		}

		let max_attempts = self.data.tunings().max_sample_attempts;
		let mut attempts = 0usize;
		let phoneme = loop {
			let candidate = table.sample(rng);
			if members.contains(candidate) {
				break candidate.clone();
			}
			attempts += 1;
			if max_attempts.is_some_and(|max| attempts >= max) {
				return Err(ConlangError::ClassUnreachable(class.to_owned()));
			}
		};

		if !is_vowel && self.geminate(&phoneme, rng) {
			trace!("geminated {phoneme:?}");
			return Ok(phoneme.repeat(2));
		}
		Ok(phoneme)
	}

	/// Bernoulli draw for gemination of `consonant`.
	///
	/// Only draws when gemination is enabled; the eligibility list is
	/// checked after the draw.
	fn geminate<R: Rng + ?Sized>(&self, consonant: &str, rng: &mut R) -> bool {
		let tunings = self.data.tunings();
		match tunings.gemination_chance() {
			Some(chance) => rng.random_bool(chance) && tunings.is_geminatable(consonant),
			None => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::language_data::tests::{SAMPLE_LANGUAGE, sample_data};
	use rand::SeedableRng;
	use rand_chacha::ChaCha8Rng;

	fn with_tuning(tuning: &str) -> ConlangData {
		let json = SAMPLE_LANGUAGE.replacen('{', &format!(r#"{{"tuning": {tuning},"#), 1);
		ConlangData::from_json_str(&json).unwrap()
	}

	#[test]
	fn weighted_table_rejects_bad_weights() {
		assert!(WeightedTable::new("t", vec![("a", -1.0)]).is_err());
		assert!(WeightedTable::new("t", vec![("a", 0.0), ("b", 0.0)]).is_err());
		assert!(WeightedTable::new("t", vec![("a", f64::NAN)]).is_err());
		assert!(WeightedTable::<&str>::new("t", vec![]).is_err());
	}

	#[test]
	fn weighted_table_never_draws_zero_weight() {
		let table = WeightedTable::new("t", vec![("a", 0.0), ("b", 3.0), ("c", 0.0)]).unwrap();
		let mut rng = ChaCha8Rng::seed_from_u64(1);
		for _ in 0..200 {
			assert_eq!(*table.sample(&mut rng), "b");
		}
	}

	#[test]
	fn unnormalized_weights_are_proportional() {
		let table = WeightedTable::new("t", vec![("a", 3.0), ("b", 1.0)]).unwrap();
		let mut rng = ChaCha8Rng::seed_from_u64(7);
		let hits = (0..4000).filter(|_| *table.sample(&mut rng) == "a").count();
		assert!((2700..3300).contains(&hits), "{hits}");
	}

	#[test]
	fn class_symbols() {
		assert!(is_class_symbol("V"));
		assert!(is_class_symbol("N2"));
		assert!(!is_class_symbol("a"));
		assert!(!is_class_symbol("Ts"));
		assert!(!is_class_symbol("2"));
	}

	#[test]
	fn samples_stay_inside_the_class() {
		let data = sample_data();
		let sampler = PhonemeSampler::new(&data);
		let mut rng = ChaCha8Rng::seed_from_u64(42);
		for _ in 0..500 {
			let sibilant = sampler.sample("S", false, &mut rng).unwrap();
			assert!(["s", "ts"].contains(&sibilant.as_str()), "{sibilant}");
			let vowel = sampler.sample("V", true, &mut rng).unwrap();
			assert!(["a", "i", "u"].contains(&vowel.as_str()), "{vowel}");
		}
	}

	#[test]
	fn literal_symbols_pass_through() {
		let data = sample_data();
		let mut rng = ChaCha8Rng::seed_from_u64(0);
		assert_eq!(PhonemeSampler::new(&data).sample("n", false, &mut rng).unwrap(), "n");
	}

	#[test]
	fn unknown_and_unreachable_classes_fail() {
		let data = sample_data();
		let sampler = PhonemeSampler::new(&data);
		let mut rng = ChaCha8Rng::seed_from_u64(0);
		assert_eq!(
			sampler.sample("X", false, &mut rng),
			Err(ConlangError::UnknownPhonemeClass("X".to_owned()))
		);
		// Vowel class drawn from the consonant table can never match.
		assert_eq!(
			sampler.sample("V", false, &mut rng),
			Err(ConlangError::ClassUnreachable("V".to_owned()))
		);
	}

	#[test]
	fn attempt_cap_stops_rejection_loop() {
		let data = with_tuning(r#"{"maxSampleAttempts": 1}"#);
		let sampler = PhonemeSampler::new(&data);
		let mut rng = ChaCha8Rng::seed_from_u64(3);
		// "S" covers 30% of the consonant mass, so a miss shows up quickly.
		let failures = (0..100)
			.filter(|_| sampler.sample("S", false, &mut rng).is_err())
			.count();
		assert!(failures > 0);
	}

	#[test]
	fn gemination_always_with_certain_chance() {
		let data = with_tuning(r#"{"geminateConsonantChance": 1.0, "geminatableConsonants": ["s", "ts"]}"#);
		let sampler = PhonemeSampler::new(&data);
		let mut rng = ChaCha8Rng::seed_from_u64(5);
		for _ in 0..100 {
			let doubled = sampler.sample("S", false, &mut rng).unwrap();
			assert!(["ss", "tsts"].contains(&doubled.as_str()), "{doubled}");
		}
	}

	#[test]
	fn gemination_never_with_zero_chance() {
		let data = with_tuning(r#"{"geminateConsonantChance": 0.0}"#);
		let sampler = PhonemeSampler::new(&data);
		let mut rng = ChaCha8Rng::seed_from_u64(5);
		for _ in 0..100 {
			let single = sampler.sample("S", false, &mut rng).unwrap();
			assert!(["s", "ts"].contains(&single.as_str()), "{single}");
		}
	}

	#[test]
	fn gemination_respects_eligibility_and_skips_vowels() {
		let data = with_tuning(r#"{"geminateConsonantChance": 1.0, "geminatableConsonants": ["k"]}"#);
		let sampler = PhonemeSampler::new(&data);
		let mut rng = ChaCha8Rng::seed_from_u64(9);
		for _ in 0..100 {
			let consonant = sampler.sample("C", false, &mut rng).unwrap();
			if consonant.starts_with('k') {
				assert_eq!(consonant, "kk");
			} else {
				assert!(["t", "ts", "d", "g", "s"].contains(&consonant.as_str()), "{consonant}");
			}
			let vowel = sampler.sample("V", true, &mut rng).unwrap();
			assert_eq!(vowel.len(), 1);
		}
	}
}
