use std::collections::BTreeSet;

use log::{debug, trace};
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha8Rng;

use super::generation_input::GenerationInput;
use super::language_data::{ConlangData, VOWEL_CLASS};
use super::phonology::Phonology;
use super::sampler::PhonemeSampler;
use crate::error::ConlangError;

/// Word shape forced for one-syllable words.
pub const MONOSYLLABIC_SHAPE: &str = "I";

/// Word shape forced for two-syllable words.
pub const DISYLLABIC_SHAPE: &str = "IF";

/// High-level word generator over one language model.
///
/// # Responsibilities
/// - Expand word shapes into syllable shapes, then into phonemes
/// - Run the phonology passes on each assembled word
/// - Accumulate unique surface forms in sorted order
#[derive(Debug)]
pub struct WordBuilder {
	data: ConlangData,
	rng: ChaCha8Rng,
	results: BTreeSet<String>,
}

impl WordBuilder {
	/// Creates a builder seeded from the operating system.
	pub fn new(data: ConlangData) -> Self {
		Self::with_rng(data, ChaCha8Rng::from_os_rng())
	}

	/// Creates a builder with a reproducible seed.
	pub fn with_seed(data: ConlangData, seed: u64) -> Self {
		Self::with_rng(data, ChaCha8Rng::seed_from_u64(seed))
	}

	fn with_rng(data: ConlangData, rng: ChaCha8Rng) -> Self {
		Self { data, rng, results: BTreeSet::new() }
	}

	/// Returns the language model used by this builder.
	pub fn data(&self) -> &ConlangData {
		&self.data
	}

	/// Unique words accumulated so far, sorted.
	pub fn results(&self) -> &BTreeSet<String> {
		&self.results
	}

	/// Consumes the builder and returns the sorted unique words.
	pub fn into_results(self) -> Vec<String> {
		self.results.into_iter().collect()
	}

	/// Resolves a requested syllable count.
	///
	/// `0` draws from `syllableCountProbabilities` when the language has
	/// one, and otherwise stays `0` so the shape is drawn from `wordTypes`.
	pub fn choose_syllable_count(&mut self, requested: usize) -> usize {
		if requested != 0 {
			return requested;
		}
		match self.data.syllable_counts() {
			Some(counts) => *counts.sample(&mut self.rng),
			None => 0,
		}
	}

	/// Picks the word shape (sequence of syllable-shape symbols).
	///
	/// One and two syllables are forced to `I` and `IF`; any other count
	/// draws from the `wordTypes` distribution.
	pub fn choose_word_shape(&mut self, syllable_count: usize) -> String {
		match syllable_count {
			1 => MONOSYLLABIC_SHAPE.to_owned(),
			2 => DISYLLABIC_SHAPE.to_owned(),
			_ => self.data.word_types().sample(&mut self.rng).clone(),
		}
	}

	/// Picks one concrete syllable shape for a shape symbol, uniformly.
	///
	/// # Errors
	/// `UnknownSyllableShape` if the symbol has no (or an empty) template.
	pub fn compile_syllable(&mut self, symbol: char) -> Result<String, ConlangError> {
		let symbol = symbol.to_string();
		self.data
			.syllable_shapes(&symbol)
			.and_then(|shapes| shapes.choose(&mut self.rng))
			.cloned()
			.ok_or(ConlangError::UnknownSyllableShape(symbol))
	}

	/// Assembles a word as a phoneme sequence, before any phonology pass.
	///
	/// # Parameters
	/// - `syllable_count`: selects the word shape (see `choose_word_shape`)
	/// - `requested_shape`: bypasses shape selection when given
	///
	/// # Notes
	/// - Only the literal template symbol `V` samples from the vowel table;
	///   every other class symbol samples from the consonant table.
	pub fn build_word(&mut self, syllable_count: usize, requested_shape: Option<&str>) -> Result<Vec<String>, ConlangError> {
		let shape = match requested_shape {
			Some(shape) => shape.to_owned(),
			None => self.choose_word_shape(syllable_count),
		};

		let syllables = shape
			.chars()
			.map(|symbol| self.compile_syllable(symbol))
			.collect::<Result<Vec<_>, _>>()?;
		trace!("word shape {shape:?} expanded to {syllables:?}");

		let sampler = PhonemeSampler::new(&self.data);
		let mut word = Vec::new();
		for syllable in &syllables {
			for symbol in syllable.chars() {
				let symbol = symbol.to_string();
				word.push(sampler.sample(&symbol, symbol == VOWEL_CLASS, &mut self.rng)?);
			}
		}
		Ok(word)
	}

	/// Builds one word, post-processes it and records the surface forms.
	///
	/// Returns the forms produced by this call (one, or two when
	/// reduplication fires). Forms already seen are kept in the result set
	/// only once.
	pub fn make_word(&mut self, syllable_count: usize) -> Result<Vec<String>, ConlangError> {
		let word = self.build_word(syllable_count, None)?;
		let forms = Phonology::new(&self.data).process(&word, &mut self.rng)?;
		self.results.extend(forms.iter().cloned());
		Ok(forms)
	}

	/// Generates words until `input.count()` unique forms are accumulated.
	///
	/// # Errors
	/// - Any per-word error from assembly or phonology
	/// - `GenerationStalled` when `max_attempts` words were built without
	///   reaching the count
	///
	/// # Notes
	/// - Without `max_attempts` the loop is unbounded; asking for more
	///   words than the tables can produce never returns.
	pub fn run(&mut self, input: &GenerationInput) -> Result<&BTreeSet<String>, ConlangError> {
		let mut attempts = 0usize;
		while self.results.len() < input.count() {
			if input.max_attempts.is_some_and(|max| attempts >= max) {
				return Err(ConlangError::GenerationStalled {
					attempts,
					produced: self.results.len(),
					requested: input.count(),
				});
			}
			attempts += 1;

			let syllable_count = self.choose_syllable_count(input.word_length);
			self.make_word(syllable_count)?;
		}

		debug!(
			"generated {} unique {:?} words in {attempts} attempts",
			self.results.len(),
			input.kind
		);
		Ok(&self.results)
	}
}
