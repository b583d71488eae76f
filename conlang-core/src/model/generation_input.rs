use crate::error::ConlangError;

/// Semantic tag of the words being generated.
///
/// Carried through generation and logged; it does not change how words
/// are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordKind {
	#[default]
	Noun,
	Name,
	Verb,
}

/// Input parameters for a generation run.
///
/// # Responsibilities
/// - Track how many unique words are wanted (`count`, always >= 1)
/// - Track the requested syllable count (`word_length`, 0 = sample it)
/// - Track the optional attempt cap for the unique-word loop
pub struct GenerationInput {
	/// Number of unique words to accumulate.
	count: usize,

	/// Syllables per word; `1` forces shape `I`, `2` forces `IF`,
	/// `0` draws from the syllable-count distribution.
	pub word_length: usize,

	/// Word category, informational only.
	pub kind: WordKind,

	/// Maximum number of words to build before giving up.
	/// `None` loops until `count` is reached.
	pub max_attempts: Option<usize>,
}

impl GenerationInput {
	/// Creates an input asking for `count` words of sampled length.
	///
	/// # Errors
	/// Returns an error if `count` is zero.
	pub fn new(count: usize) -> Result<Self, ConlangError> {
		let mut input = Self {
			count: 1,
			word_length: 0,
			kind: WordKind::default(),
			max_attempts: None,
		};
		input.set_count(count)?;
		Ok(input)
	}

	/// Returns the requested number of unique words.
	pub fn count(&self) -> usize {
		self.count
	}

	/// Sets the number of unique words (>= 1).
	pub fn set_count(&mut self, count: usize) -> Result<(), ConlangError> {
		if count == 0 {
			return Err(ConlangError::InvalidCount(count));
		}
		self.count = count;
		Ok(())
	}
}
