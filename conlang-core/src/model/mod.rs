//! Top-level module for the word generation and inflection system.
//!
//! This module provides:
//! - The immutable language model loaded from rule tables (`ConlangData`)
//! - Grapheme tokenization through private-use sigils (`SigilTable`)
//! - Weighted phoneme sampling (`WeightedTable`, `PhonemeSampler`)
//! - Phonological post-processing (`Phonology`)
//! - Word assembly and accumulation (`WordBuilder`, `GenerationInput`)
//! - Nominal and verbal inflection (`GrammarRules`, `Inflector`)

/// Language-data document and its compiled, read-only form.
pub mod language_data;

/// Grammar-rule document (declension, conjugation, moods, converbs).
pub mod grammar_rules;

/// Longest-first grapheme segmentation using private-use sigils.
pub mod tokenizer;

/// Weighted categorical tables and class-restricted phoneme sampling.
pub mod sampler;

/// Vowel harmony, reduplication and regex surface replacement.
pub mod phonology;

/// Word-shape expansion and the unique-word generation loop.
pub mod word_builder;

/// Generation parameters (count, syllable count, word kind).
pub mod generation_input;

/// Class-keyed nominal and verbal inflection.
pub mod inflector;
