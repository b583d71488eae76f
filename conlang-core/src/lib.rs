//! Rule-table driven word generation and inflection for constructed languages.
//!
//! This crate provides the complete phonological pipeline including:
//! - Grapheme tokenization aware of multi-character phonemes
//! - Frequency-weighted phoneme sampling restricted to phoneme classes
//! - Syllable and word assembly from templated word shapes
//! - Phonological post-processing (harmony, reduplication, surface rewrites)
//! - Nominal and verbal inflection driven by class-keyed rule tables
//!
//! Rule tables are loaded once into immutable models (`ConlangData`,
//! `GrammarRules`) and borrowed by every component afterwards.

/// Error types for table loading and per-word rule application.
pub mod error;

/// Language model, generation and inflection components.
pub mod model;

/// I/O utilities (document loading).
///
/// Not exposed
pub(crate) mod io;

pub use error::{ConfigError, ConlangError};
