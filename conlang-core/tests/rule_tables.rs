use std::fs;
use std::path::PathBuf;

use conlang_core::model::generation_input::GenerationInput;
use conlang_core::model::grammar_rules::GrammarRules;
use conlang_core::model::inflector::Inflector;
use conlang_core::model::language_data::ConlangData;
use conlang_core::model::word_builder::WordBuilder;
use conlang_core::{ConfigError, ConlangError};
use tempfile::TempDir;

const LANGUAGE: &str = r#"{
	"consonantFrequencies": {"t": 0.6, "k": 0.4},
	"vowelFrequencies": {"a": 0.5, "i": 0.5},
	"phonemeClasses": {"V": ["a", "i"], "C": ["t", "k"]},
	"wordTypes": {"I": 1.0},
	"syllableClasses": {"I": ["CV"]}
}"#;

const KEREGAFA: &str = r#"{
	"consonantFrequencies": {"k": 0.2, "r": 0.2, "g": 0.1, "f": 0.1, "t": 0.2, "d": 0.1, "ts": 0.1},
	"vowelFrequencies": {"a": 0.4, "e": 0.3, "o": 0.2, "u": 0.1},
	"phonemeClasses": {
		"V": ["a", "e", "o", "u"],
		"C": ["k", "r", "g", "f", "t", "d", "ts"],
		"P": ["k", "g", "t", "d"]
	},
	"wordTypes": {"IF": 0.5, "IMF": 0.3, "IMMF": 0.2},
	"syllableClasses": {"I": ["CV", "V"], "M": ["CV"], "F": ["CV", "CVr"]},
	"voicingRules": {"k": "g", "g": "k", "t": "d", "d": "t"},
	"harmonyRules": {
		"vowelClasses": {"front": ["e"], "back": ["a", "o", "u"]},
		"counterparts": {"front": {"a": "e", "o": "e", "u": "e"}, "back": {"e": "a"}}
	},
	"replacementRules": {"cleanup": {"rr": "r"}},
	"tuning": {
		"geminateConsonantChance": 0.1,
		"geminatableConsonants": ["k", "t"],
		"reduplicateChance": 0.2,
		"reduplicateWithInitialVoicing": true
	}
}"#;

const KEREGAFA_RULES: &str = r#"{
	"declensionTable": {"nominative": "@", "accusative": "ka", "dative": "er"},
	"declensionInflectionRules": {
		"V": {"C": "doNothing", "V": "deleteLastChar"},
		"C": {"C": "appendLastVowel", "V": "doNothing"}
	},
	"conjugationTable": {"ra": {"present": "ra", "past": "rda"}},
	"verbPrefixTable": {"imperative": {"prefix": "ta", "elide": "r"}},
	"converbTable": {"temporal": "dative"},
	"tunings": {"applyConverbToVerbForm": "past"}
}"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
	let path = dir.path().join(name);
	fs::write(&path, contents).unwrap();
	path
}

#[test]
fn monosyllables_from_file() {
	let dir = TempDir::new().unwrap();
	let data = ConlangData::new(write(&dir, "tiny.json", LANGUAGE)).unwrap();
	let mut builder = WordBuilder::with_seed(data, 2024);
	for _ in 0..100 {
		let word = builder.build_word(1, None).unwrap();
		assert_eq!(word.len(), 2);
		assert!(["t", "k"].contains(&word[0].as_str()));
		assert!(["a", "i"].contains(&word[1].as_str()));
	}
}

#[test]
fn generated_words_round_trip_through_tokenizer() {
	let dir = TempDir::new().unwrap();
	let data = ConlangData::new(write(&dir, "keregafa.json", KEREGAFA)).unwrap();
	let mut builder = WordBuilder::with_seed(data, 7);
	let words: Vec<String> = builder.run(&GenerationInput::new(40).unwrap()).unwrap().iter().cloned().collect();
	assert!(words.len() >= 40);
	assert!(words.windows(2).all(|pair| pair[0] < pair[1]));

	let data = builder.data();
	for word in &words {
		let tokens = data.tokenize(word).unwrap();
		assert_eq!(data.detokenize(&tokens), *word);
		assert!(!word.contains("rr"), "{word}");
	}
}

#[test]
fn harmonized_words_share_one_vowel_class() {
	let dir = TempDir::new().unwrap();
	let data = ConlangData::new(write(&dir, "keregafa.json", KEREGAFA)).unwrap();
	let mut builder = WordBuilder::with_seed(data, 31);
	for _ in 0..100 {
		for form in builder.make_word(3).unwrap() {
			let has_front = form.contains('e');
			let has_back = form.contains(['a', 'o', 'u']);
			assert!(!(has_front && has_back), "{form}");
		}
	}
}

#[test]
fn inflection_from_files() {
	let dir = TempDir::new().unwrap();
	let data = ConlangData::new(write(&dir, "keregafa.json", KEREGAFA)).unwrap();
	let rules = GrammarRules::new(write(&dir, "keregafa_rules.json", KEREGAFA_RULES)).unwrap();
	let inflector = Inflector::new(&data, &rules);

	let noun = inflector.inflect_noun("kato").unwrap();
	assert_eq!(noun["nominative"], "kato");
	assert_eq!(noun["accusative"], "katoka");
	assert_eq!(noun["dative"], "kater");

	let verb = inflector.inflect_verb("gofera").unwrap();
	assert_eq!(verb.tenses["past"], "goferda");
	assert_eq!(verb.moods["imperative"], "tagofera");
	assert_eq!(verb.converbs["temporal"], "goferder");

	let json = serde_json::to_value(&verb).unwrap();
	assert_eq!(json["moods"]["imperative"], "tagofera");
}

#[test]
fn missing_file_is_a_config_error() {
	let dir = TempDir::new().unwrap();
	let err = ConlangData::new(dir.path().join("absent.json")).unwrap_err();
	assert!(matches!(err, ConfigError::Io { .. }));
	assert!(err.to_string().contains("absent.json"));
}

#[test]
fn malformed_file_names_the_path() {
	let dir = TempDir::new().unwrap();
	let path = write(&dir, "broken_rules.json", r#"{"declensionTable": {}"#);
	let err = GrammarRules::new(path).unwrap_err();
	assert!(matches!(err, ConfigError::Parse { .. }));
	assert!(err.to_string().contains("broken_rules.json"));
}

#[test]
fn unknown_character_propagates_from_inflection() {
	let dir = TempDir::new().unwrap();
	let data = ConlangData::new(write(&dir, "keregafa.json", KEREGAFA)).unwrap();
	let rules = GrammarRules::new(write(&dir, "keregafa_rules.json", KEREGAFA_RULES)).unwrap();
	assert!(matches!(
		Inflector::new(&data, &rules).inflect_noun("kazo"),
		Err(ConlangError::UnknownCharacter { character: 'z', .. })
	));
}
