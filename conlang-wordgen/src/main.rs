//! Word generator for rule-table driven constructed languages.
//!
//! ```console
//! $ wordgen --ruletab data/keregafa.json --count 20 --word-length 2 --format json
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;

use conlang_core::model::generation_input::{GenerationInput, WordKind};
use conlang_core::model::language_data::ConlangData;
use conlang_core::model::word_builder::WordBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum WordType {
	Noun,
	Name,
	Verb,
}

impl From<WordType> for WordKind {
	fn from(word_type: WordType) -> Self {
		match word_type {
			WordType::Noun => WordKind::Noun,
			WordType::Name => WordKind::Name,
			WordType::Verb => WordKind::Verb,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
	Text,
	Json,
}

#[derive(Parser)]
#[command(name = "wordgen", version, about = "Generate words from a language rule table")]
struct Cli {
	/// Language-data rule table
	#[arg(short, long, value_name = "FILE", default_value = "./data/keregafa.json")]
	ruletab: PathBuf,

	/// Number of unique words to generate
	#[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
	count: u64,

	/// Number of syllables per word (0 = sample from the language)
	#[arg(short = 'l', long, alias = "wordLength", default_value_t = 0)]
	word_length: usize,

	/// Type of word to generate
	#[arg(short = 't', long = "type", value_enum, default_value_t = WordType::Noun)]
	word_type: WordType,

	/// Output format
	#[arg(short, long, value_enum, default_value_t = Format::Text)]
	format: Format,

	/// Seed for reproducible output
	#[arg(short, long)]
	seed: Option<u64>,

	/// Give up after building this many words
	#[arg(long, value_name = "N")]
	max_attempts: Option<usize>,

	/// Log generation details
	#[arg(short, long)]
	verbose: bool,
}

trait OutputWriter {
	fn write_words(&mut self, words: &[String]) -> anyhow::Result<()>;
}

struct TextWriter;

impl OutputWriter for TextWriter {
	fn write_words(&mut self, words: &[String]) -> anyhow::Result<()> {
		for word in words {
			println!("{word}");
		}
		Ok(())
	}
}

struct JsonWriter;

impl OutputWriter for JsonWriter {
	fn write_words(&mut self, words: &[String]) -> anyhow::Result<()> {
		println!("{}", serde_json::to_string(words)?);
		Ok(())
	}
}

fn log_level(verbose: bool) -> &'static str {
	if verbose { "debug" } else { "warn" }
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level(cli.verbose))).init();

	let data = ConlangData::new(&cli.ruletab)
		.with_context(|| format!("failed to load language data from {}", cli.ruletab.display()))?;

	let mut builder = match cli.seed {
		Some(seed) => WordBuilder::with_seed(data, seed),
		None => WordBuilder::new(data),
	};

	let count = usize::try_from(cli.count).context("word count does not fit in memory")?;
	let mut input = GenerationInput::new(count)?;
	input.word_length = cli.word_length;
	input.kind = cli.word_type.into();
	input.max_attempts = cli.max_attempts;

	info!("generating {} {:?} words", input.count(), input.kind);
	builder.run(&input)?;

	let words = builder.into_results();
	let mut writer: Box<dyn OutputWriter> = match cli.format {
		Format::Text => Box::new(TextWriter),
		Format::Json => Box::new(JsonWriter),
	};
	writer.write_words(&words)
}
