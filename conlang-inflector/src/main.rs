//! Inflects a word of a constructed language with its grammar-rule table.
//!
//! ```console
//! $ inflector --ruletab data/keregafa_rules.json --languagedata data/keregafa.json -t v gofera
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::debug;

use conlang_core::model::grammar_rules::GrammarRules;
use conlang_core::model::inflector::Inflector;
use conlang_core::model::language_data::ConlangData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InflectionType {
	/// Decline as a noun
	N,
	/// Conjugate as a verb
	V,
}

#[derive(Parser)]
#[command(name = "inflector", version, about = "Inflect a word using a grammar rule table")]
struct Cli {
	/// Grammar-rule table
	#[arg(short, long, value_name = "FILE", default_value = "./data/keregafa_rules.json")]
	ruletab: PathBuf,

	/// Language-data table
	#[arg(short, long, value_name = "FILE", default_value = "./data/keregafa.json")]
	languagedata: PathBuf,

	/// Word to inflect
	word: String,

	/// Type of inflection to perform
	#[arg(short = 't', long = "type", value_enum, default_value_t = InflectionType::N)]
	inflection_type: InflectionType,

	/// Log rule selection details
	#[arg(short, long)]
	verbose: bool,
}

fn log_level(verbose: bool) -> &'static str {
	if verbose { "debug" } else { "warn" }
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level(cli.verbose))).init();

	let data = ConlangData::new(&cli.languagedata)
		.with_context(|| format!("failed to load language data from {}", cli.languagedata.display()))?;
	let rules = GrammarRules::new(&cli.ruletab)
		.with_context(|| format!("failed to load grammar rules from {}", cli.ruletab.display()))?;
	let inflector = Inflector::new(&data, &rules);

	debug!("inflecting {:?} as {:?}", cli.word, cli.inflection_type);
	let inflected = match cli.inflection_type {
		InflectionType::N => serde_json::to_string_pretty(&inflector.inflect_noun(&cli.word)?)?,
		InflectionType::V => serde_json::to_string_pretty(&inflector.inflect_verb(&cli.word)?)?,
	};
	println!("{inflected}");
	Ok(())
}
