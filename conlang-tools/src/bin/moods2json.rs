//! Converts a `mood<TAB>prefix<TAB>elide` table into a `verbPrefixTable`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use conlang_tools::{read_moods, read_path};

#[derive(Parser)]
#[command(name = "moods2json", version, about = "Convert a TSV mood/prefix table to JSON")]
struct Cli {
	/// Tab-separated mood table
	#[arg(value_name = "FILE", default_value = "keregafa_moods.tsv")]
	input: PathBuf,

	/// Pretty-print the output
	#[arg(short, long)]
	pretty: bool,
}

fn main() -> anyhow::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
	let cli = Cli::parse();

	let moods = read_path(&cli.input, read_moods)
		.with_context(|| format!("failed to read {}", cli.input.display()))?;
	let json = if cli.pretty { serde_json::to_string_pretty(&moods)? } else { serde_json::to_string(&moods)? };
	println!("{json}");
	Ok(())
}
