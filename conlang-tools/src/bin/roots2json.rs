//! Converts a `root<TAB>meaning` dictionary into a JSON object.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use conlang_tools::{read_path, read_roots};

#[derive(Parser)]
#[command(name = "roots2json", version, about = "Convert a TSV root dictionary to JSON")]
struct Cli {
	/// Tab-separated root dictionary
	#[arg(value_name = "FILE", default_value = "keregafa_roots.tsv")]
	input: PathBuf,

	/// Pretty-print the output
	#[arg(short, long)]
	pretty: bool,
}

fn main() -> anyhow::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
	let cli = Cli::parse();

	let roots = read_path(&cli.input, read_roots)
		.with_context(|| format!("failed to read {}", cli.input.display()))?;
	let json = if cli.pretty { serde_json::to_string_pretty(&roots)? } else { serde_json::to_string(&roots)? };
	println!("{json}");
	Ok(())
}
