use clap::Parser;
use std::path::PathBuf;

use esgdb_cli::{build_index, init_logging, load_config};

/// Build the section index from summary records, replacing any previous one.
#[derive(Parser)]
#[command(name = "esgdb-indexer", version, about)]
struct Cli {
    /// Directory of `*.json` summary records (defaults to data.summaries_dir)
    summaries_dir: Option<PathBuf>,

    /// Output artifact (defaults to data.index_path)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (config, settings) = load_config()?;
    let summaries_dir = cli.summaries_dir.unwrap_or_else(|| settings.summaries_dir(config.base_dir()));
    let index_path = cli.out.unwrap_or_else(|| settings.index_path(config.base_dir()));

    println!("ESG Section Indexer\n===================");
    println!("Summaries: {}", summaries_dir.display());
    let index = build_index(&summaries_dir, &index_path, true)?;

    println!("\n✅ Indexed {} section-level documents ({} terms) into {}", index.len(), index.vocabulary_len(), index_path.display());
    for (section, count) in index.section_counts() { println!("  {}: {} documents", section, count); }
    println!("\n💡 To ask a question, use: cargo run --bin esgdb-ask -- --q '<question>'");
    Ok(())
}
