use clap::Parser;

use esgdb_cli::{init_logging, load_config, open_retriever};
use esgdb_core::types::SectionType;

/// Query the section index directly, without intent classification.
#[derive(Parser)]
#[command(name = "esgdb-search", version, about)]
struct Cli {
    query: String,

    /// Allowed section (repeatable); defaults to all sections
    #[arg(long = "section", value_parser = parse_section)]
    sections: Vec<SectionType>,

    /// Restrict to file ids containing this company
    #[arg(long)]
    company: Option<String>,

    #[arg(long, default_value_t = 5)]
    top_k: usize,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_section(s: &str) -> Result<SectionType, String> {
    s.parse().map_err(|e: esgdb_core::Error| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (config, settings) = load_config()?;
    let retriever = open_retriever(&settings, config.base_dir())?;
    let sections = if cli.sections.is_empty() { SectionType::ALL.to_vec() } else { cli.sections };

    println!("🔍 esgdb-search\n==============");
    println!("Query: {}", cli.query);
    println!("Sections: {:?}  Company: {}", sections, cli.company.as_deref().unwrap_or("GLOBAL"));
    let results = retriever.retrieve(&cli.query, &sections, cli.top_k, cli.company.as_deref())?;
    println!("\n🔍 Found {} results", results.len());
    let index = retriever.index();
    for (i, result) in results.iter().enumerate() {
        let fallback = if result.is_fallback { "  (fallback)" } else { "" };
        println!("\n  {}. score={:.4}  file={}  section={}{}", i + 1, result.score, result.file_id, result.section_type, fallback);
        if let Some(pos) = index.documents().iter().position(|d| d.file_id == result.file_id && d.section_type == result.section_type) {
            println!("     🏷  Key phrases: {}", index.key_phrases(pos, 6).join(", "));
        }
        println!("     📝 Context: {}", result.text_snippet);
    }
    println!("\n📊 Section counts:");
    for (section, count) in index.section_counts() { println!("  {}: {} documents", section, count); }
    Ok(())
}
