use clap::Parser;

use esgdb_cli::{default_classifier, init_logging, load_config, open_resolver, open_retriever};
use esgdb_core::types::Response;
use esgdb_query::{FixedIntentClassifier, Orchestrator};

/// Answer an ESG question from the section index.
#[derive(Parser)]
#[command(name = "esgdb-ask", version, about)]
struct Cli {
    /// Free-text question
    #[arg(long = "q")]
    query: String,

    /// Skip classification and use this intent label
    #[arg(long)]
    intent: Option<String>,

    /// Override search.top_k
    #[arg(long)]
    top_k: Option<usize>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (config, settings) = load_config()?;
    let retriever = open_retriever(&settings, config.base_dir())?;
    let resolver = open_resolver(&settings, config.base_dir())?;
    let top_k = cli.top_k.unwrap_or(settings.search.top_k);

    let response: Response = match cli.intent {
        Some(label) => Orchestrator::new(FixedIntentClassifier(label), retriever, resolver, top_k).ask(&cli.query)?,
        None => Orchestrator::new(default_classifier(&settings)?, retriever, resolver, top_k).ask(&cli.query)?,
    };
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
