use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use judge_scraper::config::FetchConfig;
use judge_scraper::fetch::HttpFetcher;
use judge_scraper::output::config::{OutputConfig, OutputFormat};
use judge_scraper::output::types::Meta;
use judge_scraper::output::Emitter;
use judge_scraper::telemetry;
use judge_scraper::Registry;

#[derive(Parser)]
#[command(name = "judge-scraper", about = "Extract problem data from online judge pages")]
struct Cli {
    /// Output format: text, json or html (default from OJS_OUTPUT_FORMAT)
    #[arg(global = true, short, long)]
    format: Option<OutputFormat>,
    /// Pretty-print JSON output
    #[arg(global = true, long, default_value_t = false)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a problem page and print the extracted problem
    Problem { url: String },
    /// Show which judge handles a URL and the identifiers it encodes
    Params { url: String },
    /// List supported judges
    Judges,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    // initialize logging/tracing (stderr). Respect RUST_LOG and OJS_LOG_FORMAT
    telemetry::config::init_tracing();

    let out = OutputConfig::from_env().with_overrides(cli.format, cli.pretty);
    let emitter = Emitter::new(out);
    let fetch_cfg = FetchConfig::from_env();
    let registry = Registry::with_defaults(Arc::new(HttpFetcher::new(&fetch_cfg)?));

    match cli.command {
        Commands::Problem { url } => {
            let t0 = Instant::now();
            let problem = registry.get_problem(&url).await?;
            let judge = registry.params(&url).ok().map(|r| r.judge.to_string());
            let meta = Meta { duration_ms: Some(t0.elapsed().as_millis()), judge };
            emitter.problem(&problem, meta)?;
        }
        Commands::Params { url } => {
            let resolved = registry.params(&url)?;
            emitter.params(&resolved)?;
        }
        Commands::Judges => emitter.judges(&registry.judges())?,
    }

    Ok(())
}
