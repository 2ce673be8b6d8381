mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "valuecalc")]
#[command(about = "Fetch stock fundamentals and estimate intrinsic value")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Provider base URL (overrides VALUECALC_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides VALUECALC_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch metrics and run valuation methods for a ticker
    Value(commands::value::ValueArgs),
    /// Show the financial record and key metrics for a ticker
    Metrics(commands::metrics::MetricsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("valuecalc=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    let provider = commands::ProviderArgs {
        base_url: cli.base_url.clone(),
        timeout_secs: cli.timeout_secs,
    };

    match &cli.command {
        Commands::Value(args) => commands::value::run(args, &provider, &format).await?,
        Commands::Metrics(args) => commands::metrics::run(args, &provider, &format).await?,
    }

    Ok(())
}
