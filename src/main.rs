mod cli;

use std::io;

use anyhow::Context;
use clap::Parser;

use block_gap_analyzer::analyzer::BlockGapAnalyzer;
use block_gap_analyzer::config::Config;
use block_gap_analyzer::explorer::{ExplorerClient, DEFAULT_EXPLORER_URL};
use block_gap_analyzer::report;

use crate::cli::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => {
            let config = Config::from_env().context("failed to load configuration")?;
            let analyzer_config = args
                .apply(config)
                .validate()
                .context("invalid analyzer configuration")?;

            let client = ExplorerClient::new(DEFAULT_EXPLORER_URL)?;
            tracing::info!(
                start = analyzer_config.start_height,
                end = analyzer_config.end_height,
                batch_size = analyzer_config.batch_size,
                "analyzing block intervals"
            );
            let analysis = BlockGapAnalyzer::new(client, analyzer_config).run().await;

            report::write_report(&mut io::stdout().lock(), &analysis)
                .context("failed to write report")?;
        }
        Commands::BlockTime { height } => {
            let client = ExplorerClient::new(DEFAULT_EXPLORER_URL)?;
            let time = client
                .get_block_time(height)
                .await
                .with_context(|| format!("failed to fetch block {}", height))?;
            println!("Block {} time: {}", height, time);
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}
