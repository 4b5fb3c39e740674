use clap::{Parser, Subcommand};

use block_gap_analyzer::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "block-gap-analyzer",
    version,
    about = "Block time interval statistics from a Blockbook explorer"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a height range and report the time between consecutive blocks
    Analyze(RangeArgs),
    /// Print the timestamp of a single block
    BlockTime {
        #[arg(long)]
        height: u64,
    },
}

/// Each flag overrides the matching environment variable.
#[derive(clap::Args, Debug, Default)]
pub struct RangeArgs {
    /// First block height (START_HEIGHT)
    #[arg(long)]
    pub start_height: Option<u64>,
    /// Last block height, inclusive (END_HEIGHT)
    #[arg(long)]
    pub end_height: Option<u64>,
    /// Heights fetched per batch (BATCH_SIZE)
    #[arg(long)]
    pub batch_size: Option<u64>,
    /// Seconds to wait between batches, fractions allowed (PAUSE_SECS)
    #[arg(long)]
    pub pause_secs: Option<f64>,
    /// Intervals are counted as longer or shorter than this (THRESHOLD_SECS)
    #[arg(long)]
    pub threshold_secs: Option<i64>,
}

impl RangeArgs {
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(v) = self.start_height {
            config.start_height = v;
        }
        if let Some(v) = self.end_height {
            config.end_height = v;
        }
        if let Some(v) = self.batch_size {
            config.batch_size = v;
        }
        if let Some(v) = self.pause_secs {
            config.pause_secs = v;
        }
        if let Some(v) = self.threshold_secs {
            config.threshold_secs = v;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_flags_override_config() {
        let cli = Cli::parse_from([
            "block-gap-analyzer",
            "analyze",
            "--start-height",
            "100",
            "--batch-size",
            "3",
            "--pause-secs",
            "0.5",
        ]);
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze subcommand");
        };

        let config = args.apply(Config::default());
        assert_eq!(config.start_height, 100);
        assert_eq!(config.batch_size, 3);
        assert_eq!(config.pause_secs, 0.5);
        assert_eq!(config.end_height, Config::default().end_height);
    }

    #[test]
    fn no_flags_keep_config() {
        let config = RangeArgs::default().apply(Config::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn block_time_requires_height() {
        assert!(Cli::try_parse_from(["block-gap-analyzer", "block-time"]).is_err());
        let cli = Cli::parse_from(["block-gap-analyzer", "block-time", "--height", "42"]);
        assert!(matches!(cli.command, Commands::BlockTime { height: 42 }));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
