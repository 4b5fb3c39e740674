use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::models::BlockHeight;

pub const DEFAULT_START_HEIGHT: BlockHeight = 1_867_020;
pub const DEFAULT_END_HEIGHT: BlockHeight = 1_867_075;
pub const DEFAULT_BATCH_SIZE: u64 = 10;
pub const DEFAULT_PAUSE_SECS: f64 = 0.2;
/// 2.5 minutes, the target block interval.
pub const DEFAULT_THRESHOLD_SECS: i64 = 150;

/// Raw run parameters as read from the environment and CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub start_height: BlockHeight,
    pub end_height: BlockHeight,
    pub batch_size: u64,
    pub pause_secs: f64,
    pub threshold_secs: i64,
}

/// Validated parameters handed to the analyzer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    pub start_height: BlockHeight,
    pub end_height: BlockHeight,
    pub batch_size: u64,
    pub pause: Duration,
    pub threshold_secs: i64,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}")]
    InvalidValue { var: &'static str, value: String },
    #[error("end height {end} is below start height {start}")]
    EmptyRange {
        start: BlockHeight,
        end: BlockHeight,
    },
    #[error("batch size must be at least 1")]
    ZeroBatchSize,
    #[error("pause must be a finite, non-negative number of seconds, got {0}")]
    InvalidPause(f64),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_height: DEFAULT_START_HEIGHT,
            end_height: DEFAULT_END_HEIGHT,
            batch_size: DEFAULT_BATCH_SIZE,
            pause_secs: DEFAULT_PAUSE_SECS,
            threshold_secs: DEFAULT_THRESHOLD_SECS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            start_height: parse_var(&lookup, "START_HEIGHT", DEFAULT_START_HEIGHT)?,
            end_height: parse_var(&lookup, "END_HEIGHT", DEFAULT_END_HEIGHT)?,
            batch_size: parse_var(&lookup, "BATCH_SIZE", DEFAULT_BATCH_SIZE)?,
            pause_secs: parse_var(&lookup, "PAUSE_SECS", DEFAULT_PAUSE_SECS)?,
            threshold_secs: parse_var(&lookup, "THRESHOLD_SECS", DEFAULT_THRESHOLD_SECS)?,
        })
    }

    pub fn validate(&self) -> Result<AnalyzerConfig, ConfigError> {
        if self.end_height < self.start_height {
            return Err(ConfigError::EmptyRange {
                start: self.start_height,
                end: self.end_height,
            });
        }
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if !self.pause_secs.is_finite() || self.pause_secs < 0.0 {
            return Err(ConfigError::InvalidPause(self.pause_secs));
        }
        let pause = Duration::try_from_secs_f64(self.pause_secs)
            .map_err(|_| ConfigError::InvalidPause(self.pause_secs))?;

        Ok(AnalyzerConfig {
            start_height: self.start_height,
            end_height: self.end_height,
            batch_size: self.batch_size,
            pause,
            threshold_secs: self.threshold_secs,
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value: raw }),
        None => Ok(default),
    }
}
