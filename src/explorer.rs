use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::models::{BlockHeight, BlockTimestamp};

/// Syscoin Blockbook instance the analyzer talks to.
pub const DEFAULT_EXPLORER_URL: &str = "https://explorer-blockbook.syscoin.org";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can resolve a block height to its timestamp.
///
/// Implementations are fail-soft: a block that cannot be resolved yields
/// `None` and must not abort the caller's run.
#[async_trait]
pub trait BlockTimeSource: Send + Sync {
    async fn fetch_timestamp(&self, height: BlockHeight) -> Option<BlockTimestamp>;
}

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("explorer responded with HTTP {0}")]
    Status(StatusCode),
    #[error("malformed block payload: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct BlockResponse {
    time: BlockTimestamp,
}

#[derive(Clone, Debug)]
pub struct ExplorerClient {
    client: reqwest::Client,
    base_url: String,
}

impl ExplorerClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build reqwest client")?;
        let url = Url::parse(base_url).context("invalid explorer base url")?;
        Ok(Self {
            client,
            base_url: url.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn block_url(&self, height: BlockHeight) -> String {
        format!("{}/api/v2/block/{}", self.base_url, height)
    }

    /// Fetch a block's time, surfacing the reason on failure.
    pub async fn get_block_time(&self, height: BlockHeight) -> Result<BlockTimestamp, FetchError> {
        let response = self.client.get(self.block_url(height)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        parse_block_time(&body)
    }
}

#[async_trait]
impl BlockTimeSource for ExplorerClient {
    async fn fetch_timestamp(&self, height: BlockHeight) -> Option<BlockTimestamp> {
        match self.get_block_time(height).await {
            Ok(time) => Some(time),
            Err(err) => {
                tracing::warn!(height, error = %err, "failed to fetch block time");
                None
            }
        }
    }
}

fn parse_block_time(body: &str) -> Result<BlockTimestamp, FetchError> {
    let block: BlockResponse = serde_json::from_str(body)?;
    Ok(block.time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_url_strips_trailing_slashes() {
        // The explorer tolerates the double slash, but keep urls canonical.
        let client = ExplorerClient::new("https://explorer-blockbook.syscoin.org/").unwrap();
        assert_eq!(
            client.block_url(1_867_020),
            "https://explorer-blockbook.syscoin.org/api/v2/block/1867020"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(ExplorerClient::new("not a url").is_err());
    }

    #[test]
    fn parses_time_and_ignores_other_fields() {
        let body = r#"{"hash":"00ab","height":1867020,"time":1700000000,"txCount":3}"#;
        assert_eq!(parse_block_time(body).unwrap(), 1_700_000_000);
    }

    #[test]
    fn missing_time_is_a_payload_error() {
        let err = parse_block_time(r#"{"height":1867020}"#).unwrap_err();
        assert!(matches!(err, FetchError::Payload(_)));
    }

    #[test]
    fn non_integer_time_is_a_payload_error() {
        let err = parse_block_time(r#"{"time":"yesterday"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Payload(_)));
    }

    #[test]
    fn invalid_json_is_a_payload_error() {
        let err = parse_block_time("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, FetchError::Payload(_)));
    }
}
