//! The seam between the aggregator and individual upstream feeds.

use async_trait::async_trait;
use thiserror::Error;
use time::{Date, Duration};

use super::record::ScoreRecord;

/// Why one upstream fetch produced nothing usable.
///
/// Never leaves the aggregator: it is logged and folded into an empty
/// contribution there.
#[derive(Debug, Error)]
pub enum UpstreamUnavailable {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("malformed payload: {0}")]
    Payload(String),
    #[error("timed out")]
    Timeout,
    #[error("provider not configured: {0}")]
    NotConfigured(&'static str),
}

impl From<reqwest::Error> for UpstreamUnavailable {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Payload(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for UpstreamUnavailable {
    fn from(err: serde_json::Error) -> Self {
        Self::Payload(err.to_string())
    }
}

/// A calendar day (UTC) to ask an upstream about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchWindow {
    pub date: Date,
}

impl FetchWindow {
    pub fn new(date: Date) -> Self {
        Self { date }
    }

    /// `today - lookback ..= today + lookahead`, oldest first.
    pub fn around(today: Date, lookback_days: u32, lookahead_days: u32) -> Vec<Self> {
        let start = today
            .checked_sub(Duration::days(i64::from(lookback_days)))
            .unwrap_or(Date::MIN);
        (0..=i64::from(lookback_days) + i64::from(lookahead_days))
            .filter_map(|offset| start.checked_add(Duration::days(offset)))
            .map(Self::new)
            .collect()
    }
}

/// One upstream feed for one sport.
#[async_trait]
pub trait ScoreProvider: Send + Sync {
    /// Stable key for logs, e.g. `espn:basketball/nba`.
    fn source_key(&self) -> &str;

    /// Windows this feed actually needs fetched out of `windows`.
    ///
    /// Feeds whose single query already spans several days override this to
    /// avoid sending the same request more than once per refresh.
    fn plan_windows(&self, windows: &[FetchWindow]) -> Vec<FetchWindow> {
        windows.to_vec()
    }

    async fn fetch_window(&self, window: FetchWindow)
        -> Result<Vec<ScoreRecord>, UpstreamUnavailable>;
}
