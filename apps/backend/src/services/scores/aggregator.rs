//! Fan-out over every (provider, window) pair and merge the results.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use time::OffsetDateTime;
use tracing::{debug, warn};

use super::provider::{FetchWindow, ScoreProvider, UpstreamUnavailable};
use super::record::ScoreRecord;

pub struct ScoreAggregator {
    providers: Vec<Arc<dyn ScoreProvider>>,
    lookback_days: u32,
    lookahead_days: u32,
    fetch_timeout: Duration,
}

impl ScoreAggregator {
    pub fn new(
        providers: Vec<Arc<dyn ScoreProvider>>,
        lookback_days: u32,
        lookahead_days: u32,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            providers,
            lookback_days,
            lookahead_days,
            fetch_timeout,
        }
    }

    /// Fetch everything concurrently and return the merged, ordered list.
    ///
    /// Never fails: an upstream that errors or exceeds the fetch timeout
    /// contributes nothing.
    pub async fn aggregate(&self, now: OffsetDateTime) -> Vec<ScoreRecord> {
        let windows = FetchWindow::around(now.date(), self.lookback_days, self.lookahead_days);

        let fetches = self.providers.iter().flat_map(|provider| {
            provider
                .plan_windows(&windows)
                .into_iter()
                .map(move |window| self.fetch_one(provider.as_ref(), window))
        });

        // join_all yields in submission order, which keeps dedup deterministic.
        let batches = join_all(fetches).await;
        let fetched: usize = batches.iter().map(Vec::len).sum();
        let merged = merge(batches);

        debug!(
            providers = self.providers.len(),
            windows = windows.len(),
            fetched,
            merged = merged.len(),
            "aggregation finished"
        );
        merged
    }

    async fn fetch_one(&self, provider: &dyn ScoreProvider, window: FetchWindow) -> Vec<ScoreRecord> {
        let result = match tokio::time::timeout(self.fetch_timeout, provider.fetch_window(window)).await {
            Ok(inner) => inner,
            Err(_) => Err(UpstreamUnavailable::Timeout),
        };

        match result {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    source = provider.source_key(),
                    date = %window.date,
                    error = %err,
                    "upstream unavailable; contributing no records"
                );
                Vec::new()
            }
        }
    }
}

/// Deduplicate by canonical id and order for display.
///
/// Later batches overwrite earlier ones for the same id. Incomplete games
/// come first, soonest start first; then completed games that have a
/// scoreline, most recent first. Completed games without a scoreline are
/// dropped. Equal start times fall back to id order.
pub fn merge(batches: Vec<Vec<ScoreRecord>>) -> Vec<ScoreRecord> {
    let mut by_id: HashMap<String, ScoreRecord> = HashMap::new();
    for record in batches.into_iter().flatten() {
        by_id.insert(record.id.clone(), record);
    }

    let (mut incomplete, completed): (Vec<_>, Vec<_>) =
        by_id.into_values().partition(|r| !r.completed);
    let mut completed: Vec<_> = completed
        .into_iter()
        .filter(|r| r.scoreline.is_some())
        .collect();

    incomplete.sort_by(|a, b| a.start_time.cmp(&b.start_time).then_with(|| a.id.cmp(&b.id)));
    completed.sort_by(|a, b| b.start_time.cmp(&a.start_time).then_with(|| a.id.cmp(&b.id)));

    incomplete.extend(completed);
    incomplete
}
