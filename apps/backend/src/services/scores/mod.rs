//! Aggregated score feed: upstream adapters, merge, and the TTL cache.

pub mod aggregator;
pub mod cache;
pub mod espn;
pub mod odds_api;
pub mod provider;
pub mod record;

use std::sync::Arc;

pub use aggregator::ScoreAggregator;
pub use cache::{NextEventLookup, ScoreCache};
pub use provider::{FetchWindow, ScoreProvider, UpstreamUnavailable};
pub use record::{AggregatedView, ScoreRecord, TeamScore};

use crate::config::scores::ScoresConfig;
use crate::error::AppError;

/// One adapter per configured sport for each selected upstream family.
pub fn build_providers(config: &ScoresConfig) -> Result<Vec<Arc<dyn ScoreProvider>>, AppError> {
    let http = reqwest::Client::builder()
        .timeout(config.fetch_timeout)
        .user_agent(concat!("pickem/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::config(format!("failed to build http client: {e}")))?;

    let kind = config.provider;
    let mut providers: Vec<Arc<dyn ScoreProvider>> = Vec::new();
    for sport in &config.sports {
        if kind.uses_odds_api() {
            providers.push(Arc::new(odds_api::OddsApiProvider::new(
                http.clone(),
                sport.clone(),
                config.odds_api_key.clone(),
            )));
        }
        if kind.uses_espn() {
            providers.push(Arc::new(espn::EspnScoreboardProvider::new(
                http.clone(),
                sport.clone(),
            )));
        }
    }

    Ok(providers)
}

/// Wire providers, aggregator and cache from configuration.
pub fn build_cache(
    config: &ScoresConfig,
    providers: Vec<Arc<dyn ScoreProvider>>,
    schedule: Arc<dyn NextEventLookup>,
) -> ScoreCache {
    let aggregator = ScoreAggregator::new(
        providers,
        config.lookback_days,
        config.lookahead_days,
        config.fetch_timeout,
    );
    ScoreCache::new(aggregator, schedule, config.max_ttl)
}
