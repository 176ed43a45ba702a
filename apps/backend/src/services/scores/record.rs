//! Canonical score records shared by every upstream adapter.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One side of a scoreline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScore {
    pub name: String,
    /// Upstreams report scores as text ("21", "2-1 (pen)")
    pub score: String,
}

impl TeamScore {
    pub fn new(name: impl Into<String>, score: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: score.into(),
        }
    }
}

/// A game as seen by one upstream during one fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    /// `"{provider}:{sport_key}:{native_id}"`, see [`canonical_id`]
    pub id: String,
    pub sport: String,
    pub source_key: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    pub completed: bool,
    /// Home first, then away
    #[serde(rename = "scores")]
    pub scoreline: Option<[TeamScore; 2]>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_update: Option<OffsetDateTime>,
}

/// Build the id used for deduplication.
///
/// Depends only on the provider, the sport key and the upstream's own id, so
/// the same game fetched through different date windows collapses to one id.
pub fn canonical_id(provider: &str, sport_key: &str, native_id: &str) -> String {
    format!("{provider}:{sport_key}:{native_id}")
}

/// The merged, ordered result of one aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedView {
    pub records: Vec<ScoreRecord>,
    pub produced_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}

impl AggregatedView {
    /// Already expired; the first read always refreshes.
    pub fn expired() -> Self {
        Self {
            records: Vec::new(),
            produced_at: OffsetDateTime::UNIX_EPOCH,
            expires_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    pub fn is_fresh_at(&self, now: OffsetDateTime) -> bool {
        now < self.expires_at
    }
}
