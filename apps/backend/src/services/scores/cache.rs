//! Single-slot score cache with an event-aware expiry.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::aggregator::ScoreAggregator;
use super::record::AggregatedView;
use crate::errors::domain::DomainError;

/// Where the cache learns when the next known game starts.
#[async_trait]
pub trait NextEventLookup: Send + Sync {
    /// Earliest start strictly after `after` among events not yet completed.
    async fn next_event_start(
        &self,
        after: OffsetDateTime,
    ) -> Result<Option<OffsetDateTime>, DomainError>;
}

/// Expiry for a view produced at `now`.
///
/// A known event start inside the ceiling wins, so the feed refreshes when
/// that game goes live. A ceiling past the representable range saturates.
pub fn next_expiry(
    now: OffsetDateTime,
    next_event: Option<OffsetDateTime>,
    max_ttl: Duration,
) -> OffsetDateTime {
    let ceiling = now
        .checked_add(max_ttl)
        .unwrap_or_else(|| PrimitiveDateTime::MAX.assume_utc());
    match next_event {
        Some(start) if start > now && start < ceiling => start,
        _ => ceiling,
    }
}

/// Holds the last aggregated view.
///
/// Readers clone an `Arc` out of the slot, so they always see one complete
/// view. Refreshes are serialized by `refresh_gate`; callers that queue
/// behind a refresh reuse its result instead of fetching again.
pub struct ScoreCache {
    aggregator: ScoreAggregator,
    schedule: Arc<dyn NextEventLookup>,
    max_ttl: Duration,
    slot: RwLock<Arc<AggregatedView>>,
    refresh_gate: Mutex<()>,
}

impl ScoreCache {
    pub fn new(
        aggregator: ScoreAggregator,
        schedule: Arc<dyn NextEventLookup>,
        max_ttl: std::time::Duration,
    ) -> Self {
        Self {
            aggregator,
            schedule,
            max_ttl: Duration::try_from(max_ttl).unwrap_or(Duration::HOUR),
            slot: RwLock::new(Arc::new(AggregatedView::expired())),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Current view without triggering a refresh.
    pub fn current(&self) -> Arc<AggregatedView> {
        self.slot.read().clone()
    }

    pub async fn get_scores(&self) -> Arc<AggregatedView> {
        self.get_scores_at(OffsetDateTime::now_utc()).await
    }

    pub(crate) async fn get_scores_at(&self, now: OffsetDateTime) -> Arc<AggregatedView> {
        // Fast path: no lock beyond the slot read
        let cached = self.current();
        if cached.is_fresh_at(now) {
            return cached;
        }

        let _guard = self.refresh_gate.lock().await;

        // Double-check: another caller may have refreshed while we waited
        let cached = self.current();
        if cached.is_fresh_at(now) {
            debug!("score cache refreshed by concurrent caller");
            return cached;
        }

        let fresh = self.refresh(now, &cached).await;
        *self.slot.write() = fresh.clone();
        fresh
    }

    async fn refresh(&self, now: OffsetDateTime, previous: &AggregatedView) -> Arc<AggregatedView> {
        let (records, next_event) = tokio::join!(
            self.aggregator.aggregate(now),
            self.schedule.next_event_start(now)
        );

        let next_event = next_event.unwrap_or_else(|err| {
            warn!(error = %err, "next event lookup failed; using ttl ceiling");
            None
        });
        let expires_at = next_expiry(now, next_event, self.max_ttl);

        // An empty refresh does not replace a non-empty view; it only extends it.
        if records.is_empty() && !previous.records.is_empty() {
            info!(
                kept = previous.records.len(),
                expires_at = %expires_at,
                "aggregation returned nothing; keeping previous scores"
            );
            return Arc::new(AggregatedView {
                records: previous.records.clone(),
                produced_at: previous.produced_at,
                expires_at,
            });
        }

        info!(records = records.len(), expires_at = %expires_at, "score cache refreshed");
        Arc::new(AggregatedView {
            records,
            produced_at: now,
            expires_at,
        })
    }
}
