//! Settlement: apply a declared outcome to an event, its picks, and the
//! memberships those picks count towards.

use std::collections::BTreeSet;

use sea_orm::DatabaseTransaction;
use tracing::{debug, info};

use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::{events, memberships, picks};

/// A declared result for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub event_id: String,
    pub winner: String,
    pub score: Option<String>,
}

impl Outcome {
    pub fn new(event_id: impl Into<String>, winner: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            winner: winner.into(),
            score: None,
        }
    }

    pub fn with_score(mut self, score: impl Into<String>) -> Self {
        self.score = Some(score.into());
        self
    }
}

/// What a settlement touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementReport {
    pub event_id: String,
    pub winner: String,
    pub picks_graded: u64,
    pub memberships_updated: usize,
}

/// Settlement domain service.
pub struct SettlementService;

impl SettlementService {
    pub fn new() -> Self {
        Self
    }

    /// Settle `outcome.event_id` inside the caller's transaction.
    ///
    /// Membership scores are recomputed from every correct pick the member
    /// holds in the competition, so re-settling with a corrected winner
    /// converges instead of accumulating. Any error leaves the transaction
    /// for the caller to roll back.
    pub async fn settle(
        &self,
        txn: &DatabaseTransaction,
        outcome: &Outcome,
    ) -> Result<SettlementReport, DomainError> {
        if outcome.winner.trim().is_empty() {
            return Err(DomainError::validation(
                ValidationKind::Other("winner".into()),
                "Winner is required",
            ));
        }

        // Row lock: concurrent settlements of one event queue here.
        let event = events::find_event_for_update(txn, &outcome.event_id).await?;
        if !event.accepts_winner(&outcome.winner) {
            return Err(DomainError::invalid_outcome(format!(
                "Winner '{}' is not one of the options for event {}",
                outcome.winner, event.id
            )));
        }

        let score = outcome.score.as_deref().filter(|s| !s.is_empty());
        events::mark_completed(txn, &event.id, &outcome.winner, score).await?;

        let event_picks = picks::find_by_event(txn, &event.id).await?;
        let picks_graded = picks::grade_for_event(txn, &event.id, &outcome.winner).await?;

        let affected: BTreeSet<(String, String)> = event_picks
            .into_iter()
            .map(|p| (p.user_id, p.competition_id))
            .collect();

        for (user_id, competition_id) in &affected {
            let total = picks::sum_correct_points(txn, user_id, competition_id).await?;
            memberships::set_score(txn, user_id, competition_id, total).await?;
            debug!(user_id = %user_id, competition_id = %competition_id, score = total, "membership recomputed");
        }

        info!(
            event_id = %event.id,
            winner = %outcome.winner,
            picks_graded,
            memberships_updated = affected.len(),
            "event settled"
        );

        Ok(SettlementReport {
            event_id: event.id,
            winner: outcome.winner.clone(),
            picks_graded,
            memberships_updated: affected.len(),
        })
    }
}

impl Default for SettlementService {
    fn default() -> Self {
        Self::new()
    }
}
