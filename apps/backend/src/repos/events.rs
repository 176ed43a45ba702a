//! Event repository functions for domain layer.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection};
use time::OffsetDateTime;

use crate::adapters::events_sea as events_adapter;
use crate::entities::events::{self, EventStatus};
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::services::scores::NextEventLookup;

/// Event domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub status: EventStatus,
    /// Allowed winner labels; empty means any label is accepted
    pub options: Vec<String>,
    pub winner: Option<String>,
    pub score: Option<String>,
    pub starts_at: OffsetDateTime,
}

impl Event {
    pub fn accepts_winner(&self, label: &str) -> bool {
        self.options.is_empty() || self.options.iter().any(|o| o == label)
    }
}

impl TryFrom<events::Model> for Event {
    type Error = DomainError;

    fn try_from(model: events::Model) -> Result<Self, Self::Error> {
        let options: Vec<String> = serde_json::from_str(&model.options).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("event {} has malformed options: {e}", model.id),
            )
        })?;

        Ok(Self {
            id: model.id,
            name: model.name,
            status: model.status,
            options,
            winner: model.winner,
            score: model.score,
            starts_at: model.starts_at,
        })
    }
}

pub async fn find_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: &str,
) -> Result<Option<Event>, DomainError> {
    events_adapter::find_by_id(conn, event_id)
        .await?
        .map(Event::try_from)
        .transpose()
}

/// Load an event under a row lock, failing with `NotFound` when absent.
pub async fn find_event_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: &str,
) -> Result<Event, DomainError> {
    let model = events_adapter::find_by_id_for_update(conn, event_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Event, format!("Event {event_id} not found"))
        })?;
    Event::try_from(model)
}

pub async fn mark_completed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: &str,
    winner: &str,
    score: Option<&str>,
) -> Result<(), DomainError> {
    let dto = events_adapter::EventCompletion {
        id: event_id.to_string(),
        winner: winner.to_string(),
        score: score.map(str::to_string),
    };
    let updated = events_adapter::mark_completed(conn, dto).await?;
    if updated == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::Event,
            format!("Event {event_id} not found"),
        ));
    }
    Ok(())
}

pub async fn find_earliest_upcoming_after<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    after: OffsetDateTime,
) -> Result<Option<OffsetDateTime>, DomainError> {
    Ok(events_adapter::find_earliest_upcoming_after(conn, after).await?)
}

/// Next-event lookup backed by the events table.
///
/// Without a database there is never a known next event, so the score
/// cache falls back to its TTL ceiling.
#[derive(Clone)]
pub struct DbEventSchedule {
    db: Option<DatabaseConnection>,
}

impl DbEventSchedule {
    pub fn new(db: Option<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NextEventLookup for DbEventSchedule {
    async fn next_event_start(
        &self,
        after: OffsetDateTime,
    ) -> Result<Option<OffsetDateTime>, DomainError> {
        match &self.db {
            Some(conn) => find_earliest_upcoming_after(conn, after).await,
            None => Ok(None),
        }
    }
}
