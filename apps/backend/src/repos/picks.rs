//! Pick repository functions for domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::picks_sea as picks_adapter;
use crate::entities::picks;
use crate::errors::domain::DomainError;

/// Pick domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pick {
    pub id: String,
    pub user_id: String,
    pub competition_id: String,
    pub event_id: String,
    pub selected_team: String,
    pub is_correct: Option<bool>,
    pub points: i32,
}

impl From<picks::Model> for Pick {
    fn from(model: picks::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            competition_id: model.competition_id,
            event_id: model.event_id,
            selected_team: model.selected_team,
            is_correct: model.is_correct,
            points: model.points,
        }
    }
}

pub async fn find_by_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: &str,
) -> Result<Vec<Pick>, DomainError> {
    let picks = picks_adapter::find_by_event(conn, event_id).await?;
    Ok(picks.into_iter().map(Pick::from).collect())
}

/// Mark every pick on the event correct/incorrect against `winner`.
pub async fn grade_for_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: &str,
    winner: &str,
) -> Result<u64, DomainError> {
    Ok(picks_adapter::grade_for_event(conn, event_id, winner).await?)
}

pub async fn sum_correct_points<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    competition_id: &str,
) -> Result<i64, DomainError> {
    Ok(picks_adapter::sum_correct_points(conn, user_id, competition_id).await?)
}
