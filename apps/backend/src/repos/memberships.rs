//! Competition membership repository functions for domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::competition_users_sea as memberships_adapter;
use crate::entities::competition_users;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// A user's standing in a competition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub user_id: String,
    pub competition_id: String,
    pub score: i32,
}

impl From<competition_users::Model> for Membership {
    fn from(model: competition_users::Model) -> Self {
        Self {
            user_id: model.user_id,
            competition_id: model.competition_id,
            score: model.score,
        }
    }
}

pub async fn find_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    competition_id: &str,
) -> Result<Option<Membership>, DomainError> {
    let m = memberships_adapter::find(conn, user_id, competition_id).await?;
    Ok(m.map(Membership::from))
}

/// Overwrite a membership's score.
///
/// A missing row means a pick references a user outside the competition,
/// which is reported as data corruption.
pub async fn set_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    competition_id: &str,
    score: i64,
) -> Result<(), DomainError> {
    let score = i32::try_from(score).map_err(|_| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("score {score} out of range for {user_id}/{competition_id}"),
        )
    })?;

    let updated = memberships_adapter::set_score(conn, user_id, competition_id, score).await?;
    if updated == 0 {
        return Err(DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("no membership for user {user_id} in competition {competition_id}"),
        ));
    }
    Ok(())
}

pub async fn find_by_competition_ranked<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    competition_id: &str,
) -> Result<Vec<Membership>, DomainError> {
    let rows = memberships_adapter::find_by_competition_ranked(conn, competition_id).await?;
    Ok(rows.into_iter().map(Membership::from).collect())
}
