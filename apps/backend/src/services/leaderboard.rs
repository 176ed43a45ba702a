//! Competition standings read from the denormalized membership scores.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::errors::domain::DomainError;
use crate::repos::memberships;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: String,
    pub competition_id: String,
    pub score: i32,
}

/// Members ordered by score, highest first; equal scores keep user id
/// order and still get distinct ranks.
pub async fn standings<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    competition_id: &str,
) -> Result<Vec<LeaderboardEntry>, DomainError> {
    let rows = memberships::find_by_competition_ranked(conn, competition_id).await?;

    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(i, m)| LeaderboardEntry {
            rank: i + 1,
            user_id: m.user_id,
            competition_id: m.competition_id,
            score: m.score,
        })
        .collect())
}
