//! SeaORM adapter for picks.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::picks;

/// DTO for creating a pick.
#[derive(Debug, Clone)]
pub struct PickCreate {
    pub id: String,
    pub user_id: String,
    pub competition_id: String,
    pub event_id: String,
    pub selected_team: String,
}

pub async fn find_by_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: &str,
) -> Result<Vec<picks::Model>, sea_orm::DbErr> {
    picks::Entity::find()
        .filter(picks::Column::EventId.eq(event_id))
        .order_by(picks::Column::Id, Order::Asc)
        .all(conn)
        .await
}

/// Grade every pick on an event against `winner` in two statements.
///
/// Returns the number of rows touched.
pub async fn grade_for_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: &str,
    winner: &str,
) -> Result<u64, sea_orm::DbErr> {
    let correct = picks::Entity::update_many()
        .col_expr(picks::Column::IsCorrect, Expr::value(Some(true)))
        .col_expr(picks::Column::Points, Expr::value(1i32))
        .filter(picks::Column::EventId.eq(event_id))
        .filter(picks::Column::SelectedTeam.eq(winner))
        .exec(conn)
        .await?;

    let incorrect = picks::Entity::update_many()
        .col_expr(picks::Column::IsCorrect, Expr::value(Some(false)))
        .col_expr(picks::Column::Points, Expr::value(0i32))
        .filter(picks::Column::EventId.eq(event_id))
        .filter(picks::Column::SelectedTeam.ne(winner))
        .exec(conn)
        .await?;

    Ok(correct.rows_affected + incorrect.rows_affected)
}

/// Sum of points over a user's correct picks in one competition.
pub async fn sum_correct_points<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    competition_id: &str,
) -> Result<i64, sea_orm::DbErr> {
    let total: Option<Option<i64>> = picks::Entity::find()
        .select_only()
        .column_as(picks::Column::Points.sum(), "total")
        .filter(picks::Column::UserId.eq(user_id))
        .filter(picks::Column::CompetitionId.eq(competition_id))
        .filter(picks::Column::IsCorrect.eq(true))
        .into_tuple()
        .one(conn)
        .await?;
    Ok(total.flatten().unwrap_or(0))
}

pub async fn create_pick<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PickCreate,
) -> Result<picks::Model, sea_orm::DbErr> {
    let pick = picks::ActiveModel {
        id: Set(dto.id),
        user_id: Set(dto.user_id),
        competition_id: Set(dto.competition_id),
        event_id: Set(dto.event_id),
        selected_team: Set(dto.selected_team),
        is_correct: Set(None),
        points: Set(0),
        created_at: Set(OffsetDateTime::now_utc()),
    };
    pick.insert(conn).await
}
