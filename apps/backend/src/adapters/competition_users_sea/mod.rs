//! SeaORM adapter for competition memberships.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, QueryFilter, QueryOrder,
    Set,
};
use time::OffsetDateTime;

use crate::entities::competition_users;

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    competition_id: &str,
) -> Result<Option<competition_users::Model>, sea_orm::DbErr> {
    competition_users::Entity::find_by_id((user_id.to_string(), competition_id.to_string()))
        .one(conn)
        .await
}

/// Overwrite the stored score. Returns rows affected (0 when no membership exists).
pub async fn set_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    competition_id: &str,
    score: i32,
) -> Result<u64, sea_orm::DbErr> {
    let res = competition_users::Entity::update_many()
        .col_expr(competition_users::Column::Score, Expr::value(score))
        .filter(competition_users::Column::UserId.eq(user_id))
        .filter(competition_users::Column::CompetitionId.eq(competition_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

/// Members of a competition, highest score first; ties broken by user id.
pub async fn find_by_competition_ranked<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    competition_id: &str,
) -> Result<Vec<competition_users::Model>, sea_orm::DbErr> {
    competition_users::Entity::find()
        .filter(competition_users::Column::CompetitionId.eq(competition_id))
        .order_by(competition_users::Column::Score, Order::Desc)
        .order_by(competition_users::Column::UserId, Order::Asc)
        .all(conn)
        .await
}

pub async fn create_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    competition_id: &str,
) -> Result<competition_users::Model, sea_orm::DbErr> {
    let membership = competition_users::ActiveModel {
        user_id: Set(user_id.to_string()),
        competition_id: Set(competition_id.to_string()),
        score: Set(0),
        joined_at: Set(OffsetDateTime::now_utc()),
    };
    membership.insert(conn).await
}
