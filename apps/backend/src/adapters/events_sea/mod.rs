//! SeaORM adapter for events.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::events::{self, EventStatus};

pub mod dto;

pub use dto::{EventCompletion, EventCreate};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Option<events::Model>, sea_orm::DbErr> {
    events::Entity::find_by_id(id.to_string()).one(conn).await
}

/// Load an event and take a row lock for the rest of the transaction.
///
/// Postgres emits `FOR UPDATE`; SQLite ignores the clause (its writers are
/// already serialized per database).
pub async fn find_by_id_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Option<events::Model>, sea_orm::DbErr> {
    events::Entity::find_by_id(id.to_string())
        .lock_exclusive()
        .one(conn)
        .await
}

/// Set winner/score and force status to completed.
pub async fn mark_completed<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: EventCompletion,
) -> Result<u64, sea_orm::DbErr> {
    let res = events::Entity::update_many()
        .col_expr(events::Column::Winner, Expr::value(Some(dto.winner)))
        .col_expr(events::Column::Score, Expr::value(dto.score))
        .col_expr(events::Column::Status, Expr::value(EventStatus::Completed))
        .col_expr(
            events::Column::UpdatedAt,
            Expr::value(OffsetDateTime::now_utc()),
        )
        .filter(events::Column::Id.eq(dto.id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

/// Earliest start time strictly after `after` among events not yet completed.
pub async fn find_earliest_upcoming_after<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    after: OffsetDateTime,
) -> Result<Option<OffsetDateTime>, sea_orm::DbErr> {
    let next = events::Entity::find()
        .filter(events::Column::Status.ne(EventStatus::Completed))
        .filter(events::Column::StartsAt.gt(after))
        .order_by(events::Column::StartsAt, Order::Asc)
        .one(conn)
        .await?;
    Ok(next.map(|e| e.starts_at))
}

pub async fn create_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: EventCreate,
) -> Result<events::Model, sea_orm::DbErr> {
    let options = serde_json::to_string(&dto.options)
        .map_err(|e| sea_orm::DbErr::Custom(format!("encode options: {e}")))?;

    let event = events::ActiveModel {
        id: Set(dto.id),
        name: Set(dto.name),
        status: Set(dto.status),
        options: Set(options),
        winner: Set(None),
        score: Set(None),
        starts_at: Set(dto.starts_at),
        updated_at: Set(OffsetDateTime::now_utc()),
    };

    event.insert(conn).await
}
