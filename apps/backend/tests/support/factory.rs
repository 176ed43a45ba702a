//! Seed helpers for events, memberships and picks.

use pickem::adapters::competition_users_sea;
use pickem::adapters::events_sea::{self, EventCreate};
use pickem::adapters::picks_sea::{self, PickCreate};
use pickem::entities::{competition_users, events, picks};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use time::{Duration, OffsetDateTime};

pub async fn seed_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
    options: &[&str],
) -> Result<events::Model, DbErr> {
    let starts_at = OffsetDateTime::now_utc() + Duration::days(1);
    events_sea::create_event(
        conn,
        EventCreate::new(id, format!("Event {id}"), starts_at).with_options(options.iter().copied()),
    )
    .await
}

pub async fn seed_event_at<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
    starts_at: OffsetDateTime,
) -> Result<events::Model, DbErr> {
    events_sea::create_event(conn, EventCreate::new(id, format!("Event {id}"), starts_at)).await
}

pub async fn seed_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    competition_id: &str,
) -> Result<(), DbErr> {
    competition_users_sea::create_membership(conn, user_id, competition_id).await?;
    Ok(())
}

pub async fn seed_pick<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
    user_id: &str,
    competition_id: &str,
    event_id: &str,
    selected_team: &str,
) -> Result<(), DbErr> {
    picks_sea::create_pick(
        conn,
        PickCreate {
            id: id.to_string(),
            user_id: user_id.to_string(),
            competition_id: competition_id.to_string(),
            event_id: event_id.to_string(),
            selected_team: selected_team.to_string(),
        },
    )
    .await?;
    Ok(())
}

pub async fn pick<C: ConnectionTrait + Send + Sync>(conn: &C, id: &str) -> picks::Model {
    picks::Entity::find_by_id(id.to_string())
        .one(conn)
        .await
        .expect("query pick")
        .expect("pick exists")
}

pub async fn event<C: ConnectionTrait + Send + Sync>(conn: &C, id: &str) -> events::Model {
    events::Entity::find_by_id(id.to_string())
        .one(conn)
        .await
        .expect("query event")
        .expect("event exists")
}

pub async fn member_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: &str,
    competition_id: &str,
) -> i32 {
    competition_users::Entity::find_by_id((user_id.to_string(), competition_id.to_string()))
        .one(conn)
        .await
        .expect("query membership")
        .expect("membership exists")
        .score
}

/// The Lions/Tigers fixture: event `E1` with options Lions and Tigers,
/// picks Lions (u1/c1), Lions (u2/c1), Tigers (u3/c1), and all three members.
pub async fn seed_lions_tigers<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<(), DbErr> {
    seed_event(conn, "E1", &["Lions", "Tigers"]).await?;
    for user in ["u1", "u2", "u3"] {
        seed_member(conn, user, "c1").await?;
    }
    seed_pick(conn, "p1", "u1", "c1", "E1", "Lions").await?;
    seed_pick(conn, "p2", "u2", "c1", "E1", "Lions").await?;
    seed_pick(conn, "p3", "u3", "c1", "E1", "Tigers").await?;
    Ok(())
}
