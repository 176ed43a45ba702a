use pickem::db::require_db;
use pickem::entities::events::EventStatus;
use pickem::adapters::events_sea::{self, EventCreate};
use pickem::repos::events::DbEventSchedule;
use pickem::services::scores::NextEventLookup;
use time::macros::datetime;

use crate::support::factory::seed_event_at;
use crate::support::test_state::db_state;

#[actix_web::test]
async fn next_event_is_earliest_unfinished_after_now() -> Result<(), Box<dyn std::error::Error>> {
    let state = db_state().await;
    let db = require_db(&state)?;
    let now = datetime!(2026-10-17 12:00 UTC);

    seed_event_at(db, "past", datetime!(2026-10-17 09:00 UTC)).await?;
    seed_event_at(db, "later", datetime!(2026-10-17 20:00 UTC)).await?;
    seed_event_at(db, "soon", datetime!(2026-10-17 15:00 UTC)).await?;
    events_sea::create_event(
        db,
        EventCreate::new("done-early", "Finished", datetime!(2026-10-17 13:00 UTC))
            .with_status(EventStatus::Completed),
    )
    .await?;

    let schedule = DbEventSchedule::new(Some(db.clone()));
    assert_eq!(
        schedule.next_event_start(now).await?,
        Some(datetime!(2026-10-17 15:00 UTC))
    );
    assert_eq!(
        schedule.next_event_start(datetime!(2026-10-17 21:00 UTC)).await?,
        None
    );
    Ok(())
}

#[actix_web::test]
async fn no_database_means_no_known_event() -> Result<(), Box<dyn std::error::Error>> {
    let schedule = DbEventSchedule::new(None);
    assert_eq!(
        schedule
            .next_event_start(datetime!(2026-10-17 12:00 UTC))
            .await?,
        None
    );
    Ok(())
}
