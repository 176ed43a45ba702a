use std::sync::Arc;

use pickem::services::scores::{NextEventLookup, ScoreProvider};
use pickem::{AppState, DbKind, DbProfile, StateBuilder};

use super::fakes::FixedSchedule;

/// Fresh in-memory SQLite, migrated, with no upstream providers.
pub async fn db_state() -> AppState {
    StateBuilder::new()
        .with_db(DbKind::SqliteMemory, DbProfile::Test)
        .with_providers(Vec::new())
        .build()
        .await
        .expect("build sqlite test state")
}

/// No database; the score feed is served by `providers`.
pub async fn scores_state(
    providers: Vec<Arc<dyn ScoreProvider>>,
    schedule: FixedSchedule,
) -> AppState {
    let schedule: Arc<dyn NextEventLookup> = Arc::new(schedule);
    StateBuilder::new()
        .with_providers(providers)
        .with_schedule(schedule)
        .build()
        .await
        .expect("build scores test state")
}
