use std::sync::Arc;

use tracing::info;

use crate::config::db::{DbKind, DbProfile};
use crate::config::scores::ScoresConfig;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::repos::events::DbEventSchedule;
use crate::services::scores::{self, NextEventLookup, ScoreProvider};
use crate::state::app_state::AppState;

/// Builder for `AppState`, shared by `main` and the tests.
pub struct StateBuilder {
    db: Option<(DbKind, DbProfile)>,
    scores_config: ScoresConfig,
    providers: Option<Vec<Arc<dyn ScoreProvider>>>,
    schedule: Option<Arc<dyn NextEventLookup>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db: None,
            scores_config: ScoresConfig::default(),
            providers: None,
            schedule: None,
        }
    }

    pub fn with_db(mut self, kind: DbKind, profile: DbProfile) -> Self {
        self.db = Some((kind, profile));
        self
    }

    pub fn with_scores_config(mut self, config: ScoresConfig) -> Self {
        self.scores_config = config;
        self
    }

    /// Replace the upstream adapters derived from the scores config.
    pub fn with_providers(mut self, providers: Vec<Arc<dyn ScoreProvider>>) -> Self {
        self.providers = Some(providers);
        self
    }

    /// Replace the database-backed next-event lookup.
    pub fn with_schedule(mut self, schedule: Arc<dyn NextEventLookup>) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        // single entrypoint: connect + migrate
        let db = match self.db {
            Some((kind, profile)) => Some(bootstrap_db(kind, profile).await?),
            None => None,
        };

        let providers = match self.providers {
            Some(providers) => providers,
            None => scores::build_providers(&self.scores_config)?,
        };
        let schedule = self
            .schedule
            .unwrap_or_else(|| Arc::new(DbEventSchedule::new(db.clone())));

        info!(
            providers = providers.len(),
            provider_kind = ?self.scores_config.provider,
            max_ttl_secs = self.scores_config.max_ttl.as_secs(),
            "score feed configured"
        );
        let cache = scores::build_cache(&self.scores_config, providers, schedule);

        Ok(AppState::new(db, Arc::new(cache)))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
