use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::infra::state::StateBuilder;
use crate::services::scores::ScoreCache;

/// Shared handles for request handlers
#[derive(Clone)]
pub struct AppState {
    /// Absent when the server runs without a database
    pub db: Option<DatabaseConnection>,
    pub scores: Arc<ScoreCache>,
}

impl AppState {
    pub fn new(db: Option<DatabaseConnection>, scores: Arc<ScoreCache>) -> Self {
        Self { db, scores }
    }

    pub fn builder() -> StateBuilder {
        StateBuilder::new()
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
