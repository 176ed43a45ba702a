use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::require_db;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::services::leaderboard;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeaderboardQuery {
    competition_id: Option<String>,
}

/// GET /api/leaderboard?competitionId=...
async fn get_leaderboard(
    query: web::Query<LeaderboardQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let competition_id = query
        .into_inner()
        .competition_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| {
            AppError::bad_request(ErrorCode::MissingParameter, "competitionId is required")
        })?;

    let db = require_db(&app_state)?;
    let entries = leaderboard::standings(db, &competition_id).await?;

    Ok(HttpResponse::Ok().json(entries))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(get_leaderboard));
}
