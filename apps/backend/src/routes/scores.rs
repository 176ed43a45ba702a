//! Aggregated score feed.

use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::state::app_state::AppState;

/// GET /api/scores
///
/// Live and upcoming games first (soonest first), then recent results
/// (most recent first). Upstream outages shrink the list; they never fail
/// the request.
async fn get_scores(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let view = app_state.scores.get_scores().await;
    Ok(HttpResponse::Ok().json(&view.records))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(get_scores));
}
