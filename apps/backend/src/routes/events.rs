//! Admin settlement endpoint.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::extractors::ValidatedJson;
use crate::services::settlement::{Outcome, SettlementService};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct SetResultRequest {
    winner: String,
    #[serde(default)]
    score: Option<String>,
}

#[derive(Debug, Serialize)]
struct SetResultResponse {
    success: bool,
    winner: String,
}

/// POST /api/admin/events/{event_id}/result
///
/// Records the winner and regrades every pick and membership score for the
/// event in one transaction. Safe to repeat with a corrected winner.
async fn set_result(
    http_req: HttpRequest,
    path: web::Path<String>,
    body: ValidatedJson<SetResultRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let outcome = Outcome {
        event_id: path.into_inner(),
        winner: body.winner,
        score: body.score,
    };

    let report = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            SettlementService::new()
                .settle(txn, &outcome)
                .await
                .map_err(settlement_error)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(SetResultResponse {
        success: true,
        winner: report.winner,
    }))
}

/// Storage failures mid-settlement surface as `TRANSACTION_FAILURE`.
fn settlement_error(err: DomainError) -> AppError {
    match err {
        DomainError::Infra(InfraErrorKind::DbUnavailable, _) => AppError::db_unavailable(),
        DomainError::Infra(kind, detail) => {
            warn!(?kind, detail = %detail, "settlement rolled back");
            AppError::transaction_failure(detail)
        }
        other => other.into(),
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{event_id}/result", web::post().to(set_result));
}
