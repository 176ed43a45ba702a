use pickem::db::require_db;
use pickem::db::txn::with_txn;
use pickem::db::txn_policy::{current, TxnPolicy};
use pickem::{AppError, ErrorCode};

use crate::support::factory::{event, seed_event};
use crate::support::test_state::db_state;

#[actix_web::test]
async fn default_policy_commits_on_ok() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(current(), TxnPolicy::CommitOnOk);
    let state = db_state().await;

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            seed_event(txn, "E1", &["A", "B"]).await?;
            Ok::<_, AppError>(())
        })
    })
    .await?;

    let db = require_db(&state)?;
    assert_eq!(event(db, "E1").await.id, "E1");
    Ok(())
}

#[actix_web::test]
async fn error_rolls_back_and_is_preserved() -> Result<(), Box<dyn std::error::Error>> {
    let state = db_state().await;

    let result: Result<(), AppError> = with_txn(None, &state, |txn| {
        Box::pin(async move {
            seed_event(txn, "E1", &[]).await?;
            Err::<(), _>(AppError::bad_request(ErrorCode::BadRequest, "nope"))
        })
    })
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadRequest);

    let db = require_db(&state)?;
    let found = pickem::repos::events::find_event(db, "E1").await?;
    assert!(found.is_none());
    Ok(())
}
