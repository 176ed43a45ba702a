use pickem::db::require_db;
use pickem::db::txn::with_txn;
use pickem::entities::events::EventStatus;
use pickem::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use pickem::services::settlement::{Outcome, SettlementReport, SettlementService};
use pickem::{AppError, AppState};
use sea_orm::TransactionTrait;

use crate::support::factory::{
    event, member_score, pick, seed_event, seed_lions_tigers, seed_member, seed_pick,
};
use crate::support::test_state::db_state;

async fn settle(state: &AppState, outcome: Outcome) -> Result<SettlementReport, DomainError> {
    let db = require_db(state).expect("db");
    let txn = db.begin().await.expect("begin");
    let result = SettlementService::new().settle(&txn, &outcome).await;
    match result {
        Ok(_) => txn.commit().await.expect("commit"),
        Err(_) => txn.rollback().await.expect("rollback"),
    }
    result
}

async fn points(state: &AppState, ids: &[&str]) -> Vec<i32> {
    let db = require_db(state).unwrap();
    let mut out = Vec::new();
    for id in ids {
        out.push(pick(db, id).await.points);
    }
    out
}

#[actix_web::test]
async fn lions_win_grades_picks_and_recomputes_members() -> Result<(), Box<dyn std::error::Error>> {
    let state = db_state().await;
    let db = require_db(&state)?;
    seed_lions_tigers(db).await?;

    let report = settle(&state, Outcome::new("E1", "Lions").with_score("24-17")).await?;
    assert_eq!(report.picks_graded, 3);
    assert_eq!(report.memberships_updated, 3);

    assert_eq!(points(&state, &["p1", "p2", "p3"]).await, vec![1, 1, 0]);
    assert_eq!(pick(db, "p1").await.is_correct, Some(true));
    assert_eq!(pick(db, "p3").await.is_correct, Some(false));

    let e1 = event(db, "E1").await;
    assert_eq!(e1.status, EventStatus::Completed);
    assert_eq!(e1.winner.as_deref(), Some("Lions"));
    assert_eq!(e1.score.as_deref(), Some("24-17"));

    assert_eq!(member_score(db, "u1", "c1").await, 1);
    assert_eq!(member_score(db, "u2", "c1").await, 1);
    assert_eq!(member_score(db, "u3", "c1").await, 0);
    Ok(())
}

#[actix_web::test]
async fn winner_outside_options_changes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let state = db_state().await;
    let db = require_db(&state)?;
    seed_lions_tigers(db).await?;

    let err = settle(&state, Outcome::new("E1", "Bears")).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidOutcome, _)
    ));

    let e1 = event(db, "E1").await;
    assert_eq!(e1.status, EventStatus::Upcoming);
    assert_eq!(e1.winner, None);
    for id in ["p1", "p2", "p3"] {
        let p = pick(db, id).await;
        assert_eq!((p.is_correct, p.points), (None, 0));
    }
    assert_eq!(member_score(db, "u1", "c1").await, 0);
    Ok(())
}

#[actix_web::test]
async fn settling_twice_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let state = db_state().await;
    let db = require_db(&state)?;
    seed_lions_tigers(db).await?;

    settle(&state, Outcome::new("E1", "Lions")).await?;
    let first = (
        points(&state, &["p1", "p2", "p3"]).await,
        member_score(db, "u1", "c1").await,
        member_score(db, "u3", "c1").await,
    );

    settle(&state, Outcome::new("E1", "Lions")).await?;
    let second = (
        points(&state, &["p1", "p2", "p3"]).await,
        member_score(db, "u1", "c1").await,
        member_score(db, "u3", "c1").await,
    );

    assert_eq!(first, second);
    Ok(())
}

#[actix_web::test]
async fn correction_converges_without_residue() -> Result<(), Box<dyn std::error::Error>> {
    let state = db_state().await;
    let db = require_db(&state)?;
    seed_lions_tigers(db).await?;

    settle(&state, Outcome::new("E1", "Lions")).await?;
    settle(&state, Outcome::new("E1", "Tigers")).await?;

    assert_eq!(points(&state, &["p1", "p2", "p3"]).await, vec![0, 0, 1]);
    assert_eq!(member_score(db, "u1", "c1").await, 0);
    assert_eq!(member_score(db, "u2", "c1").await, 0);
    assert_eq!(member_score(db, "u3", "c1").await, 1);
    assert_eq!(event(db, "E1").await.winner.as_deref(), Some("Tigers"));
    Ok(())
}

#[actix_web::test]
async fn score_is_a_full_sum_across_events_and_per_competition(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = db_state().await;
    let db = require_db(&state)?;
    seed_event(db, "E1", &["Lions", "Tigers"]).await?;
    seed_event(db, "E2", &[]).await?;
    seed_member(db, "u1", "c1").await?;
    seed_member(db, "u1", "c2").await?;
    seed_pick(db, "p1", "u1", "c1", "E1", "Lions").await?;
    seed_pick(db, "p2", "u1", "c2", "E1", "Tigers").await?;
    seed_pick(db, "p3", "u1", "c1", "E2", "Hawks").await?;

    settle(&state, Outcome::new("E2", "Hawks")).await?;
    assert_eq!(member_score(db, "u1", "c1").await, 1);

    settle(&state, Outcome::new("E1", "Lions")).await?;
    assert_eq!(member_score(db, "u1", "c1").await, 2);
    assert_eq!(member_score(db, "u1", "c2").await, 0);
    Ok(())
}

#[actix_web::test]
async fn empty_options_accept_any_winner_and_blank_score_is_null(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = db_state().await;
    let db = require_db(&state)?;
    seed_event(db, "E9", &[]).await?;

    let report = settle(&state, Outcome::new("E9", "Draw").with_score("")).await?;
    assert_eq!(report.picks_graded, 0);
    assert_eq!(report.memberships_updated, 0);

    let e9 = event(db, "E9").await;
    assert_eq!(e9.winner.as_deref(), Some("Draw"));
    assert_eq!(e9.score, None);
    Ok(())
}

#[actix_web::test]
async fn missing_event_is_not_found() {
    let state = db_state().await;
    let err = settle(&state, Outcome::new("nope", "Lions")).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Event, _)));
}

#[actix_web::test]
async fn blank_winner_is_rejected() {
    let state = db_state().await;
    let err = settle(&state, Outcome::new("E1", "   ")).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::Other(_), _)));
}

#[actix_web::test]
async fn missing_membership_rolls_back_everything() -> Result<(), Box<dyn std::error::Error>> {
    let state = db_state().await;
    let db = require_db(&state)?;
    seed_event(db, "E1", &["Lions", "Tigers"]).await?;
    seed_member(db, "u1", "c1").await?;
    // u2 picked without being a member of c1
    seed_pick(db, "p1", "u1", "c1", "E1", "Lions").await?;
    seed_pick(db, "p2", "u2", "c1", "E1", "Lions").await?;

    let outcome = Outcome::new("E1", "Lions");
    let result = with_txn(None, &state, |txn| {
        Box::pin(async move {
            SettlementService::new()
                .settle(txn, &outcome)
                .await
                .map_err(AppError::from)
        })
    })
    .await;
    assert!(result.is_err());

    let e1 = event(db, "E1").await;
    assert_eq!(e1.status, EventStatus::Upcoming);
    assert_eq!(e1.winner, None);
    assert_eq!(pick(db, "p1").await.is_correct, None);
    assert_eq!(member_score(db, "u1", "c1").await, 0);
    Ok(())
}
