use actix_web::test;
use pickem::db::require_db;
use serde_json::{json, Value};

use crate::common::assert_problem_details;
use crate::support::create_test_app;
use crate::support::factory::{event, member_score, pick, seed_event, seed_lions_tigers, seed_pick};
use crate::support::test_state::db_state;

#[actix_web::test]
async fn settles_and_returns_winner() -> Result<(), Box<dyn std::error::Error>> {
    let state = db_state().await;
    let db = require_db(&state)?.clone();
    seed_lions_tigers(&db).await?;
    let app = create_test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/events/E1/result")
        .set_json(json!({"winner": "Lions", "score": "3-1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"success": true, "winner": "Lions"}));

    assert_eq!(pick(&db, "p1").await.points, 1);
    assert_eq!(pick(&db, "p3").await.points, 0);
    assert_eq!(member_score(&db, "u2", "c1").await, 1);
    assert_eq!(event(&db, "E1").await.score.as_deref(), Some("3-1"));
    Ok(())
}

#[actix_web::test]
async fn winner_not_in_options_is_invalid_outcome() -> Result<(), Box<dyn std::error::Error>> {
    let state = db_state().await;
    let db = require_db(&state)?.clone();
    seed_lions_tigers(&db).await?;
    let app = create_test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/events/E1/result")
        .set_json(json!({"winner": "Bears"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body = assert_problem_details(resp, 400, "INVALID_OUTCOME").await;
    assert!(body["detail"].as_str().unwrap_or_default().contains("Bears"));

    assert_eq!(pick(&db, "p1").await.is_correct, None);
    assert_eq!(member_score(&db, "u1", "c1").await, 0);
    Ok(())
}

#[actix_web::test]
async fn unknown_event_is_404() {
    let app = create_test_app(db_state().await).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/events/missing/result")
        .set_json(json!({"winner": "Lions"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 404, "EVENT_NOT_FOUND").await;
}

#[actix_web::test]
async fn malformed_body_is_bad_request() {
    let app = create_test_app(db_state().await).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/events/E1/result")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"score": "1-0"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 400, "BAD_REQUEST").await;
}

#[actix_web::test]
async fn empty_winner_is_validation_error() {
    let app = create_test_app(db_state().await).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/events/E1/result")
        .set_json(json!({"winner": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 400, "VALIDATION_ERROR").await;
}

#[actix_web::test]
async fn storage_inconsistency_is_500_and_rolled_back() -> Result<(), Box<dyn std::error::Error>> {
    let state = db_state().await;
    let db = require_db(&state)?.clone();
    seed_event(&db, "E1", &["Lions", "Tigers"]).await?;
    seed_pick(&db, "p1", "ghost", "c1", "E1", "Lions").await?;
    let app = create_test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/events/E1/result")
        .set_json(json!({"winner": "Lions"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 500, "TRANSACTION_FAILURE").await;

    assert_eq!(event(&db, "E1").await.winner, None);
    assert_eq!(pick(&db, "p1").await.is_correct, None);
    Ok(())
}
