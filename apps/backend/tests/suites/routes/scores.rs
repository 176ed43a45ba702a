use std::sync::Arc;

use actix_web::test;
use pickem::services::scores::ScoreProvider;
use serde_json::Value;
use time::{Duration, OffsetDateTime};

use crate::support::create_test_app;
use crate::support::fakes::{game, DownProvider, FixedSchedule, StaticProvider};
use crate::support::test_state::scores_state;

#[actix_web::test]
async fn feed_lists_upcoming_then_recent_results() {
    let now = OffsetDateTime::now_utc();
    let espn = StaticProvider::new(
        "espn",
        vec![
            game("espn:nba:1", now - Duration::days(2), Some(("101", "99"))),
            game("espn:nba:2", now + Duration::hours(5), None),
            game("espn:nba:3", now - Duration::days(1), Some(("88", "90"))),
        ],
    );
    let other = StaticProvider::new(
        "other",
        vec![
            game("other:nba:4", now + Duration::hours(1), None),
            // completed without a scoreline is dropped
            {
                let mut g = game("other:nba:5", now - Duration::hours(3), Some(("1", "0")));
                g.scoreline = None;
                g
            },
        ],
    );
    let providers: Vec<Arc<dyn ScoreProvider>> = vec![espn, other, Arc::new(DownProvider)];
    let app = create_test_app(scores_state(providers, FixedSchedule(None)).await).await;

    let req = test::TestRequest::get().uri("/api/scores").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    let ids: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|r| r["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["other:nba:4", "espn:nba:2", "espn:nba:3", "espn:nba:1"]);

    let first_result = &body[2];
    assert_eq!(first_result["completed"], true);
    assert_eq!(first_result["scores"][0]["name"], "Lakers");
    assert_eq!(first_result["scores"][0]["score"], "88");
    assert_eq!(body[0]["scores"], Value::Null);
    assert!(body[0]["startTime"].is_string());
    assert_eq!(body[0]["sourceKey"], "basketball_nba");
}

#[actix_web::test]
async fn repeated_reads_are_served_from_cache() {
    let now = OffsetDateTime::now_utc();
    let provider = StaticProvider::new("espn", vec![game("espn:nba:1", now + Duration::hours(2), None)]);
    let providers: Vec<Arc<dyn ScoreProvider>> = vec![provider.clone()];
    let app = create_test_app(scores_state(providers, FixedSchedule(None)).await).await;

    for _ in 0..3 {
        let req = test::TestRequest::get().uri("/api/scores").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
    }

    // one refresh: lookback 3 + today + lookahead 1
    assert_eq!(provider.calls(), 5);
}

#[actix_web::test]
async fn all_upstreams_down_is_an_empty_list() {
    let providers: Vec<Arc<dyn ScoreProvider>> = vec![Arc::new(DownProvider)];
    let app = create_test_app(scores_state(providers, FixedSchedule(None)).await).await;

    let req = test::TestRequest::get().uri("/api/scores").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, Value::Array(Vec::new()));
}
