#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderName, CONTENT_TYPE};
use actix_web::test;
use serde_json::Value;

// Logging is auto-installed for every test binary that includes `common`
#[ctor::ctor]
fn init_logging() {
    pickem_test_support::logging::init();
}

/// Check a problem-details response: status, code, content type, and that
/// the body's `trace_id` matches the `x-trace-id` header. Returns the body.
pub async fn assert_problem_details(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
) -> Value {
    assert_eq!(resp.status().as_u16(), expected_status);

    let headers = resp.headers().clone();
    let trace_id = headers
        .get(HeaderName::from_static("x-trace-id"))
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header")
        .to_string();
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_eq!(content_type, "application/problem+json");

    let body = test::read_body(resp).await;
    let json: Value = serde_json::from_slice(&body).expect("problem details json");

    assert_eq!(json["code"], expected_code);
    assert_eq!(json["status"], expected_status);
    assert_eq!(json["trace_id"].as_str(), Some(trace_id.as_str()));
    assert!(json["type"]
        .as_str()
        .unwrap_or_default()
        .ends_with(expected_code));
    json
}
