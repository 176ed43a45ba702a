// Unit tests for error mapping - pure domain logic without HTTP or database dependencies
use actix_web::ResponseError;

use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind, ValidationKind};
use crate::{AppError, ErrorCode};

#[test]
fn maps_invalid_outcome_to_400() {
    let de = DomainError::invalid_outcome("Winner must be one of the event options");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::InvalidOutcome);
    assert_eq!(app.status().as_u16(), 400);
}

#[test]
fn maps_other_validation_to_generic_code() {
    let de = DomainError::validation(ValidationKind::Other("x".into()), "bad field");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status().as_u16(), 400);
}

#[test]
fn maps_not_found() {
    let app: AppError = DomainError::not_found(NotFoundKind::Event, "no event").into();
    assert_eq!(app.code().as_str(), "EVENT_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);

    let app: AppError = DomainError::not_found(NotFoundKind::Other("pick".into()), "no row").into();
    assert_eq!(app.code().as_str(), "NOT_FOUND");
}

#[test]
fn maps_infra() {
    let app: AppError = DomainError::infra(InfraErrorKind::Timeout, "timeout").into();
    assert_eq!(app.code().as_str(), "DB_TIMEOUT");
    assert_eq!(app.status().as_u16(), 504);

    let app: AppError = DomainError::infra(InfraErrorKind::DbUnavailable, "down").into();
    assert_eq!(app.code().as_str(), "DB_UNAVAILABLE");
    assert_eq!(app.status().as_u16(), 503);

    let app: AppError = DomainError::infra(InfraErrorKind::DataCorruption, "bad json").into();
    assert_eq!(app.code().as_str(), "DB_ERROR");
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn problem_details_response_carries_trace_header() {
    let resp = AppError::transaction_failure("rolled back").error_response();
    assert_eq!(resp.status().as_u16(), 500);
    assert_eq!(
        resp.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/problem+json")
    );
    assert!(resp.headers().contains_key("x-trace-id"));
}
