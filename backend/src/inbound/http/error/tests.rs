//! Tests for the error translation table.

use super::*;
use crate::domain::ErrorCode;
use crate::inbound::http::validation::FieldViolation;
use crate::test_support::FixtureClock;
use actix_web::web;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde::Deserialize;
use serde::de::Error as _;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";
const PATH: &str = "/some/path";

#[fixture]
fn clock() -> FixtureClock {
    FixtureClock::new(
        Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5)
            .single()
            .expect("valid fixture timestamp"),
    )
}

#[fixture]
fn translator() -> ErrorTranslator {
    ErrorTranslator::default()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NameQuery {
    #[expect(dead_code, reason = "only deserialization failures are exercised")]
    application_name: String,
}

fn query_error(raw: &str) -> actix_web::Error {
    match web::Query::<NameQuery>::from_query(raw) {
        Ok(_) => panic!("query {raw:?} should fail to deserialize"),
        Err(err) => err.into(),
    }
}

#[rstest]
fn rule_order_is_fixed(translator: ErrorTranslator) {
    let names: Vec<_> = translator.rules().iter().map(TranslationRule::name).collect();
    assert_eq!(
        names,
        [
            "domain_error",
            "validation_failure",
            "unreadable_body",
            "missing_parameter",
            "parameter_type_mismatch",
            "method_not_allowed",
            "not_found",
            "infrastructure",
            "unclassified",
        ]
    );
}

#[rstest]
fn domain_error_defaults_to_bad_request(translator: ErrorTranslator, clock: FixtureClock) {
    let err = actix_web::Error::from(Error::invalid_payload("Application name cannot be null or empty"));

    let body = translator.translate(&err, "/health/validate", &clock);

    assert_eq!(body.status, 400);
    assert_eq!(body.error, ErrorCode::InvalidPayload.as_str());
    assert_eq!(body.message, "Application name cannot be null or empty");
    assert_eq!(body.path, "/health/validate");
    assert_eq!(body.timestamp, clock.now());
    assert!(body.details.is_empty());
}

#[rstest]
fn domain_error_overrides_are_honoured(translator: ErrorTranslator, clock: FixtureClock) {
    let domain = Error::business_rule_violation("This is a business logic error")
        .try_with_status(409)
        .and_then(|e| e.try_with_error_type("BUSINESS_ERROR"))
        .expect("valid overrides")
        .with_trace_id(TRACE_ID);
    let err = actix_web::Error::from(domain);

    let body = translator.translate(&err, PATH, &clock);

    assert_eq!(body.status, 409);
    assert_eq!(body.error, "BUSINESS_ERROR");
    assert_eq!(body.trace_id.as_deref(), Some(TRACE_ID));
}

#[rstest]
fn body_validation_lists_every_violation(translator: ErrorTranslator, clock: FixtureClock) {
    let failure = ValidationFailure::body(vec![
        FieldViolation::new("name", "Name is required"),
        FieldViolation::new("description", "Description must not exceed 200 characters"),
    ]);
    let body = translator.translate(&failure.into(), "/api/example", &clock);

    assert_eq!(body.status, 400);
    assert_eq!(body.error, "Validation Error");
    assert_eq!(
        body.message,
        "Invalid request parameters: Name is required; Description must not exceed 200 characters"
    );
    assert_eq!(body.details.len(), 2);
}

#[rstest]
fn constraint_validation_uses_its_own_label(translator: ErrorTranslator, clock: FixtureClock) {
    let failure = ValidationFailure::constraint(vec![FieldViolation::new(
        "id",
        "size must be between 1 and 10",
    )]);
    let body = translator.translate(&failure.into(), "/api/example/12345678901", &clock);

    assert_eq!(body.error, "Constraint Violation");
    assert_eq!(body.details, vec!["id: size must be between 1 and 10"]);
    assert!(body.message.starts_with("Invalid input data"));
}

#[rstest]
fn unreadable_body_is_a_bad_request(translator: ErrorTranslator, clock: FixtureClock) {
    let err = actix_web::Error::from(JsonPayloadError::ContentType);
    let body = translator.translate(&err, "/api/example", &clock);

    assert_eq!(body.status, 400);
    assert_eq!(body.error, "Bad Request");
    assert_eq!(body.message, "Invalid request body format");
}

#[rstest]
fn missing_query_parameter_is_named(translator: ErrorTranslator, clock: FixtureClock) {
    let body = translator.translate(&query_error(""), "/health/validate", &clock);

    assert_eq!(body.status, 400);
    assert_eq!(body.error, "Bad Request");
    assert_eq!(body.message, "Missing required parameter: applicationName");
}

#[rstest]
fn path_type_mismatch_names_parameter_and_type(translator: ErrorTranslator, clock: FixtureClock) {
    let inner = serde::de::value::Error::custom("invalid type: string \"abc\", expected i64");
    let err = actix_web::Error::from(PathError::Deserialize(inner));

    let body = translator.translate(&err, PATH, &clock);

    assert_eq!(body.status, 400);
    assert_eq!(body.message, "Parameter 'path' should be of type i64");
}

#[rstest]
fn other_parameter_failures_are_generic(translator: ErrorTranslator, clock: FixtureClock) {
    let body = translator.translate(
        &query_error("applicationName=a&applicationName=b"),
        PATH,
        &clock,
    );

    assert_eq!(body.status, 400);
    assert_eq!(body.message, "Invalid request parameters");
}

#[rstest]
fn method_not_allowed_names_method(translator: ErrorTranslator, clock: FixtureClock) {
    let err = actix_web::Error::from(RoutingError::MethodNotAllowed {
        method: "DELETE".to_owned(),
    });
    let body = translator.translate(&err, "/health", &clock);

    assert_eq!(body.status, 405);
    assert_eq!(body.error, "Method Not Allowed");
    assert_eq!(
        body.message,
        "HTTP method 'DELETE' is not supported for this endpoint"
    );
}

#[rstest]
fn unknown_route_is_not_found(translator: ErrorTranslator, clock: FixtureClock) {
    let body = translator.translate(&RoutingError::NotFound.into(), "/nope", &clock);

    assert_eq!(body.status, 404);
    assert_eq!(body.error, "Not Found");
    assert_eq!(body.message, "Endpoint not found");
    assert_eq!(body.path, "/nope");
}

#[rstest]
#[case(actix_web::Error::from(ApplicationDetailsRepositoryError::connection("db-host:5432 refused")))]
#[case(actix_web::Error::from(PoolError::checkout("db-host:5432 refused")))]
#[case(actix_web::error::ErrorInternalServerError("db-host:5432 refused"))]
#[case(actix_web::error::ErrorServiceUnavailable("db-host:5432 refused"))]
fn server_side_failures_are_redacted(
    translator: ErrorTranslator,
    clock: FixtureClock,
    #[case] err: actix_web::Error,
) {
    let body = translator.translate(&err, PATH, &clock);

    assert_eq!(body.status, 500);
    assert_eq!(body.error, "Internal Server Error");
    assert_eq!(body.message, "Internal server error");
    let json = serde_json::to_string(&body).expect("serialise body");
    assert!(!json.contains("db-host"));
}

#[rstest]
fn infrastructure_rule_claims_store_errors(translator: ErrorTranslator) {
    let err = actix_web::Error::from(ApplicationDetailsRepositoryError::query("boom"));
    let (rule, translation) = translator.classify(&err);

    assert_eq!(rule, "infrastructure");
    assert_eq!(translation.severity(), Severity::Error);
}

#[rstest]
fn client_failures_log_at_warn(translator: ErrorTranslator) {
    let (rule, translation) = translator.classify(&RoutingError::NotFound.into());
    assert_eq!(rule, "not_found");
    assert_eq!(translation.severity(), Severity::Warn);
}

#[rstest]
#[tokio::test]
async fn ambient_trace_id_is_reported(translator: ErrorTranslator, clock: FixtureClock) {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid UUID");
    let body = TraceId::scope(trace_id, async {
        translator.translate(&RoutingError::NotFound.into(), PATH, &clock)
    })
    .await;

    assert_eq!(body.trace_id.as_deref(), Some(TRACE_ID));
}

#[rstest]
fn optional_fields_are_omitted_from_json(translator: ErrorTranslator, clock: FixtureClock) {
    let body = translator.translate(&RoutingError::NotFound.into(), PATH, &clock);
    let json = serde_json::to_value(&body).expect("serialise body");

    assert!(json.get("details").is_none());
    assert!(json.get("traceId").is_none());
    assert_eq!(json.get("status").and_then(serde_json::Value::as_u64), Some(404));
}

#[rstest]
fn respond_sets_status_and_json_body(translator: ErrorTranslator, clock: FixtureClock) {
    let response = translator.respond(&RoutingError::NotFound.into(), PATH, &clock);
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
