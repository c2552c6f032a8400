//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use chrono::{DateTime, Utc};
use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "INVALID_PAYLOAD")]
    InvalidPayload,
    #[schema(rename = "USER_NOT_AUTHORIZED")]
    UserNotAuthorized,
    #[schema(rename = "BUSINESS_RULE_VIOLATION")]
    BusinessRuleViolation,
    #[schema(rename = "DUPLICATE_ENTRY")]
    DuplicateEntry,
    #[schema(rename = "INVALID_STATE")]
    InvalidState,
    #[schema(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound,
}

/// OpenAPI schema for [`crate::domain::HealthCheckResponse`].
///
/// Health snapshot of the latest provisioned application, or the fallback
/// snapshot when none is available.
#[derive(ToSchema)]
#[schema(as = crate::domain::HealthCheckResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct HealthCheckResponseSchema {
    #[schema(example = "UP")]
    status: String,
    #[schema(example = "boilerplate")]
    application: String,
    #[schema(example = "1.0.0")]
    version: String,
    #[schema(example = "development")]
    environment: Option<String>,
    #[schema(example = "In memory db not yet set")]
    description: Option<String>,
    timestamp: DateTime<Utc>,
}
