//! Domain types, ports and services.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure classification.
//! - `ApplicationDetails`: the provisioned application record.
//! - `HealthCheckResponse`: read model returned by the health endpoint.
//! - `ApplicationDetailsService`: the `ApplicationStatus` implementation.
//! - `TraceId`: request-scoped correlation identifier.

pub mod application_details;
pub mod application_details_service;
pub mod error;
pub mod health;
pub mod ports;
pub mod trace_id;

pub use self::application_details::{
    APPLICATION_NAME_MAX, ApplicationDetails, ApplicationDetailsDraft,
    ApplicationDetailsValidationError,
};
pub use self::application_details_service::{ApplicationDetailsService, PRODUCTION_ENVIRONMENT};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::health::{
    DEFAULT_APPLICATION_NAME, DEFAULT_ENVIRONMENT, DEFAULT_VERSION, FALLBACK_DESCRIPTION,
    HealthCheckResponse, STATUS_UP,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
