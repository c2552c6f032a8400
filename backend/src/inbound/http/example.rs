//! Demonstration endpoints.
//!
//! ```text
//! GET  /api/health
//! GET  /api/health/detailed
//! GET  /api/example
//! POST /api/example {"name":"widget","description":"optional"}
//! GET  /api/example/{id}
//! GET  /api/example/error/business
//! GET  /api/example/error/runtime
//! ```
//!
//! These endpoints exercise request validation and the error translator; they
//! hold no business state.

use std::num::NonZeroUsize;

use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DEFAULT_VERSION, Error, STATUS_UP};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, ValidationFailure, Violations, length_within,
};

const APPLICATION_LABEL: &str = "Boilerplate";

const NAME: FieldName = FieldName::new("name");
const DESCRIPTION: FieldName = FieldName::new("description");
const ID: FieldName = FieldName::new("id");

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;
const DESCRIPTION_MAX: usize = 200;
const ID_MAX: usize = 10;

const BUSINESS_ERROR_TYPE: &str = "BUSINESS_ERROR";
const BUSINESS_ERROR_MESSAGE: &str = "This is a business logic error";
const RUNTIME_ERROR_MESSAGE: &str = "This is an unhandled runtime exception";

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealthResponse {
    #[schema(example = "UP")]
    pub status: String,
    pub timestamp: DateTime<Utc>,
    #[schema(example = "Boilerplate")]
    pub application: String,
    #[schema(example = "1.0.0")]
    pub version: String,
}

impl ApiHealthResponse {
    fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            status: STATUS_UP.to_owned(),
            timestamp,
            application: APPLICATION_LABEL.to_owned(),
            version: DEFAULT_VERSION.to_owned(),
        }
    }
}

/// Host facts reported by `GET /api/health/detailed`.
///
/// Memory figures are in bytes and are `null` where `/proc/meminfo` is not
/// available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    #[schema(example = "1.85")]
    pub rust_version: String,
    #[schema(example = "linux")]
    pub os_name: String,
    #[schema(example = "unix")]
    pub os_family: String,
    #[schema(example = "x86_64")]
    pub arch: String,
    pub available_processors: usize,
    pub total_memory: Option<u64>,
    pub free_memory: Option<u64>,
}

impl SystemInfo {
    /// Snapshot the running host.
    pub fn collect() -> Self {
        let (total_memory, free_memory) = std::fs::read_to_string("/proc/meminfo")
            .map(|text| parse_meminfo(&text))
            .unwrap_or((None, None));
        Self {
            rust_version: env!("CARGO_PKG_RUST_VERSION").to_owned(),
            os_name: std::env::consts::OS.to_owned(),
            os_family: std::env::consts::FAMILY.to_owned(),
            arch: std::env::consts::ARCH.to_owned(),
            available_processors: std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            total_memory,
            free_memory,
        }
    }
}

fn meminfo_bytes(text: &str, key: &str) -> Option<u64> {
    text.lines().find_map(|line| {
        let rest = line.strip_prefix(key)?.strip_prefix(':')?;
        let kib = rest.trim().trim_end_matches("kB").trim().parse::<u64>().ok()?;
        kib.checked_mul(1024)
    })
}

/// Extract total and available memory, in bytes, from `/proc/meminfo` text.
fn parse_meminfo(text: &str) -> (Option<u64>, Option<u64>) {
    (
        meminfo_bytes(text, "MemTotal"),
        meminfo_bytes(text, "MemAvailable"),
    )
}

/// Body of `GET /api/health/detailed`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiHealthDetailedResponse {
    #[serde(flatten)]
    pub summary: ApiHealthResponse,
    pub system: SystemInfo,
}

/// Body of `GET /api/example`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExampleGreeting {
    #[schema(example = "Hello from Boilerplate!")]
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[schema(example = "success")]
    pub status: String,
}

/// Request body for `POST /api/example`.
///
/// Fields are optional at the decoding stage so that absence is reported as
/// a validation violation rather than an unreadable body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ExampleRequest {
    #[schema(example = "widget", min_length = 2, max_length = 50)]
    pub name: Option<String>,
    #[schema(example = "A small example", max_length = 200)]
    pub description: Option<String>,
}

impl ExampleRequest {
    /// Check every field, reporting all violations at once.
    fn validate(&self) -> Result<(), ValidationFailure> {
        let mut violations = Violations::new();
        let name = self.name.as_deref().unwrap_or_default();
        if name.trim().is_empty() {
            violations.require(false, NAME, "Name is required");
        } else {
            violations.require(
                length_within(name, NAME_MIN, NAME_MAX),
                NAME,
                "Name must be between 2 and 50 characters",
            );
        }
        if let Some(description) = self.description.as_deref() {
            violations.require(
                length_within(description, 0, DESCRIPTION_MAX),
                DESCRIPTION,
                "Description must not exceed 200 characters",
            );
        }
        violations.into_body_result()
    }
}

/// Body of `POST /api/example` on success.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExampleCreated {
    #[schema(example = "Example created successfully")]
    pub message: String,
    pub name: String,
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Body of `GET /api/example/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExampleResource {
    pub id: String,
    #[schema(example = "Resource found")]
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Short service summary.
#[utoipa::path(
    get,
    path = "/api/health",
    tags = ["example"],
    responses((status = 200, description = "Service summary", body = ApiHealthResponse))
)]
pub async fn api_health(state: web::Data<HttpState>) -> web::Json<ApiHealthResponse> {
    web::Json(ApiHealthResponse::at(state.clock.utc()))
}

/// Service summary with host details.
#[utoipa::path(
    get,
    path = "/api/health/detailed",
    tags = ["example"],
    responses((status = 200, description = "Service and host summary", body = ApiHealthDetailedResponse))
)]
pub async fn api_health_detailed(
    state: web::Data<HttpState>,
) -> web::Json<ApiHealthDetailedResponse> {
    web::Json(ApiHealthDetailedResponse {
        summary: ApiHealthResponse::at(state.clock.utc()),
        system: SystemInfo::collect(),
    })
}

/// Greeting used to check the service is reachable.
#[utoipa::path(
    get,
    path = "/api/example",
    tags = ["example"],
    responses((status = 200, description = "Greeting", body = ExampleGreeting))
)]
pub async fn get_example(state: web::Data<HttpState>) -> web::Json<ExampleGreeting> {
    web::Json(ExampleGreeting {
        message: format!("Hello from {APPLICATION_LABEL}!"),
        timestamp: state.clock.utc(),
        status: "success".to_owned(),
    })
}

/// Validate and echo an example payload.
#[utoipa::path(
    post,
    path = "/api/example",
    tags = ["example"],
    request_body = ExampleRequest,
    responses(
        (status = 201, description = "Example accepted", body = ExampleCreated),
        (status = 400, description = "Validation failed or body unreadable", body = ErrorResponse)
    )
)]
pub async fn create_example(
    state: web::Data<HttpState>,
    payload: web::Json<ExampleRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    request.validate()?;
    Ok(HttpResponse::Created().json(ExampleCreated {
        message: "Example created successfully".to_owned(),
        name: request.name.unwrap_or_default(),
        description: request.description,
        timestamp: state.clock.utc(),
    }))
}

/// Look up an example resource by identifier.
#[utoipa::path(
    get,
    path = "/api/example/{id}",
    tags = ["example"],
    params(("id" = String, Path, description = "Identifier of 1 to 10 characters")),
    responses(
        (status = 200, description = "Resource found", body = ExampleResource),
        (status = 400, description = "Identifier violates its constraint", body = ErrorResponse)
    )
)]
pub async fn get_example_by_id(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ExampleResource>> {
    let id = path.into_inner();
    let mut violations = Violations::new();
    violations.require(
        length_within(&id, 1, ID_MAX),
        ID,
        "size must be between 1 and 10",
    );
    violations.into_constraint_result()?;
    Ok(web::Json(ExampleResource {
        id,
        message: "Resource found".to_owned(),
        timestamp: state.clock.utc(),
    }))
}

/// Always fails with a labelled business error.
#[utoipa::path(
    get,
    path = "/api/example/error/business",
    tags = ["example"],
    responses((status = 400, description = "Business error", body = ErrorResponse))
)]
pub async fn business_error() -> ApiResult<HttpResponse> {
    let error = Error::business_rule_violation(BUSINESS_ERROR_MESSAGE)
        .try_with_status(400)
        .and_then(|err| err.try_with_error_type(BUSINESS_ERROR_TYPE));
    Err(match error {
        Ok(err) => err.into(),
        Err(invalid) => actix_web::error::ErrorInternalServerError(invalid),
    })
}

/// Always fails with an unclassified server error.
#[utoipa::path(
    get,
    path = "/api/example/error/runtime",
    tags = ["example"],
    responses((status = 500, description = "Unclassified failure", body = ErrorResponse))
)]
pub async fn runtime_error() -> ApiResult<HttpResponse> {
    Err(actix_web::error::ErrorInternalServerError(
        RUNTIME_ERROR_MESSAGE,
    ))
}
