//! Health endpoints.
//!
//! ```text
//! GET /health
//! GET /health/validate?applicationName=billing
//! GET /health/business-rule?environment=staging
//! GET /health/version
//! GET /health/live
//! GET /health/ready
//! ```
//!
//! The first four delegate to the [`ApplicationStatus`] port held in
//! [`HttpState`]; the probes report process state for orchestrators.
//!
//! [`ApplicationStatus`]: crate::domain::ports::ApplicationStatus

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::schemas::HealthCheckResponseSchema;
use crate::inbound::http::state::HttpState;

/// Readiness and liveness flags reported to orchestrators.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Query string for `GET /health/validate`.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ValidateNameQuery {
    /// Name to check; letters, digits, `-` and `_` only.
    pub application_name: String,
}

/// Query string for `GET /health/business-rule`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BusinessRuleQuery {
    /// Target environment, e.g. `production`.
    pub environment: String,
}

/// Body of `GET /health/version`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VersionResponse {
    #[schema(example = "1.0.0")]
    pub version: String,
}

fn plain_text(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(body)
}

/// Report the health of the latest provisioned application.
///
/// Falls back to a fixed snapshot when the store is empty or unreachable, so
/// this endpoint always answers 200.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    responses(
        (status = 200, description = "Health snapshot", body = HealthCheckResponseSchema),
        (status = 405, description = "Method not allowed", body = ErrorResponse)
    )
)]
pub async fn health_check(state: web::Data<HttpState>) -> HttpResponse {
    let info = state.application.health_info().await;
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(info)
}

/// Validate an application name supplied as a query parameter.
#[utoipa::path(
    get,
    path = "/health/validate",
    tags = ["health"],
    params(ValidateNameQuery),
    responses(
        (status = 200, description = "Name accepted", body = String, content_type = "text/plain"),
        (status = 400, description = "Name rejected or parameter missing", body = ErrorResponse)
    )
)]
pub async fn validate_application_name(
    state: web::Data<HttpState>,
    query: web::Query<ValidateNameQuery>,
) -> ApiResult<HttpResponse> {
    let name = query.into_inner().application_name;
    state.application.validate_application_name(&name)?;
    Ok(plain_text(format!(
        "Application name validation passed: {name}"
    )))
}

/// Check whether the requested environment may be accessed.
#[utoipa::path(
    get,
    path = "/health/business-rule",
    tags = ["health"],
    params(BusinessRuleQuery),
    responses(
        (status = 200, description = "Access allowed", body = String, content_type = "text/plain"),
        (status = 400, description = "Business rule violated", body = ErrorResponse)
    )
)]
pub async fn check_business_rule(
    state: web::Data<HttpState>,
    query: web::Query<BusinessRuleQuery>,
) -> ApiResult<HttpResponse> {
    let environment = query.into_inner().environment;
    state.application.check_business_rule(&environment)?;
    Ok(plain_text(format!(
        "Business rule validation passed for environment: {environment}"
    )))
}

/// Report the version of the latest provisioned application.
#[utoipa::path(
    get,
    path = "/health/version",
    tags = ["health"],
    responses((status = 200, description = "Current version", body = VersionResponse))
)]
pub async fn current_version(state: web::Data<HttpState>) -> web::Json<VersionResponse> {
    web::Json(VersionResponse {
        version: state.application.current_version().await,
    })
}

/// Readiness probe. Return 200 when dependencies are initialised and the server can handle traffic; return 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. Return 200 while the process is marked alive and 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}
