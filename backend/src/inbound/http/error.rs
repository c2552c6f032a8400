//! Global error translation for the HTTP adapter.
//!
//! Every error raised while serving a request (domain failures, extractor
//! rejections, routing misses, infrastructure faults) is turned into one
//! [`ErrorResponse`] shape here. [`ErrorTranslator`] walks an ordered rule
//! table; the first rule that recognises the error wins and the last rule
//! accepts anything. The table is applied by the
//! [`ErrorBoundary`](crate::middleware::ErrorBoundary) middleware.

use std::fmt;

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::ports::ApplicationDetailsRepositoryError;
use crate::domain::{Error, TraceId};
use crate::outbound::persistence::PoolError;

use super::validation::{
    ParameterProblem, ValidationFailure, ViolationKind, classify_parameter_failure,
};

/// Convenient result alias for HTTP handlers.
///
/// Handlers may raise any [`ResponseError`]; `?` boxes it into an
/// [`actix_web::Error`] which the translator inspects by type.
pub type ApiResult<T> = Result<T, actix_web::Error>;

const INTERNAL_LABEL: &str = "Internal Server Error";
const INTERNAL_MESSAGE: &str = "Internal server error";
const BAD_REQUEST_LABEL: &str = "Bad Request";

/// Uniform error body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[schema(example = 400)]
    pub status: u16,
    #[schema(example = "INVALID_PAYLOAD")]
    pub error: String,
    #[schema(example = "Application name cannot be null or empty")]
    pub message: String,
    #[schema(example = "/health/validate")]
    pub path: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "00000000-0000-0000-0000-000000000000")]
    pub trace_id: Option<String>,
}

/// Routing failures raised by the default services.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoutingError {
    #[error("no route matches the request")]
    NotFound,
    #[error("method {method} is not allowed for this resource")]
    MethodNotAllowed { method: String },
}

impl ResponseError for RoutingError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        self.status()
            .and_then(|status| StatusCode::from_u16(status).ok())
            .unwrap_or(StatusCode::BAD_REQUEST)
    }
}

impl ResponseError for ApplicationDetailsRepositoryError {}

impl ResponseError for PoolError {}

/// Log severity attached to a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Client-caused, expected failures.
    Warn,
    /// Infrastructure and unclassified failures.
    Error,
}

/// Outcome of a matching rule, before request context is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    status: StatusCode,
    label: String,
    message: String,
    details: Vec<String>,
    severity: Severity,
    trace_id: Option<String>,
}

impl Translation {
    fn new(status: StatusCode, label: impl Into<String>, message: impl Into<String>) -> Self {
        let severity = if status.is_server_error() {
            Severity::Error
        } else {
            Severity::Warn
        };
        Self {
            status,
            label: label.into(),
            message: message.into(),
            details: Vec::new(),
            severity,
            trace_id: None,
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, BAD_REQUEST_LABEL, message)
    }

    fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_LABEL, INTERNAL_MESSAGE)
    }

    fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

/// One entry of the translation table.
#[derive(Clone, Copy)]
pub struct TranslationRule {
    name: &'static str,
    translate: fn(&actix_web::Error) -> Option<Translation>,
}

impl TranslationRule {
    pub const fn new(
        name: &'static str,
        translate: fn(&actix_web::Error) -> Option<Translation>,
    ) -> Self {
        Self { name, translate }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for TranslationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationRule")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn domain_error(err: &actix_web::Error) -> Option<Translation> {
    let domain = err.as_error::<Error>()?;
    let mut translation = Translation::new(domain.status_code(), domain.label(), domain.message());
    translation.trace_id = domain.trace_id().map(str::to_owned);
    Some(translation)
}

fn validation_failure(err: &actix_web::Error) -> Option<Translation> {
    let failure = err.as_error::<ValidationFailure>()?;
    let (label, summary) = match failure.kind() {
        ViolationKind::Body => ("Validation Error", "Invalid request parameters"),
        ViolationKind::Constraint => ("Constraint Violation", "Invalid input data"),
    };
    let details = failure.details();
    let message = format!("{summary}: {}", details.join("; "));
    Some(Translation::new(StatusCode::BAD_REQUEST, label, message).with_details(details))
}

fn unreadable_body(err: &actix_web::Error) -> Option<Translation> {
    err.as_error::<JsonPayloadError>()?;
    Some(Translation::bad_request("Invalid request body format"))
}

fn parameter_problem(err: &actix_web::Error) -> Option<ParameterProblem> {
    if let Some(query) = err.as_error::<QueryPayloadError>() {
        return Some(classify_parameter_failure("query", &query.to_string()));
    }
    err.as_error::<PathError>()
        .map(|path| classify_parameter_failure("path", &path.to_string()))
}

fn missing_parameter(err: &actix_web::Error) -> Option<Translation> {
    match parameter_problem(err)? {
        ParameterProblem::Missing { name } => Some(Translation::bad_request(format!(
            "Missing required parameter: {name}"
        ))),
        _ => None,
    }
}

fn parameter_type_mismatch(err: &actix_web::Error) -> Option<Translation> {
    match parameter_problem(err)? {
        ParameterProblem::TypeMismatch {
            parameter,
            expected,
        } => Some(Translation::bad_request(format!(
            "Parameter '{parameter}' should be of type {expected}"
        ))),
        ParameterProblem::Malformed => {
            Some(Translation::bad_request("Invalid request parameters"))
        }
        ParameterProblem::Missing { .. } => None,
    }
}

fn method_not_allowed(err: &actix_web::Error) -> Option<Translation> {
    match err.as_error::<RoutingError>()? {
        RoutingError::MethodNotAllowed { method } => Some(Translation::new(
            StatusCode::METHOD_NOT_ALLOWED,
            "Method Not Allowed",
            format!("HTTP method '{method}' is not supported for this endpoint"),
        )),
        RoutingError::NotFound => None,
    }
}

fn not_found(err: &actix_web::Error) -> Option<Translation> {
    match err.as_error::<RoutingError>()? {
        RoutingError::NotFound => Some(Translation::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            "Endpoint not found",
        )),
        RoutingError::MethodNotAllowed { .. } => None,
    }
}

fn infrastructure(err: &actix_web::Error) -> Option<Translation> {
    let recognised = err.as_error::<ApplicationDetailsRepositoryError>().is_some()
        || err.as_error::<PoolError>().is_some();
    recognised.then(Translation::internal)
}

fn unclassified(_err: &actix_web::Error) -> Option<Translation> {
    Some(Translation::internal())
}

/// Ordered error translation table.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use boilerplate::domain::Error;
/// use boilerplate::inbound::http::error::ErrorTranslator;
/// use mockable::DefaultClock;
///
/// let translator = ErrorTranslator::default();
/// let err = actix_web::Error::from(Error::business_rule_violation("nope"));
/// let body = translator.translate(&err, "/health/business-rule", &DefaultClock);
/// assert_eq!(body.status, StatusCode::BAD_REQUEST.as_u16());
/// assert_eq!(body.error, "BUSINESS_RULE_VIOLATION");
/// ```
#[derive(Debug, Clone)]
pub struct ErrorTranslator {
    rules: Vec<TranslationRule>,
}

impl Default for ErrorTranslator {
    fn default() -> Self {
        Self {
            rules: vec![
                TranslationRule::new("domain_error", domain_error),
                TranslationRule::new("validation_failure", validation_failure),
                TranslationRule::new("unreadable_body", unreadable_body),
                TranslationRule::new("missing_parameter", missing_parameter),
                TranslationRule::new("parameter_type_mismatch", parameter_type_mismatch),
                TranslationRule::new("method_not_allowed", method_not_allowed),
                TranslationRule::new("not_found", not_found),
                TranslationRule::new("infrastructure", infrastructure),
                TranslationRule::new("unclassified", unclassified),
            ],
        }
    }
}

impl ErrorTranslator {
    /// Rules in evaluation order.
    pub fn rules(&self) -> &[TranslationRule] {
        &self.rules
    }

    /// Find the first matching rule and its translation.
    pub fn classify(&self, err: &actix_web::Error) -> (&'static str, Translation) {
        self.rules
            .iter()
            .find_map(|rule| (rule.translate)(err).map(|t| (rule.name, t)))
            .unwrap_or_else(|| ("unclassified", Translation::internal()))
    }

    /// Translate `err` into the response body for a request to `path`,
    /// logging the underlying cause.
    pub fn translate(
        &self,
        err: &actix_web::Error,
        path: &str,
        clock: &dyn Clock,
    ) -> ErrorResponse {
        let (rule, translation) = self.classify(err);
        let trace_id = translation
            .trace_id
            .clone()
            .or_else(|| TraceId::current().map(|id| id.to_string()));

        match translation.severity {
            Severity::Warn => warn!(
                rule,
                path,
                status = translation.status.as_u16(),
                error = %err,
                "request failed"
            ),
            Severity::Error => error!(
                rule,
                path,
                status = translation.status.as_u16(),
                error = %err,
                "request failed"
            ),
        }

        ErrorResponse {
            status: translation.status.as_u16(),
            error: translation.label,
            message: translation.message,
            path: path.to_owned(),
            timestamp: clock.utc(),
            details: translation.details,
            trace_id,
        }
    }

    /// Build the HTTP response for a translated error.
    pub fn respond(&self, err: &actix_web::Error, path: &str, clock: &dyn Clock) -> HttpResponse {
        let body = self.translate(err, path, clock);
        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(body)
    }
}

#[cfg(test)]
mod tests;
