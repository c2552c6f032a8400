//! Request validation types shared by inbound HTTP adapters.
//!
//! Handlers collect field violations into a [`ValidationFailure`] and return
//! it; the error translator renders it. Extractor deserialization failures are
//! classified here into [`ParameterProblem`]s.

use std::fmt;

use actix_web::ResponseError;
use actix_web::http::StatusCode;

/// Newtype wrapper for request field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

/// One failed constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    field: String,
    message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Where the violated values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Fields of a decoded request body.
    Body,
    /// Path or query values checked against a constraint.
    Constraint,
}

/// Rejected request carrying every violation found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    kind: ViolationKind,
    violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    pub fn body(violations: Vec<FieldViolation>) -> Self {
        Self {
            kind: ViolationKind::Body,
            violations,
        }
    }

    pub fn constraint(violations: Vec<FieldViolation>) -> Self {
        Self {
            kind: ViolationKind::Constraint,
            violations,
        }
    }

    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Client-facing detail lines.
    ///
    /// Body violations report the bare message; constraint violations are
    /// prefixed with the field name (`id: size must be between 1 and 10`).
    pub fn details(&self) -> Vec<String> {
        self.violations
            .iter()
            .map(|v| match self.kind {
                ViolationKind::Body => v.message.clone(),
                ViolationKind::Constraint => format!("{}: {}", v.field, v.message),
            })
            .collect()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request validation failed: {}", self.details().join("; "))
    }
}

impl std::error::Error for ValidationFailure {}

impl ResponseError for ValidationFailure {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

/// Accumulates violations so every failing field is reported at once.
#[derive(Debug, Default)]
pub(crate) struct Violations(Vec<FieldViolation>);

impl Violations {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field` unless `holds` is true.
    pub(crate) fn require(&mut self, holds: bool, field: FieldName, message: &str) {
        if !holds {
            self.0.push(FieldViolation::new(field.as_str(), message));
        }
    }

    pub(crate) fn into_body_result(self) -> Result<(), ValidationFailure> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure::body(self.0))
        }
    }

    pub(crate) fn into_constraint_result(self) -> Result<(), ValidationFailure> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure::constraint(self.0))
        }
    }
}

/// Character-count bounds check used by request DTO validation.
pub(crate) fn length_within(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.chars().count())
}

/// Classified path or query deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterProblem {
    /// A required parameter was absent.
    Missing { name: String },
    /// A parameter could not be read as the expected type.
    TypeMismatch { parameter: String, expected: String },
    /// Any other unreadable parameter set.
    Malformed,
}

fn backticked(detail: &str) -> Option<&str> {
    let start = detail.find('`')? + 1;
    let len = detail[start..].find('`')?;
    Some(&detail[start..start + len])
}

/// Classify a serde deserialization message from a path or query extractor.
///
/// `source` names the parameter when the message does not.
pub fn classify_parameter_failure(source: &str, detail: &str) -> ParameterProblem {
    if let Some(rest) = detail.find("missing field").map(|i| &detail[i..]) {
        if let Some(name) = backticked(rest) {
            return ParameterProblem::Missing {
                name: name.to_owned(),
            };
        }
    }
    if detail.contains("invalid type") || detail.contains("invalid value") {
        if let Some(expected) = detail.rsplit("expected ").next().filter(|e| *e != detail) {
            let parameter = backticked(detail).unwrap_or(source);
            return ParameterProblem::TypeMismatch {
                parameter: parameter.to_owned(),
                expected: expected.trim().to_owned(),
            };
        }
    }
    ParameterProblem::Malformed
}
