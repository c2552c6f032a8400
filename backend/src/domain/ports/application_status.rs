//! Driving port for application status queries and request checks.
//!
//! HTTP handlers depend on this port rather than on the service so tests can
//! swap in a mock without a repository behind it.

use async_trait::async_trait;

use crate::domain::{Error, HealthCheckResponse};

/// Use-case port backing the health endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationStatus: Send + Sync {
    /// Health snapshot for the latest record, or the fallback.
    ///
    /// Never fails: store errors degrade to the fallback snapshot.
    async fn health_info(&self) -> HealthCheckResponse;

    /// Version of the latest record, or the default version.
    async fn current_version(&self) -> String;

    /// Check an application name supplied by a caller.
    fn validate_application_name(&self, name: &str) -> Result<(), Error>;

    /// Reject environment access that the current environment forbids.
    fn check_business_rule(&self, environment: &str) -> Result<(), Error>;
}
