//! Application status service.
//!
//! Implements [`ApplicationStatus`] over the application details repository.
//! Lookups degrade to a fixed fallback when the store is empty or failing;
//! that is the only place where errors are absorbed rather than propagated.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::ports::{
    ApplicationDetailsRepository, ApplicationDetailsRepositoryError, ApplicationStatus,
};
use crate::domain::{
    APPLICATION_NAME_MAX, ApplicationDetails, DEFAULT_ENVIRONMENT, DEFAULT_VERSION, Error,
    HealthCheckResponse,
};

/// Environment whose access is guarded by the business rule.
pub const PRODUCTION_ENVIRONMENT: &str = "production";

const NAME_BLANK: &str = "Application name cannot be null or empty";
const NAME_TOO_LONG: &str = "Application name cannot exceed 100 characters";
const NAME_BAD_CHARS: &str =
    "Application name can only contain letters, numbers, hyphens, and underscores";
const PRODUCTION_FROM_DEVELOPMENT: &str =
    "Cannot access production environment from development mode";

/// Application status service backed by a details repository.
#[derive(Clone)]
pub struct ApplicationDetailsService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    current_environment: String,
}

impl<R> ApplicationDetailsService<R> {
    /// Create a service running in the default `development` environment.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            clock,
            current_environment: DEFAULT_ENVIRONMENT.to_owned(),
        }
    }

    /// Override the environment the service believes it runs in.
    pub fn with_current_environment(mut self, environment: impl Into<String>) -> Self {
        self.current_environment = environment.into();
        self
    }

    /// Environment used by the business rule.
    pub fn current_environment(&self) -> &str {
        &self.current_environment
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

impl<R> ApplicationDetailsService<R>
where
    R: ApplicationDetailsRepository,
{
    /// Latest record, with store failures logged and treated as absence.
    async fn latest_or_none(&self, purpose: &'static str) -> Option<ApplicationDetails> {
        match self.repository.find_latest().await {
            Ok(Some(details)) => Some(details),
            Ok(None) => {
                warn!(purpose, "no application details found; using defaults");
                None
            }
            Err(err) => {
                log_repository_error(purpose, &err);
                None
            }
        }
    }
}

fn log_repository_error(purpose: &'static str, err: &ApplicationDetailsRepositoryError) {
    error!(purpose, error = %err, "application details lookup failed; using defaults");
}

#[async_trait]
impl<R> ApplicationStatus for ApplicationDetailsService<R>
where
    R: ApplicationDetailsRepository,
{
    async fn health_info(&self) -> HealthCheckResponse {
        info!("fetching application health information");
        match self.latest_or_none("health_info").await {
            Some(details) => HealthCheckResponse::from_details(&details, self.clock.as_ref()),
            None => HealthCheckResponse::fallback(self.clock.as_ref()),
        }
    }

    async fn current_version(&self) -> String {
        self.latest_or_none("current_version")
            .await
            .map_or_else(|| DEFAULT_VERSION.to_owned(), |d| d.version().to_owned())
    }

    fn validate_application_name(&self, name: &str) -> Result<(), Error> {
        if name.trim().is_empty() {
            return Err(Error::invalid_payload(NAME_BLANK));
        }
        if name.chars().count() > APPLICATION_NAME_MAX {
            return Err(Error::invalid_payload(NAME_TOO_LONG));
        }
        if !name.chars().all(is_name_char) {
            return Err(Error::invalid_payload(NAME_BAD_CHARS));
        }
        Ok(())
    }

    fn check_business_rule(&self, environment: &str) -> Result<(), Error> {
        if environment == PRODUCTION_ENVIRONMENT && self.current_environment == DEFAULT_ENVIRONMENT
        {
            warn!(environment, "production access attempted from development");
            return Err(Error::business_rule_violation(PRODUCTION_FROM_DEVELOPMENT));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "application_details_service_tests.rs"]
mod tests;
