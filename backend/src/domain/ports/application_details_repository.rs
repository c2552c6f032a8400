//! Driven port for reading application details records.
//!
//! Records are provisioned externally; the service only needs the latest one.

use async_trait::async_trait;

use crate::domain::ApplicationDetails;

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading application details.
    pub enum ApplicationDetailsRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "application details connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "application details query failed: {message}",
    }
}

/// Port for reading application details.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationDetailsRepository: Send + Sync {
    /// Return the record with the highest identifier, if any.
    ///
    /// An empty table yields `Ok(None)` rather than an error.
    async fn find_latest(
        &self,
    ) -> Result<Option<ApplicationDetails>, ApplicationDetailsRepositoryError>;
}

/// In-memory repository used when no database is configured.
///
/// Holds at most one record, which stands in for the latest row.
#[derive(Debug, Default, Clone)]
pub struct FixtureApplicationDetailsRepository {
    latest: Option<ApplicationDetails>,
}

impl FixtureApplicationDetailsRepository {
    /// Repository that always reports `record` as the latest row.
    pub fn with_record(record: ApplicationDetails) -> Self {
        Self {
            latest: Some(record),
        }
    }
}

#[async_trait]
impl ApplicationDetailsRepository for FixtureApplicationDetailsRepository {
    async fn find_latest(
        &self,
    ) -> Result<Option<ApplicationDetails>, ApplicationDetailsRepositoryError> {
        Ok(self.latest.clone())
    }
}
