//! Health check read model and its mapping from application details.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use super::ApplicationDetails;

/// Status reported while the service is serving requests.
pub const STATUS_UP: &str = "UP";
/// Application name reported when no record is available.
pub const DEFAULT_APPLICATION_NAME: &str = "boilerplate";
/// Version reported when no record is available.
pub const DEFAULT_VERSION: &str = "1.0.0";
/// Environment reported when no record is available.
pub const DEFAULT_ENVIRONMENT: &str = "development";
/// Description reported when no record is available.
pub const FALLBACK_DESCRIPTION: &str = "In memory db not yet set";

/// Health snapshot returned by `GET /health`.
///
/// Built fresh on every call; the timestamp is taken from the injected clock
/// at mapping time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    pub status: String,
    pub application: String,
    pub version: String,
    pub environment: Option<String>,
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl HealthCheckResponse {
    /// Map a record to a response with status `UP`.
    ///
    /// # Examples
    /// ```
    /// use boilerplate::domain::{ApplicationDetails, ApplicationDetailsDraft, HealthCheckResponse};
    /// use chrono::Utc;
    /// use mockable::DefaultClock;
    ///
    /// let now = Utc::now();
    /// let details = ApplicationDetails::new(ApplicationDetailsDraft {
    ///     id: 3,
    ///     application_name: "billing".into(),
    ///     version: "4.0.0".into(),
    ///     description: None,
    ///     environment: None,
    ///     build_number: None,
    ///     created_at: now,
    ///     updated_at: now,
    /// })
    /// .expect("valid draft");
    ///
    /// let response = HealthCheckResponse::from_details(&details, &DefaultClock);
    /// assert_eq!(response.status, "UP");
    /// assert_eq!(response.application, "billing");
    /// ```
    pub fn from_details(details: &ApplicationDetails, clock: &dyn Clock) -> Self {
        Self::from_details_with_status(details, STATUS_UP, clock)
    }

    /// Map a record to a response carrying an explicit status.
    pub fn from_details_with_status(
        details: &ApplicationDetails,
        status: impl Into<String>,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            status: status.into(),
            application: details.application_name().to_owned(),
            version: details.version().to_owned(),
            environment: details.environment().map(str::to_owned),
            description: details.description().map(str::to_owned),
            timestamp: clock.utc(),
        }
    }

    /// Fixed response used when the store is empty or unreachable.
    pub fn fallback(clock: &dyn Clock) -> Self {
        Self {
            status: STATUS_UP.to_owned(),
            application: DEFAULT_APPLICATION_NAME.to_owned(),
            version: DEFAULT_VERSION.to_owned(),
            environment: Some(DEFAULT_ENVIRONMENT.to_owned()),
            description: Some(FALLBACK_DESCRIPTION.to_owned()),
            timestamp: clock.utc(),
        }
    }
}
