//! Application details record.
//!
//! One row per provisioned application build. Rows are written by external
//! provisioning and only ever read here; the latest row (highest identifier)
//! describes the running application.

use chrono::{DateTime, Utc};

/// Maximum length of an application name, in characters.
pub const APPLICATION_NAME_MAX: usize = 100;
/// Maximum length of a version string, in characters.
pub const VERSION_MAX: usize = 50;
/// Maximum length of a description, in characters.
pub const DESCRIPTION_MAX: usize = 500;
/// Maximum length of an environment name, in characters.
pub const ENVIRONMENT_MAX: usize = 50;
/// Maximum length of a build number, in characters.
pub const BUILD_NUMBER_MAX: usize = 50;

/// Validation errors returned by [`ApplicationDetails::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicationDetailsValidationError {
    /// Identifiers are assigned from 1 upwards.
    #[error("application details id must be positive, got {id}")]
    NonPositiveId { id: i64 },
    #[error("application name must not be empty")]
    EmptyApplicationName,
    #[error("application name must be at most {max} characters")]
    ApplicationNameTooLong { max: usize },
    #[error("version must not be empty")]
    EmptyVersion,
    #[error("version must be at most {max} characters")]
    VersionTooLong { max: usize },
    #[error("description must be at most {max} characters")]
    DescriptionTooLong { max: usize },
    #[error("environment must be at most {max} characters")]
    EnvironmentTooLong { max: usize },
    #[error("build number must be at most {max} characters")]
    BuildNumberTooLong { max: usize },
}

/// Unvalidated field bundle used to build [`ApplicationDetails`].
#[derive(Debug, Clone)]
pub struct ApplicationDetailsDraft {
    pub id: i64,
    pub application_name: String,
    pub version: String,
    pub description: Option<String>,
    pub environment: Option<String>,
    pub build_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated application details record.
///
/// ## Invariants
/// - `id` is positive.
/// - `application_name` and `version` are non-empty once trimmed.
/// - Every text field respects its column length limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDetails {
    id: i64,
    application_name: String,
    version: String,
    description: Option<String>,
    environment: Option<String>,
    build_number: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn exceeds(value: &str, max: usize) -> bool {
    value.chars().count() > max
}

fn check_optional(
    value: Option<&str>,
    max: usize,
    error: fn(usize) -> ApplicationDetailsValidationError,
) -> Result<(), ApplicationDetailsValidationError> {
    match value {
        Some(text) if exceeds(text, max) => Err(error(max)),
        _ => Ok(()),
    }
}

impl ApplicationDetails {
    /// Validate a draft and build the record.
    ///
    /// # Examples
    /// ```
    /// use boilerplate::domain::{ApplicationDetails, ApplicationDetailsDraft};
    /// use chrono::Utc;
    ///
    /// let now = Utc::now();
    /// let details = ApplicationDetails::new(ApplicationDetailsDraft {
    ///     id: 1,
    ///     application_name: "boilerplate".into(),
    ///     version: "1.2.0".into(),
    ///     description: None,
    ///     environment: Some("staging".into()),
    ///     build_number: None,
    ///     created_at: now,
    ///     updated_at: now,
    /// })
    /// .expect("valid draft");
    /// assert_eq!(details.version(), "1.2.0");
    /// ```
    pub fn new(draft: ApplicationDetailsDraft) -> Result<Self, ApplicationDetailsValidationError> {
        use ApplicationDetailsValidationError as E;

        if draft.id <= 0 {
            return Err(E::NonPositiveId { id: draft.id });
        }
        if draft.application_name.trim().is_empty() {
            return Err(E::EmptyApplicationName);
        }
        if exceeds(&draft.application_name, APPLICATION_NAME_MAX) {
            return Err(E::ApplicationNameTooLong {
                max: APPLICATION_NAME_MAX,
            });
        }
        if draft.version.trim().is_empty() {
            return Err(E::EmptyVersion);
        }
        if exceeds(&draft.version, VERSION_MAX) {
            return Err(E::VersionTooLong { max: VERSION_MAX });
        }
        check_optional(draft.description.as_deref(), DESCRIPTION_MAX, |max| {
            E::DescriptionTooLong { max }
        })?;
        check_optional(draft.environment.as_deref(), ENVIRONMENT_MAX, |max| {
            E::EnvironmentTooLong { max }
        })?;
        check_optional(draft.build_number.as_deref(), BUILD_NUMBER_MAX, |max| {
            E::BuildNumberTooLong { max }
        })?;

        let ApplicationDetailsDraft {
            id,
            application_name,
            version,
            description,
            environment,
            build_number,
            created_at,
            updated_at,
        } = draft;
        Ok(Self {
            id,
            application_name,
            version,
            description,
            environment,
            build_number,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    pub fn build_number(&self) -> Option<&str> {
        self.build_number.as_deref()
    }

    /// Creation timestamp, set once by provisioning.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Timestamp of the last mutation.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
