//! Internal Diesel row structs.
//!
//! Row types never leave the persistence layer; they are converted into
//! validated domain records before being returned through a port.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{ApplicationDetails, ApplicationDetailsDraft, ApplicationDetailsValidationError};

use super::schema::application_details;

/// Row struct for reading from the `application_details` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = application_details)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ApplicationDetailsRow {
    pub id: i64,
    pub application_name: String,
    pub version: String,
    pub description: Option<String>,
    pub environment: Option<String>,
    pub build_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ApplicationDetailsRow> for ApplicationDetails {
    type Error = ApplicationDetailsValidationError;

    fn try_from(row: ApplicationDetailsRow) -> Result<Self, Self::Error> {
        ApplicationDetails::new(ApplicationDetailsDraft {
            id: row.id,
            application_name: row.application_name,
            version: row.version,
            description: row.description,
            environment: row.environment,
            build_number: row.build_number,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
