//! PostgreSQL-backed application details read adapter.

use async_trait::async_trait;
use diesel::dsl::{AsSelect, SqlTypeOf};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ApplicationDetails;
use crate::domain::ports::{ApplicationDetailsRepository, ApplicationDetailsRepositoryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::ApplicationDetailsRow;
use super::pool::DbPool;
use super::schema::application_details;

/// Diesel-backed implementation of the application details port.
#[derive(Clone)]
pub struct DieselApplicationDetailsRepository {
    pool: DbPool,
}

impl DieselApplicationDetailsRepository {
    /// Create a repository over the given pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use boilerplate::outbound::persistence::{
    ///     DbPool, DieselApplicationDetailsRepository, PoolConfig,
    /// };
    ///
    /// # async fn demo() -> Result<(), boilerplate::outbound::persistence::PoolError> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/boilerplate"))?;
    /// let repo = DieselApplicationDetailsRepository::new(pool);
    /// # let _ = repo;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

type LatestQuery =
    application_details::BoxedQuery<'static, Pg, SqlTypeOf<AsSelect<ApplicationDetailsRow, Pg>>>;

/// Newest row by identity; `updated_at` plays no part in the ordering.
fn latest_query() -> LatestQuery {
    application_details::table
        .select(ApplicationDetailsRow::as_select())
        .order_by(application_details::id.desc())
        .limit(1)
        .into_boxed()
}

fn row_to_domain(
    row: ApplicationDetailsRow,
) -> Result<ApplicationDetails, ApplicationDetailsRepositoryError> {
    let id = row.id;
    ApplicationDetails::try_from(row).map_err(|err| {
        warn!(row_id = id, error = %err, "stored application details row breaks record rules");
        ApplicationDetailsRepositoryError::query(format!(
            "invalid application details row {id}: {err}"
        ))
    })
}

#[async_trait]
impl ApplicationDetailsRepository for DieselApplicationDetailsRepository {
    async fn find_latest(
        &self,
    ) -> Result<Option<ApplicationDetails>, ApplicationDetailsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ApplicationDetailsRow> = latest_query()
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_domain).transpose()
    }
}
