//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Adapters translate between Diesel rows and domain types and map driver
//! failures onto port errors. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module.
//!
//! # Example
//!
//! ```no_run
//! use boilerplate::outbound::persistence::{
//!     DbPool, DieselApplicationDetailsRepository, PoolConfig,
//! };
//!
//! # fn demo() -> Result<(), boilerplate::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/boilerplate"))?;
//! let repo = DieselApplicationDetailsRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_application_details_repository;
mod diesel_error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_application_details_repository::DieselApplicationDetailsRepository;
pub use pool::{DbPool, DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, PoolConfig, PoolError};
