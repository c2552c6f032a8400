//! Domain ports defining the edges of the hexagon.

mod macros;
pub(crate) use macros::define_port_error;

mod application_details_repository;
mod application_status;

#[cfg(test)]
pub use application_details_repository::MockApplicationDetailsRepository;
pub use application_details_repository::{
    ApplicationDetailsRepository, ApplicationDetailsRepositoryError,
    FixtureApplicationDetailsRepository,
};
#[cfg(test)]
pub use application_status::MockApplicationStatus;
pub use application_status::ApplicationStatus;
