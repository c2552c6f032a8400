//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::ApplicationStatus;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub application: Arc<dyn ApplicationStatus>,
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Construct state from the application status port and a clock.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use boilerplate::domain::ApplicationDetailsService;
    /// use boilerplate::domain::ports::FixtureApplicationDetailsRepository;
    /// use boilerplate::inbound::http::state::HttpState;
    /// use mockable::DefaultClock;
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let service = ApplicationDetailsService::new(
    ///     Arc::new(FixtureApplicationDetailsRepository::default()),
    ///     clock.clone(),
    /// );
    /// let _state = HttpState::new(Arc::new(service), clock);
    /// ```
    pub fn new(application: Arc<dyn ApplicationStatus>, clock: Arc<dyn Clock>) -> Self {
        Self { application, clock }
    }
}
