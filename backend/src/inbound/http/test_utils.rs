//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;
use chrono::{TimeZone, Utc};

use crate::domain::ports::ApplicationStatus;
use crate::inbound::http::state::HttpState;
use crate::test_support::FixtureClock;

/// Clock frozen at 2025-01-02T03:04:05Z.
pub fn fixture_clock() -> FixtureClock {
    FixtureClock::new(
        Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5)
            .single()
            .expect("valid fixture timestamp"),
    )
}

/// Wrap a port implementation (usually a mock) in handler state.
pub fn http_state(application: impl ApplicationStatus + 'static) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(application),
        Arc::new(fixture_clock()),
    ))
}
