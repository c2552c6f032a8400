//! Request middleware.
//!
//! - [`Trace`]: request-scoped trace identifier and request span.
//! - [`ErrorBoundary`]: uniform error responses via the translation table.

pub mod error_boundary;
pub mod trace;

pub use error_boundary::ErrorBoundary;
pub use trace::Trace;
