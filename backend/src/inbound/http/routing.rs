//! Route table for the HTTP adapter.
//!
//! Each path is registered as a resource whose default service rejects
//! unsupported methods with [`RoutingError::MethodNotAllowed`]; unknown paths
//! are answered by [`not_found`], which the app installs as its default
//! service. Both are rendered by the error boundary like any other failure.

use actix_web::{HttpRequest, Resource, web};

use crate::inbound::http::error::RoutingError;
use crate::inbound::http::{example, health};

/// Reject a request whose path exists but whose method does not.
pub async fn method_not_allowed(req: HttpRequest) -> Result<&'static str, RoutingError> {
    Err(RoutingError::MethodNotAllowed {
        method: req.method().to_string(),
    })
}

/// Reject a request that matched no route.
pub async fn not_found() -> Result<&'static str, RoutingError> {
    Err(RoutingError::NotFound)
}

fn resource(path: &str) -> Resource {
    web::resource(path).default_service(web::to(method_not_allowed))
}

/// Register every endpoint.
///
/// Path extraction failures are passed through unwrapped so the translator
/// can classify them.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use boilerplate::inbound::http::routing::{configure, not_found};
///
/// let _app = App::new()
///     .configure(configure)
///     .default_service(web::to(not_found));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(|err, _req| err.into()))
        .service(resource("/health").route(web::get().to(health::health_check)))
        .service(
            resource("/health/validate").route(web::get().to(health::validate_application_name)),
        )
        .service(
            resource("/health/business-rule").route(web::get().to(health::check_business_rule)),
        )
        .service(resource("/health/version").route(web::get().to(health::current_version)))
        .service(resource("/health/live").route(web::get().to(health::live)))
        .service(resource("/health/ready").route(web::get().to(health::ready)))
        .service(resource("/api/health").route(web::get().to(example::api_health)))
        .service(
            resource("/api/health/detailed").route(web::get().to(example::api_health_detailed)),
        )
        .service(
            resource("/api/example")
                .route(web::get().to(example::get_example))
                .route(web::post().to(example::create_example)),
        )
        .service(
            resource("/api/example/error/business")
                .route(web::get().to(example::business_error)),
        )
        .service(
            resource("/api/example/error/runtime").route(web::get().to(example::runtime_error)),
        )
        .service(resource("/api/example/{id}").route(web::get().to(example::get_example_by_id)));
}
