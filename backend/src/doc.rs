//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the uniform [`ErrorResponse`] body and the domain schema wrappers
//! from [`crate::inbound::http::schemas`].
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::example::{
    ApiHealthDetailedResponse, ApiHealthResponse, ExampleCreated, ExampleGreeting,
    ExampleRequest, ExampleResource, SystemInfo,
};
use crate::inbound::http::health::VersionResponse;
use crate::inbound::http::schemas::{ErrorCodeSchema, HealthCheckResponseSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Boilerplate backend API",
        description = "Health checks, request validation examples and error handling demonstrations."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::health_check,
        crate::inbound::http::health::validate_application_name,
        crate::inbound::http::health::check_business_rule,
        crate::inbound::http::health::current_version,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::example::api_health,
        crate::inbound::http::example::api_health_detailed,
        crate::inbound::http::example::get_example,
        crate::inbound::http::example::create_example,
        crate::inbound::http::example::get_example_by_id,
        crate::inbound::http::example::business_error,
        crate::inbound::http::example::runtime_error,
    ),
    components(schemas(
        ErrorResponse,
        ErrorCodeSchema,
        HealthCheckResponseSchema,
        VersionResponse,
        ApiHealthResponse,
        ApiHealthDetailedResponse,
        SystemInfo,
        ExampleGreeting,
        ExampleRequest,
        ExampleCreated,
        ExampleResource,
    )),
    tags(
        (name = "health", description = "Application health and request checks"),
        (name = "example", description = "Demonstration endpoints")
    )
)]
pub struct ApiDoc;
