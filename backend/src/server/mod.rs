//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};
use tracing::info;

#[cfg(debug_assertions)]
use boilerplate::ApiDoc;
use boilerplate::domain::ApplicationDetailsService;
use boilerplate::domain::ports::{ApplicationStatus, FixtureApplicationDetailsRepository};
use boilerplate::inbound::http::error::ErrorTranslator;
use boilerplate::inbound::http::health::HealthState;
use boilerplate::inbound::http::routing::{configure, not_found};
use boilerplate::inbound::http::state::HttpState;
use boilerplate::outbound::persistence::DieselApplicationDetailsRepository;
use boilerplate::{ErrorBoundary, Trace};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

/// Build the application status service based on configuration.
///
/// Uses the Diesel repository when a pool is available, otherwise an empty
/// fixture repository so every lookup yields the fallback snapshot.
fn build_application_status(
    config: &ServerConfig,
    clock: Arc<dyn Clock>,
) -> Arc<dyn ApplicationStatus> {
    let environment = config.environment.clone();
    match &config.db_pool {
        Some(pool) => Arc::new(
            ApplicationDetailsService::new(
                Arc::new(DieselApplicationDetailsRepository::new(pool.clone())),
                clock,
            )
            .with_current_environment(environment),
        ),
        None => {
            info!("no database configured; serving fallback application details");
            Arc::new(
                ApplicationDetailsService::new(
                    Arc::new(FixtureApplicationDetailsRepository::default()),
                    clock,
                )
                .with_current_environment(environment),
            )
        }
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    clock: Arc<dyn Clock>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        clock,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(ErrorBoundary::new(ErrorTranslator::default(), clock))
        .wrap(Trace)
        .configure(configure)
        .default_service(web::to(not_found));

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] containing binding, environment and optional pool.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let application = build_application_status(&config, Arc::clone(&clock));
    let http_state = web::Data::new(HttpState::new(application, Arc::clone(&clock)));
    let bind_addr = config.bind_addr;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            clock: Arc::clone(&clock),
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "server listening");
    health_state.mark_ready();
    Ok(server)
}
