//! Behaviour tests for the HTTP surface.
//!
//! Each request is served by a freshly built app wired the same way as the
//! server binary: error boundary, trace middleware, route table and a
//! repository double standing in for Postgres.

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use actix_web::http::Method;
use actix_web::{App, test as actix_test, web};
use async_trait::async_trait;
use boilerplate::domain::ports::{
    ApplicationDetailsRepository, ApplicationDetailsRepositoryError, ApplicationStatus,
    FixtureApplicationDetailsRepository,
};
use boilerplate::domain::{
    ApplicationDetails, ApplicationDetailsDraft, ApplicationDetailsService, TRACE_ID_HEADER,
};
use boilerplate::inbound::http::health::HealthState;
use boilerplate::inbound::http::routing::{configure, not_found};
use boilerplate::inbound::http::state::HttpState;
use boilerplate::{ErrorBoundary, Trace};
use chrono::Utc;
use mockable::{Clock, DefaultClock};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

/// Store that is always unreachable.
struct UnreachableRepository;

#[async_trait]
impl ApplicationDetailsRepository for UnreachableRepository {
    async fn find_latest(
        &self,
    ) -> Result<Option<ApplicationDetails>, ApplicationDetailsRepositoryError> {
        Err(ApplicationDetailsRepositoryError::connection(
            "db-host:5432 refused",
        ))
    }
}

enum Store {
    Fixture(FixtureApplicationDetailsRepository),
    Unreachable,
}

struct Captured {
    status: u16,
    trace_id: Option<String>,
    body: String,
}

struct HttpWorld {
    store: Store,
    environment: String,
    last: Option<Captured>,
}

impl Default for HttpWorld {
    fn default() -> Self {
        Self {
            store: Store::Fixture(FixtureApplicationDetailsRepository::default()),
            environment: "development".to_owned(),
            last: None,
        }
    }
}

impl HttpWorld {
    fn http_state(&self) -> web::Data<HttpState> {
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        let application: Arc<dyn ApplicationStatus> = match &self.store {
            Store::Fixture(repository) => Arc::new(
                ApplicationDetailsService::new(Arc::new(repository.clone()), clock.clone())
                    .with_current_environment(self.environment.clone()),
            ),
            Store::Unreachable => Arc::new(
                ApplicationDetailsService::new(Arc::new(UnreachableRepository), clock.clone())
                    .with_current_environment(self.environment.clone()),
            ),
        };
        web::Data::new(HttpState::new(application, clock))
    }

    fn send(&mut self, method: Method, path: &str, payload: Option<Value>) {
        let state = self.http_state();
        let path = path.to_owned();
        let captured = actix_web::rt::System::new().block_on(async move {
            let app = actix_test::init_service(
                App::new()
                    .app_data(state)
                    .app_data(web::Data::new(HealthState::new()))
                    .wrap(ErrorBoundary::default())
                    .wrap(Trace)
                    .configure(configure)
                    .default_service(web::to(not_found)),
            )
            .await;
            let mut request = actix_test::TestRequest::default().method(method).uri(&path);
            if let Some(payload) = payload {
                request = request.set_json(payload);
            }
            let res = actix_test::call_service(&app, request.to_request()).await;
            let status = res.status().as_u16();
            let trace_id = res
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let body = actix_test::read_body(res).await;
            Captured {
                status,
                trace_id,
                body: String::from_utf8(body.to_vec()).expect("utf8 body"),
            }
        });
        self.last = Some(captured);
    }

    fn last(&self) -> &Captured {
        self.last.as_ref().expect("a request was sent")
    }

    fn json(&self) -> Value {
        serde_json::from_str(&self.last().body).expect("JSON body")
    }
}

#[fixture]
fn world() -> Mutex<HttpWorld> {
    Mutex::new(HttpWorld::default())
}

#[given("an empty application details store")]
fn an_empty_store(world: &Mutex<HttpWorld>) {
    world.lock().expect("world lock").store =
        Store::Fixture(FixtureApplicationDetailsRepository::default());
}

#[given("an unreachable application details store")]
fn an_unreachable_store(world: &Mutex<HttpWorld>) {
    world.lock().expect("world lock").store = Store::Unreachable;
}

#[given("the store holds {name} at version {version}")]
fn the_store_holds(world: &Mutex<HttpWorld>, name: String, version: String) {
    let now = Utc::now();
    let record = ApplicationDetails::new(ApplicationDetailsDraft {
        id: 1,
        application_name: name,
        version,
        description: Some("provisioned".to_owned()),
        environment: Some("staging".to_owned()),
        build_number: None,
        created_at: now,
        updated_at: now,
    })
    .expect("valid record");
    world.lock().expect("world lock").store =
        Store::Fixture(FixtureApplicationDetailsRepository::with_record(record));
}

#[given("the service runs in {environment}")]
fn the_service_runs_in(world: &Mutex<HttpWorld>, environment: String) {
    world.lock().expect("world lock").environment = environment;
}

#[when("the client sends {method} {path}")]
fn the_client_sends(world: &Mutex<HttpWorld>, method: String, path: String) {
    let method = Method::from_str(&method).expect("valid HTTP method");
    world.lock().expect("world lock").send(method, &path, None);
}

#[when("the client posts an example without a name")]
fn the_client_posts_without_a_name(world: &Mutex<HttpWorld>) {
    world.lock().expect("world lock").send(
        Method::POST,
        "/api/example",
        Some(json!({"description": "nameless"})),
    );
}

#[when("the client posts an example named {name}")]
fn the_client_posts_a_named_example(world: &Mutex<HttpWorld>, name: String) {
    world.lock().expect("world lock").send(
        Method::POST,
        "/api/example",
        Some(json!({ "name": name })),
    );
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &Mutex<HttpWorld>, status: u16) {
    assert_eq!(world.lock().expect("world lock").last().status, status);
}

#[then("the response text is {text}")]
fn the_response_text_is(world: &Mutex<HttpWorld>, text: String) {
    assert_eq!(world.lock().expect("world lock").last().body, text);
}

#[then("the health application is {name}")]
fn the_health_application_is(world: &Mutex<HttpWorld>, name: String) {
    let body = world.lock().expect("world lock").json();
    assert_eq!(body.get("application").and_then(Value::as_str), Some(name.as_str()));
}

#[then("the health version is {version}")]
fn the_health_version_is(world: &Mutex<HttpWorld>, version: String) {
    let body = world.lock().expect("world lock").json();
    assert_eq!(body.get("version").and_then(Value::as_str), Some(version.as_str()));
}

#[then("the health description is {description}")]
fn the_health_description_is(world: &Mutex<HttpWorld>, description: String) {
    let body = world.lock().expect("world lock").json();
    assert_eq!(
        body.get("description").and_then(Value::as_str),
        Some(description.as_str())
    );
}

#[then("the error label is {label}")]
fn the_error_label_is(world: &Mutex<HttpWorld>, label: String) {
    let body = world.lock().expect("world lock").json();
    assert_eq!(body.get("error").and_then(Value::as_str), Some(label.as_str()));
}

#[then("the error message is {message}")]
fn the_error_message_is(world: &Mutex<HttpWorld>, message: String) {
    let body = world.lock().expect("world lock").json();
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some(message.as_str())
    );
}

#[then("the error details include {detail}")]
fn the_error_details_include(world: &Mutex<HttpWorld>, detail: String) {
    let body = world.lock().expect("world lock").json();
    let details = body
        .get("details")
        .and_then(Value::as_array)
        .expect("details array");
    assert!(
        details.iter().any(|d| d.as_str() == Some(detail.as_str())),
        "details {details:?} should include {detail}"
    );
}

#[then("the error body carries the trace identifier")]
fn the_error_body_carries_the_trace_identifier(world: &Mutex<HttpWorld>) {
    let world = world.lock().expect("world lock");
    let header = world.last().trace_id.clone().expect("trace id header");
    let body = world.json();
    assert_eq!(body.get("traceId").and_then(Value::as_str), Some(header.as_str()));
}

#[scenario(
    path = "tests/features/http_surface.feature",
    name = "Health falls back when the store is empty"
)]
fn health_falls_back_when_the_store_is_empty(world: Mutex<HttpWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/http_surface.feature",
    name = "Health reports the latest provisioned record"
)]
fn health_reports_the_latest_provisioned_record(world: Mutex<HttpWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/http_surface.feature",
    name = "Health survives an unreachable store"
)]
fn health_survives_an_unreachable_store(world: Mutex<HttpWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/http_surface.feature",
    name = "A valid application name passes"
)]
fn a_valid_application_name_passes(world: Mutex<HttpWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/http_surface.feature",
    name = "An application name with forbidden characters is rejected"
)]
fn an_application_name_with_forbidden_characters_is_rejected(world: Mutex<HttpWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/http_surface.feature",
    name = "A missing query parameter is named"
)]
fn a_missing_query_parameter_is_named(world: Mutex<HttpWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/http_surface.feature",
    name = "Production access is refused in development"
)]
fn production_access_is_refused_in_development(world: Mutex<HttpWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/http_surface.feature",
    name = "Production access is allowed outside development"
)]
fn production_access_is_allowed_outside_development(world: Mutex<HttpWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/http_surface.feature",
    name = "An example without a name lists its violation"
)]
fn an_example_without_a_name_lists_its_violation(world: Mutex<HttpWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/http_surface.feature",
    name = "A named example is created"
)]
fn a_named_example_is_created(world: Mutex<HttpWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/http_surface.feature",
    name = "Business errors keep their label"
)]
fn business_errors_keep_their_label(world: Mutex<HttpWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/http_surface.feature",
    name = "Unhandled failures are redacted"
)]
fn unhandled_failures_are_redacted(world: Mutex<HttpWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/http_surface.feature",
    name = "Unknown paths are not found"
)]
fn unknown_paths_are_not_found(world: Mutex<HttpWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/http_surface.feature",
    name = "Unsupported methods are rejected"
)]
fn unsupported_methods_are_rejected(world: Mutex<HttpWorld>) {
    drop(world);
}
