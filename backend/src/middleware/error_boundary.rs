//! Error boundary middleware.
//!
//! Runs the [`ErrorTranslator`] over every failed request, whether the error
//! was attached to a handler response or returned by an inner service, and
//! replaces the response with the translated JSON body. Only the path is
//! captured before the inner call: the router requires the request to be
//! uniquely owned while it matches.

use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::body::{BoxBody, MessageBody};
use actix_web::error::InternalError;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use mockable::{Clock, DefaultClock};

use crate::inbound::http::error::ErrorTranslator;

/// Middleware applying the error translation table to every request.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use boilerplate::middleware::ErrorBoundary;
///
/// let _app = App::new().wrap(ErrorBoundary::default());
/// ```
#[derive(Clone)]
pub struct ErrorBoundary {
    translator: Arc<ErrorTranslator>,
    clock: Arc<dyn Clock>,
}

impl ErrorBoundary {
    pub fn new(translator: ErrorTranslator, clock: Arc<dyn Clock>) -> Self {
        Self {
            translator: Arc::new(translator),
            clock,
        }
    }
}

impl Default for ErrorBoundary {
    fn default() -> Self {
        Self::new(ErrorTranslator::default(), Arc::new(DefaultClock))
    }
}

impl<S, B> Transform<S, ServiceRequest> for ErrorBoundary
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorBoundaryMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorBoundaryMiddleware {
            service,
            translator: Arc::clone(&self.translator),
            clock: Arc::clone(&self.clock),
        }))
    }
}

/// Service wrapper produced by [`ErrorBoundary`].
pub struct ErrorBoundaryMiddleware<S> {
    service: S,
    translator: Arc<ErrorTranslator>,
    clock: Arc<dyn Clock>,
}

impl<S, B> Service<ServiceRequest> for ErrorBoundaryMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let path = req.path().to_owned();
        let translator = Arc::clone(&self.translator);
        let clock = Arc::clone(&self.clock);
        let fut = self.service.call(req);

        Box::pin(async move {
            match fut.await {
                Ok(res) => {
                    let translated = res
                        .response()
                        .error()
                        .map(|err| translator.respond(err, &path, clock.as_ref()));
                    Ok(match translated {
                        Some(response) => res.into_response(response),
                        None => res.map_into_boxed_body(),
                    })
                }
                Err(err) => {
                    let response = translator.respond(&err, &path, clock.as_ref());
                    Err(InternalError::from_response(err, response).into())
                }
            }
        })
    }
}
