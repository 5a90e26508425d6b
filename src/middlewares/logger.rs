use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error;
use futures::future::LocalBoxFuture;
use log::{info, warn};
use std::future::{ready, Ready};
use std::time::{Duration, Instant};

/// Una línea por petición: método, ruta, estado, duración y cliente.
/// Las peticiones que superan `slow_threshold` se registran como warning.
pub struct RequestLogger {
    slow_threshold: Duration,
}

impl Default for RequestLogger {
    fn default() -> Self {
        Self {
            slow_threshold: Duration::from_millis(500),
        }
    }
}

impl RequestLogger {
    pub fn with_slow_threshold(slow_threshold: Duration) -> Self {
        Self { slow_threshold }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestLoggerMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddleware {
            service,
            slow_threshold: self.slow_threshold,
        }))
    }
}

pub struct RequestLoggerMiddleware<S> {
    service: S,
    slow_threshold: Duration,
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().clone();
        let uri = req.uri().clone();
        let client = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("-")
            .to_string();
        let slow_threshold = self.slow_threshold;

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            let duration = start.elapsed();
            let status = res.status().as_u16();

            if duration > slow_threshold {
                warn!(
                    "{} {} {} {}ms {} (slow)",
                    method,
                    uri,
                    status,
                    duration.as_millis(),
                    client
                );
            } else {
                info!("{} {} {} {}ms {}", method, uri, status, duration.as_millis(), client);
            }

            Ok(res)
        })
    }
}
