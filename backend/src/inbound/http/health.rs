//! Liveness and readiness probes.
//!
//! `/health/live` answers 200 whenever the process can serve a request.
//! `/health/ready` answers 503 until the listener is bound, then 200.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, HttpResponseBuilder, get, http::StatusCode, http::header, web};

/// Readiness flag shared between [`crate::inbound::http`] probes and the
/// server bootstrap.
#[derive(Debug, Default)]
pub struct HealthState {
    bound: AtomicBool,
}

impl HealthState {
    /// Starts not ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once the listener is bound.
    pub fn mark_ready(&self) {
        self.bound.store(true, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.bound.load(Ordering::Acquire)
    }
}

fn probe(status: StatusCode) -> HttpResponse {
    HttpResponseBuilder::new(status)
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    if state.is_ready() {
        probe(StatusCode::OK)
    } else {
        probe(StatusCode::SERVICE_UNAVAILABLE)
    }
}

#[get("/health/live")]
pub async fn live() -> HttpResponse {
    probe(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};

    fn cache_control<B>(res: &actix_web::dev::ServiceResponse<B>) -> Option<&str> {
        res.headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
    }

    #[actix_web::test]
    async fn readiness_follows_state() {
        let state = web::Data::new(HealthState::new());
        let app = test::init_service(App::new().app_data(state.clone()).service(ready)).await;

        let before = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);

        state.mark_ready();
        let after = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(after.status(), StatusCode::OK);
        assert_eq!(cache_control(&after), Some("no-store"));
    }

    #[actix_web::test]
    async fn liveness_does_not_wait_for_readiness() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(HealthState::new()))
                .service(live),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/live").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(cache_control(&res), Some("no-store"));
    }
}
