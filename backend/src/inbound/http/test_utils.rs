//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use crate::domain::ports::{
    MockCustomerService, MockJobService, MockPaymentService, MockStatsService, MockZoneService,
};

use super::state::HttpState;

/// Session middleware with a fresh key and the `Secure` flag off for plain
/// HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The session cookie set by a response, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
}

/// Location header of a redirect.
pub fn location<B>(res: &ServiceResponse<B>) -> Option<String> {
    res.headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Mock driving ports; set expectations then call [`ServiceMocks::into_state`].
#[derive(Default)]
pub struct ServiceMocks {
    pub customers: MockCustomerService,
    pub jobs: MockJobService,
    pub payments: MockPaymentService,
    pub zones: MockZoneService,
    pub stats: MockStatsService,
}

impl ServiceMocks {
    pub fn into_state(self) -> HttpState {
        HttpState {
            customers: Arc::new(self.customers),
            jobs: Arc::new(self.jobs),
            payments: Arc::new(self.payments),
            zones: Arc::new(self.zones),
            stats: Arc::new(self.stats),
        }
    }
}
