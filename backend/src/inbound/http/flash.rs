//! One-shot flash messages carried in the session cookie.
//!
//! A POST handler pushes a message and redirects; the next rendered page
//! takes the queued messages, which removes them from the session.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};

use crate::domain::Error;

pub(crate) const FLASH_KEY: &str = "flash";

/// Presentation category of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    /// CSS class used by the layout.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "flash-success",
            Self::Error => "flash-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

/// Session wrapper exposing flash operations to handlers.
#[derive(Clone)]
pub struct Flash(Session);

impl Flash {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Queue a message for the next rendered page.
    pub fn push(&self, level: FlashLevel, message: impl Into<String>) -> Result<(), Error> {
        let mut queued = self.queued()?;
        queued.push(FlashMessage {
            level,
            message: message.into(),
        });
        self.0
            .insert(FLASH_KEY, queued)
            .map_err(|error| Error::internal(format!("failed to store flash message: {error}")))
    }

    pub fn success(&self, message: impl Into<String>) -> Result<(), Error> {
        self.push(FlashLevel::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> Result<(), Error> {
        self.push(FlashLevel::Error, message)
    }

    /// Drain queued messages.
    pub fn take(&self) -> Result<Vec<FlashMessage>, Error> {
        let queued = self.queued()?;
        if !queued.is_empty() {
            self.0.remove(FLASH_KEY);
        }
        Ok(queued)
    }

    fn queued(&self) -> Result<Vec<FlashMessage>, Error> {
        match self.0.get::<Vec<FlashMessage>>(FLASH_KEY) {
            Ok(messages) => Ok(messages.unwrap_or_default()),
            Err(error) => {
                // A cookie from an older layout is discarded rather than failing the page.
                tracing::warn!(%error, "discarding unreadable flash messages");
                self.0.remove(FLASH_KEY);
                Ok(Vec::new())
            }
        }
    }
}

impl FromRequest for Flash {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(Flash::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    #[actix_web::test]
    async fn messages_survive_one_redirect_only() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set",
                    web::post().to(|flash: Flash| async move {
                        flash.success("Customer added successfully!")?;
                        flash.error("second")?;
                        Ok::<_, Error>(HttpResponse::SeeOther().finish())
                    }),
                )
                .route(
                    "/show",
                    web::get().to(|flash: Flash| async move {
                        let messages = flash.take()?;
                        let text: Vec<String> =
                            messages.into_iter().map(|message| message.message).collect();
                        Ok::<_, Error>(HttpResponse::Ok().body(text.join("|")))
                    }),
                ),
        )
        .await;

        let set = test::call_service(&app, test::TestRequest::post().uri("/set").to_request()).await;
        assert_eq!(set.status(), StatusCode::SEE_OTHER);
        let cookie = session_cookie(&set).expect("session cookie set");

        let shown = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/show")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let rewritten = session_cookie(&shown);
        let body = test::read_body(shown).await;
        assert_eq!(body, "Customer added successfully!|second");

        let mut request = test::TestRequest::get().uri("/show");
        if let Some(cookie) = rewritten {
            request = request.cookie(cookie);
        }
        let again = test::call_service(&app, request.to_request()).await;
        assert_eq!(test::read_body(again).await, "");
    }

    #[actix_web::test]
    async fn no_session_means_no_messages() {
        let app = test::init_service(App::new().wrap(test_session_middleware()).route(
            "/show",
            web::get().to(|flash: Flash| async move {
                let count = flash.take()?.len();
                Ok::<_, Error>(HttpResponse::Ok().body(count.to_string()))
            }),
        ))
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/show").to_request()).await;
        assert_eq!(test::read_body(res).await, "0");
    }
}
