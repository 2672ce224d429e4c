//! Payment tracking handlers.
//!
//! ```text
//! GET  /payments/unpaid
//! POST /payments/{id}/mark-paid
//! ```

use actix_web::{HttpResponse, get, post, web};

use super::error::PageResult;
use super::flash::Flash;
use super::state::HttpState;
use super::validation::see_other;
use super::views::{self, html};

#[get("/payments/unpaid")]
pub async fn unpaid(state: web::Data<HttpState>, flash: Flash) -> PageResult<HttpResponse> {
    let summary = state.payments.unpaid().await?;
    Ok(html(views::unpaid(&summary, &flash.take()?)))
}

/// Repeating the request for an already-paid row still succeeds.
#[post("/payments/{id}/mark-paid")]
pub async fn mark_paid(
    state: web::Data<HttpState>,
    flash: Flash,
    path: web::Path<i32>,
) -> PageResult<HttpResponse> {
    state.payments.mark_paid(path.into_inner()).await?;
    flash.success("Payment recorded.")?;
    Ok(see_other("/payments/unpaid"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    use crate::domain::Error;
    use crate::domain::ports::UnpaidSummary;
    use crate::inbound::http::test_utils::{ServiceMocks, location, test_session_middleware};

    fn app(
        mocks: ServiceMocks,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(mocks.into_state()))
            .wrap(test_session_middleware())
            .service(unpaid)
            .service(mark_paid)
    }

    #[actix_web::test]
    async fn unpaid_page_shows_total() {
        let mut mocks = ServiceMocks::default();
        mocks.payments.expect_unpaid().times(1).returning(|| {
            Ok(UnpaidSummary {
                rows: Vec::new(),
                total: Decimal::ZERO,
            })
        });
        let service = test::init_service(app(mocks)).await;

        let res = test::call_service(
            &service,
            test::TestRequest::get().uri("/payments/unpaid").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert!(String::from_utf8_lossy(&body).contains("Everything is paid up."));
    }

    #[actix_web::test]
    async fn mark_paid_redirects_to_ledger() {
        let mut mocks = ServiceMocks::default();
        mocks
            .payments
            .expect_mark_paid()
            .with(eq(11))
            .times(1)
            .returning(|_| Ok(()));
        let service = test::init_service(app(mocks)).await;

        let res = test::call_service(
            &service,
            test::TestRequest::post()
                .uri("/payments/11/mark-paid")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res).as_deref(), Some("/payments/unpaid"));
    }

    #[actix_web::test]
    async fn unknown_history_row_is_not_found() {
        let mut mocks = ServiceMocks::default();
        mocks
            .payments
            .expect_mark_paid()
            .returning(|id| Err(Error::not_found(format!("job history {id} not found"))));
        let service = test::init_service(app(mocks)).await;

        let res = test::call_service(
            &service,
            test::TestRequest::post()
                .uri("/payments/99/mark-paid")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
