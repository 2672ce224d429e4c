//! Zone administration handlers.
//!
//! ```text
//! GET  /admin
//! POST /admin/zones/add
//! POST /admin/zones/{id}/delete
//! ```

use actix_web::{HttpResponse, get, post, web};

use super::error::PageResult;
use super::flash::Flash;
use super::forms::ZoneForm;
use super::state::HttpState;
use super::validation::{redirect_on_validation, see_other};
use super::views::{self, html};

#[get("/admin")]
pub async fn admin(state: web::Data<HttpState>, flash: Flash) -> PageResult<HttpResponse> {
    let zones = state.zones.list_zones().await?;
    Ok(html(views::admin(&zones, &flash.take()?)))
}

#[post("/admin/zones/add")]
pub async fn add_zone(
    state: web::Data<HttpState>,
    flash: Flash,
    form: web::Form<ZoneForm>,
) -> PageResult<HttpResponse> {
    let name = form.into_inner().name.unwrap_or_default();
    match state.zones.create_zone(name).await {
        Ok(zone) => {
            flash.success(format!("Zone {} added.", zone.label()))?;
            Ok(see_other("/admin"))
        }
        Err(error) => redirect_on_validation(error, &flash, "/admin"),
    }
}

/// Jobs in the zone keep their zone id.
#[post("/admin/zones/{id}/delete")]
pub async fn delete_zone(
    state: web::Data<HttpState>,
    flash: Flash,
    path: web::Path<i32>,
) -> PageResult<HttpResponse> {
    state.zones.delete_zone(path.into_inner()).await?;
    flash.success("Zone deleted.")?;
    Ok(see_other("/admin"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use mockall::predicate::eq;

    use crate::domain::{Error, Zone};
    use crate::inbound::http::test_utils::{
        ServiceMocks, location, session_cookie, test_session_middleware,
    };

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
            .service(admin)
            .service(add_zone)
            .service(delete_zone)
    }

    #[actix_web::test]
    async fn blank_zone_name_flashes_and_returns_to_admin() {
        let mut mocks = ServiceMocks::default();
        mocks
            .zones
            .expect_create_zone()
            .with(eq(String::new()))
            .times(1)
            .returning(|_| Err(Error::invalid_request("Zone name is required.")));
        mocks.zones.expect_list_zones().returning(|| Ok(Vec::new()));
        let service = test::init_service(app(mocks)).await;

        let res = test::call_service(
            &service,
            test::TestRequest::post()
                .uri("/admin/zones/add")
                .set_form([("name", "")])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res).as_deref(), Some("/admin"));
        let cookie = session_cookie(&res).expect("flash stored in session");

        let page = test::call_service(
            &service,
            test::TestRequest::get()
                .uri("/admin")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body = test::read_body(page).await;
        assert!(String::from_utf8_lossy(&body).contains("Zone name is required."));
    }

    #[actix_web::test]
    async fn adding_a_zone_redirects() {
        let mut mocks = ServiceMocks::default();
        mocks
            .zones
            .expect_create_zone()
            .with(eq("North".to_owned()))
            .returning(|name| {
                Ok(Zone {
                    id: 1,
                    org_id: None,
                    name: Some(name),
                })
            });
        let service = test::init_service(app(mocks)).await;

        let res = test::call_service(
            &service,
            test::TestRequest::post()
                .uri("/admin/zones/add")
                .set_form([("name", "North")])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[actix_web::test]
    async fn deleting_missing_zone_is_not_found() {
        let mut mocks = ServiceMocks::default();
        mocks
            .zones
            .expect_delete_zone()
            .with(eq(8))
            .returning(|_| Err(Error::not_found("zone 8 not found")));
        let service = test::init_service(app(mocks)).await;

        let res = test::call_service(
            &service,
            test::TestRequest::post()
                .uri("/admin/zones/8/delete")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
