//! Statistics page: zone totals and trailing weekly earnings.

use actix_web::{HttpResponse, get, web};

use super::error::PageResult;
use super::flash::Flash;
use super::forms::StatsParams;
use super::state::HttpState;
use super::validation::{FieldName, parse_optional_date, redirect_on_validation};
use super::views::{self, html};

const WEEK: FieldName = FieldName::new("Week");

/// `GET /stats?week=YYYY-MM-DD`; the current week when `week` is absent.
#[get("/stats")]
pub async fn stats(
    state: web::Data<HttpState>,
    flash: Flash,
    params: web::Query<StatsParams>,
) -> PageResult<HttpResponse> {
    let week_of = match parse_optional_date(params.into_inner().week, WEEK) {
        Ok(week_of) => week_of,
        Err(error) => return redirect_on_validation(error, &flash, "/stats"),
    };
    let report = state.stats.stats(week_of).await?;
    Ok(html(views::stats(&report, &flash.take()?)))
}
