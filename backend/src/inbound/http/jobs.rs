//! Job page handlers.
//!
//! ```text
//! GET  /jobs
//! GET  /jobs/add                 POST /jobs/add
//! GET  /jobs/due?date=YYYY-MM-DD&zone=N
//! GET  /jobs/{id}
//! GET  /jobs/{id}/edit           POST /jobs/{id}/edit
//! POST /jobs/{id}/delete
//! POST /jobs/{id}/complete
//! GET  /jobs/{id}/add-customer   POST /jobs/{id}/add-customer
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::ports::DueJobsQuery;

use super::error::PageResult;
use super::flash::Flash;
use super::forms::{AttachCustomerForm, CompleteJobForm, DueJobsParams, JobForm};
use super::state::HttpState;
use super::validation::{
    FieldName, local_return_path, parse_optional_date, parse_optional_id, parse_required_id,
    redirect_on_validation, see_other,
};
use super::views::{self, html};

const DUE_DATE: FieldName = FieldName::new("Date");
const DUE_ZONE: FieldName = FieldName::new("Zone");
const CUSTOMER: FieldName = FieldName::new("Customer");

#[get("/jobs")]
pub async fn list_jobs(state: web::Data<HttpState>, flash: Flash) -> PageResult<HttpResponse> {
    let jobs = state.jobs.list_jobs().await?;
    Ok(html(views::jobs_list(&jobs, &flash.take()?)))
}

#[get("/jobs/add")]
pub async fn new_job(state: web::Data<HttpState>, flash: Flash) -> PageResult<HttpResponse> {
    let zones = state.zones.list_zones().await?;
    Ok(html(views::job_form(None, &zones, &flash.take()?)))
}

#[post("/jobs/add")]
pub async fn create_job(
    state: web::Data<HttpState>,
    flash: Flash,
    form: web::Form<JobForm>,
) -> PageResult<HttpResponse> {
    match state.jobs.create_job(form.into_inner().into(), None).await {
        Ok(job) => {
            flash.success("Job added successfully!")?;
            Ok(see_other(&format!("/jobs/{}", job.id)))
        }
        Err(error) => redirect_on_validation(error, &flash, "/jobs/add"),
    }
}

fn due_query(params: DueJobsParams) -> PageResult<DueJobsQuery> {
    Ok(DueJobsQuery {
        reference: parse_optional_date(params.date, DUE_DATE)?,
        zone_id: parse_optional_id(params.zone, DUE_ZONE)?,
    })
}

#[get("/jobs/due")]
pub async fn due_jobs(
    state: web::Data<HttpState>,
    flash: Flash,
    params: web::Query<DueJobsParams>,
) -> PageResult<HttpResponse> {
    let query = match due_query(params.into_inner()) {
        Ok(query) => query,
        Err(error) => return redirect_on_validation(error, &flash, "/jobs/due"),
    };
    let due = state.jobs.due_jobs(query).await?;
    Ok(html(views::due_jobs(&due, &flash.take()?)))
}

#[get("/jobs/{id}")]
pub async fn job_detail(
    state: web::Data<HttpState>,
    flash: Flash,
    path: web::Path<i32>,
) -> PageResult<HttpResponse> {
    let detail = state.jobs.job_detail(path.into_inner()).await?;
    Ok(html(views::job_detail(&detail, &flash.take()?)))
}

#[get("/jobs/{id}/edit")]
pub async fn edit_job(
    state: web::Data<HttpState>,
    flash: Flash,
    path: web::Path<i32>,
) -> PageResult<HttpResponse> {
    let detail = state.jobs.job_detail(path.into_inner()).await?;
    let zones = state.zones.list_zones().await?;
    Ok(html(views::job_form(Some(&detail), &zones, &flash.take()?)))
}

#[post("/jobs/{id}/edit")]
pub async fn update_job(
    state: web::Data<HttpState>,
    flash: Flash,
    path: web::Path<i32>,
    form: web::Form<JobForm>,
) -> PageResult<HttpResponse> {
    let id = path.into_inner();
    match state.jobs.update_job(id, form.into_inner().into()).await {
        Ok(job) => {
            flash.success("Job updated successfully!")?;
            Ok(see_other(&format!("/jobs/{}", job.id)))
        }
        Err(error) => redirect_on_validation(error, &flash, &format!("/jobs/{id}/edit")),
    }
}

#[post("/jobs/{id}/delete")]
pub async fn delete_job(
    state: web::Data<HttpState>,
    flash: Flash,
    path: web::Path<i32>,
) -> PageResult<HttpResponse> {
    state.jobs.delete_job(path.into_inner()).await?;
    flash.success("Job deleted successfully!")?;
    Ok(see_other("/jobs"))
}

#[post("/jobs/{id}/complete")]
pub async fn complete_job(
    state: web::Data<HttpState>,
    flash: Flash,
    path: web::Path<i32>,
    form: Option<web::Form<CompleteJobForm>>,
) -> PageResult<HttpResponse> {
    let id = path.into_inner();
    let next = form.and_then(|form| form.into_inner().next);
    let completion = state.jobs.complete_job(id).await?;
    let message = match completion.job.date_next_due {
        Some(next) => format!(
            "Job #{id} marked as done. Next due {}.",
            next.format("%Y-%m-%d")
        ),
        None => format!("Job #{id} marked as done."),
    };
    flash.success(message)?;
    Ok(see_other(&local_return_path(
        next.as_deref(),
        format!("/jobs/{id}"),
    )))
}

#[get("/jobs/{id}/add-customer")]
pub async fn attach_customer_form(
    state: web::Data<HttpState>,
    flash: Flash,
    path: web::Path<i32>,
) -> PageResult<HttpResponse> {
    let detail = state.jobs.job_detail(path.into_inner()).await?;
    let customers = state.customers.list_customers().await?;
    Ok(html(views::attach_customer_form(
        &detail.job,
        &customers,
        &flash.take()?,
    )))
}

#[post("/jobs/{id}/add-customer")]
pub async fn attach_customer(
    state: web::Data<HttpState>,
    flash: Flash,
    path: web::Path<i32>,
    form: web::Form<AttachCustomerForm>,
) -> PageResult<HttpResponse> {
    let id = path.into_inner();
    let back = format!("/jobs/{id}/add-customer");
    let customer_id = match parse_required_id(form.into_inner().customer_id, CUSTOMER) {
        Ok(customer_id) => customer_id,
        Err(error) => return redirect_on_validation(error, &flash, &back),
    };
    match state.jobs.attach_customer(id, customer_id).await {
        Ok(job) => {
            flash.success("Customer attached to job.")?;
            Ok(see_other(&format!("/jobs/{}", job.id)))
        }
        Err(error) => redirect_on_validation(error, &flash, &back),
    }
}

#[cfg(test)]
#[path = "jobs_tests.rs"]
mod tests;
