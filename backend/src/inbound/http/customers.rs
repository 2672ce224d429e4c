//! Dashboard and customer page handlers.
//!
//! ```text
//! GET  /
//! GET  /customers
//! GET  /customers/add            POST /customers/add
//! GET  /customers/{id}
//! GET  /customers/{id}/edit      POST /customers/{id}/edit
//! POST /customers/{id}/delete
//! POST /customers/{id}/invoice-address/add
//! POST /customers/{id}/jobs/add
//! ```

use actix_web::{HttpResponse, get, post, web};

use super::error::PageResult;
use super::flash::Flash;
use super::forms::{AddressForm, CustomerForm, JobForm};
use super::state::HttpState;
use super::validation::{redirect_on_validation, see_other};
use super::views::{self, html};

#[get("/")]
pub async fn dashboard(state: web::Data<HttpState>, flash: Flash) -> PageResult<HttpResponse> {
    let summary = state.customers.dashboard().await?;
    Ok(html(views::dashboard(&summary, &flash.take()?)))
}

#[get("/customers")]
pub async fn list_customers(
    state: web::Data<HttpState>,
    flash: Flash,
) -> PageResult<HttpResponse> {
    let customers = state.customers.list_customers().await?;
    Ok(html(views::customers_list(&customers, &flash.take()?)))
}

#[get("/customers/add")]
pub async fn new_customer(flash: Flash) -> PageResult<HttpResponse> {
    Ok(html(views::customer_form(None, None, &flash.take()?)))
}

#[post("/customers/add")]
pub async fn create_customer(
    state: web::Data<HttpState>,
    flash: Flash,
    form: web::Form<CustomerForm>,
) -> PageResult<HttpResponse> {
    match state.customers.create_customer(form.into_inner().into()).await {
        Ok(customer) => {
            flash.success("Customer added successfully!")?;
            Ok(see_other(&format!("/customers/{}", customer.id)))
        }
        Err(error) => redirect_on_validation(error, &flash, "/customers/add"),
    }
}

#[get("/customers/{id}")]
pub async fn customer_detail(
    state: web::Data<HttpState>,
    flash: Flash,
    path: web::Path<i32>,
) -> PageResult<HttpResponse> {
    let detail = state.customers.customer_detail(path.into_inner()).await?;
    let zones = state.zones.list_zones().await?;
    Ok(html(views::customer_detail(&detail, &zones, &flash.take()?)))
}

#[get("/customers/{id}/edit")]
pub async fn edit_customer(
    state: web::Data<HttpState>,
    flash: Flash,
    path: web::Path<i32>,
) -> PageResult<HttpResponse> {
    let detail = state.customers.customer_detail(path.into_inner()).await?;
    Ok(html(views::customer_form(
        Some(&detail.customer),
        detail.invoice_address.as_ref(),
        &flash.take()?,
    )))
}

#[post("/customers/{id}/edit")]
pub async fn update_customer(
    state: web::Data<HttpState>,
    flash: Flash,
    path: web::Path<i32>,
    form: web::Form<CustomerForm>,
) -> PageResult<HttpResponse> {
    let id = path.into_inner();
    match state
        .customers
        .update_customer(id, form.into_inner().into())
        .await
    {
        Ok(customer) => {
            flash.success("Customer updated successfully!")?;
            Ok(see_other(&format!("/customers/{}", customer.id)))
        }
        Err(error) => redirect_on_validation(error, &flash, &format!("/customers/{id}/edit")),
    }
}

#[post("/customers/{id}/delete")]
pub async fn delete_customer(
    state: web::Data<HttpState>,
    flash: Flash,
    path: web::Path<i32>,
) -> PageResult<HttpResponse> {
    state.customers.delete_customer(path.into_inner()).await?;
    flash.success("Customer deleted successfully!")?;
    Ok(see_other("/customers"))
}

#[post("/customers/{id}/invoice-address/add")]
pub async fn set_invoice_address(
    state: web::Data<HttpState>,
    flash: Flash,
    path: web::Path<i32>,
    form: web::Form<AddressForm>,
) -> PageResult<HttpResponse> {
    let id = path.into_inner();
    let back = format!("/customers/{id}/edit");
    match state
        .customers
        .set_invoice_address(id, form.into_inner().into())
        .await
    {
        Ok(_) => {
            flash.success("Invoice address updated successfully!")?;
            Ok(see_other(&back))
        }
        Err(error) => redirect_on_validation(error, &flash, &back),
    }
}

#[post("/customers/{id}/jobs/add")]
pub async fn add_customer_job(
    state: web::Data<HttpState>,
    flash: Flash,
    path: web::Path<i32>,
    form: web::Form<JobForm>,
) -> PageResult<HttpResponse> {
    let id = path.into_inner();
    let back = format!("/customers/{id}");
    match state.jobs.create_job(form.into_inner().into(), Some(id)).await {
        Ok(_) => {
            flash.success("Job added successfully!")?;
            Ok(see_other(&back))
        }
        Err(error) => redirect_on_validation(error, &flash, &back),
    }
}

#[cfg(test)]
#[path = "customers_tests.rs"]
mod tests;
