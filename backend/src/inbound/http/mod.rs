//! HTTP inbound adapter: server-rendered pages, the JSON export, and probes.

pub mod admin;
pub mod api;
pub mod customers;
pub mod error;
pub mod flash;
pub mod forms;
pub mod health;
pub mod jobs;
pub mod payments;
pub mod state;
pub mod stats;
#[cfg(test)]
pub mod test_utils;
pub(crate) mod validation;
pub mod views;

pub use error::{JsonError, PageResult};

use actix_web::web;

/// Register every page and API route.
///
/// Literal segments such as `/jobs/due` are registered before the `{id}`
/// routes that would otherwise shadow them.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(customers::dashboard)
        .service(customers::list_customers)
        .service(customers::new_customer)
        .service(customers::create_customer)
        .service(customers::customer_detail)
        .service(customers::edit_customer)
        .service(customers::update_customer)
        .service(customers::delete_customer)
        .service(customers::set_invoice_address)
        .service(customers::add_customer_job)
        .service(jobs::list_jobs)
        .service(jobs::new_job)
        .service(jobs::create_job)
        .service(jobs::due_jobs)
        .service(jobs::job_detail)
        .service(jobs::edit_job)
        .service(jobs::update_job)
        .service(jobs::delete_job)
        .service(jobs::complete_job)
        .service(jobs::attach_customer_form)
        .service(jobs::attach_customer)
        .service(payments::unpaid)
        .service(payments::mark_paid)
        .service(admin::admin)
        .service(admin::add_zone)
        .service(admin::delete_zone)
        .service(stats::stats)
        .service(api::list_customers);
}
