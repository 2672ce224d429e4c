//! JSON export of the customer table.
//!
//! ```text
//! GET /api/customers
//! ```

use actix_web::{get, web};
use serde::Serialize;

use crate::domain::Customer;

use super::error::JsonError;
use super::state::HttpState;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One customer row using the stored column names.
#[derive(Debug, Serialize)]
pub struct CustomerRecord {
    pub idcustomer: i32,
    pub org_id: Option<i32>,
    pub address_id: Option<i32>,
    pub forename: Option<String>,
    pub surname: Option<String>,
    pub timestamp: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
}

impl From<Customer> for CustomerRecord {
    fn from(customer: Customer) -> Self {
        Self {
            idcustomer: customer.id,
            org_id: customer.org_id,
            address_id: customer.address_id,
            forename: customer.forename,
            surname: customer.surname,
            timestamp: customer
                .created_at
                .map(|created| created.format(TIMESTAMP_FORMAT).to_string()),
            email: customer.email,
            telephone: customer.telephone,
        }
    }
}

/// Every customer, identity ascending.
#[get("/api/customers")]
pub async fn list_customers(
    state: web::Data<HttpState>,
) -> Result<web::Json<Vec<CustomerRecord>>, JsonError> {
    let customers = state.customers.export_customers().await?;
    Ok(web::Json(
        customers.into_iter().map(CustomerRecord::from).collect(),
    ))
}
