//! Form and query payloads.
//!
//! Every field is an optional string so deserialisation never rejects a
//! submission; parsing happens in the domain drafts or in
//! [`super::validation`], where failures carry readable messages.

use serde::Deserialize;

use crate::domain::{AddressFields, CustomerFields, JobFields};

#[derive(Debug, Default, Deserialize)]
pub struct CustomerForm {
    #[serde(default)]
    pub forename: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telephone: Option<String>,
}

impl From<CustomerForm> for CustomerFields {
    fn from(form: CustomerForm) -> Self {
        Self {
            forename: form.forename,
            surname: form.surname,
            email: form.email,
            telephone: form.telephone,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AddressForm {
    #[serde(default)]
    pub house_num_name: Option<String>,
    #[serde(default)]
    pub street_name: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
}

impl From<AddressForm> for AddressFields {
    fn from(form: AddressForm) -> Self {
        Self {
            house_num_name: form.house_num_name,
            street_name: form.street_name,
            postcode: form.postcode,
        }
    }
}

/// Job form; the address fields sit alongside the job fields.
#[derive(Debug, Default, Deserialize)]
pub struct JobForm {
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub frequency_weeks: Option<String>,
    #[serde(default)]
    pub date_last_done: Option<String>,
    #[serde(default)]
    pub zone_id: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub payment_type_id: Option<String>,
    #[serde(default)]
    pub house_num_name: Option<String>,
    #[serde(default)]
    pub street_name: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
}

impl From<JobForm> for JobFields {
    fn from(form: JobForm) -> Self {
        Self {
            price: form.price,
            frequency_weeks: form.frequency_weeks,
            date_last_done: form.date_last_done,
            zone_id: form.zone_id,
            info: form.info,
            payment_type_id: form.payment_type_id,
            address: AddressFields {
                house_num_name: form.house_num_name,
                street_name: form.street_name,
                postcode: form.postcode,
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AttachCustomerForm {
    #[serde(default)]
    pub customer_id: Option<String>,
}

/// Optional return path after completing a job.
#[derive(Debug, Default, Deserialize)]
pub struct CompleteJobForm {
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ZoneForm {
    #[serde(default)]
    pub name: Option<String>,
}

/// `GET /jobs/due?date=YYYY-MM-DD&zone=N`
#[derive(Debug, Default, Deserialize)]
pub struct DueJobsParams {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
}

/// `GET /stats?week=YYYY-MM-DD`
#[derive(Debug, Default, Deserialize)]
pub struct StatsParams {
    #[serde(default)]
    pub week: Option<String>,
}
