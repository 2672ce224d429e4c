//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and never
//! leave it; repositories convert them into domain records.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::domain::{
    Address, CompletedEarning, Customer, Job, JobChanges, JobHistoryEntry, NewJob, UnpaidJob,
    Zone,
};

use super::schema::{address, customer, job_history, jobs, zone};

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = customer)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CustomerRow {
    pub idcustomer: i32,
    pub org_id: Option<i32>,
    pub address_id: Option<i32>,
    pub forename: Option<String>,
    pub surname: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub email: Option<String>,
    pub telephone: Option<String>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.idcustomer,
            org_id: row.org_id,
            address_id: row.address_id,
            forename: row.forename,
            surname: row.surname,
            created_at: row.created_at,
            email: row.email,
            telephone: row.telephone,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = customer)]
pub(crate) struct NewCustomerRow<'a> {
    pub org_id: Option<i32>,
    pub forename: &'a str,
    pub surname: Option<&'a str>,
    pub email: Option<&'a str>,
    pub telephone: Option<&'a str>,
}

/// Editable customer columns. `None` clears the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = customer)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CustomerChangeset<'a> {
    pub forename: &'a str,
    pub surname: Option<&'a str>,
    pub email: Option<&'a str>,
    pub telephone: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = address)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AddressRow {
    pub idaddress: i32,
    pub house_num_name: Option<String>,
    pub street_name: Option<String>,
    pub postcode: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: row.idaddress,
            house_num_name: row.house_num_name,
            street_name: row.street_name,
            postcode: row.postcode,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = address)]
pub(crate) struct NewAddressRow<'a> {
    pub house_num_name: &'a str,
    pub street_name: &'a str,
    pub postcode: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Zones
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = zone)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ZoneRow {
    pub idzone: i32,
    pub org_id: Option<i32>,
    pub name: Option<String>,
}

impl From<ZoneRow> for Zone {
    fn from(row: ZoneRow) -> Self {
        Self {
            id: row.idzone,
            org_id: row.org_id,
            name: row.name,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = zone)]
pub(crate) struct NewZoneRow<'a> {
    pub org_id: Option<i32>,
    pub name: &'a str,
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JobRow {
    pub idjob: i32,
    pub price: Option<Decimal>,
    pub date_last_done: Option<NaiveDate>,
    pub frequency: Option<i32>,
    pub org_id: Option<i32>,
    pub address_id: Option<i32>,
    pub zone_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub info: Option<String>,
    pub date_next_due: Option<NaiveDateTime>,
    pub payment_type_id: Option<i32>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Self {
            id: row.idjob,
            price: row.price,
            date_last_done: row.date_last_done,
            frequency: row.frequency,
            org_id: row.org_id,
            address_id: row.address_id,
            zone_id: row.zone_id,
            customer_id: row.customer_id,
            info: row.info,
            date_next_due: row.date_next_due,
            payment_type_id: row.payment_type_id,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = jobs)]
pub(crate) struct NewJobRow<'a> {
    pub price: Option<Decimal>,
    pub date_last_done: Option<NaiveDate>,
    pub frequency: Option<i32>,
    pub org_id: Option<i32>,
    pub address_id: Option<i32>,
    pub zone_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub info: Option<&'a str>,
    pub date_next_due: Option<NaiveDateTime>,
    pub payment_type_id: Option<i32>,
}

impl<'a> From<&'a NewJob> for NewJobRow<'a> {
    fn from(job: &'a NewJob) -> Self {
        Self {
            price: job.price,
            date_last_done: job.date_last_done,
            frequency: job.frequency,
            org_id: job.org_id,
            address_id: job.address_id,
            zone_id: job.zone_id,
            customer_id: job.customer_id,
            info: job.info.as_deref(),
            date_next_due: job.date_next_due,
            payment_type_id: job.payment_type_id,
        }
    }
}

/// Editable job columns. `None` clears the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = jobs)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct JobChangeset<'a> {
    pub price: Option<Decimal>,
    pub date_last_done: Option<NaiveDate>,
    pub frequency: Option<i32>,
    pub address_id: Option<i32>,
    pub zone_id: Option<i32>,
    pub info: Option<&'a str>,
    pub date_next_due: Option<NaiveDateTime>,
    pub payment_type_id: Option<i32>,
}

impl<'a> From<&'a JobChanges> for JobChangeset<'a> {
    fn from(changes: &'a JobChanges) -> Self {
        Self {
            price: changes.price,
            date_last_done: changes.date_last_done,
            frequency: changes.frequency,
            address_id: changes.address_id,
            zone_id: changes.zone_id,
            info: changes.info.as_deref(),
            date_next_due: changes.date_next_due,
            payment_type_id: changes.payment_type_id,
        }
    }
}

/// Schedule columns rewritten when a job is completed.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = jobs)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct JobScheduleChangeset {
    pub date_last_done: Option<NaiveDate>,
    pub date_next_due: Option<NaiveDateTime>,
}

// ---------------------------------------------------------------------------
// Job history
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = job_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JobHistoryRow {
    pub idjob_history: i32,
    pub job_id: i32,
    pub completed_at: Option<NaiveDateTime>,
    pub paid: bool,
    pub payment_type_id: Option<i32>,
}

impl From<JobHistoryRow> for JobHistoryEntry {
    fn from(row: JobHistoryRow) -> Self {
        Self {
            id: row.idjob_history,
            job_id: row.job_id,
            completed_at: row.completed_at,
            paid: row.paid,
            payment_type_id: row.payment_type_id,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = job_history)]
pub(crate) struct NewJobHistoryRow {
    pub job_id: i32,
    pub completed_at: Option<NaiveDateTime>,
    pub paid: bool,
    pub payment_type_id: Option<i32>,
}

/// Unpaid history row joined with job, customer, and address columns.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct UnpaidRow {
    pub idjob_history: i32,
    pub job_id: i32,
    pub completed_at: Option<NaiveDateTime>,
    pub price: Option<Decimal>,
    pub forename: Option<String>,
    pub surname: Option<String>,
    pub house_num_name: Option<String>,
    pub street_name: Option<String>,
    pub postcode: Option<String>,
}

impl From<UnpaidRow> for UnpaidJob {
    fn from(row: UnpaidRow) -> Self {
        Self {
            history_id: row.idjob_history,
            job_id: row.job_id,
            completed_at: row.completed_at,
            price: row.price,
            customer_forename: row.forename,
            customer_surname: row.surname,
            house_num_name: row.house_num_name,
            street_name: row.street_name,
            postcode: row.postcode,
        }
    }
}

/// Completion timestamp and job price, for weekly earnings.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct EarningRow {
    pub completed_at: Option<NaiveDateTime>,
    pub price: Option<Decimal>,
}

impl EarningRow {
    pub(crate) fn into_earning(self) -> Option<CompletedEarning> {
        self.completed_at.map(|completed_at| CompletedEarning {
            completed_at,
            price: self.price,
        })
    }
}
