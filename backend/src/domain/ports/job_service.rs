//! Driving port for job pages, scheduling, and completion.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    Address, Customer, DueZoneGroup, Error, Job, JobCompletion, JobFields, JobHistoryEntry, Zone,
};

/// A job with everything its detail page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetail {
    pub job: Job,
    pub customer: Option<Customer>,
    pub address: Option<Address>,
    /// `None` when unset or when the zone has been deleted.
    pub zone: Option<Zone>,
    /// Newest completion first.
    pub history: Vec<JobHistoryEntry>,
}

/// Filters for the due-jobs page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueJobsQuery {
    /// Defaults to today.
    pub reference: Option<NaiveDate>,
    pub zone_id: Option<i32>,
}

/// Due jobs grouped by zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueJobs {
    pub reference: NaiveDate,
    pub zone_id: Option<i32>,
    pub groups: Vec<DueZoneGroup>,
    /// All zones, for the filter control.
    pub zones: Vec<Zone>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobService: Send + Sync {
    /// Every job, newest first.
    async fn list_jobs(&self) -> Result<Vec<Job>, Error>;

    async fn job_detail(&self, id: i32) -> Result<JobDetail, Error>;

    /// Create a job, optionally owned by `customer_id`.
    async fn create_job(&self, fields: JobFields, customer_id: Option<i32>) -> Result<Job, Error>;

    /// Overwrite a job's editable fields; the address is kept when the form
    /// leaves it blank.
    async fn update_job(&self, id: i32, fields: JobFields) -> Result<Job, Error>;

    async fn delete_job(&self, id: i32) -> Result<(), Error>;

    /// Record a completion now and reschedule the job.
    async fn complete_job(&self, id: i32) -> Result<JobCompletion, Error>;

    async fn attach_customer(&self, job_id: i32, customer_id: i32) -> Result<Job, Error>;

    async fn due_jobs(&self, query: DueJobsQuery) -> Result<DueJobs, Error>;
}
