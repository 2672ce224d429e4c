//! Port for job persistence, due-job queries, and atomic completion.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{Job, JobChanges, JobCompletion, NewJob};

use super::define_port_error;

define_port_error! {
    /// Errors raised by job repository adapters.
    pub enum JobRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "job repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "job repository query failed: {message}",
        /// A foreign-key or uniqueness rule rejected the write.
        Constraint { message: String } =>
            "job repository constraint violated: {message}",
    }
}

/// Port for reading and writing job rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &NewJob) -> Result<Job, JobRepositoryError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Job>, JobRepositoryError>;

    /// All jobs, identity descending.
    async fn list(&self) -> Result<Vec<Job>, JobRepositoryError>;

    /// Jobs for one customer, identity descending.
    async fn list_for_customer(&self, customer_id: i32) -> Result<Vec<Job>, JobRepositoryError>;

    /// Overwrite the editable columns. `None` when the row does not exist.
    async fn update(
        &self,
        id: i32,
        changes: &JobChanges,
    ) -> Result<Option<Job>, JobRepositoryError>;

    /// Delete a job and, by cascade, its history rows.
    async fn delete(&self, id: i32) -> Result<bool, JobRepositoryError>;

    async fn attach_customer(
        &self,
        job_id: i32,
        customer_id: i32,
    ) -> Result<Option<Job>, JobRepositoryError>;

    /// Jobs with a frequency whose next due date is on or before `reference`,
    /// ordered by due date then id, optionally restricted to one zone.
    async fn list_due(
        &self,
        reference: NaiveDate,
        zone_id: Option<i32>,
    ) -> Result<Vec<Job>, JobRepositoryError>;

    /// Mark the job done at `completed_at` and append an unpaid history row.
    ///
    /// Both writes share one transaction; the schedule is derived with
    /// [`crate::domain::JobCompletionPlan`]. `None` when the job does not
    /// exist.
    async fn record_completion(
        &self,
        job_id: i32,
        completed_at: NaiveDateTime,
    ) -> Result<Option<JobCompletion>, JobRepositoryError>;
}
