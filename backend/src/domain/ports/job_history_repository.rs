//! Port for the job completion ledger.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::domain::{CompletedEarning, JobHistoryEntry, UnpaidJob};

use super::define_port_error;

define_port_error! {
    /// Errors raised by job history repository adapters.
    pub enum JobHistoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "job history repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "job history repository query failed: {message}",
        /// A foreign-key or uniqueness rule rejected the write.
        Constraint { message: String } =>
            "job history repository constraint violated: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobHistoryRepository: Send + Sync {
    /// History for one job, newest completion first.
    async fn list_for_job(&self, job_id: i32)
    -> Result<Vec<JobHistoryEntry>, JobHistoryRepositoryError>;

    /// Set `paid = true`. Returns whether the row exists; repeating the call
    /// is harmless.
    async fn mark_paid(&self, id: i32) -> Result<bool, JobHistoryRepositoryError>;

    /// Unpaid rows joined to job price, customer name, and job address,
    /// oldest completion first.
    async fn list_unpaid(&self) -> Result<Vec<UnpaidJob>, JobHistoryRepositoryError>;

    /// Completions in `[start, end)` paired with the job price.
    async fn completed_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<CompletedEarning>, JobHistoryRepositoryError>;
}
