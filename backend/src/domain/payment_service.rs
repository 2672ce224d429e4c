//! Payment tracking over the job history ledger.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{JobHistoryRepository, PaymentService, UnpaidSummary};
use crate::domain::{Error, outstanding_total};

#[derive(Clone)]
pub struct PaymentServiceImpl<R> {
    history: Arc<R>,
}

impl<R> PaymentServiceImpl<R> {
    pub fn new(history: Arc<R>) -> Self {
        Self { history }
    }
}

#[async_trait]
impl<R> PaymentService for PaymentServiceImpl<R>
where
    R: JobHistoryRepository,
{
    async fn unpaid(&self) -> Result<UnpaidSummary, Error> {
        let rows = self.history.list_unpaid().await?;
        let total = outstanding_total(&rows);
        Ok(UnpaidSummary { rows, total })
    }

    async fn mark_paid(&self, history_id: i32) -> Result<(), Error> {
        if self.history.mark_paid(history_id).await? {
            info!(history_id, "job history marked paid");
            Ok(())
        } else {
            Err(Error::not_found(format!(
                "job history entry {history_id} not found"
            )))
        }
    }
}
