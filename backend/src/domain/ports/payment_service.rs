//! Driving port for payment tracking.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{Error, UnpaidJob};

/// Unpaid work and the amount outstanding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpaidSummary {
    pub rows: Vec<UnpaidJob>,
    pub total: Decimal,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentService: Send + Sync {
    async fn unpaid(&self) -> Result<UnpaidSummary, Error>;

    /// Idempotent; unknown history ids are `NotFound`.
    async fn mark_paid(&self, history_id: i32) -> Result<(), Error>;
}
