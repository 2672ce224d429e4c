//! Port for zone persistence.

use async_trait::async_trait;

use crate::domain::{Zone, ZoneDraft};

use super::define_port_error;

define_port_error! {
    /// Errors raised by zone repository adapters.
    pub enum ZoneRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "zone repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "zone repository query failed: {message}",
        /// A foreign-key or uniqueness rule rejected the write.
        Constraint { message: String } =>
            "zone repository constraint violated: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ZoneRepository: Send + Sync {
    async fn create(&self, org_id: Option<i32>, draft: &ZoneDraft)
    -> Result<Zone, ZoneRepositoryError>;

    /// All zones, identity ascending.
    async fn list(&self) -> Result<Vec<Zone>, ZoneRepositoryError>;

    /// Delete a zone, returning whether a row was removed. Jobs keep their
    /// stale `zone_id`.
    async fn delete(&self, id: i32) -> Result<bool, ZoneRepositoryError>;
}
