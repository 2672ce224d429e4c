//! Port for customer persistence.

use async_trait::async_trait;

use crate::domain::{Customer, CustomerDraft};

use super::define_port_error;

define_port_error! {
    /// Errors raised by customer repository adapters.
    pub enum CustomerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "customer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "customer repository query failed: {message}",
        /// A foreign-key or uniqueness rule rejected the write.
        Constraint { message: String } =>
            "customer repository constraint violated: {message}",
    }
}

/// Sort order for customer listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerOrder {
    /// Creation timestamp descending, identity descending as a tiebreak.
    NewestFirst,
    /// Identity ascending.
    IdAscending,
}

/// Port for reading and writing customer rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert a customer; storage assigns the id and creation timestamp.
    async fn create(
        &self,
        org_id: Option<i32>,
        draft: &CustomerDraft,
    ) -> Result<Customer, CustomerRepositoryError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, CustomerRepositoryError>;

    async fn list(&self, order: CustomerOrder) -> Result<Vec<Customer>, CustomerRepositoryError>;

    /// The `limit` most recently created customers.
    async fn recent(&self, limit: i64) -> Result<Vec<Customer>, CustomerRepositoryError>;

    async fn count(&self) -> Result<i64, CustomerRepositoryError>;

    /// Overwrite the editable columns. `None` when the row does not exist.
    async fn update(
        &self,
        id: i32,
        draft: &CustomerDraft,
    ) -> Result<Option<Customer>, CustomerRepositoryError>;

    /// Attach an invoice address. `None` when the row does not exist.
    async fn set_address(
        &self,
        id: i32,
        address_id: i32,
    ) -> Result<Option<Customer>, CustomerRepositoryError>;

    /// Delete a customer, returning whether a row was removed.
    ///
    /// Fails with [`CustomerRepositoryError::Constraint`] while jobs still
    /// reference the customer.
    async fn delete(&self, id: i32) -> Result<bool, CustomerRepositoryError>;
}
