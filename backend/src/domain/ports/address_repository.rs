//! Port for address persistence.

use async_trait::async_trait;

use crate::domain::{Address, AddressDraft};

use super::define_port_error;

define_port_error! {
    /// Errors raised by address repository adapters.
    pub enum AddressRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "address repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "address repository query failed: {message}",
        /// A foreign-key or uniqueness rule rejected the write.
        Constraint { message: String } =>
            "address repository constraint violated: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Reuse the address matching house, street, and postcode, or insert one.
    async fn find_or_create(&self, draft: &AddressDraft) -> Result<Address, AddressRepositoryError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Address>, AddressRepositoryError>;
}
