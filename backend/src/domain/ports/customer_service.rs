//! Driving port for customer pages and the customer export.

use async_trait::async_trait;

use crate::domain::{Address, AddressFields, Customer, CustomerFields, Error, Job};

/// Figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub customer_count: i64,
    /// Newest first.
    pub recent_customers: Vec<Customer>,
}

/// A customer with their invoice address and jobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetail {
    pub customer: Customer,
    pub invoice_address: Option<Address>,
    /// Newest first.
    pub jobs: Vec<Job>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerService: Send + Sync {
    async fn dashboard(&self) -> Result<DashboardSummary, Error>;

    /// Every customer, newest first.
    async fn list_customers(&self) -> Result<Vec<Customer>, Error>;

    async fn customer_detail(&self, id: i32) -> Result<CustomerDetail, Error>;

    async fn create_customer(&self, fields: CustomerFields) -> Result<Customer, Error>;

    async fn update_customer(&self, id: i32, fields: CustomerFields) -> Result<Customer, Error>;

    async fn delete_customer(&self, id: i32) -> Result<(), Error>;

    /// Find or create the address and attach it as the invoice address.
    async fn set_invoice_address(
        &self,
        id: i32,
        fields: AddressFields,
    ) -> Result<Customer, Error>;

    /// Every customer, identity ascending, for the JSON export.
    async fn export_customers(&self) -> Result<Vec<Customer>, Error>;
}
