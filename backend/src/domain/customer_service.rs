//! Customer domain service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    AddressRepository, CustomerDetail, CustomerOrder, CustomerRepository,
    CustomerRepositoryError, CustomerService, DashboardSummary, JobRepository,
};
use crate::domain::{AddressDraft, AddressFields, Customer, CustomerDraft, CustomerFields, Error};

/// Customers listed on the dashboard.
const RECENT_CUSTOMERS: i64 = 5;

/// Customer service implementing [`CustomerService`].
#[derive(Clone)]
pub struct CustomerServiceImpl {
    customers: Arc<dyn CustomerRepository>,
    addresses: Arc<dyn AddressRepository>,
    jobs: Arc<dyn JobRepository>,
    org_id: Option<i32>,
}

impl CustomerServiceImpl {
    /// New customers are stamped with `org_id`.
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        addresses: Arc<dyn AddressRepository>,
        jobs: Arc<dyn JobRepository>,
        org_id: Option<i32>,
    ) -> Self {
        Self {
            customers,
            addresses,
            jobs,
            org_id,
        }
    }

    async fn require(&self, id: i32) -> Result<Customer, Error> {
        self.customers
            .find_by_id(id)
            .await?
            .ok_or_else(|| customer_not_found(id))
    }
}

fn customer_not_found(id: i32) -> Error {
    Error::not_found(format!("customer {id} not found"))
}

fn validate(fields: CustomerFields) -> Result<CustomerDraft, Error> {
    CustomerDraft::try_new(fields).map_err(|err| Error::invalid_request(err.to_string()))
}

#[async_trait]
impl CustomerService for CustomerServiceImpl {
    async fn dashboard(&self) -> Result<DashboardSummary, Error> {
        let customer_count = self.customers.count().await?;
        let recent_customers = self.customers.recent(RECENT_CUSTOMERS).await?;
        Ok(DashboardSummary {
            customer_count,
            recent_customers,
        })
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, Error> {
        Ok(self.customers.list(CustomerOrder::NewestFirst).await?)
    }

    async fn customer_detail(&self, id: i32) -> Result<CustomerDetail, Error> {
        let customer = self.require(id).await?;
        let invoice_address = match customer.address_id {
            Some(address_id) => self.addresses.find_by_id(address_id).await?,
            None => None,
        };
        let jobs = self.jobs.list_for_customer(id).await?;
        Ok(CustomerDetail {
            customer,
            invoice_address,
            jobs,
        })
    }

    async fn create_customer(&self, fields: CustomerFields) -> Result<Customer, Error> {
        let draft = validate(fields)?;
        let customer = self.customers.create(self.org_id, &draft).await?;
        info!(customer_id = customer.id, "customer created");
        Ok(customer)
    }

    async fn update_customer(&self, id: i32, fields: CustomerFields) -> Result<Customer, Error> {
        let draft = validate(fields)?;
        self.customers
            .update(id, &draft)
            .await?
            .ok_or_else(|| customer_not_found(id))
    }

    async fn delete_customer(&self, id: i32) -> Result<(), Error> {
        match self.customers.delete(id).await {
            Ok(true) => {
                info!(customer_id = id, "customer deleted");
                Ok(())
            }
            Ok(false) => Err(customer_not_found(id)),
            Err(CustomerRepositoryError::Constraint { .. }) => Err(Error::conflict(
                "This customer still has jobs. Delete or reassign them first.",
            )),
            Err(err) => Err(err.into()),
        }
    }

    async fn set_invoice_address(
        &self,
        id: i32,
        fields: AddressFields,
    ) -> Result<Customer, Error> {
        let draft = AddressDraft::from_fields(&fields)
            .map_err(|err| Error::invalid_request(err.to_string()))?
            .ok_or_else(|| {
                Error::invalid_request("House number or name and street are required.")
            })?;
        self.require(id).await?;
        let address = self.addresses.find_or_create(&draft).await?;
        self.customers
            .set_address(id, address.id)
            .await?
            .ok_or_else(|| customer_not_found(id))
    }

    async fn export_customers(&self) -> Result<Vec<Customer>, Error> {
        Ok(self.customers.list(CustomerOrder::IdAscending).await?)
    }
}

#[cfg(test)]
#[path = "customer_service_tests.rs"]
mod tests;
