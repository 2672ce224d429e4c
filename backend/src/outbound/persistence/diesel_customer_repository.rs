//! PostgreSQL-backed `CustomerRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CustomerOrder, CustomerRepository, CustomerRepositoryError};
use crate::domain::{Customer, CustomerDraft};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CustomerChangeset, CustomerRow, NewCustomerRow};
use super::pool::DbPool;
use super::schema::customer;

/// Diesel-backed implementation of the customer repository port.
#[derive(Clone)]
pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for DieselCustomerRepository {
    async fn create(
        &self,
        org_id: Option<i32>,
        draft: &CustomerDraft,
    ) -> Result<Customer, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCustomerRow {
            org_id,
            forename: draft.forename(),
            surname: draft.surname(),
            email: draft.email(),
            telephone: draft.telephone(),
        };

        diesel::insert_into(customer::table)
            .values(&row)
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Customer::from)
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        customer::table
            .find(id)
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Customer::from))
            .map_err(map_diesel_error)
    }

    async fn list(&self, order: CustomerOrder) -> Result<Vec<Customer>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let query = customer::table
            .select(CustomerRow::as_select())
            .into_boxed();
        let query = match order {
            CustomerOrder::NewestFirst => query.order((
                customer::created_at.desc().nulls_last(),
                customer::idcustomer.desc(),
            )),
            CustomerOrder::IdAscending => query.order(customer::idcustomer.asc()),
        };

        let rows: Vec<CustomerRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Customer>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CustomerRow> = customer::table
            .order((
                customer::created_at.desc().nulls_last(),
                customer::idcustomer.desc(),
            ))
            .limit(limit)
            .select(CustomerRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn count(&self) -> Result<i64, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        customer::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        id: i32,
        draft: &CustomerDraft,
    ) -> Result<Option<Customer>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = CustomerChangeset {
            forename: draft.forename(),
            surname: draft.surname(),
            email: draft.email(),
            telephone: draft.telephone(),
        };

        diesel::update(customer::table.find(id))
            .set(&changes)
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Customer::from))
            .map_err(map_diesel_error)
    }

    async fn set_address(
        &self,
        id: i32,
        address_id: i32,
    ) -> Result<Option<Customer>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(customer::table.find(id))
            .set(customer::address_id.eq(Some(address_id)))
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Customer::from))
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: i32) -> Result<bool, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(customer::table.find(id))
            .execute(&mut conn)
            .await
            .map(|deleted| deleted > 0)
            .map_err(map_diesel_error)
    }
}
