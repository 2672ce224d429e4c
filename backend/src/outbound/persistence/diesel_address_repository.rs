//! PostgreSQL-backed `AddressRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{AddressRepository, AddressRepositoryError};
use crate::domain::{Address, AddressDraft};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AddressRow, NewAddressRow};
use super::pool::DbPool;
use super::schema::address;

#[derive(Clone)]
pub struct DieselAddressRepository {
    pool: DbPool,
}

impl DieselAddressRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddressRepository for DieselAddressRepository {
    async fn find_or_create(&self, draft: &AddressDraft) -> Result<Address, AddressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let house = draft.house_num_name();
        let street = draft.street_name();
        let postcode = draft.postcode();

        let row = conn
            .transaction::<_, DieselError, _>(|conn| {
                async move {
                    let existing = address::table
                        .filter(address::house_num_name.eq(house))
                        .filter(address::street_name.eq(street))
                        .filter(address::postcode.is_not_distinct_from(postcode))
                        .order(address::idaddress.asc())
                        .select(AddressRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    if let Some(row) = existing {
                        return Ok(row);
                    }

                    diesel::insert_into(address::table)
                        .values(&NewAddressRow {
                            house_num_name: house,
                            street_name: street,
                            postcode,
                        })
                        .returning(AddressRow::as_returning())
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Address>, AddressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        address::table
            .find(id)
            .select(AddressRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Address::from))
            .map_err(map_diesel_error)
    }
}
