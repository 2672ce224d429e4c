//! PostgreSQL-backed `ZoneRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ZoneRepository, ZoneRepositoryError};
use crate::domain::{Zone, ZoneDraft};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewZoneRow, ZoneRow};
use super::pool::DbPool;
use super::schema::zone;

#[derive(Clone)]
pub struct DieselZoneRepository {
    pool: DbPool,
}

impl DieselZoneRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ZoneRepository for DieselZoneRepository {
    async fn create(
        &self,
        org_id: Option<i32>,
        draft: &ZoneDraft,
    ) -> Result<Zone, ZoneRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(zone::table)
            .values(&NewZoneRow {
                org_id,
                name: draft.name(),
            })
            .returning(ZoneRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Zone::from)
            .map_err(map_diesel_error)
    }

    async fn list(&self) -> Result<Vec<Zone>, ZoneRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ZoneRow> = zone::table
            .order(zone::idzone.asc())
            .select(ZoneRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Zone::from).collect())
    }

    async fn delete(&self, id: i32) -> Result<bool, ZoneRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(zone::table.find(id))
            .execute(&mut conn)
            .await
            .map(|deleted| deleted > 0)
            .map_err(map_diesel_error)
    }
}
