//! PostgreSQL-backed `JobHistoryRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{JobHistoryRepository, JobHistoryRepositoryError};
use crate::domain::{CompletedEarning, JobHistoryEntry, UnpaidJob};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{EarningRow, JobHistoryRow, UnpaidRow};
use super::pool::DbPool;
use super::schema::{address, customer, job_history, jobs};

#[derive(Clone)]
pub struct DieselJobHistoryRepository {
    pool: DbPool,
}

impl DieselJobHistoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobHistoryRepository for DieselJobHistoryRepository {
    async fn list_for_job(
        &self,
        job_id: i32,
    ) -> Result<Vec<JobHistoryEntry>, JobHistoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<JobHistoryRow> = job_history::table
            .filter(job_history::job_id.eq(job_id))
            .order((
                job_history::completed_at.desc().nulls_last(),
                job_history::idjob_history.desc(),
            ))
            .select(JobHistoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(JobHistoryEntry::from).collect())
    }

    async fn mark_paid(&self, id: i32) -> Result<bool, JobHistoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // PostgreSQL counts matched rows, so an already-paid row still reports 1.
        diesel::update(job_history::table.find(id))
            .set(job_history::paid.eq(true))
            .execute(&mut conn)
            .await
            .map(|updated| updated > 0)
            .map_err(map_diesel_error)
    }

    async fn list_unpaid(&self) -> Result<Vec<UnpaidJob>, JobHistoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UnpaidRow> = job_history::table
            .inner_join(jobs::table)
            .left_join(customer::table.on(jobs::customer_id.eq(customer::idcustomer.nullable())))
            .left_join(address::table.on(jobs::address_id.eq(address::idaddress.nullable())))
            .filter(job_history::paid.eq(false))
            .order((
                job_history::completed_at.asc().nulls_last(),
                job_history::idjob_history.asc(),
            ))
            .select((
                job_history::idjob_history,
                job_history::job_id,
                job_history::completed_at,
                jobs::price,
                customer::forename.nullable(),
                customer::surname.nullable(),
                address::house_num_name.nullable(),
                address::street_name.nullable(),
                address::postcode.nullable(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(UnpaidJob::from).collect())
    }

    async fn completed_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<CompletedEarning>, JobHistoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EarningRow> = job_history::table
            .inner_join(jobs::table)
            .filter(job_history::completed_at.ge(start))
            .filter(job_history::completed_at.lt(end))
            .select((job_history::completed_at, jobs::price))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().filter_map(EarningRow::into_earning).collect())
    }
}
