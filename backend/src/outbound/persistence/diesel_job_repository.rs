//! PostgreSQL-backed `JobRepository` implementation using Diesel ORM.
//!
//! Completion is the only multi-statement write: the job row is locked,
//! its schedule advanced, and a history row appended in one transaction so a
//! double submission cannot produce two ledger rows against a stale schedule.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{JobRepository, JobRepositoryError};
use crate::domain::{Job, JobChanges, JobCompletion, JobCompletionPlan, NewJob};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    JobChangeset, JobHistoryRow, JobRow, JobScheduleChangeset, NewJobHistoryRow, NewJobRow,
};
use super::pool::DbPool;
use super::schema::{job_history, jobs};

#[derive(Clone)]
pub struct DieselJobRepository {
    pool: DbPool,
}

impl DieselJobRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// First instant after `reference`; due timestamps strictly before it are due.
///
/// `None` on the last representable day, where every scheduled job is due.
fn due_cutoff(reference: NaiveDate) -> Option<NaiveDateTime> {
    reference
        .succ_opt()
        .map(|next| next.and_time(NaiveTime::MIN))
}

fn into_jobs(rows: Vec<JobRow>) -> Vec<Job> {
    rows.into_iter().map(Job::from).collect()
}

#[async_trait]
impl JobRepository for DieselJobRepository {
    async fn create(&self, job: &NewJob) -> Result<Job, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(jobs::table)
            .values(&NewJobRow::from(job))
            .returning(JobRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Job::from)
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Job>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        jobs::table
            .find(id)
            .select(JobRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Job::from))
            .map_err(map_diesel_error)
    }

    async fn list(&self) -> Result<Vec<Job>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        jobs::table
            .order(jobs::idjob.desc())
            .select(JobRow::as_select())
            .load(&mut conn)
            .await
            .map(into_jobs)
            .map_err(map_diesel_error)
    }

    async fn list_for_customer(&self, customer_id: i32) -> Result<Vec<Job>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        jobs::table
            .filter(jobs::customer_id.eq(customer_id))
            .order(jobs::idjob.desc())
            .select(JobRow::as_select())
            .load(&mut conn)
            .await
            .map(into_jobs)
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        id: i32,
        changes: &JobChanges,
    ) -> Result<Option<Job>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(jobs::table.find(id))
            .set(&JobChangeset::from(changes))
            .returning(JobRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Job::from))
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: i32) -> Result<bool, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(jobs::table.find(id))
            .execute(&mut conn)
            .await
            .map(|deleted| deleted > 0)
            .map_err(map_diesel_error)
    }

    async fn attach_customer(
        &self,
        job_id: i32,
        customer_id: i32,
    ) -> Result<Option<Job>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(jobs::table.find(job_id))
            .set(jobs::customer_id.eq(Some(customer_id)))
            .returning(JobRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Job::from))
            .map_err(map_diesel_error)
    }

    async fn list_due(
        &self,
        reference: NaiveDate,
        zone_id: Option<i32>,
    ) -> Result<Vec<Job>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = jobs::table
            .filter(jobs::frequency.is_not_null())
            .filter(jobs::date_next_due.is_not_null())
            .select(JobRow::as_select())
            .into_boxed();
        if let Some(cutoff) = due_cutoff(reference) {
            query = query.filter(jobs::date_next_due.lt(cutoff));
        }
        if let Some(zone_id) = zone_id {
            query = query.filter(jobs::zone_id.eq(zone_id));
        }

        query
            .order((jobs::date_next_due.asc(), jobs::idjob.asc()))
            .load(&mut conn)
            .await
            .map(into_jobs)
            .map_err(map_diesel_error)
    }

    async fn record_completion(
        &self,
        job_id: i32,
        completed_at: NaiveDateTime,
    ) -> Result<Option<JobCompletion>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let completion = conn
            .transaction::<_, DieselError, _>(|conn| {
                async move {
                    let Some(current) = jobs::table
                        .find(job_id)
                        .select(JobRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?
                    else {
                        return Ok(None);
                    };

                    let plan = JobCompletionPlan::for_job(&Job::from(current), completed_at);

                    let job = diesel::update(jobs::table.find(job_id))
                        .set(&JobScheduleChangeset {
                            date_last_done: Some(plan.date_last_done),
                            date_next_due: plan.date_next_due,
                        })
                        .returning(JobRow::as_returning())
                        .get_result(conn)
                        .await?;

                    let history = diesel::insert_into(job_history::table)
                        .values(&NewJobHistoryRow {
                            job_id,
                            completed_at: Some(plan.completed_at),
                            paid: false,
                            payment_type_id: plan.payment_type_id,
                        })
                        .returning(JobHistoryRow::as_returning())
                        .get_result(conn)
                        .await?;

                    Ok(Some(JobCompletion {
                        job: job.into(),
                        history: history.into(),
                    }))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        if completion.is_none() {
            debug!(job_id, "completion requested for missing job");
        }
        Ok(completion)
    }
}
