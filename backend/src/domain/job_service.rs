//! Job domain service: scheduling, completion, and due-job queries.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    AddressRepository, CustomerRepository, DueJobs, DueJobsQuery, JobDetail,
    JobHistoryRepository, JobRepository, JobService, ZoneRepository,
};
use crate::domain::{
    Error, Job, JobChanges, JobCompletion, JobDraft, JobFields, NewJob, group_due_jobs,
};

/// Repositories the job service reads and writes.
#[derive(Clone)]
pub struct JobServicePorts {
    pub jobs: Arc<dyn JobRepository>,
    pub history: Arc<dyn JobHistoryRepository>,
    pub customers: Arc<dyn CustomerRepository>,
    pub addresses: Arc<dyn AddressRepository>,
    pub zones: Arc<dyn ZoneRepository>,
}

/// Job service implementing [`JobService`].
#[derive(Clone)]
pub struct JobServiceImpl {
    ports: JobServicePorts,
    clock: Arc<dyn Clock>,
    org_id: Option<i32>,
}

impl JobServiceImpl {
    /// `clock` supplies "now" for completions and the default due-date
    /// reference; new jobs are stamped with `org_id`.
    pub fn new(ports: JobServicePorts, clock: Arc<dyn Clock>, org_id: Option<i32>) -> Self {
        Self {
            ports,
            clock,
            org_id,
        }
    }

    async fn require_job(&self, id: i32) -> Result<Job, Error> {
        self.ports
            .jobs
            .find_by_id(id)
            .await?
            .ok_or_else(|| job_not_found(id))
    }

    async fn require_customer(&self, id: i32) -> Result<(), Error> {
        self.ports
            .customers
            .find_by_id(id)
            .await?
            .map(|_| ())
            .ok_or_else(|| Error::not_found(format!("customer {id} not found")))
    }

    async fn resolve_address(&self, draft: &JobDraft) -> Result<Option<i32>, Error> {
        match draft.address() {
            Some(address) => Ok(Some(self.ports.addresses.find_or_create(address).await?.id)),
            None => Ok(None),
        }
    }
}

fn job_not_found(id: i32) -> Error {
    Error::not_found(format!("job {id} not found"))
}

fn validate(fields: JobFields) -> Result<JobDraft, Error> {
    JobDraft::try_new(fields).map_err(|err| Error::invalid_request(err.to_string()))
}

#[async_trait]
impl JobService for JobServiceImpl {
    async fn list_jobs(&self) -> Result<Vec<Job>, Error> {
        Ok(self.ports.jobs.list().await?)
    }

    async fn job_detail(&self, id: i32) -> Result<JobDetail, Error> {
        let job = self.require_job(id).await?;
        let customer = match job.customer_id {
            Some(customer_id) => self.ports.customers.find_by_id(customer_id).await?,
            None => None,
        };
        let address = match job.address_id {
            Some(address_id) => self.ports.addresses.find_by_id(address_id).await?,
            None => None,
        };
        let zone = match job.zone_id {
            Some(zone_id) => self
                .ports
                .zones
                .list()
                .await?
                .into_iter()
                .find(|zone| zone.id == zone_id),
            None => None,
        };
        let history = self.ports.history.list_for_job(id).await?;
        Ok(JobDetail {
            job,
            customer,
            address,
            zone,
            history,
        })
    }

    async fn create_job(&self, fields: JobFields, customer_id: Option<i32>) -> Result<Job, Error> {
        let draft = validate(fields)?;
        if let Some(id) = customer_id {
            self.require_customer(id).await?;
        }
        let address_id = self.resolve_address(&draft).await?;
        let new_job = NewJob::from_draft(&draft, self.org_id, address_id, customer_id);
        let job = self.ports.jobs.create(&new_job).await?;
        info!(
            job_id = job.id,
            customer_id = ?job.customer_id,
            next_due = ?job.date_next_due,
            "job created"
        );
        Ok(job)
    }

    async fn update_job(&self, id: i32, fields: JobFields) -> Result<Job, Error> {
        let draft = validate(fields)?;
        let existing = self.require_job(id).await?;
        let address_id = match self.resolve_address(&draft).await? {
            Some(address_id) => Some(address_id),
            None => existing.address_id,
        };
        let changes = JobChanges::from_draft(&draft, address_id);
        let job = self
            .ports
            .jobs
            .update(id, &changes)
            .await?
            .ok_or_else(|| job_not_found(id))?;
        info!(job_id = job.id, next_due = ?job.date_next_due, "job rescheduled");
        Ok(job)
    }

    async fn delete_job(&self, id: i32) -> Result<(), Error> {
        if self.ports.jobs.delete(id).await? {
            info!(job_id = id, "job deleted");
            Ok(())
        } else {
            Err(job_not_found(id))
        }
    }

    async fn complete_job(&self, id: i32) -> Result<JobCompletion, Error> {
        let completed_at = self.clock.utc().naive_utc();
        let completion = self
            .ports
            .jobs
            .record_completion(id, completed_at)
            .await?
            .ok_or_else(|| job_not_found(id))?;
        info!(
            job_id = id,
            history_id = completion.history.id,
            next_due = ?completion.job.date_next_due,
            "job completed"
        );
        Ok(completion)
    }

    async fn attach_customer(&self, job_id: i32, customer_id: i32) -> Result<Job, Error> {
        self.require_customer(customer_id).await?;
        self.ports
            .jobs
            .attach_customer(job_id, customer_id)
            .await?
            .ok_or_else(|| job_not_found(job_id))
    }

    async fn due_jobs(&self, query: DueJobsQuery) -> Result<DueJobs, Error> {
        let reference = query
            .reference
            .unwrap_or_else(|| self.clock.utc().date_naive());
        let due = self.ports.jobs.list_due(reference, query.zone_id).await?;
        let zones = self.ports.zones.list().await?;
        let groups = group_due_jobs(due, &zones);
        Ok(DueJobs {
            reference,
            zone_id: query.zone_id,
            groups,
            zones,
        })
    }
}

#[cfg(test)]
#[path = "job_service_tests.rs"]
mod tests;
