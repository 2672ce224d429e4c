//! Wire the Diesel repositories into the domain services behind [`HttpState`].

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use rounds::domain::ports::{
    AddressRepository, CustomerRepository, JobHistoryRepository, JobRepository, ZoneRepository,
};
use rounds::domain::{
    CustomerServiceImpl, JobServiceImpl, JobServicePorts, PaymentServiceImpl, StatsServiceImpl,
    ZoneServiceImpl,
};
use rounds::inbound::http::state::HttpState;
use rounds::outbound::persistence::{
    DbPool, DieselAddressRepository, DieselCustomerRepository, DieselJobHistoryRepository,
    DieselJobRepository, DieselZoneRepository,
};

/// One shared instance of each repository over the pool.
struct Repositories {
    customers: Arc<DieselCustomerRepository>,
    addresses: Arc<DieselAddressRepository>,
    zones: Arc<DieselZoneRepository>,
    jobs: Arc<DieselJobRepository>,
    history: Arc<DieselJobHistoryRepository>,
}

impl Repositories {
    fn new(pool: &DbPool) -> Self {
        Self {
            customers: Arc::new(DieselCustomerRepository::new(pool.clone())),
            addresses: Arc::new(DieselAddressRepository::new(pool.clone())),
            zones: Arc::new(DieselZoneRepository::new(pool.clone())),
            jobs: Arc::new(DieselJobRepository::new(pool.clone())),
            history: Arc::new(DieselJobHistoryRepository::new(pool.clone())),
        }
    }
}

/// Build the HTTP state from a pool.
pub(super) fn build_http_state(pool: &DbPool, org_id: Option<i32>) -> HttpState {
    let repos = Repositories::new(pool);
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let customers: Arc<dyn CustomerRepository> = repos.customers.clone();
    let addresses: Arc<dyn AddressRepository> = repos.addresses.clone();
    let zones: Arc<dyn ZoneRepository> = repos.zones.clone();
    let jobs: Arc<dyn JobRepository> = repos.jobs.clone();
    let history: Arc<dyn JobHistoryRepository> = repos.history.clone();

    HttpState {
        customers: Arc::new(CustomerServiceImpl::new(
            customers.clone(),
            addresses.clone(),
            jobs.clone(),
            org_id,
        )),
        jobs: Arc::new(JobServiceImpl::new(
            JobServicePorts {
                jobs: jobs.clone(),
                history: history.clone(),
                customers,
                addresses,
                zones: zones.clone(),
            },
            clock.clone(),
            org_id,
        )),
        payments: Arc::new(PaymentServiceImpl::new(repos.history)),
        zones: Arc::new(ZoneServiceImpl::new(repos.zones, org_id)),
        stats: Arc::new(StatsServiceImpl::new(zones, jobs, history, clock)),
    }
}
