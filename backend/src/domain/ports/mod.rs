//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by the Diesel adapters in
//! `outbound::persistence`. Driving ports (`*Service`) are implemented by the
//! domain services and consumed by the HTTP handlers.

mod macros;
pub(crate) use macros::define_port_error;

mod address_repository;
mod customer_repository;
mod customer_service;
mod job_history_repository;
mod job_repository;
mod job_service;
mod payment_service;
mod stats_service;
mod zone_repository;
mod zone_service;

#[cfg(test)]
pub use address_repository::MockAddressRepository;
pub use address_repository::{AddressRepository, AddressRepositoryError};
#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
pub use customer_repository::{CustomerOrder, CustomerRepository, CustomerRepositoryError};
#[cfg(test)]
pub use customer_service::MockCustomerService;
pub use customer_service::{CustomerDetail, CustomerService, DashboardSummary};
#[cfg(test)]
pub use job_history_repository::MockJobHistoryRepository;
pub use job_history_repository::{JobHistoryRepository, JobHistoryRepositoryError};
#[cfg(test)]
pub use job_repository::MockJobRepository;
pub use job_repository::{JobRepository, JobRepositoryError};
#[cfg(test)]
pub use job_service::MockJobService;
pub use job_service::{DueJobs, DueJobsQuery, JobDetail, JobService};
#[cfg(test)]
pub use payment_service::MockPaymentService;
pub use payment_service::{PaymentService, UnpaidSummary};
#[cfg(test)]
pub use stats_service::MockStatsService;
pub use stats_service::{REPORTED_WEEKS, StatsReport, StatsService};
#[cfg(test)]
pub use zone_repository::MockZoneRepository;
pub use zone_repository::{ZoneRepository, ZoneRepositoryError};
#[cfg(test)]
pub use zone_service::MockZoneService;
pub use zone_service::ZoneService;
