//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL through `diesel-async` with `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and
//!   domain records. Scheduling rules live in the domain; the job adapter
//!   only applies a [`crate::domain::JobCompletionPlan`] inside a
//!   transaction.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: pool and Diesel failures map onto each port's
//!   connection, query, or constraint variant.
//!
//! # Example
//!
//! ```ignore
//! use rounds::outbound::persistence::{DbPool, DieselCustomerRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/rounds")).await?;
//! let customers = DieselCustomerRepository::new(pool);
//! ```

mod diesel_address_repository;
mod diesel_customer_repository;
mod diesel_error_mapping;
mod diesel_job_history_repository;
mod diesel_job_repository;
mod diesel_zone_repository;
mod models;
mod pool;
mod schema;

pub use diesel_address_repository::DieselAddressRepository;
pub use diesel_customer_repository::DieselCustomerRepository;
pub use diesel_job_history_repository::DieselJobHistoryRepository;
pub use diesel_job_repository::DieselJobRepository;
pub use diesel_zone_repository::DieselZoneRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
