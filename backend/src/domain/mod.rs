//! Domain records, validation, scheduling rules, and services.
//!
//! Purpose: hold everything about customers, jobs, zones, and payments that
//! does not depend on HTTP or PostgreSQL. Adapters reach the domain through
//! the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Customer, Address, Zone, Job, JobHistoryEntry: stored records.
//! - *Draft types: validated form input.
//! - reporting: zone totals, ISO-week earnings, due-job grouping.
//! - *ServiceImpl: driving-port implementations over the repository ports.

pub mod address;
pub mod customer;
pub mod error;
pub mod job;
pub mod payment;
pub mod ports;
pub mod reporting;
pub mod trace_id;
pub mod zone;

mod customer_service;
mod job_service;
mod payment_service;
mod repository_errors;
mod stats_service;
mod zone_service;

pub use self::address::{
    Address, AddressDraft, AddressFields, AddressValidationError, MAX_HOUSE_NUM_NAME_LEN,
    MAX_POSTCODE_LEN, MAX_STREET_NAME_LEN, format_address,
};
pub use self::customer::{
    Customer, CustomerDraft, CustomerFields, CustomerValidationError, MAX_CUSTOMER_TEXT_LEN,
    MAX_TELEPHONE_LEN,
};
pub use self::customer_service::CustomerServiceImpl;
pub use self::error::{Error, ErrorCode};
pub use self::job::{
    Job, JobChanges, JobCompletion, JobCompletionPlan, JobDraft, JobFields, JobValidationError,
    NewJob, next_due_after,
};
pub use self::job_service::{JobServiceImpl, JobServicePorts};
pub use self::payment::{JobHistoryEntry, UnpaidJob, outstanding_total};
pub use self::payment_service::PaymentServiceImpl;
pub use self::reporting::{
    CompletedEarning, DueZoneGroup, Week, WeeklyEarnings, ZoneStats, group_due_jobs,
    weekly_earnings, zone_statistics,
};
pub use self::stats_service::StatsServiceImpl;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::zone::{MAX_ZONE_NAME_LEN, Zone, ZoneDraft, ZoneValidationError};
pub use self::zone_service::ZoneServiceImpl;

/// Result alias used by driving ports.
pub type DomainResult<T> = Result<T, Error>;
