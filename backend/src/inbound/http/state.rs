//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! ports, so they can be exercised with mocks and no database.

use std::sync::Arc;

use crate::domain::ports::{
    CustomerService, JobService, PaymentService, StatsService, ZoneService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub customers: Arc<dyn CustomerService>,
    pub jobs: Arc<dyn JobService>,
    pub payments: Arc<dyn PaymentService>,
    pub zones: Arc<dyn ZoneService>,
    pub stats: Arc<dyn StatsService>,
}
