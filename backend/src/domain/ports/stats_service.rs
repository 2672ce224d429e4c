//! Driving port for the statistics page.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Error, Week, WeeklyEarnings, ZoneStats};

/// Weeks shown on the statistics page, including the selected one.
pub const REPORTED_WEEKS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsReport {
    pub zones: Vec<ZoneStats>,
    pub selected_week: Week,
    /// Oldest first; the last entry is `selected_week`.
    pub weeks: Vec<WeeklyEarnings>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsService: Send + Sync {
    /// Report for the week containing `week_of`, defaulting to this week.
    async fn stats(&self, week_of: Option<NaiveDate>) -> Result<StatsReport, Error>;
}
