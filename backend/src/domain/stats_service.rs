//! Statistics service: zone totals and weekly earnings.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use mockable::Clock;

use crate::domain::ports::{
    JobHistoryRepository, JobRepository, REPORTED_WEEKS, StatsReport, StatsService,
    ZoneRepository,
};
use crate::domain::{Error, Week, weekly_earnings, zone_statistics};

#[derive(Clone)]
pub struct StatsServiceImpl {
    zones: Arc<dyn ZoneRepository>,
    jobs: Arc<dyn JobRepository>,
    history: Arc<dyn JobHistoryRepository>,
    clock: Arc<dyn Clock>,
}

impl StatsServiceImpl {
    pub fn new(
        zones: Arc<dyn ZoneRepository>,
        jobs: Arc<dyn JobRepository>,
        history: Arc<dyn JobHistoryRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            zones,
            jobs,
            history,
            clock,
        }
    }
}

#[async_trait]
impl StatsService for StatsServiceImpl {
    async fn stats(&self, week_of: Option<NaiveDate>) -> Result<StatsReport, Error> {
        let anchor = week_of.unwrap_or_else(|| self.clock.utc().date_naive());
        let selected_week = Week::containing(anchor);
        let weeks = selected_week.trailing(REPORTED_WEEKS);

        let zones = self.zones.list().await?;
        let jobs = self.jobs.list().await?;

        let first = weeks.first().copied().unwrap_or(selected_week);
        let start = first.start().and_time(NaiveTime::MIN);
        let end = selected_week
            .start()
            .checked_add_days(Days::new(7))
            .map_or(NaiveDateTime::MAX, |monday| monday.and_time(NaiveTime::MIN));
        let completions = self.history.completed_between(start, end).await?;

        Ok(StatsReport {
            zones: zone_statistics(&zones, &jobs),
            selected_week,
            weeks: weekly_earnings(&weeks, &jobs, &completions),
        })
    }
}
