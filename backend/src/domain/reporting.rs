//! Pure aggregation over loaded rows: zone totals, weekly earnings, and
//! due-job grouping.
//!
//! Nothing here touches storage; services load rows through the repository
//! ports and hand them to these functions.

use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use super::{Job, Zone};

/// Job count and price sum for one zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneStats {
    pub zone: Zone,
    pub job_count: usize,
    pub total_price: Decimal,
}

/// Per-zone totals in the order `zones` is given.
///
/// Zones without jobs report `(0, 0)`. Jobs whose zone is unknown or absent
/// are not counted.
pub fn zone_statistics(zones: &[Zone], jobs: &[Job]) -> Vec<ZoneStats> {
    let mut totals: HashMap<i32, (usize, Decimal)> = HashMap::new();
    for job in jobs {
        if let Some(zone_id) = job.zone_id {
            let entry = totals.entry(zone_id).or_insert((0, Decimal::ZERO));
            entry.0 += 1;
            entry.1 += job.price.unwrap_or(Decimal::ZERO);
        }
    }

    zones
        .iter()
        .map(|zone| {
            let (job_count, total_price) = totals
                .get(&zone.id)
                .copied()
                .unwrap_or((0, Decimal::ZERO));
            ZoneStats {
                zone: zone.clone(),
                job_count,
                total_price,
            }
        })
        .collect()
}

/// An ISO week: Monday 00:00 inclusive to the next Monday 00:00 exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Week {
    start: NaiveDate,
}

impl Week {
    /// The week containing `date`.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use rounds::domain::Week;
    ///
    /// // 2024-01-10 is a Wednesday.
    /// let week = Week::containing(NaiveDate::from_ymd_opt(2024, 1, 10).expect("date"));
    /// assert_eq!(week.start(), NaiveDate::from_ymd_opt(2024, 1, 8).expect("date"));
    /// ```
    pub fn containing(date: NaiveDate) -> Self {
        let offset = u64::from(date.weekday().num_days_from_monday());
        Self {
            start: date.checked_sub_days(Days::new(offset)).unwrap_or(date),
        }
    }

    /// Monday that opens the week.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Sunday that closes the week.
    pub fn last_day(&self) -> NaiveDate {
        self.start
            .checked_add_days(Days::new(6))
            .unwrap_or(self.start)
    }

    pub fn previous(&self) -> Self {
        Self {
            start: self
                .start
                .checked_sub_days(Days::new(7))
                .unwrap_or(self.start),
        }
    }

    /// Whether `moment` falls inside the half-open week interval.
    pub fn contains(&self, moment: NaiveDateTime) -> bool {
        let start = self.start.and_time(NaiveTime::MIN);
        match self.start.checked_add_days(Days::new(7)) {
            Some(end) => moment >= start && moment < end.and_time(NaiveTime::MIN),
            None => moment >= start,
        }
    }

    /// `count` consecutive weeks ending with `self`, oldest first.
    pub fn trailing(self, count: usize) -> Vec<Self> {
        let mut weeks = Vec::with_capacity(count);
        let mut current = self;
        for _ in 0..count {
            weeks.push(current);
            current = current.previous();
        }
        weeks.reverse();
        weeks
    }
}

/// A completed history row paired with its job's price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedEarning {
    pub completed_at: NaiveDateTime,
    pub price: Option<Decimal>,
}

/// Expected and realised takings for one week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyEarnings {
    pub week: Week,
    /// Prices of jobs whose next due date falls in the week.
    pub theoretical: Decimal,
    /// Prices of jobs completed during the week.
    pub actual: Decimal,
}

/// Bucket due dates and completions into `weeks`.
pub fn weekly_earnings(
    weeks: &[Week],
    jobs: &[Job],
    completions: &[CompletedEarning],
) -> Vec<WeeklyEarnings> {
    weeks
        .iter()
        .map(|week| {
            let theoretical: Decimal = jobs
                .iter()
                .filter(|job| job.date_next_due.is_some_and(|due| week.contains(due)))
                .filter_map(|job| job.price)
                .sum();
            let actual: Decimal = completions
                .iter()
                .filter(|row| week.contains(row.completed_at))
                .filter_map(|row| row.price)
                .sum();
            WeeklyEarnings {
                week: *week,
                theoretical,
                actual,
            }
        })
        .collect()
}

/// Due jobs sharing a zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueZoneGroup {
    pub zone_id: Option<i32>,
    pub label: String,
    pub jobs: Vec<Job>,
}

/// Group due jobs by zone.
///
/// Groups appear in the order their first job appears, so with the jobs
/// sorted by due date the most overdue zone comes first. Jobs keep their
/// relative order inside a group.
pub fn group_due_jobs(jobs: Vec<Job>, zones: &[Zone]) -> Vec<DueZoneGroup> {
    let mut groups: Vec<DueZoneGroup> = Vec::new();
    for job in jobs {
        match groups.iter_mut().find(|group| group.zone_id == job.zone_id) {
            Some(group) => group.jobs.push(job),
            None => groups.push(DueZoneGroup {
                zone_id: job.zone_id,
                label: zone_label(job.zone_id, zones),
                jobs: vec![job],
            }),
        }
    }
    groups
}

fn zone_label(zone_id: Option<i32>, zones: &[Zone]) -> String {
    let Some(id) = zone_id else {
        return "No zone".to_owned();
    };
    zones
        .iter()
        .find(|zone| zone.id == id)
        .map_or_else(|| format!("Zone {id} (deleted)"), Zone::label)
}
