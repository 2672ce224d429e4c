//! Jobs, their recurrence schedule, and the completion rule.
//!
//! A job recurs every `frequency` days. Its next due date is always derived
//! from the date it was last done:
//!
//! ```text
//! date_next_due = date_last_done + frequency days   (at midnight)
//! ```
//!
//! Jobs without a frequency are one-off and never become due.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use super::{AddressDraft, AddressFields, AddressValidationError, JobHistoryEntry};

/// Largest price a `NUMERIC(10, 2)` column can hold.
const MAX_PRICE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// A stored job row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: i32,
    pub price: Option<Decimal>,
    pub date_last_done: Option<NaiveDate>,
    /// Recurrence interval in days.
    pub frequency: Option<i32>,
    pub org_id: Option<i32>,
    pub address_id: Option<i32>,
    /// Not enforced by a foreign key; may reference a deleted zone.
    pub zone_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub info: Option<String>,
    pub date_next_due: Option<NaiveDateTime>,
    pub payment_type_id: Option<i32>,
}

impl Job {
    /// Whether the job is due on or before `reference`.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use rounds::domain::{Job, next_due_after};
    ///
    /// let done = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
    /// let job = Job {
    ///     id: 1,
    ///     price: None,
    ///     date_last_done: Some(done),
    ///     frequency: Some(7),
    ///     org_id: None,
    ///     address_id: None,
    ///     zone_id: None,
    ///     customer_id: None,
    ///     info: None,
    ///     date_next_due: next_due_after(done, 7),
    ///     payment_type_id: None,
    /// };
    /// assert!(!job.is_due_on(NaiveDate::from_ymd_opt(2024, 1, 7).expect("date")));
    /// assert!(job.is_due_on(NaiveDate::from_ymd_opt(2024, 1, 8).expect("date")));
    /// ```
    pub fn is_due_on(&self, reference: NaiveDate) -> bool {
        self.frequency.is_some()
            && self
                .date_next_due
                .is_some_and(|due| due.date() <= reference)
    }
}

/// Midnight on `last_done + frequency_days`.
///
/// Returns `None` for negative frequencies or dates past the calendar range.
pub fn next_due_after(last_done: NaiveDate, frequency_days: i32) -> Option<NaiveDateTime> {
    let days = u64::try_from(frequency_days).ok()?;
    last_done
        .checked_add_days(Days::new(days))
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// Writes applied when a job is marked done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCompletionPlan {
    pub date_last_done: NaiveDate,
    /// Cleared when the job has no frequency.
    pub date_next_due: Option<NaiveDateTime>,
    /// Timestamp recorded on the new history row.
    pub completed_at: NaiveDateTime,
    /// Copied from the job onto the history row.
    pub payment_type_id: Option<i32>,
}

impl JobCompletionPlan {
    /// Plan the completion of `job` at `completed_at`.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use rounds::domain::{Job, JobCompletionPlan};
    ///
    /// let job = Job {
    ///     id: 1,
    ///     price: None,
    ///     date_last_done: NaiveDate::from_ymd_opt(2024, 1, 1),
    ///     frequency: Some(7),
    ///     org_id: None,
    ///     address_id: None,
    ///     zone_id: None,
    ///     customer_id: None,
    ///     info: None,
    ///     date_next_due: None,
    ///     payment_type_id: Some(2),
    /// };
    /// let at = NaiveDate::from_ymd_opt(2024, 1, 8)
    ///     .and_then(|d| d.and_hms_opt(9, 30, 0))
    ///     .expect("timestamp");
    /// let plan = JobCompletionPlan::for_job(&job, at);
    /// assert_eq!(plan.date_last_done, at.date());
    /// assert_eq!(
    ///     plan.date_next_due.map(|due| due.date()),
    ///     NaiveDate::from_ymd_opt(2024, 1, 15)
    /// );
    /// assert_eq!(plan.payment_type_id, Some(2));
    /// ```
    pub fn for_job(job: &Job, completed_at: NaiveDateTime) -> Self {
        let date_last_done = completed_at.date();
        Self {
            date_last_done,
            date_next_due: job
                .frequency
                .and_then(|days| next_due_after(date_last_done, days)),
            completed_at,
            payment_type_id: job.payment_type_id,
        }
    }
}

/// Result of completing a job: the updated job and its new history row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCompletion {
    pub job: Job,
    pub history: JobHistoryEntry,
}

/// Validation failures for job input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobValidationError {
    #[error("Price must be a non-negative amount such as 25.00.")]
    InvalidPrice,
    #[error("Frequency must be a whole number of weeks.")]
    InvalidFrequency,
    #[error("Date last done must be a date in YYYY-MM-DD format.")]
    InvalidDate,
    #[error("Zone must be chosen from the list.")]
    InvalidZone,
    #[error("Payment type must be a number.")]
    InvalidPaymentType,
    #[error(transparent)]
    Address(#[from] AddressValidationError),
}

/// Raw job fields as submitted by a form.
///
/// `frequency_weeks` is entered in weeks; the stored frequency is in days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFields {
    pub price: Option<String>,
    pub frequency_weeks: Option<String>,
    pub date_last_done: Option<String>,
    pub zone_id: Option<String>,
    pub info: Option<String>,
    pub payment_type_id: Option<String>,
    pub address: AddressFields,
}

/// Validated job input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDraft {
    price: Option<Decimal>,
    frequency_days: Option<i32>,
    date_last_done: Option<NaiveDate>,
    zone_id: Option<i32>,
    info: Option<String>,
    payment_type_id: Option<i32>,
    address: Option<AddressDraft>,
}

impl JobDraft {
    /// Validate raw form fields. Blank fields become `None`.
    ///
    /// # Examples
    /// ```
    /// use rounds::domain::{JobDraft, JobFields};
    ///
    /// let draft = JobDraft::try_new(JobFields {
    ///     price: Some("50".to_owned()),
    ///     frequency_weeks: Some("4".to_owned()),
    ///     date_last_done: Some("2024-01-01".to_owned()),
    ///     ..JobFields::default()
    /// })
    /// .expect("valid job");
    /// assert_eq!(draft.frequency_days(), Some(28));
    /// assert!(draft.address().is_none());
    /// ```
    pub fn try_new(fields: JobFields) -> Result<Self, JobValidationError> {
        let price = parse_optional(fields.price.as_deref(), parse_price)?;
        let frequency_days =
            parse_optional(fields.frequency_weeks.as_deref(), parse_frequency_weeks)?;
        let date_last_done = parse_optional(fields.date_last_done.as_deref(), |raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| JobValidationError::InvalidDate)
        })?;
        let zone_id = parse_optional(fields.zone_id.as_deref(), |raw| {
            raw.parse::<i32>()
                .map_err(|_| JobValidationError::InvalidZone)
        })?;
        let payment_type_id = parse_optional(fields.payment_type_id.as_deref(), |raw| {
            raw.parse::<i32>()
                .map_err(|_| JobValidationError::InvalidPaymentType)
        })?;
        if let (Some(done), Some(days)) = (date_last_done, frequency_days) {
            // A due date past the calendar range would leave the job unschedulable.
            next_due_after(done, days).ok_or(JobValidationError::InvalidFrequency)?;
        }
        let address = AddressDraft::from_fields(&fields.address)?;
        let info = fields
            .info
            .map(|raw| raw.trim().to_owned())
            .filter(|text| !text.is_empty());

        Ok(Self {
            price,
            frequency_days,
            date_last_done,
            zone_id,
            info,
            payment_type_id,
            address,
        })
    }

    pub fn price(&self) -> Option<Decimal> {
        self.price
    }

    /// Recurrence interval in days.
    pub fn frequency_days(&self) -> Option<i32> {
        self.frequency_days
    }

    pub fn date_last_done(&self) -> Option<NaiveDate> {
        self.date_last_done
    }

    pub fn zone_id(&self) -> Option<i32> {
        self.zone_id
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    pub fn payment_type_id(&self) -> Option<i32> {
        self.payment_type_id
    }

    /// Address to find or create, when the form supplied one.
    pub fn address(&self) -> Option<&AddressDraft> {
        self.address.as_ref()
    }

    /// Next due date implied by the draft, if both inputs are present.
    pub fn date_next_due(&self) -> Option<NaiveDateTime> {
        let done = self.date_last_done?;
        next_due_after(done, self.frequency_days?)
    }
}

fn parse_optional<T>(
    raw: Option<&str>,
    parse: impl FnOnce(&str) -> Result<T, JobValidationError>,
) -> Result<Option<T>, JobValidationError> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => parse(value).map(Some),
        None => Ok(None),
    }
}

fn parse_price(raw: &str) -> Result<Decimal, JobValidationError> {
    let price = raw
        .trim_start_matches('£')
        .parse::<Decimal>()
        .map_err(|_| JobValidationError::InvalidPrice)?
        .round_dp(2);
    if price.is_sign_negative() || price > MAX_PRICE {
        return Err(JobValidationError::InvalidPrice);
    }
    Ok(price)
}

fn parse_frequency_weeks(raw: &str) -> Result<i32, JobValidationError> {
    raw.parse::<i32>()
        .ok()
        .filter(|weeks| *weeks >= 0)
        .and_then(|weeks| weeks.checked_mul(7))
        .ok_or(JobValidationError::InvalidFrequency)
}

/// Column values for inserting a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub price: Option<Decimal>,
    pub date_last_done: Option<NaiveDate>,
    pub frequency: Option<i32>,
    pub org_id: Option<i32>,
    pub address_id: Option<i32>,
    pub zone_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub info: Option<String>,
    pub date_next_due: Option<NaiveDateTime>,
    pub payment_type_id: Option<i32>,
}

impl NewJob {
    /// Combine a validated draft with the ids resolved by the caller.
    pub fn from_draft(
        draft: &JobDraft,
        org_id: Option<i32>,
        address_id: Option<i32>,
        customer_id: Option<i32>,
    ) -> Self {
        Self {
            price: draft.price(),
            date_last_done: draft.date_last_done(),
            frequency: draft.frequency_days(),
            org_id,
            address_id,
            zone_id: draft.zone_id(),
            customer_id,
            info: draft.info().map(str::to_owned),
            date_next_due: draft.date_next_due(),
            payment_type_id: draft.payment_type_id(),
        }
    }
}

/// Editable job columns; every field overwrites the stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobChanges {
    pub price: Option<Decimal>,
    pub date_last_done: Option<NaiveDate>,
    pub frequency: Option<i32>,
    pub address_id: Option<i32>,
    pub zone_id: Option<i32>,
    pub info: Option<String>,
    pub date_next_due: Option<NaiveDateTime>,
    pub payment_type_id: Option<i32>,
}

impl JobChanges {
    pub fn from_draft(draft: &JobDraft, address_id: Option<i32>) -> Self {
        Self {
            price: draft.price(),
            date_last_done: draft.date_last_done(),
            frequency: draft.frequency_days(),
            address_id,
            zone_id: draft.zone_id(),
            info: draft.info().map(str::to_owned),
            date_next_due: draft.date_next_due(),
            payment_type_id: draft.payment_type_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn job_with(frequency: Option<i32>, due: Option<NaiveDate>) -> Job {
        Job {
            id: 1,
            price: None,
            date_last_done: None,
            frequency,
            org_id: None,
            address_id: None,
            zone_id: None,
            customer_id: None,
            info: None,
            date_next_due: due.map(|d| d.and_time(NaiveTime::MIN)),
            payment_type_id: None,
        }
    }

    #[rstest]
    #[case(0, date(2024, 1, 8))]
    #[case(7, date(2024, 1, 15))]
    #[case(28, date(2024, 2, 5))]
    #[case(366, date(2025, 1, 8))]
    fn next_due_adds_frequency_days(#[case] frequency: i32, #[case] expected: NaiveDate) {
        let due = next_due_after(date(2024, 1, 8), frequency).expect("in range");
        assert_eq!(due, expected.and_time(NaiveTime::MIN));
    }

    #[rstest]
    fn next_due_rejects_negative_frequency() {
        assert!(next_due_after(date(2024, 1, 8), -1).is_none());
    }

    #[rstest]
    #[case(Some(7), Some(date(2024, 1, 15)), date(2024, 1, 15), true)]
    #[case(Some(7), Some(date(2024, 1, 15)), date(2024, 1, 14), false)]
    #[case(Some(7), None, date(2024, 1, 15), false)]
    #[case(None, Some(date(2024, 1, 1)), date(2024, 1, 15), false)]
    fn due_requires_frequency_and_past_due_date(
        #[case] frequency: Option<i32>,
        #[case] due: Option<NaiveDate>,
        #[case] reference: NaiveDate,
        #[case] expected: bool,
    ) {
        assert_eq!(job_with(frequency, due).is_due_on(reference), expected);
    }

    #[rstest]
    fn completion_plan_uses_completion_day() {
        let mut job = job_with(Some(7), Some(date(2024, 1, 8)));
        job.date_last_done = Some(date(2024, 1, 1));
        job.payment_type_id = Some(3);
        let at = date(2024, 1, 8).and_hms_opt(17, 45, 0).expect("time");

        let plan = JobCompletionPlan::for_job(&job, at);

        assert_eq!(plan.date_last_done, date(2024, 1, 8));
        assert_eq!(
            plan.date_next_due,
            Some(date(2024, 1, 15).and_time(NaiveTime::MIN))
        );
        assert_eq!(plan.completed_at, at);
        assert_eq!(plan.payment_type_id, Some(3));
    }

    #[rstest]
    fn completion_plan_clears_due_date_without_frequency() {
        let job = job_with(None, Some(date(2024, 1, 8)));
        let at = date(2024, 1, 8).and_time(NaiveTime::MIN);
        assert_eq!(JobCompletionPlan::for_job(&job, at).date_next_due, None);
    }

    #[rstest]
    #[case("50", Some("50"))]
    #[case("£12.5", Some("12.50"))]
    #[case("19.999", Some("20.00"))]
    #[case("", None)]
    fn price_parsing(#[case] raw: &str, #[case] expected: Option<&str>) {
        let draft = JobDraft::try_new(JobFields {
            price: Some(raw.to_owned()),
            ..JobFields::default()
        })
        .expect("valid price");
        let expected = expected.map(|text| text.parse::<Decimal>().expect("decimal"));
        assert_eq!(draft.price(), expected);
    }

    #[rstest]
    #[case(JobFields { price: Some("-1".into()), ..JobFields::default() }, JobValidationError::InvalidPrice)]
    #[case(JobFields { price: Some("abc".into()), ..JobFields::default() }, JobValidationError::InvalidPrice)]
    #[case(JobFields { price: Some("100000000".into()), ..JobFields::default() }, JobValidationError::InvalidPrice)]
    #[case(JobFields { frequency_weeks: Some("-2".into()), ..JobFields::default() }, JobValidationError::InvalidFrequency)]
    #[case(JobFields { frequency_weeks: Some("1.5".into()), ..JobFields::default() }, JobValidationError::InvalidFrequency)]
    #[case(JobFields { date_last_done: Some("01/02/2024".into()), ..JobFields::default() }, JobValidationError::InvalidDate)]
    #[case(JobFields { zone_id: Some("north".into()), ..JobFields::default() }, JobValidationError::InvalidZone)]
    #[case(JobFields { payment_type_id: Some("cash".into()), ..JobFields::default() }, JobValidationError::InvalidPaymentType)]
    fn rejects_malformed_fields(#[case] fields: JobFields, #[case] expected: JobValidationError) {
        assert_eq!(JobDraft::try_new(fields), Err(expected));
    }

    #[rstest]
    fn unschedulable_frequency_is_rejected() {
        let fields = JobFields {
            frequency_weeks: Some("100000000".into()),
            date_last_done: Some("2024-01-01".into()),
            ..JobFields::default()
        };
        assert_eq!(
            JobDraft::try_new(fields),
            Err(JobValidationError::InvalidFrequency)
        );
    }

    #[rstest]
    fn overlong_address_is_rejected() {
        let fields = JobFields {
            address: AddressFields {
                house_num_name: Some("12".into()),
                street_name: Some("High St".into()),
                postcode: Some("AB1 2CD AB1 2CD AB1".into()),
            },
            ..JobFields::default()
        };
        assert!(matches!(
            JobDraft::try_new(fields),
            Err(JobValidationError::Address(AddressValidationError::TooLong { .. }))
        ));
    }

    #[rstest]
    fn draft_schedules_from_last_done() {
        let draft = JobDraft::try_new(JobFields {
            frequency_weeks: Some("1".into()),
            date_last_done: Some("2024-01-01".into()),
            address: AddressFields {
                house_num_name: Some("12".into()),
                street_name: Some("High St".into()),
                postcode: None,
            },
            ..JobFields::default()
        })
        .expect("valid job");

        assert_eq!(draft.frequency_days(), Some(7));
        assert_eq!(
            draft.date_next_due(),
            Some(date(2024, 1, 8).and_time(NaiveTime::MIN))
        );
        assert_eq!(
            draft.address().map(AddressDraft::street_name),
            Some("High St")
        );
    }

    #[rstest]
    #[case(Some("2"), None)]
    #[case(None, Some("2024-01-01"))]
    fn draft_without_both_inputs_has_no_due_date(
        #[case] weeks: Option<&str>,
        #[case] last_done: Option<&str>,
    ) {
        let draft = JobDraft::try_new(JobFields {
            frequency_weeks: weeks.map(str::to_owned),
            date_last_done: last_done.map(str::to_owned),
            ..JobFields::default()
        })
        .expect("valid job");
        assert_eq!(draft.date_next_due(), None);
    }

    #[rstest]
    fn max_price_matches_column_precision() {
        assert_eq!(MAX_PRICE.to_string(), "99999999.99");
    }
}
