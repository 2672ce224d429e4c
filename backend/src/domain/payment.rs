//! Job history rows and the unpaid-work projection.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// One completion of a job.
///
/// History rows are append-only apart from `paid`, which moves from `false`
/// to `true` exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHistoryEntry {
    pub id: i32,
    pub job_id: i32,
    pub completed_at: Option<NaiveDateTime>,
    pub paid: bool,
    pub payment_type_id: Option<i32>,
}

/// Completed but unpaid work, joined with job, customer, and address data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpaidJob {
    pub history_id: i32,
    pub job_id: i32,
    pub completed_at: Option<NaiveDateTime>,
    pub price: Option<Decimal>,
    pub customer_forename: Option<String>,
    pub customer_surname: Option<String>,
    pub house_num_name: Option<String>,
    pub street_name: Option<String>,
    pub postcode: Option<String>,
}

impl UnpaidJob {
    pub fn customer_name(&self) -> String {
        [
            self.customer_forename.as_deref(),
            self.customer_surname.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    pub fn address(&self) -> String {
        super::format_address(
            self.house_num_name.as_deref(),
            self.street_name.as_deref(),
            self.postcode.as_deref(),
        )
    }
}

/// Total owed across a set of unpaid rows; rows without a price count as zero.
///
/// # Examples
/// ```
/// use rounds::domain::outstanding_total;
///
/// assert_eq!(outstanding_total(&[]), rust_decimal::Decimal::ZERO);
/// ```
pub fn outstanding_total(rows: &[UnpaidJob]) -> Decimal {
    rows.iter().filter_map(|row| row.price).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn unpaid(price: Option<&str>) -> UnpaidJob {
        UnpaidJob {
            history_id: 1,
            job_id: 1,
            completed_at: None,
            price: price.map(|p| p.parse().expect("decimal")),
            customer_forename: Some("Jane".into()),
            customer_surname: None,
            house_num_name: Some("12".into()),
            street_name: Some("High St".into()),
            postcode: None,
        }
    }

    #[rstest]
    fn total_skips_missing_prices() {
        let rows = [unpaid(Some("10.50")), unpaid(None), unpaid(Some("4.50"))];
        assert_eq!(outstanding_total(&rows), "15.00".parse().expect("decimal"));
    }

    #[rstest]
    fn display_helpers_join_parts() {
        let row = unpaid(None);
        assert_eq!(row.customer_name(), "Jane");
        assert_eq!(row.address(), "12 High St");
    }
}
