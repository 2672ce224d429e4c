//! Server-rendered HTML pages.
//!
//! Pages are plain strings assembled with `format!`. Every value that came
//! from a user or the database goes through [`escape_html`] before it is
//! interpolated.

mod customers;
mod jobs;
mod reports;

pub use customers::{customer_detail, customer_form, customers_list, dashboard};
pub use jobs::{attach_customer_form, due_jobs, job_detail, job_form, jobs_list};
pub use reports::{admin, stats, unpaid};

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use super::flash::FlashMessage;

const STYLE: &str = "body{font-family:sans-serif;margin:0}\
nav{background:#1d4e89;padding:.6em 1em}nav a{color:#fff;margin-right:1em;text-decoration:none}\
main{padding:1em 2em}table{border-collapse:collapse}td,th{border:1px solid #ccc;padding:.3em .6em}\
.flash-success{background:#dff0d8;padding:.5em}.flash-error{background:#f2dede;padding:.5em}\
form.inline{display:inline}label{display:block;margin-top:.5em}";

/// Escape text for an HTML body or a double-quoted attribute.
///
/// # Examples
/// ```
/// use rounds::inbound::http::views::escape_html;
///
/// assert_eq!(escape_html("<b>\"O'Neil\" & co</b>"),
///     "&lt;b&gt;&quot;O&#39;Neil&quot; &amp; co&lt;/b&gt;");
/// ```
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Wrap a page body in the shared layout.
pub fn layout(title: &str, flashes: &[FlashMessage], body: &str) -> String {
    let mut messages = String::new();
    for flash in flashes {
        messages.push_str(&format!(
            "<p class=\"{}\">{}</p>",
            flash.level.css_class(),
            escape_html(&flash.message)
        ));
    }
    let title = escape_html(title);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
<title>{title} | Rounds</title><style>{STYLE}</style></head><body>\
<nav><a href=\"/\">Dashboard</a><a href=\"/customers\">Customers</a><a href=\"/jobs\">Jobs</a>\
<a href=\"/jobs/due\">Due</a><a href=\"/payments/unpaid\">Unpaid</a><a href=\"/stats\">Stats</a>\
<a href=\"/admin\">Admin</a></nav><main>{messages}<h1>{title}</h1>{body}</main></body></html>"
    )
}

/// 200 response with an HTML body.
pub fn html(page: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page)
}

/// Generic error page.
pub fn error_page(status: StatusCode, message: &str, trace_id: Option<&str>) -> String {
    let reference = trace_id
        .map(|id| format!("<p><small>Reference: {}</small></p>", escape_html(id)))
        .unwrap_or_default();
    let title = status.canonical_reason().unwrap_or("Error");
    layout(
        title,
        &[],
        &format!(
            "<p>{}</p>{reference}<p><a href=\"/\">Back to the dashboard</a></p>",
            escape_html(message)
        ),
    )
}

pub(crate) fn text(value: Option<&str>) -> String {
    value.map(escape_html).unwrap_or_default()
}

pub(crate) fn money(value: Option<Decimal>) -> String {
    value.map(|price| format!("£{price:.2}")).unwrap_or_else(|| "-".to_owned())
}

pub(crate) fn date(value: Option<NaiveDate>) -> String {
    value
        .map(|day| day.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_owned())
}

pub(crate) fn timestamp(value: Option<NaiveDateTime>) -> String {
    value
        .map(|moment| moment.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_owned())
}

/// Human form of a frequency stored in days.
pub(crate) fn frequency(days: Option<i32>) -> String {
    match days {
        None => "one-off".to_owned(),
        Some(1) => "every day".to_owned(),
        Some(days) => match (days.checked_rem(7), days.checked_div(7)) {
            (Some(0), Some(1)) => "every week".to_owned(),
            (Some(0), Some(weeks)) if weeks > 0 => format!("every {weeks} weeks"),
            _ => format!("every {days} days"),
        },
    }
}

/// Weeks value for prefilling the job form.
pub(crate) fn frequency_weeks_input(days: Option<i32>) -> String {
    match days {
        Some(days) if days.checked_rem(7) == Some(0) => {
            days.checked_div(7).map(|weeks| weeks.to_string()).unwrap_or_default()
        }
        _ => String::new(),
    }
}

pub(crate) fn id_option(value: Option<i32>) -> String {
    value.map(|id| id.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::flash::FlashLevel;
    use rstest::rstest;

    #[rstest]
    #[case(None, "one-off")]
    #[case(Some(0), "every 0 days")]
    #[case(Some(1), "every day")]
    #[case(Some(7), "every week")]
    #[case(Some(14), "every 2 weeks")]
    #[case(Some(10), "every 10 days")]
    fn frequency_reads_naturally(#[case] days: Option<i32>, #[case] expected: &str) {
        assert_eq!(frequency(days), expected);
    }

    #[rstest]
    #[case(Some(28), "4")]
    #[case(Some(10), "")]
    #[case(None, "")]
    fn weeks_prefill_only_for_whole_weeks(#[case] days: Option<i32>, #[case] expected: &str) {
        assert_eq!(frequency_weeks_input(days), expected);
    }

    #[rstest]
    fn money_uses_two_places() {
        assert_eq!(money(Some(Decimal::new(50, 0))), "£50.00");
        assert_eq!(money(Some(Decimal::new(1255, 2))), "£12.55");
        assert_eq!(money(None), "-");
    }

    #[rstest]
    fn layout_escapes_flash_and_title() {
        let page = layout(
            "Tom & Jerry",
            &[FlashMessage {
                level: FlashLevel::Error,
                message: "<script>".to_owned(),
            }],
            "<p>body</p>",
        );
        assert!(page.contains("<h1>Tom &amp; Jerry</h1>"));
        assert!(page.contains("<p class=\"flash-error\">&lt;script&gt;</p>"));
        assert!(page.contains("<p>body</p>"));
    }

    #[rstest]
    fn error_page_shows_reference() {
        let page = error_page(StatusCode::NOT_FOUND, "job 9 not found", Some("abc"));
        assert!(page.contains("Not Found"));
        assert!(page.contains("job 9 not found"));
        assert!(page.contains("Reference: abc"));
    }
}
