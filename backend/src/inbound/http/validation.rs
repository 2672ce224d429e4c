//! Shared parsing and redirect helpers for inbound HTTP adapters.
//!
//! Form and query values arrive as optional strings. Blank values mean
//! "not supplied"; malformed values become `invalid_request` errors, which
//! handlers turn into a flash message and a 303 back to the form.

use actix_web::HttpResponse;
use actix_web::http::header;
use chrono::NaiveDate;

use crate::domain::Error;

use super::flash::Flash;

/// Newtype for user-facing field labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    Error::invalid_request(format!("{} is required.", field.as_str()))
}

pub(crate) fn parse_optional_date(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<NaiveDate>, Error> {
    non_blank(value)
        .map(|raw| {
            NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
                Error::invalid_request(format!(
                    "{} must be a date like 2024-01-31.",
                    field.as_str()
                ))
            })
        })
        .transpose()
}

pub(crate) fn parse_optional_id(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<i32>, Error> {
    non_blank(value)
        .map(|raw| {
            raw.parse::<i32>().map_err(|_| {
                Error::invalid_request(format!("{} must be a whole number.", field.as_str()))
            })
        })
        .transpose()
}

pub(crate) fn parse_required_id(value: Option<String>, field: FieldName) -> Result<i32, Error> {
    parse_optional_id(value, field)?.ok_or_else(|| missing_field_error(field))
}

/// 303 See Other to `location`.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}

/// Re-present a validation failure on `back`; other errors propagate.
pub(crate) fn redirect_on_validation(
    error: Error,
    flash: &Flash,
    back: &str,
) -> Result<HttpResponse, Error> {
    if !error.is_validation() {
        return Err(error);
    }
    flash.error(error.message())?;
    Ok(see_other(back))
}

/// Accept only same-site absolute paths as a post-action return target.
pub(crate) fn local_return_path(next: Option<&str>, fallback: String) -> String {
    match next.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_owned()
        }
        _ => fallback,
    }
}
