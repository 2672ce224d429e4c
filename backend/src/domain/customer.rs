//! Customer records and the validated input used to create or edit them.

use chrono::NaiveDateTime;

/// Widest name or email the `customer` table stores, in characters.
pub const MAX_CUSTOMER_TEXT_LEN: usize = 255;
/// Widest telephone number the `customer` table stores.
pub const MAX_TELEPHONE_LEN: usize = 32;

/// A stored customer row.
///
/// Every column except the identity is nullable in storage; `forename` is
/// required on input but historical rows may lack it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: i32,
    pub org_id: Option<i32>,
    /// Invoice address, if one has been attached.
    pub address_id: Option<i32>,
    pub forename: Option<String>,
    pub surname: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub email: Option<String>,
    /// Digits only; never contains separators.
    pub telephone: Option<String>,
}

impl Customer {
    /// Forename and surname joined for display; empty parts are skipped.
    ///
    /// # Examples
    /// ```
    /// use rounds::domain::Customer;
    ///
    /// let customer = Customer {
    ///     id: 1,
    ///     org_id: None,
    ///     address_id: None,
    ///     forename: Some("Jane".to_owned()),
    ///     surname: None,
    ///     created_at: None,
    ///     email: None,
    ///     telephone: None,
    /// };
    /// assert_eq!(customer.display_name(), "Jane");
    /// ```
    pub fn display_name(&self) -> String {
        [self.forename.as_deref(), self.surname.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Validation failures for customer input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CustomerValidationError {
    #[error("Forename is required.")]
    MissingForename,
    #[error("Telephone number cannot contain spaces. Please enter numbers only.")]
    TelephoneContainsSpaces,
    #[error("Telephone number must contain only digits.")]
    TelephoneNotNumeric,
    #[error("Email address must look like name@example.com.")]
    InvalidEmail,
    #[error("{field} must be at most {max} characters.")]
    TooLong { field: &'static str, max: usize },
}

/// Raw customer fields as submitted by a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFields {
    pub forename: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
}

/// Validated customer input.
///
/// ## Invariants
/// - `forename` is non-empty once trimmed.
/// - `telephone`, when present, is one or more ASCII digits.
/// - `email`, when present, has text on both sides of a single `@`.
/// - no field is wider than its column.
/// - blank optional fields are normalised to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDraft {
    forename: String,
    surname: Option<String>,
    email: Option<String>,
    telephone: Option<String>,
}

impl CustomerDraft {
    /// Validate raw form fields.
    ///
    /// # Examples
    /// ```
    /// use rounds::domain::{CustomerDraft, CustomerFields, CustomerValidationError};
    ///
    /// let draft = CustomerDraft::try_new(CustomerFields {
    ///     forename: Some("Jane".to_owned()),
    ///     surname: Some("  ".to_owned()),
    ///     email: Some("jane@x.com".to_owned()),
    ///     telephone: Some(" 07700900123 ".to_owned()),
    /// })
    /// .expect("valid customer");
    /// assert_eq!(draft.surname(), None);
    /// assert_eq!(draft.telephone(), Some("07700900123"));
    ///
    /// let err = CustomerDraft::try_new(CustomerFields {
    ///     forename: Some("Jane".to_owned()),
    ///     telephone: Some("07700 900123".to_owned()),
    ///     ..CustomerFields::default()
    /// })
    /// .expect_err("spaces rejected");
    /// assert_eq!(err, CustomerValidationError::TelephoneContainsSpaces);
    /// ```
    pub fn try_new(fields: CustomerFields) -> Result<Self, CustomerValidationError> {
        let forename =
            non_blank(fields.forename).ok_or(CustomerValidationError::MissingForename)?;
        let forename = bounded(forename, "Forename", MAX_CUSTOMER_TEXT_LEN)?;
        let surname = non_blank(fields.surname)
            .map(|value| bounded(value, "Surname", MAX_CUSTOMER_TEXT_LEN))
            .transpose()?;
        let telephone = non_blank(fields.telephone)
            .map(validate_telephone)
            .transpose()?;
        let email = non_blank(fields.email).map(validate_email).transpose()?;
        Ok(Self {
            forename,
            surname,
            email,
            telephone,
        })
    }

    pub fn forename(&self) -> &str {
        &self.forename
    }

    pub fn surname(&self) -> Option<&str> {
        self.surname.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn telephone(&self) -> Option<&str> {
        self.telephone.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

fn validate_telephone(value: String) -> Result<String, CustomerValidationError> {
    if value.chars().any(char::is_whitespace) {
        return Err(CustomerValidationError::TelephoneContainsSpaces);
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(CustomerValidationError::TelephoneNotNumeric);
    }
    bounded(value, "Telephone number", MAX_TELEPHONE_LEN)
}

fn bounded(
    value: String,
    field: &'static str,
    max: usize,
) -> Result<String, CustomerValidationError> {
    if value.chars().count() > max {
        return Err(CustomerValidationError::TooLong { field, max });
    }
    Ok(value)
}

fn validate_email(value: String) -> Result<String, CustomerValidationError> {
    let well_formed = value
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        });
    if well_formed && !value.chars().any(char::is_whitespace) {
        bounded(value, "Email address", MAX_CUSTOMER_TEXT_LEN)
    } else {
        Err(CustomerValidationError::InvalidEmail)
    }
}
