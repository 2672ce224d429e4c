//! Postal addresses shared by customers (invoice address) and jobs.

/// Column widths of the `address` table, in characters.
pub const MAX_HOUSE_NUM_NAME_LEN: usize = 255;
pub const MAX_STREET_NAME_LEN: usize = 255;
pub const MAX_POSTCODE_LEN: usize = 16;

/// A stored address row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: i32,
    pub house_num_name: Option<String>,
    pub street_name: Option<String>,
    pub postcode: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl Address {
    /// Single-line rendering, e.g. `12 High Street, AB1 2CD`.
    pub fn summary(&self) -> String {
        format_address(
            self.house_num_name.as_deref(),
            self.street_name.as_deref(),
            self.postcode.as_deref(),
        )
    }
}

/// Join address parts into one line, skipping blanks.
///
/// # Examples
/// ```
/// use rounds::domain::format_address;
///
/// assert_eq!(format_address(Some("12"), Some("High St"), None), "12 High St");
/// assert_eq!(
///     format_address(Some("Rose Cottage"), Some("Lane"), Some("AB1 2CD")),
///     "Rose Cottage Lane, AB1 2CD"
/// );
/// ```
pub fn format_address(house: Option<&str>, street: Option<&str>, postcode: Option<&str>) -> String {
    let first_line = [house, street]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    match postcode.map(str::trim).filter(|code| !code.is_empty()) {
        Some(code) if first_line.is_empty() => code.to_owned(),
        Some(code) => format!("{first_line}, {code}"),
        None => first_line,
    }
}

/// Raw address fields as submitted by a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressFields {
    pub house_num_name: Option<String>,
    pub street_name: Option<String>,
    pub postcode: Option<String>,
}

/// Validation failures for address input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressValidationError {
    #[error("{field} must be at most {max} characters.")]
    TooLong { field: &'static str, max: usize },
}

/// Address fields used for find-or-create lookups.
///
/// A draft only exists when both house and street are present; the postcode
/// is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressDraft {
    house_num_name: String,
    street_name: String,
    postcode: Option<String>,
}

impl AddressDraft {
    /// Build a draft from raw form values.
    ///
    /// Returns `Ok(None)` when either house or street is blank, meaning the
    /// form did not supply an address.
    ///
    /// # Errors
    /// [`AddressValidationError::TooLong`] when a part is wider than its
    /// column.
    pub fn from_parts(
        house_num_name: Option<&str>,
        street_name: Option<&str>,
        postcode: Option<&str>,
    ) -> Result<Option<Self>, AddressValidationError> {
        let postcode = postcode
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|code| bounded(code, "Postcode", MAX_POSTCODE_LEN))
            .transpose()?;
        let (Some(house), Some(street)) = (
            house_num_name.map(str::trim).filter(|v| !v.is_empty()),
            street_name.map(str::trim).filter(|v| !v.is_empty()),
        ) else {
            return Ok(None);
        };
        Ok(Some(Self {
            house_num_name: bounded(house, "House number or name", MAX_HOUSE_NUM_NAME_LEN)?,
            street_name: bounded(street, "Street", MAX_STREET_NAME_LEN)?,
            postcode,
        }))
    }

    /// # Errors
    /// See [`AddressDraft::from_parts`].
    pub fn from_fields(fields: &AddressFields) -> Result<Option<Self>, AddressValidationError> {
        Self::from_parts(
            fields.house_num_name.as_deref(),
            fields.street_name.as_deref(),
            fields.postcode.as_deref(),
        )
    }

    pub fn house_num_name(&self) -> &str {
        &self.house_num_name
    }

    pub fn street_name(&self) -> &str {
        &self.street_name
    }

    pub fn postcode(&self) -> Option<&str> {
        self.postcode.as_deref()
    }
}

fn bounded(
    value: &str,
    field: &'static str,
    max: usize,
) -> Result<String, AddressValidationError> {
    if value.chars().count() > max {
        return Err(AddressValidationError::TooLong { field, max });
    }
    Ok(value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("12"), Some("High St"), Some("AB1 2CD"), true)]
    #[case(Some("12"), Some("High St"), None, true)]
    #[case(Some("12"), None, Some("AB1 2CD"), false)]
    #[case(Some(" "), Some("High St"), None, false)]
    #[case(None, None, None, false)]
    fn draft_requires_house_and_street(
        #[case] house: Option<&str>,
        #[case] street: Option<&str>,
        #[case] postcode: Option<&str>,
        #[case] expected: bool,
    ) {
        let draft = AddressDraft::from_parts(house, street, postcode).expect("within limits");
        assert_eq!(draft.is_some(), expected);
    }

    #[rstest]
    fn draft_trims_and_drops_blank_postcode() {
        let draft = AddressDraft::from_parts(Some(" 7 "), Some(" Mill Road "), Some("  "))
            .expect("within limits")
            .expect("address present");
        assert_eq!(draft.house_num_name(), "7");
        assert_eq!(draft.street_name(), "Mill Road");
        assert_eq!(draft.postcode(), None);
    }

    #[rstest]
    #[case("a".repeat(MAX_HOUSE_NUM_NAME_LEN + 1), "High St".to_owned(), None, "House number or name")]
    #[case("12".to_owned(), "s".repeat(MAX_STREET_NAME_LEN + 1), None, "Street")]
    #[case("12".to_owned(), "High St".to_owned(), Some("A".repeat(MAX_POSTCODE_LEN + 1)), "Postcode")]
    fn overlong_parts_are_rejected(
        #[case] house: String,
        #[case] street: String,
        #[case] postcode: Option<String>,
        #[case] field: &str,
    ) {
        let err =
            AddressDraft::from_parts(Some(house.as_str()), Some(street.as_str()), postcode.as_deref())
                .expect_err("too long");
        assert!(matches!(err, AddressValidationError::TooLong { field: f, .. } if f == field));
    }

    #[rstest]
    fn parts_at_column_width_are_accepted() {
        let postcode = "A".repeat(MAX_POSTCODE_LEN);
        let street = "é".repeat(MAX_STREET_NAME_LEN);
        let draft =
            AddressDraft::from_parts(Some("12"), Some(street.as_str()), Some(postcode.as_str()))
                .expect("within limits")
                .expect("address present");
        assert_eq!(draft.postcode(), Some(postcode.as_str()));
    }

    #[rstest]
    #[case(None, None, Some("AB1"), "AB1")]
    #[case(None, None, None, "")]
    #[case(Some("3"), Some(""), None, "3")]
    fn format_handles_sparse_rows(
        #[case] house: Option<&str>,
        #[case] street: Option<&str>,
        #[case] postcode: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(format_address(house, street, postcode), expected);
    }
}
