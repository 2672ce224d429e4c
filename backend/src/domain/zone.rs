//! Zones group jobs geographically for filtering and reporting.

/// Widest zone name the `zone` table stores, in characters.
pub const MAX_ZONE_NAME_LEN: usize = 255;

/// A stored zone row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub id: i32,
    pub org_id: Option<i32>,
    pub name: Option<String>,
}

impl Zone {
    /// Name for display; unnamed zones fall back to their id.
    pub fn label(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => format!("Zone {}", self.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ZoneValidationError {
    #[error("Zone name is required.")]
    EmptyName,
    #[error("Zone name must be at most {MAX_ZONE_NAME_LEN} characters.")]
    NameTooLong,
}

/// Validated zone input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneDraft {
    name: String,
}

impl ZoneDraft {
    /// # Examples
    /// ```
    /// use rounds::domain::ZoneDraft;
    ///
    /// assert_eq!(ZoneDraft::try_new(" North ").expect("valid").name(), "North");
    /// assert!(ZoneDraft::try_new("   ").is_err());
    /// ```
    pub fn try_new(name: &str) -> Result<Self, ZoneValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ZoneValidationError::EmptyName);
        }
        if trimmed.chars().count() > MAX_ZONE_NAME_LEN {
            return Err(ZoneValidationError::NameTooLong);
        }
        Ok(Self {
            name: trimmed.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("   ", Err(ZoneValidationError::EmptyName))]
    #[case(&"z".repeat(MAX_ZONE_NAME_LEN + 1), Err(ZoneValidationError::NameTooLong))]
    #[case(&"z".repeat(MAX_ZONE_NAME_LEN), Ok(MAX_ZONE_NAME_LEN))]
    fn name_length_is_bounded(
        #[case] name: &str,
        #[case] expected: Result<usize, ZoneValidationError>,
    ) {
        let result = ZoneDraft::try_new(name).map(|draft| draft.name().len());
        assert_eq!(result, expected);
    }

    #[rstest]
    #[case(Some("North"), "North")]
    #[case(Some(" "), "Zone 4")]
    #[case(None, "Zone 4")]
    fn label_falls_back_to_id(#[case] name: Option<&str>, #[case] expected: &str) {
        let zone = Zone {
            id: 4,
            org_id: None,
            name: name.map(str::to_owned),
        };
        assert_eq!(zone.label(), expected);
    }
}
