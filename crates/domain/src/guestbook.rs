//! Guestbook form schema and payload.

use std::sync::LazyLock;

use folio_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::schema::{FieldSchema, FormSchema, RuleCheck};
use crate::values::ValidatedValues;

/// The guestbook's only field.
pub const GUESTBOOK_ENTRY_FIELD: &str = "entry";

static GUESTBOOK_SCHEMA: LazyLock<AppResult<FormSchema>> = LazyLock::new(|| {
    FormSchema::new(
        "guestbook",
        vec![
            FieldSchema::new(GUESTBOOK_ENTRY_FIELD)?
                .with_label("Your message ...")
                .trimmed()
                .rule(RuleCheck::MinChars(1), "Message must be atleast 1 character.")?,
        ],
    )
});

/// Returns the shared guestbook form schema.
pub fn guestbook_schema() -> AppResult<&'static FormSchema> {
    GUESTBOOK_SCHEMA
        .as_ref()
        .map_err(|error| AppError::Internal(format!("guestbook schema: {error}")))
}

/// Validated guestbook entry handed to the persistence handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestbookEntry {
    /// Entry text, trimmed.
    pub entry: String,
}

impl GuestbookEntry {
    /// Builds the entry from validated guestbook values.
    pub fn from_validated(values: &ValidatedValues) -> AppResult<Self> {
        Ok(Self {
            entry: values.require(GUESTBOOK_ENTRY_FIELD)?.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{FormValues, ValidationResult, validate};

    use super::{GUESTBOOK_ENTRY_FIELD, GuestbookEntry, guestbook_schema};

    fn validate_entry(entry: &str) -> ValidationResult {
        let schema = guestbook_schema().unwrap_or_else(|error| panic!("{error}"));
        let mut values = FormValues::empty(schema);
        values
            .set(GUESTBOOK_ENTRY_FIELD, entry)
            .unwrap_or_else(|error| panic!("{error}"));
        validate(schema, &values)
    }

    #[test]
    fn empty_entry_is_rejected() {
        let ValidationResult::Invalid(errors) = validate_entry("") else {
            panic!("expected invalid guestbook entry");
        };

        assert_eq!(errors.fields(), vec![GUESTBOOK_ENTRY_FIELD]);
        assert_eq!(
            errors.get(GUESTBOOK_ENTRY_FIELD),
            Some("Message must be atleast 1 character.")
        );
    }

    #[test]
    fn whitespace_only_entry_is_rejected() {
        assert!(!validate_entry("   \t").is_valid());
    }

    #[test]
    fn entry_is_trimmed_into_payload() {
        let ValidationResult::Valid(values) = validate_entry("  hello  ") else {
            panic!("expected valid guestbook entry");
        };

        let entry = GuestbookEntry::from_validated(&values).map(|entry| entry.entry);
        assert_eq!(entry.ok().as_deref(), Some("hello"));
    }
}
