use folio_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::schema::FormSchema;

/// Current user input for one form instance, keyed by the schema's fields.
///
/// Only [`FormValues::empty`] creates values, so the keys always match the
/// schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormValues {
    form: String,
    entries: Vec<(String, String)>,
}

impl FormValues {
    /// Creates empty values for every field declared by the schema.
    #[must_use]
    pub fn empty(schema: &FormSchema) -> Self {
        Self {
            form: schema.name().to_owned(),
            entries: schema
                .fields()
                .iter()
                .map(|field| (field.name().to_owned(), String::new()))
                .collect(),
        }
    }

    /// Replaces the value of a declared field.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> AppResult<()> {
        let Some((_, slot)) = self.entries.iter_mut().find(|(name, _)| name == field) else {
            return Err(AppError::NotFound(format!(
                "form '{}' has no field '{field}'",
                self.form
            )));
        };

        *slot = value.into();
        Ok(())
    }

    /// Returns the value of a declared field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates `(field, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns whether every field holds an empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, value)| value.is_empty())
    }
}

/// Sanitized values produced by a successful validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedValues {
    entries: Vec<(String, String)>,
}

impl ValidatedValues {
    pub(crate) fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// Returns a sanitized value by field name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Returns a sanitized value, failing when the field is missing.
    pub fn require(&self, field: &str) -> AppResult<&str> {
        self.get(field).ok_or_else(|| {
            AppError::Internal(format!("validated values are missing field '{field}'"))
        })
    }
}

/// Inline error attached to one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name.
    pub field: String,
    /// First violated rule's message.
    pub message: String,
}

/// Field-level errors in schema order, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub(crate) fn push(&mut self, field: &str, message: &str) {
        self.0.push(FieldError {
            field: field.to_owned(),
            message: message.to_owned(),
        });
    }

    /// Returns the message attached to a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    /// Returns the names of failing fields in schema order.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|error| error.field.as_str()).collect()
    }

    /// Returns all errors.
    #[must_use]
    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns the number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::{FieldSchema, FormSchema};

    use super::FormValues;

    fn schema() -> FormSchema {
        let fields = ["name", "note"]
            .into_iter()
            .map(FieldSchema::new)
            .collect::<Result<Vec<_>, _>>()
            .unwrap_or_else(|error| panic!("invalid field: {error}"));
        FormSchema::new("sample", fields).unwrap_or_else(|error| panic!("invalid schema: {error}"))
    }

    #[test]
    fn empty_values_cover_exactly_the_schema_fields() {
        let values = FormValues::empty(&schema());
        let names: Vec<&str> = values.iter().map(|(name, _)| name).collect();

        assert_eq!(names, vec!["name", "note"]);
        assert!(values.is_empty());
    }

    #[test]
    fn setting_unknown_field_is_rejected() {
        let mut values = FormValues::empty(&schema());

        assert!(values.set("note", "hello").is_ok());
        assert!(values.set("missing", "x").is_err());
        assert_eq!(values.get("note"), Some("hello"));
        assert_eq!(values.get("missing"), None);
    }
}
