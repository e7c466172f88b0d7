//! Schema-driven validation of form input.
//!
//! Validation is pure: it reads the schema and the current values and produces
//! either the sanitized values or one message per failing field.

use serde::Serialize;

use crate::schema::FormSchema;
use crate::values::{FieldErrors, FormValues, ValidatedValues};

/// Outcome of validating one form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "values", rename_all = "snake_case")]
pub enum ValidationResult {
    /// Every field passed; values are sanitized.
    Valid(ValidatedValues),
    /// At least one field failed.
    Invalid(FieldErrors),
}

impl ValidationResult {
    /// Returns whether validation passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

/// Validates values against a schema.
///
/// Fields are visited in schema order and each field reports only the first
/// rule it violates. Fields marked as trimmed are checked and returned without
/// leading or trailing whitespace. A field missing from `values` is checked as
/// an empty string.
#[must_use]
pub fn validate(schema: &FormSchema, values: &FormValues) -> ValidationResult {
    let mut errors = FieldErrors::default();
    let mut sanitized = Vec::with_capacity(schema.fields().len());

    for field in schema.fields() {
        let raw = values.get(field.name()).unwrap_or_default();
        if let Some(message) = field.first_violation(raw) {
            errors.push(field.name(), message);
            continue;
        }

        sanitized.push((field.name().to_owned(), field.sanitize(raw).to_owned()));
    }

    if errors.is_empty() {
        ValidationResult::Valid(ValidatedValues::new(sanitized))
    } else {
        ValidationResult::Invalid(errors)
    }
}

/// Checks the conventional client-side email shape: `local@label.tld`.
pub(crate) fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    let allowed = |character: char| {
        character.is_ascii_alphanumeric() || matches!(character, '_' | '\'' | '+' | '-' | '.')
    };

    let Some(last) = local.chars().last() else {
        return false;
    };

    !local.starts_with('.')
        && !local.contains("..")
        && local.chars().all(allowed)
        && (last.is_ascii_alphanumeric() || matches!(last, '_' | '+' | '-'))
}

fn is_valid_domain(domain: &str) -> bool {
    let Some((labels, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    let label_ok = |label: &str| {
        label
            .chars()
            .next()
            .is_some_and(|first| first.is_ascii_alphanumeric())
            && label
                .chars()
                .all(|character| character.is_ascii_alphanumeric() || character == '-')
    };

    labels.split('.').all(label_ok)
        && tld.len() >= 2
        && tld.chars().all(|character| character.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests;
