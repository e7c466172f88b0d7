use std::collections::HashSet;

use folio_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Predicate applied to a single field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "limit", rename_all = "snake_case")]
pub enum RuleCheck {
    /// Value must contain at least this many characters.
    MinChars(usize),
    /// Value must contain at most this many characters.
    MaxChars(usize),
    /// Value must be a well-formed email address.
    Email,
}

impl RuleCheck {
    /// Returns whether the value satisfies this predicate.
    #[must_use]
    pub fn is_satisfied_by(&self, value: &str) -> bool {
        match self {
            Self::MinChars(min) => value.chars().count() >= *min,
            Self::MaxChars(max) => value.chars().count() <= *max,
            Self::Email => crate::validation::is_valid_email(value),
        }
    }
}

/// One predicate with the message shown when it is violated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    check: RuleCheck,
    message: NonEmptyString,
}

impl FieldRule {
    /// Creates a rule with its violation message.
    pub fn new(check: RuleCheck, message: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            check,
            message: NonEmptyString::new(message)?,
        })
    }

    /// Returns the predicate.
    #[must_use]
    pub fn check(&self) -> RuleCheck {
        self.check
    }

    /// Returns the violation message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Declarative constraints for a single form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    name: NonEmptyString,
    label: Option<String>,
    trim: bool,
    rules: Vec<FieldRule>,
}

impl FieldSchema {
    /// Creates a field with no rules.
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name)?,
            label: None,
            trim: false,
            rules: Vec::new(),
        })
    }

    /// Sets the label shown next to the input.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        let trimmed = label.trim();
        self.label = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Marks the field as trimmed before validation and submission.
    #[must_use]
    pub fn trimmed(mut self) -> Self {
        self.trim = true;
        self
    }

    /// Appends a rule. Rules are evaluated in insertion order.
    pub fn rule(mut self, check: RuleCheck, message: impl Into<String>) -> AppResult<Self> {
        self.rules.push(FieldRule::new(check, message)?);
        Ok(self)
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the display label, falling back to the field name.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(self.name.as_str())
    }

    /// Returns whether leading and trailing whitespace is stripped.
    #[must_use]
    pub fn is_trimmed(&self) -> bool {
        self.trim
    }

    /// Returns rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Returns the value as it would be submitted.
    #[must_use]
    pub fn sanitize<'a>(&self, value: &'a str) -> &'a str {
        if self.trim { value.trim() } else { value }
    }

    /// Returns the message of the first rule the value violates.
    #[must_use]
    pub fn first_violation(&self, value: &str) -> Option<&str> {
        let value = self.sanitize(value);
        self.rules
            .iter()
            .find(|rule| !rule.check().is_satisfied_by(value))
            .map(FieldRule::message)
    }
}

/// Ordered set of fields making up one form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    name: NonEmptyString,
    fields: Vec<FieldSchema>,
    focus_target: String,
}

impl FormSchema {
    /// Creates a validated form schema focused on its first field.
    pub fn new(name: impl Into<String>, fields: Vec<FieldSchema>) -> AppResult<Self> {
        let name = NonEmptyString::new(name)?;
        let Some(first) = fields.first() else {
            return Err(AppError::Validation(format!(
                "form '{name}' must declare at least one field"
            )));
        };
        let focus_target = first.name().to_owned();

        {
            let mut seen = HashSet::new();
            for field in &fields {
                if !seen.insert(field.name()) {
                    return Err(AppError::Validation(format!(
                        "form '{name}' declares field '{}' more than once",
                        field.name()
                    )));
                }
            }
        }

        Ok(Self {
            name,
            fields,
            focus_target,
        })
    }

    /// Overrides which field receives focus after a successful submission.
    pub fn with_focus_target(mut self, field: &str) -> AppResult<Self> {
        if self.field(field).is_none() {
            return Err(AppError::Validation(format!(
                "focus target '{field}' is not a field of form '{}'",
                self.name
            )));
        }

        self.focus_target = field.to_owned();
        Ok(self)
    }

    /// Returns the form name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Finds a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Returns the field focused on mount and after a successful submission.
    #[must_use]
    pub fn focus_target(&self) -> &str {
        self.focus_target.as_str()
    }
}
