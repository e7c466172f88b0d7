//! Contact form schema and payload.

use std::sync::LazyLock;

use folio_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::schema::{FieldSchema, FormSchema, RuleCheck};
use crate::values::ValidatedValues;

/// Field carrying the sender's name.
pub const CONTACT_NAME_FIELD: &str = "messageBy";
/// Field carrying the sender's reply address.
pub const CONTACT_EMAIL_FIELD: &str = "emailAddress";
/// Field carrying the message body.
pub const CONTACT_MESSAGE_FIELD: &str = "message";

/// Minimum length of the sender's name.
pub const CONTACT_NAME_MIN_LENGTH: usize = 2;
/// Minimum length of the message body.
pub const CONTACT_MESSAGE_MIN_LENGTH: usize = 30;

static CONTACT_SCHEMA: LazyLock<AppResult<FormSchema>> = LazyLock::new(build_contact_schema);

fn build_contact_schema() -> AppResult<FormSchema> {
    FormSchema::new(
        "contact",
        vec![
            FieldSchema::new(CONTACT_NAME_FIELD)?
                .with_label("Your Name")
                .rule(
                    RuleCheck::MinChars(CONTACT_NAME_MIN_LENGTH),
                    "Name must be atleast 2 characters.",
                )?,
            FieldSchema::new(CONTACT_EMAIL_FIELD)?
                .with_label("Email Address")
                .rule(RuleCheck::Email, "Email must be a valid email address.")?,
            FieldSchema::new(CONTACT_MESSAGE_FIELD)?
                .with_label("Message")
                .rule(
                    RuleCheck::MinChars(CONTACT_MESSAGE_MIN_LENGTH),
                    // Published copy; the limit itself is 30.
                    "Message must be atleast 20 characters.",
                )?,
        ],
    )?
    .with_focus_target(CONTACT_NAME_FIELD)
}

/// Returns the shared contact form schema.
pub fn contact_schema() -> AppResult<&'static FormSchema> {
    CONTACT_SCHEMA
        .as_ref()
        .map_err(|error| AppError::Internal(format!("contact schema: {error}")))
}

/// Validated contact message handed to the email handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    /// Sender's name.
    pub message_by: String,
    /// Sender's reply address.
    pub email_address: String,
    /// Message body.
    pub body: String,
    /// Handler action discriminator, always `contact`.
    pub action: String,
}

impl ContactMessage {
    /// Builds the message from validated contact form values.
    pub fn from_validated(values: &ValidatedValues) -> AppResult<Self> {
        Ok(Self {
            message_by: values.require(CONTACT_NAME_FIELD)?.to_owned(),
            email_address: values.require(CONTACT_EMAIL_FIELD)?.to_owned(),
            body: values.require(CONTACT_MESSAGE_FIELD)?.to_owned(),
            action: "contact".to_owned(),
        })
    }
}
