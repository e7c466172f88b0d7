//! Domain types for the site's input forms: schemas, values, validation,
//! dispatch outcomes and notifications.

#![forbid(unsafe_code)]

mod contact;
mod guestbook;
mod notification;
mod schema;
mod submission;
mod validation;
mod values;

pub use contact::{
    CONTACT_EMAIL_FIELD, CONTACT_MESSAGE_FIELD, CONTACT_MESSAGE_MIN_LENGTH, CONTACT_NAME_FIELD,
    CONTACT_NAME_MIN_LENGTH, ContactMessage, contact_schema,
};
pub use guestbook::{GUESTBOOK_ENTRY_FIELD, GuestbookEntry, guestbook_schema};
pub use notification::{Notice, NotificationEvent, NotificationId, NotificationVariant};
pub use schema::{FieldRule, FieldSchema, FormSchema, RuleCheck};
pub use submission::{DispatchResult, SubmissionState};
pub use validation::{ValidationResult, validate};
pub use values::{FieldError, FieldErrors, FormValues, ValidatedValues};
