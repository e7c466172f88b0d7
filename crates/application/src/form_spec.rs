//! Per-form bindings: which schema to validate against, how to build the
//! dispatch payload, and which notices to show on settle.

use folio_core::AppResult;
use folio_domain::{
    ContactMessage, FormSchema, GuestbookEntry, ValidatedValues, contact_schema, guestbook_schema,
};

/// How a rejected dispatch is announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Show the handler's message, falling back to the fixed notice when it
    /// sent none.
    ServerMessage,
    /// Always show the fixed notice.
    Fixed,
}

/// Notice texts used when a submission settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormNotices {
    /// Title used on success when the handler sent no message.
    pub success_title: &'static str,
    /// Fixed failure title.
    pub failure_title: &'static str,
    /// Fixed failure description.
    pub failure_description: &'static str,
    /// Rejection handling.
    pub failure_policy: FailurePolicy,
}

/// Binds a schema, a payload type and notice texts into one form type.
pub trait FormSpec: Send + Sync + 'static {
    /// Payload handed to the dispatch handler.
    type Payload: Send + 'static;

    /// Returns the shared, read-only schema.
    fn schema() -> AppResult<&'static FormSchema>;

    /// Returns the notice texts.
    fn notices() -> &'static FormNotices;

    /// Builds the payload from sanitized values.
    fn payload(values: &ValidatedValues) -> AppResult<Self::Payload>;
}

/// The contact page form.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactForm;

const CONTACT_NOTICES: FormNotices = FormNotices {
    success_title: "Message sent",
    failure_title: "Something went wrong.",
    failure_description: "Your post was not saved. Please try again.",
    failure_policy: FailurePolicy::ServerMessage,
};

impl FormSpec for ContactForm {
    type Payload = ContactMessage;

    fn schema() -> AppResult<&'static FormSchema> {
        contact_schema()
    }

    fn notices() -> &'static FormNotices {
        &CONTACT_NOTICES
    }

    fn payload(values: &ValidatedValues) -> AppResult<Self::Payload> {
        ContactMessage::from_validated(values)
    }
}

/// The guestbook page form.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuestbookForm;

const GUESTBOOK_NOTICES: FormNotices = FormNotices {
    success_title: "Thanks for signing!",
    failure_title: "Something went wrong.",
    failure_description: "Your post was not saved. Please try again.",
    failure_policy: FailurePolicy::Fixed,
};

impl FormSpec for GuestbookForm {
    type Payload = GuestbookEntry;

    fn schema() -> AppResult<&'static FormSchema> {
        guestbook_schema()
    }

    fn notices() -> &'static FormNotices {
        &GUESTBOOK_NOTICES
    }

    fn payload(values: &ValidatedValues) -> AppResult<Self::Payload> {
        GuestbookEntry::from_validated(values)
    }
}
