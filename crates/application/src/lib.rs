//! Application services and ports.

#![forbid(unsafe_code)]

mod dispatch_ports;
mod form_spec;
mod notification_emitter;
mod outcome_reconciler;
mod submission_controller;

pub use dispatch_ports::DispatchHandler;
pub use form_spec::{ContactForm, FailurePolicy, FormNotices, FormSpec, GuestbookForm};
pub use notification_emitter::{NotificationEmitter, Subscription};
pub use outcome_reconciler::{Effect, Settlement, reconcile};
pub use submission_controller::{SubmissionController, SubmitOutcome};
