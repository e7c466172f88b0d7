//! Maps a settled dispatch to the UI effects it triggers.
//!
//! The mapping is pure so the effect policy can be checked without running a
//! dispatch. Every settlement yields exactly one [`Effect::Notify`].

use folio_core::AppResult;
use folio_domain::{DispatchResult, FormSchema, Notice, SubmissionState};

use crate::form_spec::{FailurePolicy, FormNotices};

/// How a dispatch settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// Handler accepted the payload.
    Delivered(DispatchResult),
    /// Handler answered with `ok: false`.
    Rejected(DispatchResult),
    /// Handler could not be reached.
    Unreachable,
}

impl Settlement {
    /// Classifies a dispatch outcome.
    #[must_use]
    pub fn from_dispatch(outcome: &AppResult<DispatchResult>) -> Self {
        match outcome {
            Ok(result) if result.ok => Self::Delivered(result.clone()),
            Ok(result) => Self::Rejected(result.clone()),
            Err(_) => Self::Unreachable,
        }
    }

    /// Returns the terminal state this settlement enters.
    #[must_use]
    pub fn state(&self) -> SubmissionState {
        match self {
            Self::Delivered(_) => SubmissionState::Succeeded,
            Self::Rejected(_) | Self::Unreachable => SubmissionState::Failed,
        }
    }
}

/// Side effect applied to a form after it settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Reset every field to the empty string.
    ResetValues,
    /// Move input focus to the named field.
    Focus(String),
    /// Announce the outcome.
    Notify(Notice),
}

/// Derives the effects for a settled submission.
#[must_use]
pub fn reconcile(
    settlement: &Settlement,
    schema: &FormSchema,
    notices: &FormNotices,
) -> Vec<Effect> {
    let fixed_failure = || {
        Notice::destructive(
            notices.failure_title,
            Some(notices.failure_description.to_owned()),
        )
    };

    match settlement {
        Settlement::Delivered(result) => vec![
            Effect::ResetValues,
            Effect::Focus(schema.focus_target().to_owned()),
            Effect::Notify(Notice::info(result.message().unwrap_or(notices.success_title))),
        ],
        Settlement::Rejected(result) => {
            let notice = match (notices.failure_policy, result.message()) {
                (FailurePolicy::ServerMessage, Some(message)) => Notice::destructive(message, None),
                _ => fixed_failure(),
            };
            vec![Effect::Notify(notice)]
        }
        Settlement::Unreachable => vec![Effect::Notify(fixed_failure())],
    }
}

#[cfg(test)]
mod tests {
    use folio_core::AppError;
    use folio_domain::{DispatchResult, Notice, NotificationVariant, SubmissionState};

    use crate::form_spec::{ContactForm, FormSpec, GuestbookForm};

    use super::{Effect, Settlement, reconcile};

    fn notifications(effects: &[Effect]) -> Vec<&Notice> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Notify(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn dispatch_outcomes_classify_into_settlements() {
        let delivered = Settlement::from_dispatch(&Ok(DispatchResult::accepted("ok")));
        let rejected = Settlement::from_dispatch(&Ok(DispatchResult::rejected(None)));
        let unreachable = Settlement::from_dispatch(&Err(AppError::Internal("down".to_owned())));

        assert_eq!(delivered.state(), SubmissionState::Succeeded);
        assert_eq!(rejected.state(), SubmissionState::Failed);
        assert_eq!(unreachable, Settlement::Unreachable);
        assert_eq!(unreachable.state(), SubmissionState::Failed);
    }

    #[test]
    fn delivered_resets_focuses_and_announces_server_message() {
        let schema = ContactForm::schema().unwrap_or_else(|error| panic!("{error}"));
        let effects = reconcile(
            &Settlement::Delivered(DispatchResult::accepted("Message sent")),
            schema,
            ContactForm::notices(),
        );

        assert_eq!(
            effects,
            vec![
                Effect::ResetValues,
                Effect::Focus("messageBy".to_owned()),
                Effect::Notify(Notice::info("Message sent")),
            ]
        );
    }

    #[test]
    fn delivered_without_message_uses_success_fallback() {
        let schema = GuestbookForm::schema().unwrap_or_else(|error| panic!("{error}"));
        let effects = reconcile(
            &Settlement::Delivered(DispatchResult {
                ok: true,
                message: None,
            }),
            schema,
            GuestbookForm::notices(),
        );

        let notices = notifications(&effects);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Thanks for signing!");
        assert_eq!(notices[0].variant, NotificationVariant::Default);
    }

    #[test]
    fn contact_rejection_surfaces_server_message_without_reset() {
        let schema = ContactForm::schema().unwrap_or_else(|error| panic!("{error}"));
        let effects = reconcile(
            &Settlement::Rejected(DispatchResult::rejected(Some(
                "Mailbox unavailable".to_owned(),
            ))),
            schema,
            ContactForm::notices(),
        );

        assert_eq!(
            effects,
            vec![Effect::Notify(Notice::destructive("Mailbox unavailable", None))]
        );
    }

    #[test]
    fn guestbook_rejection_ignores_server_message() {
        let schema = GuestbookForm::schema().unwrap_or_else(|error| panic!("{error}"));
        let effects = reconcile(
            &Settlement::Rejected(DispatchResult::rejected(Some("db down".to_owned()))),
            schema,
            GuestbookForm::notices(),
        );

        assert_eq!(
            effects,
            vec![Effect::Notify(Notice::destructive(
                "Something went wrong.",
                Some("Your post was not saved. Please try again.".to_owned()),
            ))]
        );
    }

    #[test]
    fn unreachable_handler_uses_fixed_notice() {
        let schema = ContactForm::schema().unwrap_or_else(|error| panic!("{error}"));
        let effects = reconcile(&Settlement::Unreachable, schema, ContactForm::notices());

        assert_eq!(
            effects,
            vec![Effect::Notify(Notice::destructive(
                "Something went wrong.",
                Some("Your post was not saved. Please try again.".to_owned()),
            ))]
        );
    }
}
