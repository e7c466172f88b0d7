//! Validated-submission state machine shared by every site form.
//!
//! One controller owns the values, field errors and submission state of one
//! rendered form. `submit` validates, dispatches, reconciles and always comes
//! back to [`SubmissionState::Idle`]. The dispatch call is the only await
//! point, and the state lock is never held across it: a second `submit`
//! issued while one is in flight sees a busy state and is ignored.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

use folio_core::{AppError, AppResult};
use folio_domain::{
    FieldErrors, FormSchema, FormValues, NotificationEvent, SubmissionState, ValidationResult,
    validate,
};
use tracing::{debug, error, info, warn};

use crate::dispatch_ports::DispatchHandler;
use crate::form_spec::FormSpec;
use crate::notification_emitter::NotificationEmitter;
use crate::outcome_reconciler::{Effect, Settlement, reconcile};

/// Result of one `submit` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight; nothing happened.
    Ignored,
    /// Validation failed; errors are shown inline and nothing was dispatched.
    Invalid(FieldErrors),
    /// Handler accepted the payload; values were reset.
    Succeeded(NotificationEvent),
    /// Handler answered `ok: false`; values were kept.
    Rejected(NotificationEvent),
    /// Handler could not be reached; values were kept.
    Unreachable(NotificationEvent),
}

#[derive(Debug)]
struct ControllerState {
    state: SubmissionState,
    values: FormValues,
    field_errors: FieldErrors,
    focused_field: Option<String>,
}

/// Drives one form instance through validation and dispatch.
pub struct SubmissionController<F: FormSpec> {
    schema: &'static FormSchema,
    dispatcher: Arc<dyn DispatchHandler<F::Payload>>,
    emitter: NotificationEmitter,
    inner: Mutex<ControllerState>,
    _form: PhantomData<fn() -> F>,
}

impl<F: FormSpec> SubmissionController<F> {
    /// Creates an idle controller with empty values, focused on the schema's
    /// focus target.
    pub fn new(
        dispatcher: Arc<dyn DispatchHandler<F::Payload>>,
        emitter: NotificationEmitter,
    ) -> AppResult<Self> {
        let schema = F::schema()?;

        Ok(Self {
            schema,
            dispatcher,
            emitter,
            inner: Mutex::new(ControllerState {
                state: SubmissionState::Idle,
                values: FormValues::empty(schema),
                field_errors: FieldErrors::default(),
                focused_field: Some(schema.focus_target().to_owned()),
            }),
            _form: PhantomData,
        })
    }

    /// Returns the form schema.
    #[must_use]
    pub fn schema(&self) -> &'static FormSchema {
        self.schema
    }

    /// Records user input for one field.
    pub fn set_value(&self, field: &str, value: impl Into<String>) -> AppResult<()> {
        self.lock()?.values.set(field, value)
    }

    /// Returns a snapshot of the current values.
    pub fn values(&self) -> AppResult<FormValues> {
        Ok(self.lock()?.values.clone())
    }

    /// Returns the current value of one field.
    pub fn value(&self, field: &str) -> AppResult<Option<String>> {
        Ok(self.lock()?.values.get(field).map(str::to_owned))
    }

    /// Returns the current submission state.
    pub fn state(&self) -> AppResult<SubmissionState> {
        Ok(self.lock()?.state)
    }

    /// Returns whether the submit control should be enabled.
    pub fn can_submit(&self) -> AppResult<bool> {
        Ok(!self.state()?.is_busy())
    }

    /// Returns the errors of the last rejected validation.
    pub fn field_errors(&self) -> AppResult<FieldErrors> {
        Ok(self.lock()?.field_errors.clone())
    }

    /// Returns the inline error for one field.
    pub fn field_error(&self, field: &str) -> AppResult<Option<String>> {
        Ok(self.lock()?.field_errors.get(field).map(str::to_owned))
    }

    /// Returns the field that should hold input focus.
    pub fn focused_field(&self) -> AppResult<Option<String>> {
        Ok(self.lock()?.focused_field.clone())
    }

    /// Validates the current values and, when they pass, dispatches them.
    ///
    /// Returns `Err` only for internal faults; validation failures and handler
    /// outcomes are reported through [`SubmitOutcome`].
    pub async fn submit(&self) -> AppResult<SubmitOutcome> {
        let form = self.schema.name();
        let values = {
            let mut inner = self.lock()?;
            if inner.state.is_busy() {
                debug!(form, state = %inner.state, "submit ignored while busy");
                return Ok(SubmitOutcome::Ignored);
            }
            inner.state = SubmissionState::Validating;
            inner.values.clone()
        };

        let validated = match validate(self.schema, &values) {
            ValidationResult::Valid(validated) => validated,
            ValidationResult::Invalid(errors) => {
                let mut inner = self.lock()?;
                inner.field_errors = errors.clone();
                inner.state = SubmissionState::Idle;
                debug!(form, failing_fields = errors.len(), "form validation failed");
                return Ok(SubmitOutcome::Invalid(errors));
            }
        };

        let payload = match F::payload(&validated) {
            Ok(payload) => payload,
            Err(error) => {
                self.lock()?.state = SubmissionState::Idle;
                return Err(error);
            }
        };

        {
            let mut inner = self.lock()?;
            inner.field_errors = FieldErrors::default();
            inner.state = SubmissionState::Submitting;
        }
        debug!(form, "form submitting");

        let dispatched = self.dispatcher.dispatch(payload).await;
        if let Err(dispatch_error) = &dispatched {
            error!(form, error = %dispatch_error, "form dispatch handler unreachable");
        }

        let settlement = Settlement::from_dispatch(&dispatched);
        let notice = {
            let mut inner = self.lock()?;
            inner.state = settlement.state();
            let mut notice = None;
            for effect in reconcile(&settlement, self.schema, F::notices()) {
                match effect {
                    Effect::ResetValues => inner.values = FormValues::empty(self.schema),
                    Effect::Focus(field) => inner.focused_field = Some(field),
                    Effect::Notify(pending) => notice = Some(pending),
                }
            }
            notice
        };

        let event = notice.map(|notice| self.emitter.emit(notice));
        self.lock()?.state = SubmissionState::Idle;

        let Some(event) = event else {
            return Err(AppError::Internal(format!(
                "form '{form}' settled without a notification"
            )));
        };

        Ok(match settlement {
            Settlement::Delivered(_) => {
                info!(form, notification_id = %event.id, "form submission succeeded");
                SubmitOutcome::Succeeded(event)
            }
            Settlement::Rejected(_) => {
                warn!(form, notification_id = %event.id, "form submission rejected");
                SubmitOutcome::Rejected(event)
            }
            Settlement::Unreachable => SubmitOutcome::Unreachable(event),
        })
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, ControllerState>> {
        self.inner.lock().map_err(|error| {
            AppError::Internal(format!(
                "failed to lock form '{}' state: {error}",
                self.schema.name()
            ))
        })
    }
}
