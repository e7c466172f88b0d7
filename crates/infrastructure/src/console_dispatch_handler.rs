//! Console dispatch handler for development. Logs payloads to tracing output.

use async_trait::async_trait;
use folio_application::DispatchHandler;
use folio_core::{AppError, AppResult};
use folio_domain::DispatchResult;
use serde::Serialize;
use tracing::info;

/// Development handler that logs each payload and accepts it.
#[derive(Clone)]
pub struct ConsoleDispatchHandler {
    form: String,
    reply: String,
}

impl ConsoleDispatchHandler {
    /// Creates a console handler answering every dispatch with `reply`.
    #[must_use]
    pub fn new(form: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl<P> DispatchHandler<P> for ConsoleDispatchHandler
where
    P: Serialize + Send + 'static,
{
    async fn dispatch(&self, payload: P) -> AppResult<DispatchResult> {
        let body = serde_json::to_string_pretty(&payload).map_err(|error| {
            AppError::Internal(format!("failed to serialize {} payload: {error}", self.form))
        })?;

        info!(
            form = %self.form,
            "--- FORM SUBMISSION (console) ---\n{}\n--- END FORM SUBMISSION ---",
            body
        );

        Ok(DispatchResult::accepted(self.reply.as_str()))
    }
}
