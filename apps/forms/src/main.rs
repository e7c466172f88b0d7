//! Folio forms terminal runtime.

#![forbid(unsafe_code)]

mod forms_config;
mod terminal;

use std::sync::Arc;
use std::time::Duration;

use folio_application::{
    ContactForm, DispatchHandler, FormSpec, GuestbookForm, NotificationEmitter,
    SubmissionController,
};
use folio_core::{AppError, AppResult};
use folio_domain::{ContactMessage, GuestbookEntry};
use folio_infrastructure::{
    ConsoleDispatchHandler, HttpDispatchHandler, RecordingToastSurface, TracingToastSurface,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::forms_config::{DispatcherConfig, FormKind, FormsConfig};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = FormsConfig::load()?;
    let emitter = NotificationEmitter::new();
    let _log_surface = TracingToastSurface::attach(&emitter);
    let toasts = RecordingToastSurface::attach(&emitter);

    info!(form = ?config.form, dispatcher = ?config.dispatcher, "folio-forms started");

    match config.form {
        FormKind::Contact => {
            let dispatcher = build_dispatcher::<ContactForm>(
                &config.dispatcher,
                HttpDispatchHandler::<ContactMessage>::contact,
            )?;
            let controller = SubmissionController::<ContactForm>::new(dispatcher, emitter)?;
            terminal::run(&controller, &toasts).await
        }
        FormKind::Guestbook => {
            let dispatcher = build_dispatcher::<GuestbookForm>(
                &config.dispatcher,
                HttpDispatchHandler::<GuestbookEntry>::guestbook,
            )?;
            let controller = SubmissionController::<GuestbookForm>::new(dispatcher, emitter)?;
            terminal::run(&controller, &toasts).await
        }
    }
}

fn build_dispatcher<F>(
    config: &DispatcherConfig,
    http_handler: fn(reqwest::Client, &str) -> HttpDispatchHandler<F::Payload>,
) -> AppResult<Arc<dyn DispatchHandler<F::Payload>>>
where
    F: FormSpec,
    F::Payload: Serialize + Sync,
{
    let form = F::schema()?.name();
    let dispatcher: Arc<dyn DispatchHandler<F::Payload>> = match config {
        DispatcherConfig::Console { reply } => Arc::new(ConsoleDispatchHandler::new(
            form,
            reply.as_deref().unwrap_or(F::notices().success_title),
        )),
        DispatcherConfig::Http(http) => {
            let http_client = reqwest::Client::builder()
                .timeout(Duration::from_millis(http.timeout_ms))
                .build()
                .map_err(|error| {
                    AppError::Internal(format!("failed to build HTTP client: {error}"))
                })?;
            Arc::new(http_handler(http_client, http.base_url.as_str()))
        }
    };

    Ok(dispatcher)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
