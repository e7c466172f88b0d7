use std::marker::PhantomData;

use async_trait::async_trait;
use folio_application::DispatchHandler;
use folio_core::{AppError, AppResult};
use folio_domain::{ContactMessage, DispatchResult, GuestbookEntry};
use serde::Serialize;
use tracing::debug;

const CONTACT_ROUTE: &str = "api/contact";
const GUESTBOOK_ROUTE: &str = "api/guestbook";

/// Posts form payloads as JSON to a server-side handler.
///
/// Requests are sent once. Form posts are not idempotent, so a transport
/// failure is reported to the caller instead of retried.
pub struct HttpDispatchHandler<P> {
    http_client: reqwest::Client,
    endpoint: String,
    _payload: PhantomData<fn(P)>,
}

impl<P> HttpDispatchHandler<P> {
    /// Creates a handler posting to `{base_url}/{route}`.
    #[must_use]
    pub fn new(http_client: reqwest::Client, base_url: &str, route: &str) -> Self {
        Self {
            http_client,
            endpoint: format!(
                "{}/{}",
                base_url.trim_end_matches('/'),
                route.trim_start_matches('/')
            ),
            _payload: PhantomData,
        }
    }

    /// Returns the full handler URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

impl HttpDispatchHandler<ContactMessage> {
    /// Creates the contact email handler.
    #[must_use]
    pub fn contact(http_client: reqwest::Client, base_url: &str) -> Self {
        Self::new(http_client, base_url, CONTACT_ROUTE)
    }
}

impl HttpDispatchHandler<GuestbookEntry> {
    /// Creates the guestbook persistence handler.
    #[must_use]
    pub fn guestbook(http_client: reqwest::Client, base_url: &str) -> Self {
        Self::new(http_client, base_url, GUESTBOOK_ROUTE)
    }
}

#[async_trait]
impl<P> DispatchHandler<P> for HttpDispatchHandler<P>
where
    P: Serialize + Send + Sync + 'static,
{
    async fn dispatch(&self, payload: P) -> AppResult<DispatchResult> {
        let response = self
            .http_client
            .post(self.endpoint.as_str())
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "form dispatch to '{}' transport error: {error}",
                    self.endpoint
                ))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to read form handler response from '{}': {error}",
                self.endpoint
            ))
        })?;
        debug!(endpoint = %self.endpoint, status = status.as_u16(), "form handler responded");

        match serde_json::from_str::<DispatchResult>(body.as_str()) {
            Ok(result) if status.is_success() || !result.ok => Ok(result),
            Ok(_) => Err(AppError::Internal(format!(
                "form handler '{}' reported success with status {status}",
                self.endpoint
            ))),
            Err(error) => Err(AppError::Internal(format!(
                "form handler '{}' returned status {status} with unreadable body: {error}",
                self.endpoint
            ))),
        }
    }
}
