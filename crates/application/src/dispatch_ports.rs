use async_trait::async_trait;

use folio_core::AppResult;
use folio_domain::DispatchResult;

/// Port delivering a validated payload to the server-side handler.
///
/// Business-level refusals come back as `Ok(DispatchResult { ok: false, .. })`.
/// `Err` means the handler could not be reached or broke its contract.
#[async_trait]
pub trait DispatchHandler<P>: Send + Sync
where
    P: Send + 'static,
{
    /// Dispatches one payload and reports the handler's outcome.
    async fn dispatch(&self, payload: P) -> AppResult<DispatchResult>;
}
