//! Process-wide notification channel feeding toast surfaces.
//!
//! Handlers registered at the moment of [`NotificationEmitter::emit`] receive
//! the event; later subscribers do not see it. Events are delivered one at a
//! time in emission order: an `emit` racing with an in-progress delivery, or
//! issued from inside a handler, is queued and delivered by the thread that is
//! already draining.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use folio_domain::{Notice, NotificationEvent};
use tracing::debug;

type NotificationHandler = Arc<dyn Fn(&NotificationEvent) + Send + Sync>;

#[derive(Default)]
struct EmitterState {
    handlers: Vec<(u64, NotificationHandler)>,
    pending: VecDeque<(NotificationEvent, Vec<NotificationHandler>)>,
    draining: bool,
}

#[derive(Default)]
struct EmitterShared {
    next_subscription_id: AtomicU64,
    state: Mutex<EmitterState>,
}

impl EmitterShared {
    fn lock(&self) -> MutexGuard<'_, EmitterState> {
        // Handlers never run under the lock, so a poisoned state is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Fire-and-forget broadcast of [`NotificationEvent`]s.
///
/// Cloning yields another handle to the same channel.
#[derive(Clone, Default)]
pub struct NotificationEmitter {
    shared: Arc<EmitterShared>,
}

impl NotificationEmitter {
    /// Creates a channel with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler until the returned [`Subscription`] is dropped or
    /// unsubscribed.
    #[must_use = "dropping the subscription unsubscribes the handler"]
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&NotificationEvent) + Send + Sync + 'static,
    {
        let id = self
            .shared
            .next_subscription_id
            .fetch_add(1, Ordering::Relaxed);
        self.shared.lock().handlers.push((id, Arc::new(handler)));

        Subscription {
            id,
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Stamps and broadcasts a notice to the current subscribers.
    pub fn emit(&self, notice: Notice) -> NotificationEvent {
        let event = NotificationEvent::stamp(notice);

        {
            let mut state = self.shared.lock();
            let recipients = state
                .handlers
                .iter()
                .map(|(_, handler)| Arc::clone(handler))
                .collect::<Vec<_>>();
            debug!(
                notification_id = %event.id,
                variant = event.variant.as_str(),
                recipients = recipients.len(),
                "notification emitted"
            );
            state.pending.push_back((event.clone(), recipients));
            if state.draining {
                return event;
            }
            state.draining = true;
        }

        let _drain = DrainGuard(&self.shared);
        loop {
            let next = {
                let mut state = self.shared.lock();
                let next = state.pending.pop_front();
                if next.is_none() {
                    state.draining = false;
                }
                next
            };
            let Some((queued, recipients)) = next else {
                break;
            };
            for handler in recipients {
                handler(&queued);
            }
        }

        event
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.shared.lock().handlers.len()
    }
}

struct DrainGuard<'a>(&'a EmitterShared);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        // Events still queued are delivered by the next `emit`.
        if std::thread::panicking() {
            self.0.lock().draining = false;
        }
    }
}

/// Registration handle returned by [`NotificationEmitter::subscribe`].
pub struct Subscription {
    id: u64,
    shared: Weak<EmitterShared>,
}

impl Subscription {
    /// Removes the handler. Events emitted afterwards are not delivered to it.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.lock().handlers.retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Subscription")
            .field("id", &self.id)
            .finish()
    }
}
