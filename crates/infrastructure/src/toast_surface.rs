//! Toast surfaces: consumers of the notification channel.

use std::sync::{Arc, Mutex};

use folio_application::{NotificationEmitter, Subscription};
use folio_domain::{NotificationEvent, NotificationVariant};
use tracing::{info, warn};

/// Writes every notification to the tracing output.
pub struct TracingToastSurface {
    _subscription: Subscription,
}

impl TracingToastSurface {
    /// Subscribes to the emitter until the surface is dropped.
    #[must_use]
    pub fn attach(emitter: &NotificationEmitter) -> Self {
        let subscription = emitter.subscribe(|event: &NotificationEvent| {
            let description = event.description.as_deref().unwrap_or_default();
            match event.variant {
                NotificationVariant::Default => info!(
                    notification_id = %event.id,
                    title = %event.title,
                    description,
                    "toast"
                ),
                NotificationVariant::Destructive => warn!(
                    notification_id = %event.id,
                    title = %event.title,
                    description,
                    "toast"
                ),
            }
        });

        Self {
            _subscription: subscription,
        }
    }
}

/// Keeps received notifications in memory, oldest first.
pub struct RecordingToastSurface {
    events: Arc<Mutex<Vec<NotificationEvent>>>,
    _subscription: Subscription,
}

impl RecordingToastSurface {
    /// Subscribes to the emitter until the surface is dropped.
    #[must_use]
    pub fn attach(emitter: &NotificationEmitter) -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let subscription = emitter.subscribe(move |event: &NotificationEvent| {
            if let Ok(mut events) = sink.lock() {
                events.push(event.clone());
            }
        });

        Self {
            events,
            _subscription: subscription,
        }
    }

    /// Removes and returns every notification received so far.
    pub fn drain(&self) -> Vec<NotificationEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use folio_application::NotificationEmitter;
    use folio_domain::Notice;

    use super::{RecordingToastSurface, TracingToastSurface};

    #[test]
    fn recording_surface_drains_in_order_and_detaches_on_drop() {
        let emitter = NotificationEmitter::new();
        let surface = RecordingToastSurface::attach(&emitter);
        let _log = TracingToastSurface::attach(&emitter);

        emitter.emit(Notice::info("one"));
        emitter.emit(Notice::destructive("two", Some("details".to_owned())));

        let titles: Vec<String> = surface.drain().into_iter().map(|event| event.title).collect();
        assert_eq!(titles, vec!["one", "two"]);
        assert!(surface.drain().is_empty());

        drop(surface);
        assert_eq!(emitter.subscriber_count(), 1);
    }
}
