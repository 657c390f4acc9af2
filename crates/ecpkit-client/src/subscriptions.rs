//! Durable notification subscriptions and their callback registry.

use std::collections::HashMap;
use std::fmt;

use ecpkit_host::HostPage;
use ecpkit_wire::{Envelope, SubscriptionKind, SubscriptionRequest};
use serde_json::Value;
use tracing::{debug, info};

use crate::client::Client;
use crate::error::Result;

pub(crate) type NotificationCallback = Box<dyn FnMut(&Value)>;

/// Maps subscription identity to its host callback.
///
/// Entries live for the client lifetime; there is no unsubscribe.
/// Re-registering a key replaces its callback: last write wins.
#[derive(Default)]
pub(crate) struct SubscriptionRegistry {
    callbacks: HashMap<String, NotificationCallback>,
}

impl SubscriptionRegistry {
    /// Store `callback` under `id`. Returns `true` when a previous
    /// callback was replaced.
    pub(crate) fn store(&mut self, id: String, callback: NotificationCallback) -> bool {
        self.callbacks.insert(id, callback).is_some()
    }

    /// Invoke the callback registered under `id`, if any. Returns
    /// whether a callback ran.
    pub(crate) fn dispatch(&mut self, id: &str, data: &Value) -> bool {
        match self.callbacks.get_mut(id) {
            Some(callback) => {
                callback(data);
                true
            }
            None => false,
        }
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.callbacks.contains_key(id)
    }

    pub(crate) fn len(&self) -> usize {
        self.callbacks.len()
    }
}

impl fmt::Debug for SubscriptionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.callbacks.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("SubscriptionRegistry")
            .field("keys", &keys)
            .finish()
    }
}

impl<H: HostPage> Client<H> {
    /// Subscribe to new-message notifications, for one stream or, with
    /// no `stream_id`, across all of them. Returns the deterministic
    /// subscription id.
    ///
    /// Registration surfaces a blocking confirmation through the host;
    /// that is deliberate user-visible behavior, not a diagnostic.
    pub fn on_message_notification(
        &mut self,
        stream_id: Option<&str>,
        callback: impl FnMut(&Value) + 'static,
    ) -> Result<String> {
        self.subscribe(
            SubscriptionKind::MessageNotifications,
            stream_id,
            Box::new(callback),
        )
    }

    /// Subscribe to unread-count notifications, for one stream or, with
    /// no `stream_id`, globally. Returns the deterministic
    /// subscription id.
    pub fn on_unread_count_notification(
        &mut self,
        stream_id: Option<&str>,
        callback: impl FnMut(&Value) + 'static,
    ) -> Result<String> {
        self.subscribe(
            SubscriptionKind::UnreadCountNotifications,
            stream_id,
            Box::new(callback),
        )
    }

    fn subscribe(
        &mut self,
        kind: SubscriptionKind,
        stream_id: Option<&str>,
        callback: NotificationCallback,
    ) -> Result<String> {
        let request = SubscriptionRequest::new(kind, stream_id);
        let envelope = Envelope::subscription(&request)?;

        let subject = match kind {
            SubscriptionKind::MessageNotifications => "message notifications",
            SubscriptionKind::UnreadCountNotifications => "unread message count notifications",
        };
        let text = match stream_id {
            Some(stream) => format!("Listening to {stream} {subject}."),
            None => format!("Listening to all the {subject}."),
        };
        self.host.alert(&text);
        info!(id = %request.id, "{text}");

        // Store before anything reaches the wire, so no notification can
        // ever observe a missing callback.
        if self.subscriptions.store(request.id.clone(), callback) {
            debug!(id = %request.id, "subscription callback replaced");
        }
        self.post_envelope(envelope)?;
        Ok(request.id)
    }
}
