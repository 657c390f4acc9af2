//! The message channel: origin-restricted outbound delivery and the
//! inbound dispatch loop.

use ecpkit_host::HostPage;
use ecpkit_wire::{CallbackPayload, Envelope, InboundEvent, ResolvePayload};
use tracing::{debug, error, info};

use crate::client::Client;
use crate::error::{ClientError, Result};
use crate::frames::MAIN_FRAME_ID;

impl<H: HostPage> Client<H> {
    /// Send an envelope to the main frame's content window, restricted
    /// to the configured pod origin, never a wildcard.
    ///
    /// The main frame is the sole channel endpoint; using the channel
    /// before it exists is a programming error surfaced as
    /// [`ClientError::MainFrameMissing`].
    pub(crate) fn post_envelope(&mut self, envelope: Envelope) -> Result<()> {
        if !self.frames.main_frame_mounted() {
            return Err(ClientError::MainFrameMissing);
        }
        self.host
            .post_to_frame(MAIN_FRAME_ID, &envelope, &self.config.pod_url)?;
        Ok(())
    }

    /// Dispatch one inbound envelope from the embedded application.
    ///
    /// This is the process-wide message listener: the host glue calls it
    /// for every `message` event the page receives. The origin check is
    /// the sole authentication boundary: envelopes whose origin is not
    /// exactly the configured pod origin are dropped silently, with
    /// [`rejected_message_count`] as the only record.
    ///
    /// [`rejected_message_count`]: Client::rejected_message_count
    pub fn handle_message(&mut self, origin: &str, envelope: &Envelope) -> Result<()> {
        if origin != self.config.pod_url {
            self.rejected_messages += 1;
            return Ok(());
        }

        match InboundEvent::decode(envelope)? {
            InboundEvent::ClientReady => self.on_client_ready(),
            InboundEvent::Resolve(resolve) => self.on_resolve(resolve),
            InboundEvent::CallbackData(payload) => self.on_callback_data(payload),
            InboundEvent::Unknown { event_type } => {
                info!(event_type, "received event is not supported");
            }
        }
        Ok(())
    }

    fn on_client_ready(&mut self) {
        if !self.frames.mark_main_frame_loaded() {
            debug!("duplicate clientReady dropped");
            return;
        }
        info!("embedded application ready");
        if let Some(callback) = self.ready_callback.take() {
            callback();
        }
    }

    fn on_resolve(&mut self, resolve: ResolvePayload) {
        match &resolve.data.error {
            Some(remote_error) => {
                let text = remote_error.display_text();
                error!(id = %resolve.id, "{text}");
                self.host.alert(&text);
            }
            None => {
                info!(id = %resolve.id, "action resolved");
            }
        }
        if self.actions.settle(&resolve.id, resolve.data.error).is_none() {
            debug!(id = %resolve.id, "resolve report for unknown action id");
        }
    }

    fn on_callback_data(&mut self, payload: CallbackPayload) {
        if !self.subscriptions.dispatch(&payload.id, &payload.data) {
            debug!(id = %payload.id, "notification without a registered subscription dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use ecpkit_host::MemoryHost;
    use ecpkit_wire::{EVENT_CLIENT_READY, EVENT_SDK_CALLBACK_DATA, EVENT_SDK_RESOLVE};
    use serde_json::json;

    use super::*;
    use crate::actions::ActionStatus;
    use crate::client::Client;
    use crate::config::ClientConfig;
    use crate::frames::MAIN_FRAME_CONTAINER;

    const POD: &str = "https://pod.example";

    fn ready_client() -> Client<MemoryHost> {
        let host = MemoryHost::new("https://host.example").with_container(MAIN_FRAME_CONTAINER);
        let mut client = Client::new(host, ClientConfig::new(POD, "p1"));
        client
            .open_stream("stream-1", MAIN_FRAME_CONTAINER)
            .expect("main open should succeed");
        client
    }

    fn client_ready_envelope() -> Envelope {
        Envelope {
            event_type: EVENT_CLIENT_READY.to_string(),
            payload: None,
        }
    }

    #[test]
    fn mismatched_origin_is_dropped_without_a_trace() {
        let mut client = ready_client();
        let fired = Rc::new(Cell::new(false));
        let observed = Rc::clone(&fired);
        client.on_ready(move || observed.set(true));
        client
            .on_message_notification(Some("stream-1"), {
                let fired = Rc::clone(&fired);
                move |_| fired.set(true)
            })
            .expect("subscription should register");
        let alerts_before = client.host().alerts().len();

        client
            .handle_message("https://evil.example", &client_ready_envelope())
            .expect("mismatched origin should be a no-op");
        client
            .handle_message(
                "https://evil.example",
                &Envelope::new(
                    EVENT_SDK_CALLBACK_DATA,
                    json!({ "id": "message-notification-stream-1", "data": {} }),
                ),
            )
            .expect("mismatched origin should be a no-op");

        assert!(!fired.get());
        assert!(!client.is_ready());
        assert_eq!(client.host().alerts().len(), alerts_before);
        assert_eq!(client.rejected_message_count(), 2);
    }

    #[test]
    fn client_ready_fires_callback_exactly_once() {
        let mut client = ready_client();
        let fired = Rc::new(Cell::new(0u32));
        let observed = Rc::clone(&fired);
        client.on_ready(move || observed.set(observed.get() + 1));

        client
            .handle_message(POD, &client_ready_envelope())
            .expect("clientReady should dispatch");
        client
            .handle_message(POD, &client_ready_envelope())
            .expect("duplicate clientReady should be dropped");

        assert_eq!(fired.get(), 1);
        assert!(client.is_ready());
    }

    #[test]
    fn resolve_error_is_logged_and_alerted() {
        let mut client = ready_client();
        let id = client
            .set_stream("stream-1", None)
            .expect("set-stream should dispatch");

        client
            .handle_message(
                POD,
                &Envelope::new(
                    EVENT_SDK_RESOLVE,
                    json!({
                        "id": id,
                        "data": { "error": { "type": "NotFound", "message": "unknown stream" } },
                    }),
                ),
            )
            .expect("resolve should dispatch");

        assert_eq!(
            client.host().alerts(),
            ["[NotFound] unknown stream".to_string()]
        );
        assert!(matches!(
            client.action_status(&id),
            Some(ActionStatus::Failed(_))
        ));
    }

    #[test]
    fn resolve_success_settles_the_action() {
        let mut client = ready_client();
        let id = client
            .send_message("stream-1", "hi", None)
            .expect("send-message should dispatch");
        assert_eq!(client.action_status(&id), Some(ActionStatus::Pending));

        client
            .handle_message(POD, &Envelope::new(EVENT_SDK_RESOLVE, json!({ "id": id })))
            .expect("resolve should dispatch");

        assert_eq!(client.action_status(&id), Some(ActionStatus::Resolved));
        assert!(client.host().alerts().is_empty());
    }

    #[test]
    fn callback_data_with_unknown_id_is_dropped() {
        let mut client = ready_client();
        client
            .handle_message(
                POD,
                &Envelope::new(
                    EVENT_SDK_CALLBACK_DATA,
                    json!({ "id": "message-notification-nowhere", "data": { "n": 1 } }),
                ),
            )
            .expect("unknown subscription id should be a silent drop");
    }

    #[test]
    fn unrecognized_event_type_is_ignored() {
        let mut client = ready_client();
        client
            .handle_message(POD, &Envelope::new("sdk-telemetry", json!({})))
            .expect("unknown event types should be ignored");
    }

    #[test]
    fn malformed_resolve_payload_is_a_wire_error() {
        let mut client = ready_client();
        let err = client
            .handle_message(POD, &Envelope::new(EVENT_SDK_RESOLVE, json!({ "data": {} })))
            .expect_err("missing id should fail");
        assert!(matches!(err, ClientError::Wire(_)));
    }
}
