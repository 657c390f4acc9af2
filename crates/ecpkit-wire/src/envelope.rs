use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::ActionRequest;
use crate::error::{Result, WireError};
use crate::subscription::SubscriptionRequest;

/// Outbound event type: one-shot command.
pub const EVENT_SDK_ACTION: &str = "sdk-action";
/// Outbound event type: durable notification registration.
pub const EVENT_SDK_SUBSCRIPTION: &str = "sdk-subscription";
/// Outbound event type: child frame announcing itself to the main frame.
pub const EVENT_SDK_REGISTER: &str = "sdk-register";
/// Inbound event type: the embedded application finished booting.
pub const EVENT_CLIENT_READY: &str = "clientReady";
/// Inbound event type: outcome report for a previously sent action.
pub const EVENT_SDK_RESOLVE: &str = "sdk-resolve";
/// Inbound event type: notification data for a subscription.
pub const EVENT_SDK_CALLBACK_DATA: &str = "sdk-callback-data";

/// The envelope both sides exchange: `{ eventType, payload }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub event_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl Envelope {
    /// Wrap an already-encoded payload under `event_type`.
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type: event_type.into(),
            payload: Some(payload),
        }
    }

    /// Envelope for a one-shot command.
    pub fn action(request: &ActionRequest) -> Result<Self> {
        Ok(Self::new(EVENT_SDK_ACTION, serde_json::to_value(request)?))
    }

    /// Envelope for a durable notification registration.
    pub fn subscription(request: &SubscriptionRequest) -> Result<Self> {
        Ok(Self::new(
            EVENT_SDK_SUBSCRIPTION,
            serde_json::to_value(request)?,
        ))
    }

    /// Envelope a child frame sends (through the main frame) to register
    /// itself by its container id.
    pub fn register(iframe_id: &str) -> Self {
        Self::new(
            EVENT_SDK_REGISTER,
            serde_json::json!({ "iFrameId": iframe_id }),
        )
    }
}

/// Outcome report for a previously dispatched action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvePayload {
    /// The action id the report correlates to.
    pub id: String,
    #[serde(default)]
    pub data: ResolveData,
}

/// Result body of an [`EVENT_SDK_RESOLVE`] envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResolveData {
    /// Present when the embedded application rejected the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ResolveError>,
}

/// An error the embedded application reported for an action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolveError {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

impl ResolveError {
    /// The `[type] message` rendering surfaced to users.
    pub fn display_text(&self) -> String {
        format!("[{}] {}", self.kind, self.message)
    }
}

/// Notification data addressed to one subscription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallbackPayload {
    /// The deterministic subscription id the data belongs to.
    pub id: String,
    #[serde(default)]
    pub data: Value,
}

/// A decoded inbound envelope.
///
/// Event types outside the recognized set decode to [`Unknown`] rather
/// than an error; the dispatcher logs and ignores them.
///
/// [`Unknown`]: InboundEvent::Unknown
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    ClientReady,
    Resolve(ResolvePayload),
    CallbackData(CallbackPayload),
    Unknown { event_type: String },
}

impl InboundEvent {
    /// Decode an inbound envelope by its event type.
    ///
    /// `clientReady` carries no payload. For the payload-bearing types a
    /// missing or mismatched payload is a [`WireError::MalformedPayload`].
    pub fn decode(envelope: &Envelope) -> Result<Self> {
        match envelope.event_type.as_str() {
            EVENT_CLIENT_READY => Ok(Self::ClientReady),
            EVENT_SDK_RESOLVE => Ok(Self::Resolve(decode_payload(envelope)?)),
            EVENT_SDK_CALLBACK_DATA => Ok(Self::CallbackData(decode_payload(envelope)?)),
            other => Ok(Self::Unknown {
                event_type: other.to_string(),
            }),
        }
    }
}

fn decode_payload<T: serde::de::DeserializeOwned>(envelope: &Envelope) -> Result<T> {
    let payload = envelope
        .payload
        .as_ref()
        .ok_or_else(|| WireError::MalformedPayload {
            event_type: envelope.event_type.clone(),
            detail: "missing payload".to_string(),
        })?;
    serde_json::from_value(payload.clone()).map_err(|err| WireError::MalformedPayload {
        event_type: envelope.event_type.clone(),
        detail: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::action::ActionIdSequence;

    #[test]
    fn action_envelope_shape() {
        let mut ids = ActionIdSequence::new();
        let request = ActionRequest::set_stream(&mut ids, "stream-1", None);
        let envelope = Envelope::action(&request).expect("action should encode");

        let wire = serde_json::to_value(&envelope).expect("envelope should encode");
        assert_eq!(
            wire,
            json!({
                "eventType": "sdk-action",
                "payload": {
                    "name": "set-stream",
                    "id": "set-stream-1",
                    "params": { "streamId": "stream-1" },
                },
            })
        );
    }

    #[test]
    fn register_envelope_shape() {
        let envelope = Envelope::register("ecp-child-0");
        let wire = serde_json::to_value(&envelope).expect("envelope should encode");
        assert_eq!(
            wire,
            json!({
                "eventType": "sdk-register",
                "payload": { "iFrameId": "ecp-child-0" },
            })
        );
    }

    #[test]
    fn decode_client_ready_without_payload() {
        let envelope = Envelope {
            event_type: EVENT_CLIENT_READY.to_string(),
            payload: None,
        };
        let event = InboundEvent::decode(&envelope).expect("clientReady should decode");
        assert_eq!(event, InboundEvent::ClientReady);
    }

    #[test]
    fn decode_resolve_success() {
        let envelope = Envelope::new(EVENT_SDK_RESOLVE, json!({ "id": "send-message-3" }));
        let event = InboundEvent::decode(&envelope).expect("resolve should decode");
        let InboundEvent::Resolve(resolve) = event else {
            panic!("expected a resolve event");
        };
        assert_eq!(resolve.id, "send-message-3");
        assert!(resolve.data.error.is_none());
    }

    #[test]
    fn decode_resolve_error() {
        let envelope = Envelope::new(
            EVENT_SDK_RESOLVE,
            json!({
                "id": "set-stream-1",
                "data": { "error": { "type": "NotFound", "message": "unknown stream" } },
            }),
        );
        let event = InboundEvent::decode(&envelope).expect("resolve should decode");
        let InboundEvent::Resolve(resolve) = event else {
            panic!("expected a resolve event");
        };
        let error = resolve.data.error.expect("error should be present");
        assert_eq!(error.display_text(), "[NotFound] unknown stream");
    }

    #[test]
    fn decode_callback_data() {
        let envelope = Envelope::new(
            EVENT_SDK_CALLBACK_DATA,
            json!({ "id": "message-notification-stream-1", "data": { "count": 2 } }),
        );
        let event = InboundEvent::decode(&envelope).expect("callback data should decode");
        let InboundEvent::CallbackData(payload) = event else {
            panic!("expected a callback-data event");
        };
        assert_eq!(payload.id, "message-notification-stream-1");
        assert_eq!(payload.data, json!({ "count": 2 }));
    }

    #[test]
    fn decode_unrecognized_event_type() {
        let envelope = Envelope::new("sdk-telemetry", json!({}));
        let event = InboundEvent::decode(&envelope).expect("unknown events should decode");
        assert_eq!(
            event,
            InboundEvent::Unknown {
                event_type: "sdk-telemetry".to_string(),
            }
        );
    }

    #[test]
    fn decode_resolve_without_payload_is_malformed() {
        let envelope = Envelope {
            event_type: EVENT_SDK_RESOLVE.to_string(),
            payload: None,
        };
        let err = InboundEvent::decode(&envelope).expect_err("missing payload should fail");
        assert!(matches!(err, WireError::MalformedPayload { .. }));
    }

    #[test]
    fn decode_resolve_with_wrong_shape_is_malformed() {
        let envelope = Envelope::new(EVENT_SDK_RESOLVE, json!({ "data": {} }));
        let err = InboundEvent::decode(&envelope).expect_err("missing id should fail");
        assert!(matches!(err, WireError::MalformedPayload { .. }));
    }
}
