use serde::Serialize;
use serde_json::Value;

/// Wire name of the action that re-targets a frame to a stream.
pub const ACTION_SET_STREAM: &str = "set-stream";
/// Wire name of the action that updates the embedded UI settings.
pub const ACTION_SET_SETTINGS: &str = "set-settings";
/// Wire name of the action that sends a chat message.
pub const ACTION_SEND_MESSAGE: &str = "send-message";

/// Delivery mode used for every send-message action.
pub const SEND_MODE_BLAST: &str = "blast";

/// Mints `<name>-<n>` action ids from one counter shared across all
/// action kinds.
///
/// Ids are unique for the sequence lifetime and strictly increasing,
/// which is all the correlation scheme guarantees; the embedded
/// application is free to resolve them out of order.
#[derive(Debug, Default)]
pub struct ActionIdSequence {
    next: u64,
}

impl ActionIdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint the next id for `name`. The first minted id ends in `-1`.
    pub fn mint(&mut self, name: &str) -> String {
        self.next += 1;
        format!("{name}-{}", self.next)
    }
}

/// A one-shot, fire-and-forget command bound for the embedded
/// application: `{ name, id, params }` under an `sdk-action` envelope.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActionRequest {
    pub name: &'static str,
    pub id: String,
    pub params: ActionParams,
}

/// Parameter body of an [`ActionRequest`], serialized without a tag.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ActionParams {
    SetStream(SetStreamParams),
    /// Settings are forwarded verbatim as given by the caller.
    Settings(Value),
    SendMessage(SendMessageParams),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetStreamParams {
    pub stream_id: String,
    /// CSS id selector of the target container, when scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SendMessageParams {
    pub message: String,
    pub options: SendMessageOptions,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageOptions {
    pub mode: &'static str,
    pub stream_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
}

impl ActionRequest {
    /// Re-target the main frame (or `container_id`, when given) to
    /// `stream_id`.
    pub fn set_stream(
        ids: &mut ActionIdSequence,
        stream_id: &str,
        container_id: Option<&str>,
    ) -> Self {
        Self {
            name: ACTION_SET_STREAM,
            id: ids.mint(ACTION_SET_STREAM),
            params: ActionParams::SetStream(SetStreamParams {
                stream_id: stream_id.to_string(),
                container: container_id.map(container_selector),
            }),
        }
    }

    /// Update the embedded UI settings; `settings` is forwarded verbatim.
    pub fn set_settings(ids: &mut ActionIdSequence, settings: Value) -> Self {
        Self {
            name: ACTION_SET_SETTINGS,
            id: ids.mint(ACTION_SET_SETTINGS),
            params: ActionParams::Settings(settings),
        }
    }

    /// Send `message` to `stream_id`, always in blast mode.
    pub fn send_message(
        ids: &mut ActionIdSequence,
        stream_id: &str,
        message: &str,
        container_id: Option<&str>,
    ) -> Self {
        Self {
            name: ACTION_SEND_MESSAGE,
            id: ids.mint(ACTION_SEND_MESSAGE),
            params: ActionParams::SendMessage(SendMessageParams {
                message: message.to_string(),
                options: SendMessageOptions {
                    mode: SEND_MODE_BLAST,
                    stream_ids: vec![stream_id.to_string()],
                    container: container_id.map(container_selector),
                },
            }),
        }
    }
}

/// Container ids travel as CSS id selectors on the wire.
fn container_selector(container_id: &str) -> String {
    format!("#{container_id}")
}
