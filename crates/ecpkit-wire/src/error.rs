/// Errors that can occur while encoding or decoding ECP envelopes.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Serializing a payload to JSON failed.
    #[error("payload encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// An inbound envelope's payload did not match its event type.
    #[error("malformed \"{event_type}\" payload: {detail}")]
    MalformedPayload { event_type: String, detail: String },
}

pub type Result<T> = std::result::Result<T, WireError>;
