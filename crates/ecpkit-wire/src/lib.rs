//! Wire contract of the embedded chat protocol (ECP).
//!
//! Both directions speak the same JSON-shaped envelope, delivered over
//! the cross-document messaging channel and always restricted to one
//! explicit origin:
//!
//! ```text
//! { "eventType": string, "payload": object }
//! ```
//!
//! This is the lowest layer of ecpkit. It owns:
//! - [`Envelope`] construction and inbound decoding ([`InboundEvent`])
//! - one-shot command payloads ([`ActionRequest`]) and their id minting
//! - durable notification registrations ([`SubscriptionRequest`]) and
//!   their deterministic identity
//! - embed URL construction for the main and child frames

pub mod action;
pub mod embed;
pub mod envelope;
pub mod error;
pub mod settings;
pub mod subscription;

pub use action::{
    ActionIdSequence, ActionRequest, ACTION_SEND_MESSAGE, ACTION_SET_SETTINGS, ACTION_SET_STREAM,
    SEND_MODE_BLAST,
};
pub use embed::{child_frame_url, main_frame_url, CHILD_EMBED_PATH, MAIN_EMBED_PATH};
pub use envelope::{
    CallbackPayload, Envelope, InboundEvent, ResolveData, ResolveError, ResolvePayload,
    EVENT_CLIENT_READY, EVENT_SDK_ACTION, EVENT_SDK_CALLBACK_DATA, EVENT_SDK_REGISTER,
    EVENT_SDK_RESOLVE, EVENT_SDK_SUBSCRIPTION,
};
pub use error::{Result, WireError};
pub use settings::{EmbedSettings, Theme};
pub use subscription::{
    subscription_id, SubscriptionKind, SubscriptionParams, SubscriptionRequest,
    SUB_GLOBAL_UNREAD_COUNT, SUB_MESSAGE_NOTIFICATIONS, SUB_UNREAD_COUNT,
};
