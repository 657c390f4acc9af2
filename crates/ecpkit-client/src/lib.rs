//! Protocol core of the embedded chat SDK.
//!
//! This is the "just works" layer. One [`Client`] owns the whole
//! conversation with the embedded chat application: it mounts frames
//! through a [`HostPage`], dispatches one-shot actions, keeps durable
//! subscription callbacks, and fans inbound envelopes out to them.
//!
//! Everything is single-writer by construction: every entry point takes
//! `&mut self`, so inbound dispatches can never interleave.
//!
//! [`HostPage`]: ecpkit_host::HostPage

pub mod actions;
pub mod client;
pub mod config;
pub mod error;
pub mod frames;

mod channel;
mod subscriptions;

pub use actions::ActionStatus;
pub use client::Client;
pub use config::{ClientConfig, DEFAULT_RESOLVE_TIMEOUT};
pub use error::{ClientError, Result};
pub use frames::{MAIN_FRAME_CONTAINER, MAIN_FRAME_ID};
