//! Host-page abstraction for the embedded chat SDK.
//!
//! The SDK core never touches a document directly. Everything it needs
//! from the embedding page goes through the [`HostPage`] trait: mounting
//! wrapped iframes, delivering envelopes to a frame's content window
//! restricted to one origin, raising blocking user-visible alerts, and
//! reporting the page's own origin.
//!
//! [`MemoryHost`] is the in-memory implementation used by tests and
//! demos; bindings to a real page live with the embedding application.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{HostError, Result};
pub use memory::{MemoryHost, MountedFrame, PostedMessage};
pub use traits::{FrameSpec, HostPage, FRAME_WRAPPER_CLASS};
