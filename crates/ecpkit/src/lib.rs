//! Embedded chat SDK for host pages.
//!
//! ecpkit renders chat views inside iframes pointed at a remote chat
//! application and talks to it over the cross-document messaging
//! channel: fire-and-forget actions out, origin-checked notifications
//! back in.
//!
//! # Crate Structure
//!
//! - [`wire`] — envelope types and the cross-frame wire contract
//! - [`host`] — host-page abstraction (frame mounting, delivery, alerts)
//! - [`client`] — the protocol core: one [`Client`] per embedded session
//!
//! [`Client`]: client::Client

/// Re-export wire types.
pub mod wire {
    pub use ecpkit_wire::*;
}

/// Re-export host-page types.
pub mod host {
    pub use ecpkit_host::*;
}

/// Re-export client types.
pub mod client {
    pub use ecpkit_client::*;
}
