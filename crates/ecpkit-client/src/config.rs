use std::time::Duration;

use ecpkit_wire::EmbedSettings;

/// How long a dispatched action may stay unresolved before its tracker
/// entry reports [`ActionStatus::TimedOut`].
///
/// [`ActionStatus::TimedOut`]: crate::actions::ActionStatus::TimedOut
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration, set once before any frame is created.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin of the pod hosting the embedded application, e.g.
    /// `https://pod.example`. Also the only origin inbound messages are
    /// accepted from.
    pub pod_url: String,
    /// Partner identifier carried on the main embed URL.
    pub partner_id: String,
    /// UI toggles rendered into the main embed URL.
    pub settings: EmbedSettings,
    /// Resolve-tracking timeout for dispatched actions.
    pub resolve_timeout: Duration,
}

impl ClientConfig {
    pub fn new(pod_url: impl Into<String>, partner_id: impl Into<String>) -> Self {
        Self {
            pod_url: pod_url.into(),
            partner_id: partner_id.into(),
            settings: EmbedSettings::default(),
            resolve_timeout: DEFAULT_RESOLVE_TIMEOUT,
        }
    }

    /// Override the embed UI toggles.
    pub fn with_settings(mut self, settings: EmbedSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Override the resolve-tracking timeout.
    pub fn with_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout = timeout;
        self
    }
}
