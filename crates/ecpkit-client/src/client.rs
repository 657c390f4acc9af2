//! The client context object: one owner for all protocol state.

use std::fmt;

use ecpkit_host::{FrameSpec, HostPage};
use ecpkit_wire::{embed, ActionIdSequence, Envelope};
use tracing::{debug, info};

use crate::actions::ActionTracker;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::frames::{FrameRegistry, MAIN_FRAME_CONTAINER, MAIN_FRAME_ID};
use crate::subscriptions::SubscriptionRegistry;

/// An embedded chat session bound to one host page.
///
/// The client owns every piece of shared protocol state (configuration,
/// the frame registry, the action counter and tracker, the subscription
/// callback map), so the single-writer assumption holds by construction:
/// there are no globals and no hidden coupling, just this one object.
pub struct Client<H: HostPage> {
    pub(crate) host: H,
    pub(crate) config: ClientConfig,
    pub(crate) frames: FrameRegistry,
    pub(crate) actions: ActionTracker,
    pub(crate) action_ids: ActionIdSequence,
    pub(crate) subscriptions: SubscriptionRegistry,
    pub(crate) ready_callback: Option<Box<dyn FnOnce()>>,
    pub(crate) rejected_messages: u64,
}

impl<H: HostPage> Client<H> {
    /// Create a client over `host`. Nothing is mounted until the first
    /// successful [`open_stream`] on the main container.
    ///
    /// [`open_stream`]: Client::open_stream
    pub fn new(host: H, config: ClientConfig) -> Self {
        Self {
            host,
            config,
            frames: FrameRegistry::default(),
            actions: ActionTracker::default(),
            action_ids: ActionIdSequence::new(),
            subscriptions: SubscriptionRegistry::default(),
            ready_callback: None,
            rejected_messages: 0,
        }
    }

    /// Register a callback invoked once, when the embedded application
    /// first reports `clientReady`. Later deliveries are dropped, and a
    /// callback registered after that first report never fires.
    pub fn on_ready(&mut self, callback: impl FnOnce() + 'static) {
        self.ready_callback = Some(Box::new(callback));
    }

    /// Open `stream_id` in the container named by `container_id`.
    ///
    /// - Main container, first call: mounts the main frame pointed at
    ///   the embed URL and arms the message channel.
    /// - Main container, main frame already mounted: re-targets the
    ///   existing session with a set-stream action instead of mounting a
    ///   second frame.
    /// - Any other container: always mounts a brand-new child frame
    ///   whose one-shot load transition registers it with the embedded
    ///   application and targets its stream (see
    ///   [`child_frame_loaded`]).
    ///
    /// [`child_frame_loaded`]: Client::child_frame_loaded
    pub fn open_stream(&mut self, stream_id: &str, container_id: &str) -> Result<()> {
        if self.config.pod_url.is_empty() || stream_id.is_empty() {
            return Err(ClientError::missing_parameter(
                "open-stream",
                &["podUrl", "streamId"],
            ));
        }

        if container_id == MAIN_FRAME_CONTAINER {
            if self.frames.main_frame_mounted() {
                debug!(stream_id, "main frame already mounted, re-targeting");
                return self.set_stream(stream_id, None).map(|_| ());
            }
            return self.mount_main_frame(stream_id, container_id);
        }
        self.mount_child_frame(stream_id, container_id)
    }

    /// Notify the client that a child frame finished its first document
    /// load.
    ///
    /// Host glue calls this from the frame's load event. The transition
    /// is single-fire: the first call posts `sdk-register` for the frame
    /// and then a set-stream action scoped to it; later calls are
    /// dropped, reloads of the same frame included.
    pub fn child_frame_loaded(&mut self, frame_container_id: &str) -> Result<()> {
        let Some(stream_id) = self.frames.take_load_transition(frame_container_id) else {
            debug!(
                frame = frame_container_id,
                "load event for unknown or already-loaded frame dropped"
            );
            return Ok(());
        };
        self.post_envelope(Envelope::register(frame_container_id))?;
        self.set_stream(&stream_id, Some(frame_container_id))
            .map(|_| ())
    }

    /// Whether the embedded application has reported `clientReady`.
    pub fn is_ready(&self) -> bool {
        self.frames.main_frame_loaded()
    }

    /// Number of registered subscription callbacks.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Number of child frames created so far.
    pub fn child_frame_count(&self) -> usize {
        self.frames.child_count()
    }

    /// Whether a callback is registered under `subscription_id`.
    pub fn has_subscription(&self, subscription_id: &str) -> bool {
        self.subscriptions.contains(subscription_id)
    }

    /// Inbound envelopes dropped by the origin check. Internal
    /// diagnostic only; the drops themselves are silent.
    pub fn rejected_message_count(&self) -> u64 {
        self.rejected_messages
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Borrow the underlying host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutably borrow the underlying host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consume the client and return the host.
    pub fn into_host(self) -> H {
        self.host
    }

    fn mount_main_frame(&mut self, stream_id: &str, container_id: &str) -> Result<()> {
        let url = embed::main_frame_url(
            &self.config.pod_url,
            &self.config.settings,
            &self.config.partner_id,
            stream_id,
            self.host.page_origin(),
        );
        self.host.mount_frame(
            container_id,
            FrameSpec {
                element_id: Some(MAIN_FRAME_ID.to_string()),
                url,
                wrapper_id: None,
            },
        )?;
        self.frames.mark_main_frame_mounted();
        info!(stream_id, "main frame mounted");
        Ok(())
    }

    fn mount_child_frame(&mut self, stream_id: &str, container_id: &str) -> Result<()> {
        let frame_container_id = self.frames.allocate_child(stream_id);
        let url = embed::child_frame_url(&self.config.pod_url, &frame_container_id);
        self.host.mount_frame(
            container_id,
            FrameSpec {
                element_id: None,
                url,
                wrapper_id: Some(frame_container_id.clone()),
            },
        )?;
        info!(container_id, frame = %frame_container_id, "child frame mounted");
        Ok(())
    }
}

impl<H: HostPage> fmt::Debug for Client<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("pod_url", &self.config.pod_url)
            .field("partner_id", &self.config.partner_id)
            .field("main_frame_mounted", &self.frames.main_frame_mounted())
            .field("ready", &self.frames.main_frame_loaded())
            .field("subscriptions", &self.subscriptions)
            .field("rejected_messages", &self.rejected_messages)
            .finish()
    }
}
