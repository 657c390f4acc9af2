use ecpkit_wire::Envelope;

use crate::error::Result;

/// Class name carried by the wrapper element around every mounted frame.
pub const FRAME_WRAPPER_CLASS: &str = "frame-container";

/// A frame the SDK asks the host page to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSpec {
    /// Element id of the iframe itself, when the SDK needs to address it
    /// later. Only the main frame carries one.
    pub element_id: Option<String>,
    /// Document URL the frame navigates to.
    pub url: String,
    /// Element id carried by the wrapper element, when any. Child frame
    /// wrappers carry the generated frame container id.
    pub wrapper_id: Option<String>,
}

/// The document surface the SDK is embedded in.
///
/// Implementations bridge to a real page (element lookup, iframe
/// creation, `postMessage`, `alert`) or stand in for one, like
/// [`MemoryHost`]. The SDK calls every method from a single owner, so
/// implementations need no internal synchronization.
///
/// [`MemoryHost`]: crate::memory::MemoryHost
pub trait HostPage {
    /// Insert `spec` into the container, wrapped in a
    /// [`FRAME_WRAPPER_CLASS`] element.
    ///
    /// Fails with [`HostError::ContainerNotFound`] when the container is
    /// absent from the document.
    ///
    /// [`HostError::ContainerNotFound`]: crate::error::HostError::ContainerNotFound
    fn mount_frame(&mut self, container_id: &str, spec: FrameSpec) -> Result<()>;

    /// Deliver `envelope` to the frame's content window, restricted to
    /// `target_origin`, never a wildcard.
    fn post_to_frame(
        &mut self,
        frame_element_id: &str,
        envelope: &Envelope,
        target_origin: &str,
    ) -> Result<()>;

    /// Raise a blocking, user-visible notice.
    fn alert(&mut self, text: &str);

    /// Origin of the embedding page (`location.origin`).
    fn page_origin(&self) -> &str;
}
