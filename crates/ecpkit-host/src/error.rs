/// Errors that can occur at the host-page boundary.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The target container is absent from the document.
    ///
    /// This is the one fatal condition in the protocol: without a mount
    /// point nothing downstream is reachable.
    #[error("container \"{container_id}\" not found in document")]
    ContainerNotFound { container_id: String },

    /// No mounted frame carries the requested element id.
    #[error("frame \"{frame_id}\" not found in document")]
    FrameNotFound { frame_id: String },

    /// Delivery to the frame's content window failed.
    #[error("posting to frame \"{frame_id}\" failed: {detail}")]
    Post { frame_id: String, detail: String },
}

pub type Result<T> = std::result::Result<T, HostError>;
