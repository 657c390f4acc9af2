use std::collections::BTreeSet;

use ecpkit_wire::Envelope;
use tracing::debug;

use crate::error::{HostError, Result};
use crate::traits::{FrameSpec, HostPage};

/// In-memory stand-in for a host document.
///
/// Containers must be declared up front, mirroring the elements present
/// in a page. Every mount, post, and alert is recorded for later
/// inspection, which is what tests and demos assert against.
#[derive(Debug, Default)]
pub struct MemoryHost {
    origin: String,
    containers: BTreeSet<String>,
    mounts: Vec<MountedFrame>,
    posts: Vec<PostedMessage>,
    alerts: Vec<String>,
}

/// A frame inserted into a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedFrame {
    pub container_id: String,
    pub spec: FrameSpec,
}

/// An envelope delivered to a frame's content window.
#[derive(Debug, Clone, PartialEq)]
pub struct PostedMessage {
    pub frame_element_id: String,
    pub envelope: Envelope,
    pub target_origin: String,
}

impl MemoryHost {
    /// Create a host whose page reports `page_origin`.
    pub fn new(page_origin: impl Into<String>) -> Self {
        Self {
            origin: page_origin.into(),
            ..Self::default()
        }
    }

    /// Declare a container element present in the document.
    pub fn with_container(mut self, container_id: impl Into<String>) -> Self {
        self.containers.insert(container_id.into());
        self
    }

    /// Declare a container element after construction.
    pub fn add_container(&mut self, container_id: impl Into<String>) {
        self.containers.insert(container_id.into());
    }

    /// Every frame mounted so far, in mount order.
    pub fn mounts(&self) -> &[MountedFrame] {
        &self.mounts
    }

    /// Every envelope posted so far, in post order.
    pub fn posts(&self) -> &[PostedMessage] {
        &self.posts
    }

    /// Every alert raised so far, in order.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}

impl HostPage for MemoryHost {
    fn mount_frame(&mut self, container_id: &str, spec: FrameSpec) -> Result<()> {
        if !self.containers.contains(container_id) {
            return Err(HostError::ContainerNotFound {
                container_id: container_id.to_string(),
            });
        }
        debug!(container_id, url = %spec.url, "frame mounted");
        self.mounts.push(MountedFrame {
            container_id: container_id.to_string(),
            spec,
        });
        Ok(())
    }

    fn post_to_frame(
        &mut self,
        frame_element_id: &str,
        envelope: &Envelope,
        target_origin: &str,
    ) -> Result<()> {
        let frame_exists = self
            .mounts
            .iter()
            .any(|mount| mount.spec.element_id.as_deref() == Some(frame_element_id));
        if !frame_exists {
            return Err(HostError::FrameNotFound {
                frame_id: frame_element_id.to_string(),
            });
        }
        self.posts.push(PostedMessage {
            frame_element_id: frame_element_id.to_string(),
            envelope: envelope.clone(),
            target_origin: target_origin.to_string(),
        });
        Ok(())
    }

    fn alert(&mut self, text: &str) {
        self.alerts.push(text.to_string());
    }

    fn page_origin(&self) -> &str {
        &self.origin
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn spec(element_id: Option<&str>) -> FrameSpec {
        FrameSpec {
            element_id: element_id.map(str::to_string),
            url: "https://pod.example/apps/embed/default".to_string(),
            wrapper_id: None,
        }
    }

    #[test]
    fn mount_into_missing_container_fails() {
        let mut host = MemoryHost::new("https://host.example");
        let err = host
            .mount_frame("nowhere", spec(None))
            .expect_err("missing container should fail");
        assert!(matches!(err, HostError::ContainerNotFound { .. }));
        assert!(host.mounts().is_empty());
    }

    #[test]
    fn mount_and_post_roundtrip() {
        let mut host = MemoryHost::new("https://host.example").with_container("main");
        host.mount_frame("main", spec(Some("main-frame")))
            .expect("mount should succeed");

        let envelope = Envelope::new("sdk-action", json!({ "name": "set-stream" }));
        host.post_to_frame("main-frame", &envelope, "https://pod.example")
            .expect("post should succeed");

        assert_eq!(host.posts().len(), 1);
        assert_eq!(host.posts()[0].target_origin, "https://pod.example");
        assert_eq!(host.posts()[0].envelope, envelope);
    }

    #[test]
    fn post_to_unmounted_frame_fails() {
        let mut host = MemoryHost::new("https://host.example");
        let envelope = Envelope::new("sdk-action", json!({}));
        let err = host
            .post_to_frame("main-frame", &envelope, "https://pod.example")
            .expect_err("unmounted frame should fail");
        assert!(matches!(err, HostError::FrameNotFound { .. }));
    }
}
