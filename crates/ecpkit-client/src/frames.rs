//! Frame bookkeeping: the singleton main frame and every child frame.

use std::collections::HashMap;

/// Element id of the singleton main iframe, the sole channel endpoint.
pub const MAIN_FRAME_ID: &str = "ecp-main-frame";
/// Container element the main frame mounts into.
pub const MAIN_FRAME_CONTAINER: &str = "ecp-main-frame-container";

const CHILD_CONTAINER_PREFIX: &str = "ecp-child-";

/// Tracks zero or one main frame and N child frames.
///
/// Frames are never destroyed (removal is the embedding page's
/// business), so the registry only ever grows.
#[derive(Debug, Default)]
pub(crate) struct FrameRegistry {
    main_mounted: bool,
    main_loaded: bool,
    next_child_index: u64,
    children: HashMap<String, ChildFrame>,
}

/// A secondary frame displaying one stream in its own container.
#[derive(Debug)]
struct ChildFrame {
    stream_id: String,
    state: ChildFrameState,
}

/// One-way lifecycle of a child frame's load transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChildFrameState {
    Created,
    Loaded,
}

impl FrameRegistry {
    pub(crate) fn main_frame_mounted(&self) -> bool {
        self.main_mounted
    }

    pub(crate) fn mark_main_frame_mounted(&mut self) {
        self.main_mounted = true;
    }

    pub(crate) fn main_frame_loaded(&self) -> bool {
        self.main_loaded
    }

    /// Mark the main frame loaded. Returns `false` when it already was.
    pub(crate) fn mark_main_frame_loaded(&mut self) -> bool {
        if self.main_loaded {
            return false;
        }
        self.main_loaded = true;
        true
    }

    /// Allocate a new child frame for `stream_id` and return its
    /// generated container id. Indices are unique and strictly
    /// increasing for the registry lifetime.
    pub(crate) fn allocate_child(&mut self, stream_id: &str) -> String {
        let index = self.next_child_index;
        self.next_child_index += 1;
        let container_id = format!("{CHILD_CONTAINER_PREFIX}{index}");
        self.children.insert(
            container_id.clone(),
            ChildFrame {
                stream_id: stream_id.to_string(),
                state: ChildFrameState::Created,
            },
        );
        container_id
    }

    /// Consume a child frame's one-shot load transition.
    ///
    /// Returns the stream the frame was opened for on the first call,
    /// `None` on every later call and for unknown frames; the
    /// transition fires at most once per frame, reloads included.
    pub(crate) fn take_load_transition(&mut self, container_id: &str) -> Option<String> {
        let child = self.children.get_mut(container_id)?;
        if child.state == ChildFrameState::Loaded {
            return None;
        }
        child.state = ChildFrameState::Loaded;
        Some(child.stream_id.clone())
    }

    pub(crate) fn child_count(&self) -> usize {
        self.children.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_ids_are_strictly_increasing() {
        let mut frames = FrameRegistry::default();
        assert_eq!(frames.allocate_child("s1"), "ecp-child-0");
        assert_eq!(frames.allocate_child("s1"), "ecp-child-1");
        assert_eq!(frames.allocate_child("s2"), "ecp-child-2");
        assert_eq!(frames.child_count(), 3);
    }

    #[test]
    fn load_transition_fires_at_most_once() {
        let mut frames = FrameRegistry::default();
        let id = frames.allocate_child("stream-1");

        assert_eq!(frames.take_load_transition(&id).as_deref(), Some("stream-1"));
        assert_eq!(frames.take_load_transition(&id), None);
    }

    #[test]
    fn load_transition_for_unknown_frame_is_none() {
        let mut frames = FrameRegistry::default();
        assert_eq!(frames.take_load_transition("ecp-child-7"), None);
    }

    #[test]
    fn main_loaded_flag_is_idempotent() {
        let mut frames = FrameRegistry::default();
        assert!(frames.mark_main_frame_loaded());
        assert!(!frames.mark_main_frame_loaded());
        assert!(frames.main_frame_loaded());
    }
}
