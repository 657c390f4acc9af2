//! One-shot action dispatch and local resolve tracking.
//!
//! Actions are fire-and-forget on the wire: the embedded application
//! owes no ordered reply, only an eventual `sdk-resolve` report keyed by
//! the action id. The tracker keeps a local record of every dispatch so
//! callers can observe that report, or its absence, after the fact.
//! Nothing is ever retried.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use ecpkit_host::HostPage;
use ecpkit_wire::{
    ActionRequest, Envelope, ResolveError, ACTION_SEND_MESSAGE, ACTION_SET_SETTINGS,
    ACTION_SET_STREAM,
};
use serde_json::Value;
use tracing::debug;

use crate::client::Client;
use crate::error::{ClientError, Result};

/// Observed outcome of a dispatched action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionStatus {
    /// No resolve report yet, still within the resolve timeout.
    Pending,
    /// The embedded application acknowledged the action.
    Resolved,
    /// The embedded application reported an error.
    Failed(ResolveError),
    /// No resolve report arrived within the configured timeout.
    TimedOut,
}

/// Local records of dispatched actions, keyed by action id.
#[derive(Debug, Default)]
pub(crate) struct ActionTracker {
    entries: HashMap<String, TrackedAction>,
}

#[derive(Debug)]
struct TrackedAction {
    name: &'static str,
    sent_at: Instant,
    state: TrackedState,
}

#[derive(Debug)]
enum TrackedState {
    Pending,
    Resolved,
    Failed(ResolveError),
    TimedOut,
}

impl ActionTracker {
    pub(crate) fn record(&mut self, id: String, name: &'static str, now: Instant) {
        self.entries.insert(
            id,
            TrackedAction {
                name,
                sent_at: now,
                state: TrackedState::Pending,
            },
        );
    }

    /// Settle a pending entry from an inbound resolve report.
    ///
    /// Returns the action name when the id is known. The first
    /// transition wins: an entry already resolved, failed, or timed out
    /// keeps its state.
    pub(crate) fn settle(&mut self, id: &str, error: Option<ResolveError>) -> Option<&'static str> {
        let entry = self.entries.get_mut(id)?;
        if matches!(entry.state, TrackedState::Pending) {
            entry.state = match error {
                Some(error) => TrackedState::Failed(error),
                None => TrackedState::Resolved,
            };
        }
        Some(entry.name)
    }

    /// Status of an entry as of `now`. A pending entry past `timeout`
    /// reports [`ActionStatus::TimedOut`] without being mutated.
    pub(crate) fn status(
        &self,
        id: &str,
        timeout: Duration,
        now: Instant,
    ) -> Option<ActionStatus> {
        self.entries.get(id).map(|entry| match &entry.state {
            TrackedState::Pending if now.duration_since(entry.sent_at) >= timeout => {
                ActionStatus::TimedOut
            }
            TrackedState::Pending => ActionStatus::Pending,
            TrackedState::Resolved => ActionStatus::Resolved,
            TrackedState::Failed(error) => ActionStatus::Failed(error.clone()),
            TrackedState::TimedOut => ActionStatus::TimedOut,
        })
    }

    /// Transition every overdue pending entry to timed-out. Returns the
    /// expired ids, sorted.
    pub(crate) fn sweep_expired(&mut self, timeout: Duration, now: Instant) -> Vec<String> {
        let mut expired = Vec::new();
        for (id, entry) in &mut self.entries {
            if matches!(entry.state, TrackedState::Pending)
                && now.duration_since(entry.sent_at) >= timeout
            {
                entry.state = TrackedState::TimedOut;
                expired.push(id.clone());
            }
        }
        expired.sort_unstable();
        expired
    }
}

impl<H: HostPage> Client<H> {
    /// Re-target the main frame (or `container_id`, when given) to
    /// `stream_id`. Returns the generated action id.
    pub fn set_stream(&mut self, stream_id: &str, container_id: Option<&str>) -> Result<String> {
        if stream_id.is_empty() {
            return Err(ClientError::missing_parameter(
                ACTION_SET_STREAM,
                &["streamId"],
            ));
        }
        let request = ActionRequest::set_stream(&mut self.action_ids, stream_id, container_id);
        self.dispatch(request)
    }

    /// Update the embedded UI settings. `settings` must be a non-empty
    /// JSON object and is forwarded verbatim.
    pub fn update_settings(&mut self, settings: Value) -> Result<String> {
        let populated = settings.as_object().is_some_and(|map| !map.is_empty());
        if !populated {
            return Err(ClientError::missing_parameter(
                ACTION_SET_SETTINGS,
                &["settings"],
            ));
        }
        let request = ActionRequest::set_settings(&mut self.action_ids, settings);
        self.dispatch(request)
    }

    /// Send `message` to `stream_id`, always in blast mode, optionally
    /// scoped to a container. Returns the generated action id.
    pub fn send_message(
        &mut self,
        stream_id: &str,
        message: &str,
        container_id: Option<&str>,
    ) -> Result<String> {
        if stream_id.is_empty() || message.is_empty() {
            return Err(ClientError::missing_parameter(
                ACTION_SEND_MESSAGE,
                &["streamId", "message"],
            ));
        }
        let request =
            ActionRequest::send_message(&mut self.action_ids, stream_id, message, container_id);
        self.dispatch(request)
    }

    /// Status of a previously dispatched action, by the id its dispatch
    /// returned. `None` for ids this client never minted.
    pub fn action_status(&self, action_id: &str) -> Option<ActionStatus> {
        self.actions
            .status(action_id, self.config.resolve_timeout, Instant::now())
    }

    /// Transition every overdue pending action to timed-out and return
    /// the expired ids.
    pub fn sweep_expired_actions(&mut self) -> Vec<String> {
        self.actions
            .sweep_expired(self.config.resolve_timeout, Instant::now())
    }

    fn dispatch(&mut self, request: ActionRequest) -> Result<String> {
        let envelope = Envelope::action(&request)?;
        self.post_envelope(envelope)?;
        debug!(action = request.name, id = %request.id, "action dispatched");
        self.actions
            .record(request.id.clone(), request.name, Instant::now());
        Ok(request.id)
    }
}
