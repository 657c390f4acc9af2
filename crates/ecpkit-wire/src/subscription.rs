use serde::Serialize;

/// Wire type for new-message notifications, scoped or not.
pub const SUB_MESSAGE_NOTIFICATIONS: &str = "MessageNotifications";
/// Wire type for unread-count notifications scoped to one stream.
pub const SUB_UNREAD_COUNT: &str = "UnreadCountNotifications";
/// Wire type for unread-count notifications across all streams.
pub const SUB_GLOBAL_UNREAD_COUNT: &str = "GlobalUnreadCountNotifications";

/// The two notification families a host can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubscriptionKind {
    MessageNotifications,
    UnreadCountNotifications,
}

impl SubscriptionKind {
    /// Prefix of the deterministic subscription id.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::MessageNotifications => "message-notification",
            Self::UnreadCountNotifications => "unread-notification",
        }
    }

    /// Wire-level subscription type.
    ///
    /// This is the one place subscription semantics branch on a
    /// parameter: unread subscriptions switch to the global variant when
    /// no stream scope is given.
    pub fn wire_type(self, stream_id: Option<&str>) -> &'static str {
        match (self, stream_id) {
            (Self::MessageNotifications, _) => SUB_MESSAGE_NOTIFICATIONS,
            (Self::UnreadCountNotifications, Some(_)) => SUB_UNREAD_COUNT,
            (Self::UnreadCountNotifications, None) => SUB_GLOBAL_UNREAD_COUNT,
        }
    }
}

/// Deterministic subscription identity: kind prefix plus stream scope.
///
/// Unscoped subscriptions collapse onto one fixed key per kind (the
/// `undefined` token), so every global subscriber of a kind shares, and
/// overwrites, the same slot. The embedded application treats the id as
/// opaque and echoes it back on each notification.
pub fn subscription_id(kind: SubscriptionKind, stream_id: Option<&str>) -> String {
    format!("{}-{}", kind.id_prefix(), stream_id.unwrap_or("undefined"))
}

/// A durable registration for asynchronous notifications:
/// `{ type, id, params }` under an `sdk-subscription` envelope.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubscriptionRequest {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
    pub params: SubscriptionParams,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<String>,
}

impl SubscriptionRequest {
    pub fn new(kind: SubscriptionKind, stream_id: Option<&str>) -> Self {
        Self {
            kind: kind.wire_type(stream_id),
            id: subscription_id(kind, stream_id),
            params: SubscriptionParams {
                stream_id: stream_id.map(str::to_string),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn scoped_message_subscription() {
        let request = SubscriptionRequest::new(
            SubscriptionKind::MessageNotifications,
            Some("stream-1"),
        );
        let wire = serde_json::to_value(&request).expect("request should encode");
        assert_eq!(
            wire,
            json!({
                "type": "MessageNotifications",
                "id": "message-notification-stream-1",
                "params": { "streamId": "stream-1" },
            })
        );
    }

    #[test]
    fn unscoped_subscriptions_share_a_fixed_key() {
        assert_eq!(
            subscription_id(SubscriptionKind::MessageNotifications, None),
            "message-notification-undefined"
        );
        assert_eq!(
            subscription_id(SubscriptionKind::UnreadCountNotifications, None),
            "unread-notification-undefined"
        );
    }

    #[test]
    fn unread_kind_branches_on_scope() {
        let scoped = SubscriptionRequest::new(
            SubscriptionKind::UnreadCountNotifications,
            Some("stream-1"),
        );
        assert_eq!(scoped.kind, SUB_UNREAD_COUNT);
        assert_eq!(scoped.id, "unread-notification-stream-1");

        let global = SubscriptionRequest::new(SubscriptionKind::UnreadCountNotifications, None);
        assert_eq!(global.kind, SUB_GLOBAL_UNREAD_COUNT);
        let wire = serde_json::to_value(&global).expect("request should encode");
        assert_eq!(wire["params"], json!({}));
    }
}
