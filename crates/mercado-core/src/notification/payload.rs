use serde_json::{Map, Value, json};

/// Icon shown by browsers and used as the Android badge.
pub const DEFAULT_ICON: &str = "/icons/icon-192x192.png";

/// Click action understood by the mobile app's notification handler.
pub const CLICK_ACTION: &str = "FLUTTER_NOTIFICATION_CLICK";

const ANDROID_CHANNEL: &str = "high_importance_channel";

/// Where a push message is delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushTarget {
    /// A single device registration token
    Token(String),
    /// Every device subscribed to the topic
    Topic(String),
}

impl PushTarget {
    /// Value of the payload's `to` field.
    pub fn address(&self) -> String {
        match self {
            PushTarget::Token(token) => token.clone(),
            PushTarget::Topic(topic) => format!("/topics/{}", topic),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    /// Free-form key/value data delivered to the app
    pub data: Map<String, Value>,
}

impl PushMessage {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            data: Map::new(),
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// Builds the gateway request body for `message`.
///
/// Device messages carry the Android and web delivery hints so they show
/// up as heads-up notifications; topic broadcasts only carry the
/// notification and data blocks.
pub fn build_payload(target: &PushTarget, message: &PushMessage) -> Value {
    match target {
        PushTarget::Token(_) => {
            let mut data = message.data.clone();
            data.insert("click_action".to_string(), json!(CLICK_ACTION));

            json!({
                "to": target.address(),
                "notification": {
                    "title": message.title,
                    "body": message.body,
                    "icon": DEFAULT_ICON,
                    "badge": DEFAULT_ICON,
                    "click_action": CLICK_ACTION,
                },
                "data": data,
                "android": {
                    "priority": "high",
                    "notification": {
                        "channel_id": ANDROID_CHANNEL,
                        "sound": "default",
                    },
                },
                "webpush": {
                    "headers": { "Urgency": "high" },
                    "notification": {
                        "icon": DEFAULT_ICON,
                        "badge": DEFAULT_ICON,
                        "requireInteraction": true,
                    },
                },
            })
        }
        PushTarget::Topic(_) => json!({
            "to": target.address(),
            "notification": {
                "title": message.title,
                "body": message.body,
                "icon": DEFAULT_ICON,
            },
            "data": message.data,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_payload_carries_platform_hints() {
        let message = PushMessage::new("Oferta", "Banana em promoção").with_data("type", "test");
        let payload = build_payload(&PushTarget::Token("tok-1".into()), &message);

        assert_eq!(payload["to"], "tok-1");
        assert_eq!(payload["notification"]["title"], "Oferta");
        assert_eq!(payload["data"]["type"], "test");
        assert_eq!(payload["data"]["click_action"], CLICK_ACTION);
        assert_eq!(payload["android"]["priority"], "high");
        assert_eq!(
            payload["android"]["notification"]["channel_id"],
            "high_importance_channel"
        );
        assert_eq!(payload["webpush"]["headers"]["Urgency"], "high");
        assert_eq!(payload["webpush"]["notification"]["requireInteraction"], true);
    }

    #[test]
    fn test_topic_payload_is_minimal() {
        let message = PushMessage::new("Pedidos", "Novo status").with_data("topic", "pedidos");
        let payload = build_payload(&PushTarget::Topic("pedidos".into()), &message);

        assert_eq!(payload["to"], "/topics/pedidos");
        assert_eq!(payload["notification"]["icon"], DEFAULT_ICON);
        assert_eq!(payload["data"]["topic"], "pedidos");
        assert!(payload.get("android").is_none());
        assert!(payload["data"].get("click_action").is_none());
    }
}
