//! Push notification use case.

use std::sync::Arc;

use mercado_core::error::Result;
use mercado_core::notification::{PushGateway, PushMessage, PushResponse, PushTarget, build_payload};
use tracing::{info, warn};

/// Sends push messages through an injected gateway.
pub struct NotificationService {
    gateway: Arc<dyn PushGateway>,
}

impl NotificationService {
    pub fn new(gateway: Arc<dyn PushGateway>) -> Self {
        Self { gateway }
    }

    /// Sends to a single device registration token.
    pub async fn send_to_token(&self, token: &str, message: &PushMessage) -> Result<PushResponse> {
        self.send(&PushTarget::Token(token.to_string()), message).await
    }

    /// Broadcasts to every device subscribed to `topic`.
    pub async fn send_to_topic(&self, topic: &str, message: &PushMessage) -> Result<PushResponse> {
        self.send(&PushTarget::Topic(topic.to_string()), message).await
    }

    /// Non-2xx answers are returned as-is and only logged.
    pub async fn send(&self, target: &PushTarget, message: &PushMessage) -> Result<PushResponse> {
        let payload = build_payload(target, message);
        info!("[Push] Sending \"{}\" to {}", message.title, target.address());

        let response = self.gateway.send(&payload).await?;
        info!("[Push] Status: {}", response.status);
        info!("[Push] Response: {}", response.body);
        if !response.is_success() {
            warn!("[Push] Gateway rejected the request with status {}", response.status);
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mercado_core::MercadoError;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    struct RecordingGateway {
        sent: Mutex<Vec<Value>>,
        status: u16,
    }

    impl RecordingGateway {
        fn new(status: u16) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                status,
            }
        }
    }

    #[async_trait]
    impl PushGateway for RecordingGateway {
        async fn send(&self, payload: &Value) -> Result<PushResponse> {
            self.sent.lock().unwrap().push(payload.clone());
            Ok(PushResponse {
                status: self.status,
                body: r#"{"success":1}"#.to_string(),
            })
        }
    }

    struct OfflineGateway;

    #[async_trait]
    impl PushGateway for OfflineGateway {
        async fn send(&self, _payload: &Value) -> Result<PushResponse> {
            Err(MercadoError::notification("connection refused"))
        }
    }

    #[tokio::test]
    async fn test_send_to_token_builds_device_payload() {
        let gateway = Arc::new(RecordingGateway::new(200));
        let service = NotificationService::new(gateway.clone());

        let message = PushMessage::new("Oferta", "Banana em promoção").with_data("type", "promo");
        let response = service.send_to_token("device-1", &message).await.unwrap();
        assert!(response.is_success());

        let sent = gateway.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["to"], json!("device-1"));
        assert_eq!(sent[0]["notification"]["title"], json!("Oferta"));
        assert_eq!(sent[0]["data"]["type"], json!("promo"));
    }

    #[tokio::test]
    async fn test_send_to_topic_prefixes_address() {
        let gateway = Arc::new(RecordingGateway::new(200));
        let service = NotificationService::new(gateway.clone());

        service
            .send_to_topic("ofertas", &PushMessage::new("Oi", "Olá"))
            .await
            .unwrap();

        let sent = gateway.sent.lock().unwrap();
        assert_eq!(sent[0]["to"], json!("/topics/ofertas"));
    }

    #[tokio::test]
    async fn test_rejected_status_is_returned() {
        let service = NotificationService::new(Arc::new(RecordingGateway::new(401)));
        let response = service
            .send_to_token("device-1", &PushMessage::new("a", "b"))
            .await
            .unwrap();
        assert_eq!(response.status, 401);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let service = NotificationService::new(Arc::new(OfflineGateway));
        let err = service
            .send_to_topic("ofertas", &PushMessage::new("a", "b"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
