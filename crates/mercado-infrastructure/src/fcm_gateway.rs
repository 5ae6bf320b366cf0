//! Push gateway adapter speaking the legacy FCM HTTP protocol.
//!
//! One POST per message, authenticated with the server key:
//!
//! ```text
//! POST https://fcm.googleapis.com/fcm/send
//! Authorization: key=<server key>
//! Content-Type: application/json
//! ```

use async_trait::async_trait;
use mercado_core::config::NotificationSettings;
use mercado_core::error::{MercadoError, Result};
use mercado_core::notification::{PushGateway, PushResponse};
use reqwest::Client;
use serde_json::Value;

#[derive(Clone)]
pub struct FcmHttpGateway {
    client: Client,
    endpoint: String,
    server_key: String,
}

impl FcmHttpGateway {
    pub fn new(endpoint: impl Into<String>, server_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            server_key: server_key.into(),
        }
    }

    /// Builds the gateway from configuration.
    ///
    /// # Errors
    ///
    /// Returns a config error when the server key is unset or is still the
    /// placeholder from the sample configuration.
    pub fn from_settings(settings: &NotificationSettings) -> Result<Self> {
        let key = settings.usable_server_key().ok_or_else(|| {
            MercadoError::config(
                "notifications.server_key is not configured (set MERCADO_FCM_SERVER_KEY)",
            )
        })?;
        Ok(Self::new(settings.endpoint.clone(), key))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn authorization(&self) -> String {
        format!("key={}", self.server_key)
    }
}

#[async_trait]
impl PushGateway for FcmHttpGateway {
    async fn send(&self, payload: &Value) -> Result<PushResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", self.authorization())
            .json(payload)
            .send()
            .await
            .map_err(|err| {
                MercadoError::notification(format!("Push gateway request failed: {err}"))
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read push gateway response body".to_string());

        Ok(PushResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mercado_core::config::SERVER_KEY_PLACEHOLDER;

    #[test]
    fn test_placeholder_key_is_rejected() {
        let settings = NotificationSettings {
            server_key: Some(SERVER_KEY_PLACEHOLDER.to_string()),
            ..NotificationSettings::default()
        };
        let err = FcmHttpGateway::from_settings(&settings).err().unwrap();
        assert!(err.is_config());
    }

    #[test]
    fn test_authorization_header_format() {
        let settings = NotificationSettings {
            server_key: Some("AAAA1234".to_string()),
            ..NotificationSettings::default()
        };
        let gateway = FcmHttpGateway::from_settings(&settings).unwrap();
        assert_eq!(gateway.authorization(), "key=AAAA1234");
        assert_eq!(gateway.endpoint(), "https://fcm.googleapis.com/fcm/send");
    }
}
