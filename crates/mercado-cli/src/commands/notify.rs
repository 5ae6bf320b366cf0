use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use mercado_application::NotificationService;
use mercado_core::config::MercadoConfig;
use mercado_core::notification::PushMessage;
use mercado_infrastructure::FcmHttpGateway;

const TITLE: &str = "🛒 Mercado Fácil";

pub enum Target {
    Token(String),
    Topic(String),
}

fn print_usage() {
    println!("📖 Usage:");
    println!("  mercado notify token <FCM_TOKEN>");
    println!("  mercado notify topic <TOPIC_NAME>");
    println!();
    println!("📝 Examples:");
    println!("  mercado notify token dGhpc19pc19hX3Rva2Vu...");
    println!("  mercado notify topic promocoes");
    println!("  mercado notify topic pedidos");
}

fn token_message() -> PushMessage {
    PushMessage::new(TITLE, "Teste de notificação FCM!")
        .with_data("type", "test")
        .with_data("timestamp", Utc::now().timestamp_millis().to_string())
}

fn topic_message(topic: &str) -> PushMessage {
    PushMessage::new(TITLE, format!("Notificação para o tópico {}", topic))
        .with_data("type", "topic")
        .with_data("topic", topic)
}

/// Sends one test notification.
///
/// Exits the process with status 1 when no usable server key is configured.
pub async fn run(config: &MercadoConfig, target: Option<Target>) -> Result<()> {
    println!("🔥 FCM test sender - Mercado Fácil");

    let gateway = match FcmHttpGateway::from_settings(&config.notifications) {
        Ok(gateway) => gateway,
        Err(e) => {
            tracing::error!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let Some(target) = target else {
        print_usage();
        return Ok(());
    };

    let service = NotificationService::new(Arc::new(gateway));
    match target {
        Target::Token(token) => {
            println!("📱 Sending notification to device token...");
            service.send_to_token(&token, &token_message()).await?;
        }
        Target::Topic(topic) => {
            println!("📢 Sending notification to topic: {}", topic);
            service.send_to_topic(&topic, &topic_message(&topic)).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_message_defaults() {
        let message = token_message();
        assert_eq!(message.title, "🛒 Mercado Fácil");
        assert_eq!(message.body, "Teste de notificação FCM!");
        assert_eq!(message.data["type"], json!("test"));
        assert!(message.data["timestamp"].is_string());
    }

    #[test]
    fn test_topic_message_names_topic() {
        let message = topic_message("promocoes");
        assert_eq!(message.body, "Notificação para o tópico promocoes");
        assert_eq!(message.data["topic"], json!("promocoes"));
        assert_eq!(message.data["type"], json!("topic"));
    }
}
