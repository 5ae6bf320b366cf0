//! Admin panel form payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::notificacao::NotificationKind;
use crate::notification::PushMessage;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoForm {
    pub nome: String,
    pub descricao: String,
    pub codigo_barras: String,
    pub preco: f64,
    pub custo: f64,
    pub imagem_url: String,
    pub imagens: Vec<String>,
    pub categoria: String,
    pub destaque: bool,
    pub disponivel: bool,
    pub ativo: bool,
    pub estoque: i64,
    pub tipo_unidade: String,
    pub tags: Vec<String>,
    pub promocao_ativa: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promocao_data_inicio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promocao_data_final: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preco_promocional: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoriaForm {
    pub nome: String,
    pub descricao: String,
    pub ativa: bool,
    pub ordem: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificacaoForm {
    pub title: String,
    pub body: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_users: Option<Vec<String>>,
    pub send_to_all: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

impl NotificacaoForm {
    /// Push message announcing this notification; `type` travels in the data block.
    pub fn push_message(&self) -> PushMessage {
        let mut message = PushMessage::new(&self.title, &self.body);
        if let Some(data) = &self.data {
            message.data.extend(data.clone());
        }
        let kind = serde_json::to_value(self.kind).unwrap_or(Value::Null);
        message.with_data("type", kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_push_message_carries_kind() {
        let form: NotificacaoForm = serde_json::from_value(json!({
            "title": "Oferta relâmpago",
            "body": "Só hoje",
            "type": "oferta",
            "sendToAll": true,
            "data": {"produtoId": "p9"}
        }))
        .unwrap();

        let message = form.push_message();
        assert_eq!(message.title, "Oferta relâmpago");
        assert_eq!(message.data["type"], "oferta");
        assert_eq!(message.data["produtoId"], "p9");
    }
}
