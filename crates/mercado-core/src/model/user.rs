use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::endereco::Endereco;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub nome: String,
    pub email: String,
    #[serde(default)]
    pub telefone: String,
    pub data_cadastro: DateTime<Utc>,
    #[serde(default)]
    pub cadastro_completo: bool,
    #[serde(default)]
    pub ativo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultimo_login: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enderecos: Option<Vec<Endereco>>,
    /// Legacy alias of `telefone`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
}

pub type Cliente = User;
pub type Usuario = User;

impl User {
    /// Contact phone, falling back to the legacy `whatsapp` field.
    pub fn phone(&self) -> Option<&str> {
        if !self.telefone.is_empty() {
            return Some(&self.telefone);
        }
        self.whatsapp.as_deref().filter(|w| !w.is_empty())
    }
}
