use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endereco {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub cep: String,
    pub logradouro: String,
    pub numero: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complemento: Option<String>,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    #[serde(default)]
    pub principal: bool,
    /// Deprecated owner reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<String>,
    /// Deprecated owner reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usuario_id: Option<String>,
}

impl Endereco {
    pub fn owner_id(&self) -> Option<&str> {
        super::resolve_owner(
            &self.user_id,
            self.cliente_id.as_deref(),
            self.usuario_id.as_deref(),
        )
    }
}
