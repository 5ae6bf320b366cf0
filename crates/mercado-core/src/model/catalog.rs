use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Produto {
    pub id: String,
    pub nome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codigo_barras: Option<String>,
    pub preco: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custo: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagem_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagens: Option<Vec<String>>,
    pub categoria: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destaque: Option<bool>,
    #[serde(default)]
    pub disponivel: bool,
    #[serde(default)]
    pub ativo: bool,
    #[serde(default)]
    pub estoque: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_unidade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unidade_medida: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avaliacoes: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promocao_ativa: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promocao_data_inicio: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promocao_data_final: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preco_promocional: Option<f64>,

    // Legacy promotion fields written by the old admin panel
    #[serde(default, rename = "promo_price", skip_serializing_if = "Option::is_none")]
    pub promo_price: Option<f64>,
    #[serde(
        default,
        rename = "promo_price_per_100g",
        skip_serializing_if = "Option::is_none"
    )]
    pub promo_price_per_100g: Option<f64>,
    #[serde(default, rename = "promo_status", skip_serializing_if = "Option::is_none")]
    pub promo_status: Option<String>,
    #[serde(default, rename = "unit_type", skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

pub type Product = Produto;

impl Produto {
    /// Price charged at `now`, honoring an active promotion window.
    pub fn effective_price(&self, now: DateTime<Utc>) -> f64 {
        let promo = self.preco_promocional.or(self.promo_price);
        let active = self.promocao_ativa.unwrap_or(false)
            && self.promocao_data_inicio.is_none_or(|start| start <= now)
            && self.promocao_data_final.is_none_or(|end| now <= end);

        match promo {
            Some(price) if active => price,
            _ => self.preco,
        }
    }

    pub fn in_stock(&self) -> bool {
        self.disponivel && self.ativo && self.estoque > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Categoria {
    pub id: String,
    pub nome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordem: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ativa: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

pub type Category = Categoria;
