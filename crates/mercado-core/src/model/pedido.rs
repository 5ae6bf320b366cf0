use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::Produto;
use super::endereco::Endereco;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrinhoItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub qty: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub produto: Option<Box<Produto>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantidade: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<f64>,
}

pub type CartItem = CarrinhoItem;

impl CarrinhoItem {
    pub fn line_total(&self) -> f64 {
        self.subtotal.unwrap_or(self.price * f64::from(self.qty))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PedidoStatus {
    Pendente,
    Confirmado,
    Preparando,
    SaiuEntrega,
    Entregue,
    Cancelado,
}

impl PedidoStatus {
    /// Whether the order can no longer change.
    pub fn is_final(&self) -> bool {
        matches!(self, PedidoStatus::Entregue | PedidoStatus::Cancelado)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pedido {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub itens: Vec<CarrinhoItem>,
    pub total: f64,
    pub status: PedidoStatus,
    pub endereco: Endereco,
    pub data_pedido: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_entrega: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
    pub metodo_pagamento: String,
    /// Deprecated owner reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<String>,
    /// Deprecated owner reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usuario_id: Option<String>,
}

pub type Order = Pedido;

impl Pedido {
    pub fn owner_id(&self) -> Option<&str> {
        super::resolve_owner(
            &self.user_id,
            self.cliente_id.as_deref(),
            self.usuario_id.as_deref(),
        )
    }

    pub fn items_total(&self) -> f64 {
        self.itens.iter().map(CarrinhoItem::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_value(PedidoStatus::SaiuEntrega).unwrap(),
            json!("saiu_entrega")
        );
        let parsed: PedidoStatus = serde_json::from_value(json!("cancelado")).unwrap();
        assert!(parsed.is_final());
    }

    #[test]
    fn test_legacy_order_owner() {
        let pedido: Pedido = serde_json::from_value(json!({
            "id": "p1",
            "clienteId": "c1",
            "itens": [{"id": "i1", "name": "Arroz", "price": 5.5, "qty": 2}],
            "total": 11.0,
            "status": "pendente",
            "endereco": {
                "id": "e1", "cep": "1", "logradouro": "Rua", "numero": "1",
                "bairro": "B", "cidade": "C", "estado": "PE"
            },
            "dataPedido": "2024-06-01T12:00:00Z",
            "metodoPagamento": "pix"
        }))
        .unwrap();

        assert_eq!(pedido.owner_id(), Some("c1"));
        assert!((pedido.items_total() - 11.0).abs() < f64::EPSILON);
    }
}
