//! Shared data model of the storefront and the admin panel.
//!
//! Field names follow the camelCase names stored in the document store.
//! Legacy aliases (`whatsapp`, `clienteId`, `usuarioId`, `promo_*`) are kept
//! as optional fields so older documents still decode.

mod catalog;
mod common;
mod endereco;
mod forms;
mod notificacao;
mod pedido;
mod user;

pub use catalog::{Categoria, Category, Product, Produto};
pub use common::{
    CustomerAddress, CustomerData, DashboardStats, DataPage, DeliveryMode, LogLevel, PageMeta,
    PaymentMethod,
};
pub use endereco::Endereco;
pub use forms::{CategoriaForm, NotificacaoForm, ProdutoForm};
pub use notificacao::{NotificationKind, Notificacao};
pub use pedido::{CarrinhoItem, CartItem, Order, Pedido, PedidoStatus};
pub use user::{Cliente, User, Usuario};

/// Resolves an owner reference, canonical field first.
fn resolve_owner<'a>(
    user_id: &'a str,
    cliente_id: Option<&'a str>,
    usuario_id: Option<&'a str>,
) -> Option<&'a str> {
    std::iter::once(Some(user_id))
        .chain([cliente_id, usuario_id])
        .flatten()
        .find(|id| !id.is_empty())
}
