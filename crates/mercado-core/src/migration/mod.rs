//! Legacy-to-canonical data migration domain.
//!
//! This module holds the pure parts of the migration: which passes exist,
//! how each record type is normalized, and what a pass reports back. The
//! side-effecting orchestrator lives in `mercado-application`.
//!
//! # Passes
//!
//! ```text
//! clientes  ──set──▶ users      (telefone/whatsapp kept in sync)
//! pedidos   ──update──▶ pedidos   (userId from clienteId/usuarioId)
//! enderecos ──update──▶ enderecos (userId from clienteId/usuarioId)
//! ```

mod normalizer;
mod pass;
mod result;

pub use normalizer::{
    LegacyCustomer, NormalizeOutcome, OwnedRecord, SkipReason, normalize, normalize_customer,
    normalize_owned,
};
pub use pass::MigrationPass;
pub use result::MigrationResult;

/// Default number of writes per committed batch.
pub const DEFAULT_BATCH_SIZE: usize = 500;
