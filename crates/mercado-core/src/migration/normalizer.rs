//! Per-record-type normalization.
//!
//! Each function lifts a raw [`Document`] into a typed legacy shape and maps
//! it to the canonical write, or explains why nothing should be written.
//! Nothing here touches the store.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::pass::MigrationPass;
use crate::document::{Collection, Document, Fields, WriteOperation};

const TELEFONE: &str = "telefone";
const WHATSAPP: &str = "whatsapp";
const USER_ID: &str = "userId";
const CLIENTE_ID: &str = "clienteId";
const USUARIO_ID: &str = "usuarioId";
const UPDATED_AT: &str = "updatedAt";

/// What the orchestrator should do with one record.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizeOutcome {
    /// Stage this write
    Write(WriteOperation),
    /// Leave the record alone; not counted, not an error
    Skip(SkipReason),
    /// The record cannot be migrated; the message names the record
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `userId` is already populated
    AlreadyCanonical,
}

/// Customer record as found in `clientes`.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyCustomer {
    pub id: String,
    pub telefone: Option<Value>,
    pub whatsapp: Option<Value>,
    /// Every field of the original document, phone fields included
    pub fields: Fields,
}

impl LegacyCustomer {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            telefone: doc.present(TELEFONE).cloned(),
            whatsapp: doc.present(WHATSAPP).cloned(),
            fields: doc.fields.clone(),
        }
    }

    /// The phone number both canonical fields will carry.
    ///
    /// `whatsapp` wins because it was the field the storefront kept current.
    pub fn canonical_phone(&self) -> Option<&Value> {
        self.whatsapp.as_ref().or(self.telefone.as_ref())
    }
}

/// Order or address record carrying an owner reference.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedRecord {
    pub id: String,
    pub user_id: Option<Value>,
    pub cliente_id: Option<Value>,
    pub usuario_id: Option<Value>,
}

impl OwnedRecord {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            user_id: doc.present(USER_ID).cloned(),
            cliente_id: doc.present(CLIENTE_ID).cloned(),
            usuario_id: doc.present(USUARIO_ID).cloned(),
        }
    }

    /// Owner taken from the legacy fields, `clienteId` first.
    pub fn legacy_owner(&self) -> Option<&Value> {
        self.cliente_id.as_ref().or(self.usuario_id.as_ref())
    }
}

fn timestamp(now: DateTime<Utc>) -> Value {
    Value::String(now.to_rfc3339())
}

/// Customer → User: a full `set` into `users` under the same id.
pub fn normalize_customer(doc: &Document, now: DateTime<Utc>) -> NormalizeOutcome {
    let customer = LegacyCustomer::from_document(doc);

    let Some(phone) = customer.canonical_phone().cloned() else {
        return NormalizeOutcome::Invalid(format!(
            "Failed to migrate customer {}: neither whatsapp nor telefone is set",
            customer.id
        ));
    };

    let mut fields = customer.fields;
    fields.insert(TELEFONE.to_string(), phone.clone());
    fields.insert(WHATSAPP.to_string(), phone);
    fields.insert(UPDATED_AT.to_string(), timestamp(now));

    NormalizeOutcome::Write(WriteOperation::set(
        Collection::Users.as_str(),
        customer.id,
        fields,
    ))
}

/// Order/Address → partial `update` adding `userId` in place.
pub fn normalize_owned(
    collection: Collection,
    doc: &Document,
    now: DateTime<Utc>,
) -> NormalizeOutcome {
    let record = OwnedRecord::from_document(doc);

    if record.user_id.is_some() {
        return NormalizeOutcome::Skip(SkipReason::AlreadyCanonical);
    }

    let Some(owner) = record.legacy_owner().cloned() else {
        let label = match collection {
            Collection::Enderecos => "Address",
            _ => "Order",
        };
        return NormalizeOutcome::Invalid(format!(
            "{} {} has neither clienteId nor usuarioId",
            label, record.id
        ));
    };

    let mut fields = Fields::new();
    fields.insert(USER_ID.to_string(), owner);
    fields.insert(UPDATED_AT.to_string(), timestamp(now));

    NormalizeOutcome::Write(WriteOperation::update(
        collection.as_str(),
        record.id,
        fields,
    ))
}

/// Dispatches to the normalizer of `pass`.
pub fn normalize(pass: MigrationPass, doc: &Document, now: DateTime<Utc>) -> NormalizeOutcome {
    match pass {
        MigrationPass::ClientesToUsers => normalize_customer(doc, now),
        MigrationPass::PedidosToUserId | MigrationPass::EnderecosToUserId => {
            normalize_owned(pass.target(), doc, now)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::WriteKind;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn expect_write(outcome: NormalizeOutcome) -> WriteOperation {
        match outcome {
            NormalizeOutcome::Write(op) => op,
            other => panic!("expected a write, got {:?}", other),
        }
    }

    #[test]
    fn test_customer_with_only_whatsapp() {
        let doc = Document::from_value("c1", json!({"nome": "Ana", "whatsapp": "11999"}));
        let op = expect_write(normalize_customer(&doc, fixed_now()));

        assert_eq!(op.kind, WriteKind::Set);
        assert_eq!(op.collection, "users");
        assert_eq!(op.id, "c1");
        assert_eq!(op.fields["telefone"], json!("11999"));
        assert_eq!(op.fields["whatsapp"], json!("11999"));
        assert_eq!(op.fields["nome"], json!("Ana"));
        assert_eq!(op.fields["updatedAt"], json!(fixed_now().to_rfc3339()));
    }

    #[test]
    fn test_customer_with_only_telefone() {
        let doc = Document::from_value("c2", json!({"telefone": "1133"}));
        let op = expect_write(normalize_customer(&doc, fixed_now()));

        assert_eq!(op.fields["telefone"], json!("1133"));
        assert_eq!(op.fields["whatsapp"], json!("1133"));
    }

    #[test]
    fn test_customer_whatsapp_wins_over_telefone() {
        let doc = Document::from_value("c3", json!({"telefone": "old", "whatsapp": "new"}));
        let op = expect_write(normalize_customer(&doc, fixed_now()));

        assert_eq!(op.fields["telefone"], json!("new"));
        assert_eq!(op.fields["whatsapp"], json!("new"));
    }

    #[test]
    fn test_customer_empty_whatsapp_falls_back() {
        let doc = Document::from_value("c4", json!({"telefone": "1133", "whatsapp": ""}));
        let op = expect_write(normalize_customer(&doc, fixed_now()));

        assert_eq!(op.fields["whatsapp"], json!("1133"));
    }

    #[test]
    fn test_customer_without_phone_is_invalid() {
        let doc = Document::from_value("c5", json!({"nome": "Sem telefone"}));
        match normalize_customer(&doc, fixed_now()) {
            NormalizeOutcome::Invalid(msg) => assert!(msg.contains("c5")),
            other => panic!("expected invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_owned_record_with_user_id_is_skipped() {
        let doc = Document::from_value("p1", json!({"userId": "u9", "clienteId": "c1"}));
        assert_eq!(
            normalize_owned(Collection::Pedidos, &doc, fixed_now()),
            NormalizeOutcome::Skip(SkipReason::AlreadyCanonical)
        );
    }

    #[test]
    fn test_owned_record_prefers_cliente_id() {
        let doc = Document::from_value("p2", json!({"clienteId": "c1", "usuarioId": "u1"}));
        let op = expect_write(normalize_owned(Collection::Pedidos, &doc, fixed_now()));

        assert_eq!(op.kind, WriteKind::Update);
        assert_eq!(op.collection, "pedidos");
        assert_eq!(op.fields.len(), 2);
        assert_eq!(op.fields["userId"], json!("c1"));
    }

    #[test]
    fn test_address_with_usuario_id() {
        let doc = Document::from_value("e1", json!({"usuarioId": "u1", "cidade": "Recife"}));
        let op = expect_write(normalize_owned(Collection::Enderecos, &doc, fixed_now()));

        assert_eq!(op.collection, "enderecos");
        assert_eq!(op.fields["userId"], json!("u1"));
        assert!(op.fields.contains_key("updatedAt"));
        assert!(!op.fields.contains_key("cidade"));
    }

    #[test]
    fn test_owned_record_without_owner_is_invalid() {
        let doc = Document::from_value("e2", json!({"userId": null}));
        match normalize_owned(Collection::Enderecos, &doc, fixed_now()) {
            NormalizeOutcome::Invalid(msg) => {
                assert!(msg.contains("e2"));
                assert!(msg.starts_with("Address"));
            }
            other => panic!("expected invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_dispatches_by_pass() {
        let doc = Document::from_value("x", json!({"clienteId": "c1", "whatsapp": "1"}));

        let customer = expect_write(normalize(MigrationPass::ClientesToUsers, &doc, fixed_now()));
        assert_eq!(customer.collection, "users");

        let address = expect_write(normalize(MigrationPass::EnderecosToUserId, &doc, fixed_now()));
        assert_eq!(address.collection, "enderecos");
    }
}
