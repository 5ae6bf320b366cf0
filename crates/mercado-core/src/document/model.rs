use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};

use crate::error::{MercadoError, Result};

/// Field map of a single document.
pub type Fields = serde_json::Map<String, Value>;

/// Well-known collections of the Mercado Fácil document store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Collection {
    /// Legacy customer records
    Clientes,
    /// Canonical user records
    Users,
    /// Orders
    Pedidos,
    /// Delivery addresses
    Enderecos,
}

impl Collection {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

/// One document read from a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Builds a document from a JSON object literal.
    ///
    /// Non-object values produce an empty field map.
    pub fn from_value(id: impl Into<String>, value: Value) -> Self {
        let fields = match value {
            Value::Object(map) => map,
            _ => Fields::new(),
        };
        Self::new(id, fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the field only when it carries a usable value (see [`is_present`]).
    pub fn present(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|v| is_present(v))
    }
}

/// Whether a stored value counts as "set".
///
/// Legacy writers left `null`, empty strings, `false` and `0` behind in
/// fields they meant to clear, so all of those read as absent.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum WriteKind {
    /// Replace the whole document, creating it if missing
    Set,
    /// Merge fields into an existing document
    Update,
}

/// A write staged for the next batch commit.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOperation {
    pub kind: WriteKind,
    pub collection: String,
    pub id: String,
    pub fields: Fields,
}

impl WriteOperation {
    pub fn set(collection: impl Into<String>, id: impl Into<String>, fields: Fields) -> Self {
        Self {
            kind: WriteKind::Set,
            collection: collection.into(),
            id: id.into(),
            fields,
        }
    }

    pub fn update(collection: impl Into<String>, id: impl Into<String>, fields: Fields) -> Self {
        Self {
            kind: WriteKind::Update,
            collection: collection.into(),
            id: id.into(),
            fields,
        }
    }

    /// Checks the addressing of the operation before it is staged.
    pub fn validate(&self) -> Result<()> {
        if self.collection.trim().is_empty() {
            return Err(MercadoError::migration("write has an empty collection name"));
        }
        if self.id.trim().is_empty() || self.id.contains('/') {
            return Err(MercadoError::migration(format!(
                "invalid document id '{}'",
                self.id
            )));
        }
        Ok(())
    }
}
