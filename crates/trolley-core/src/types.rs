//! # Domain Types
//!
//! Identity and external-service record types shared across the workspace.
//!
//! ## Opaque Display Fields
//! The product service returns records whose fields beyond `id` (title,
//! price, image URL, ...) are display data the core never interprets. They
//! are carried as a flattened JSON map so the cart passes them through to
//! the presentation layer byte-for-byte, and a new service field never
//! requires a core change.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unique product identity, assigned by the external product service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id)
    }
}

/// A product record as returned by the external product service.
///
/// ## Fields
/// Only `id` is meaningful to the core. Everything else the service sends
/// (name, price, image, ...) lands in `details` and is passed through
/// untouched into the cart line it seeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product identity.
    pub id: ProductId,

    /// Opaque display fields, passed through verbatim.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl ProductRecord {
    /// Creates a record with no display fields (mostly useful in tests).
    pub fn bare(id: impl Into<ProductId>) -> Self {
        ProductRecord {
            id: id.into(),
            details: Map::new(),
        }
    }

    /// Adds a display field, builder style.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// A stock level snapshot from the external stock service.
///
/// Read on demand for a single check and never cached: every unit added to
/// the cart is validated against a fresh stock read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    /// Product this stock level belongs to.
    pub id: ProductId,

    /// Units available from the service. Zero means sold out.
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_record_passes_unknown_fields_through() {
        let raw = json!({
            "id": 7,
            "title": "Sneaker",
            "price": 179.9,
            "image": "https://example.com/sneaker.jpg"
        });

        let record: ProductRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.id, ProductId(7));
        assert_eq!(record.details.get("title"), Some(&json!("Sneaker")));

        // Round-trips with every opaque field intact.
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn test_product_id_displays_as_plain_integer() {
        assert_eq!(ProductId(42).to_string(), "42");
    }
}
