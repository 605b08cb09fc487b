//! Product - Catalog Listing Records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single product as returned inside a listing page
///
/// Stored as the raw JSON object the server sent: the backend projection
/// varies between endpoints, so the record is kept verbatim (nulls, nested
/// and unknown fields included) and read through typed accessors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Product(pub Map<String, Value>);

impl Product {
    /// Create a product carrying only an id
    pub fn with_id(id: i64) -> Self {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::from(id));
        Self(map)
    }

    /// Look up any field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Numeric id; `None` when absent or not an integer
    pub fn id(&self) -> Option<i64> {
        self.0.get("id").and_then(Value::as_i64)
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    pub fn price(&self) -> Option<f64> {
        self.0.get("price").and_then(Value::as_f64)
    }

    /// Average review score, already scaled by the server
    pub fn score(&self) -> Option<f64> {
        self.0.get("score").and_then(Value::as_f64)
    }

    /// Seller nickname
    pub fn nickname(&self) -> Option<&str> {
        self.str_field("nickname")
    }

    /// Top-level category
    pub fn main(&self) -> Option<&str> {
        self.str_field("main")
    }

    pub fn reviews(&self) -> Option<i64> {
        self.0.get("reviews").and_then(Value::as_i64)
    }

    /// Public URL of the product image (`img.fullPath`)
    pub fn image_url(&self) -> Option<&str> {
        self.0
            .get("img")
            .and_then(|img| img.get("fullPath"))
            .and_then(Value::as_str)
    }

    /// Display title, falling back to the raw id
    pub fn display_title(&self) -> String {
        match (self.title(), self.0.get("id")) {
            (Some(title), _) if !title.is_empty() => title.to_string(),
            (_, Some(Value::String(id))) => format!("#{id}"),
            (_, Some(id)) if !id.is_null() => format!("#{id}"),
            _ => String::from("(untitled)"),
        }
    }
}

impl From<Map<String, Value>> for Product {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_partial_record() {
        let product: Product = serde_json::from_value(json!({ "id": 1 })).expect("decode");
        assert_eq!(product, Product::with_id(1));
        assert_eq!(serde_json::to_value(&product).expect("encode"), json!({ "id": 1 }));
    }

    #[test]
    fn test_full_record_accessors() {
        let raw = json!({
            "id": 7,
            "img": { "fileName": "chair.png", "fullPath": "https://cdn/chair.png" },
            "title": "Reading chair",
            "price": 129000,
            "score": 4.5,
            "nickname": "woodshop",
            "main": "서재",
            "reviews": 12,
            "badge": "new"
        });
        let product: Product = serde_json::from_value(raw.clone()).expect("decode");

        assert_eq!(product.id(), Some(7));
        assert_eq!(product.title(), Some("Reading chair"));
        assert_eq!(product.price(), Some(129000.0));
        assert_eq!(product.score(), Some(4.5));
        assert_eq!(product.nickname(), Some("woodshop"));
        assert_eq!(product.main(), Some("서재"));
        assert_eq!(product.reviews(), Some(12));
        assert_eq!(product.image_url(), Some("https://cdn/chair.png"));
        assert_eq!(product.get("badge"), Some(&json!("new")));
        assert_eq!(serde_json::to_value(&product).expect("encode"), raw);
    }

    #[test]
    fn test_unexpected_types_and_nulls_kept_verbatim() {
        let raw = json!({
            "id": "A-2",
            "price": 12.5,
            "title": null,
            "img": { "fileId": 9, "fileName": "a.png" }
        });
        let product: Product = serde_json::from_value(raw.clone()).expect("decode");

        assert_eq!(product.id(), None);
        assert_eq!(product.price(), Some(12.5));
        assert_eq!(product.title(), None);
        assert_eq!(product.image_url(), None);
        assert_eq!(serde_json::to_value(&product).expect("encode"), raw);
    }

    #[test]
    fn test_display_title() {
        assert_eq!(Product::with_id(3).display_title(), "#3");
        let sku: Product = serde_json::from_value(json!({ "id": "A-2" })).expect("decode");
        assert_eq!(sku.display_title(), "#A-2");
        assert_eq!(Product::default().display_title(), "(untitled)");
    }
}
