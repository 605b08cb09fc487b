//! Page - Listing and Count Response Bodies

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::product::Product;
use crate::error::{Error, Result};

/// Pagination metadata reported with a listing page
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SliceInfo {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub has_next: bool,
}

/// A listing response: the content sequence plus optional slice info
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    /// Products in server order
    pub content: Vec<Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slice_info: Option<SliceInfo>,
}

impl ProductPage {
    /// Decode a listing body; a body without `content` is malformed
    pub fn from_json(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl From<Vec<Product>> for ProductPage {
    fn from(content: Vec<Product>) -> Self {
        Self {
            content,
            slice_info: None,
        }
    }
}

/// Count response, stored verbatim
///
/// The server reports at least `total`; any other fields are opaque and kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CountPayload(pub Map<String, Value>);

impl CountPayload {
    /// Decode a count body; anything but a JSON object is malformed
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::Invalid {
                message: format!("count response is not an object: {other}"),
            }),
        }
    }

    /// Total number of products, when reported as a non-negative integer
    pub fn total(&self) -> Option<u64> {
        self.0.get("total").and_then(Value::as_u64)
    }

    /// Look up any other reported field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_page_with_slice_info() {
        let page = ProductPage::from_json(json!({
            "content": [{ "id": 1 }, { "id": 2 }],
            "sliceInfo": { "page": 0, "size": 20, "hasNext": true }
        }))
        .expect("decode");

        assert_eq!(page.len(), 2);
        assert_eq!(
            page.slice_info,
            Some(SliceInfo {
                page: 0,
                size: 20,
                has_next: true
            })
        );
    }

    #[test]
    fn test_page_ignores_unknown_metadata() {
        let page =
            ProductPage::from_json(json!({ "content": [], "totalPages": 3 })).expect("decode");
        assert!(page.is_empty());
        assert_eq!(page.slice_info, None);
    }

    #[test]
    fn test_page_without_content_is_malformed() {
        assert!(ProductPage::from_json(json!({ "items": [] })).is_err());
        assert!(ProductPage::from_json(Value::Null).is_err());
    }

    #[test]
    fn test_count_payload_verbatim() {
        let raw = json!({ "total": 42, "main": "서재" });
        let count = CountPayload::from_json(raw.clone()).expect("decode");

        assert_eq!(count.total(), Some(42));
        assert_eq!(count.get("main"), Some(&json!("서재")));
        assert_eq!(serde_json::to_value(&count).expect("encode"), raw);
    }

    #[test]
    fn test_count_payload_rejects_non_object() {
        assert!(CountPayload::from_json(json!(42)).is_err());
        assert!(CountPayload::from_json(json!([1, 2])).is_err());
    }
}
