//! Builders for the platform's JSON query language.
//!
//! List calls accept queries as repeated `queries[]` parameters, each a
//! JSON object like `{"method":"equal","attribute":"status","values":["active"]}`.

use serde::Serialize;
use serde_json::Value;

/// One filter, projection, ordering, or paging instruction.
#[derive(Debug, Clone, Serialize)]
pub struct Query {
    method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attribute: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    values: Vec<Value>,
}

impl Query {
    /// `attribute == value`.
    pub fn equal(attribute: &str, value: impl Into<Value>) -> Self {
        Self {
            method: "equal",
            attribute: Some(attribute.to_string()),
            values: vec![value.into()],
        }
    }

    /// Restricts returned fields to `attributes`. Internal fields
    /// (`$id`, `$createdAt`, ...) must be named explicitly to survive
    /// the projection.
    pub fn select<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: "select",
            attribute: None,
            values: attributes
                .into_iter()
                .map(|a| Value::String(a.into()))
                .collect(),
        }
    }

    /// Caps the page size.
    pub fn limit(count: u64) -> Self {
        Self {
            method: "limit",
            attribute: None,
            values: vec![Value::from(count)],
        }
    }

    /// Newest-first ordering on `attribute`.
    pub fn order_desc(attribute: &str) -> Self {
        Self {
            method: "orderDesc",
            attribute: Some(attribute.to_string()),
            values: Vec::new(),
        }
    }

    /// Wire form sent as one `queries[]` parameter.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("query serializes to JSON")
    }
}
