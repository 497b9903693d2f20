//! Document Query Builder
//!
//! Appwrite expects each query as a JSON object passed in a `queries[]`
//! parameter, e.g. `{"method":"limit","values":[15]}`. Keys are written in
//! sorted order so the serialized form does not depend on map ordering.

use serde_json::{Value, json};

/// A single list-documents query.
#[derive(Clone, Debug, PartialEq)]
pub enum Query {
    OrderDesc(String),
    OrderAsc(String),
    Limit(u32),
    Offset(u32),
    Equal(String, Vec<Value>),
}

impl Query {
    pub fn order_desc(attribute: impl Into<String>) -> Self {
        Query::OrderDesc(attribute.into())
    }

    pub fn order_asc(attribute: impl Into<String>) -> Self {
        Query::OrderAsc(attribute.into())
    }

    pub fn limit(limit: u32) -> Self {
        Query::Limit(limit)
    }

    pub fn offset(offset: u32) -> Self {
        Query::Offset(offset)
    }

    pub fn equal<V: Into<Value>>(attribute: impl Into<String>, values: Vec<V>) -> Self {
        Query::Equal(
            attribute.into(),
            values.into_iter().map(Into::into).collect(),
        )
    }

    /// The JSON value Appwrite parses for this query.
    pub fn to_value(&self) -> Value {
        match self {
            Query::OrderDesc(attribute) => json!({ "attribute": attribute, "method": "orderDesc" }),
            Query::OrderAsc(attribute) => json!({ "attribute": attribute, "method": "orderAsc" }),
            Query::Limit(limit) => json!({ "method": "limit", "values": [limit] }),
            Query::Offset(offset) => json!({ "method": "offset", "values": [offset] }),
            Query::Equal(attribute, values) => {
                json!({ "attribute": attribute, "method": "equal", "values": values })
            }
        }
    }

    /// The serialized form sent as a `queries[]` parameter.
    pub fn to_param(&self) -> String {
        self.to_value().to_string()
    }
}
