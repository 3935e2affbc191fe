use serde_json::Value;

use crate::error::{Error, Result};

/// A single request-parameter value: plain text, or a structured JSON value
/// that is canonicalized before signing and transmission.
#[derive(Debug, Clone)]
pub enum ParamValue {
    Text(String),
    Json(Value),
}

impl ParamValue {
    /// Renders the canonical wire form of the value.
    ///
    /// JSON values serialize compactly with no inserted whitespace: the
    /// signature is computed over these exact bytes, and the transport must
    /// send the identical rendering.
    pub fn render(&self) -> Result<String> {
        match self {
            ParamValue::Text(s) => Ok(s.clone()),
            ParamValue::Json(v) => serde_json::to_string(v).map_err(Error::Encoding),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Text(n.to_string())
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Text(b.to_string())
    }
}

impl From<Value> for ParamValue {
    fn from(v: Value) -> Self {
        ParamValue::Json(v)
    }
}

/// Request parameters in insertion order.
///
/// Ordering here only affects how the transport serializes the query or
/// form body; the signer re-sorts its own copy of the pairs.
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    entries: Vec<(String, ParamValue)>,
}

impl RequestParams {
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends a parameter, builder style.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Renders every value into the `(key, value)` string pairs handed to
    /// the transport, in insertion order.
    pub fn rendered_pairs(&self) -> Result<Vec<(String, String)>> {
        self.entries
            .iter()
            .map(|(k, v)| Ok((k.clone(), v.render()?)))
            .collect()
    }
}
