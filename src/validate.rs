//! Declarative request-body validation.
//!
//! Each resource declares a static table of [`FieldRule`]s next to its
//! routes, so the constraint set is visible at the boundary where untyped
//! JSON is admitted into the typed model. Failures accumulate into the
//! itemized list the API has always returned; nothing reaches storage
//! until the whole table passes.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;

/// Type constraint for one body field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Int,
    Float,
    Text,
    Date,
}

impl FieldKind {
    fn accepts(self, v: &Value) -> bool {
        match self {
            FieldKind::Int => v.as_i64().is_some(),
            FieldKind::Float => v.is_number(),
            FieldKind::Text => v.is_string(),
            FieldKind::Date => v.as_str().map(|s| parse_date(s).is_some()).unwrap_or(false),
        }
    }
}

/// One required body field and its type constraint.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub path: &'static str,
    pub kind: FieldKind,
}

impl FieldRule {
    pub const fn new(path: &'static str, kind: FieldKind) -> Self {
        FieldRule { path, kind }
    }
}

/// A single failed field, in the shape clients already parse:
/// `{"type": "field", "value": ..., "msg": "Invalid value", "path": ..., "location": "body"}`.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub msg: &'static str,
    pub path: &'static str,
    pub location: &'static str,
}

impl FieldError {
    pub fn missing(path: &'static str) -> Self {
        FieldError {
            kind: "field",
            value: None,
            msg: "Invalid value",
            path,
            location: "body",
        }
    }

    pub fn invalid(path: &'static str, value: Value) -> Self {
        FieldError {
            value: Some(value),
            ..FieldError::missing(path)
        }
    }
}

/// Accumulated failures plus the wrapper key the resource reports them
/// under. Category and Flag respond `{"error": [...]}`, every other
/// resource `{"errors": [...]}`; both shapes are load-bearing for clients.
#[derive(Debug)]
pub struct ValidationErrors {
    pub key: &'static str,
    pub items: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn to_body(&self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert(
            self.key.to_string(),
            serde_json::to_value(&self.items).unwrap_or_default(),
        );
        Value::Object(map)
    }
}

/// Check every rule against the raw body, then decode it into the typed
/// input. A non-object body fails every rule. Fields outside the rule set
/// are decoded as-is; if one of those defeats the decode, that is a
/// storage-class failure, not a validation error.
pub fn body<T: DeserializeOwned>(
    raw: &Value,
    key: &'static str,
    rules: &[FieldRule],
) -> Result<T, AppError> {
    let mut items = Vec::new();
    for rule in rules {
        match raw.get(rule.path) {
            None | Some(Value::Null) => items.push(FieldError::missing(rule.path)),
            Some(v) if !rule.kind.accepts(v) => items.push(FieldError::invalid(rule.path, v.clone())),
            Some(_) => {}
        }
    }
    if !items.is_empty() {
        return Err(AppError::Validation(ValidationErrors { key, items }));
    }
    Ok(serde_json::from_value(raw.clone())?)
}

/// Parse a path id for update/delete. A non-numeric id here surfaces as a
/// storage-class failure (500), unlike get-by-id where it reads as not-found.
pub fn route_id(raw: &str) -> Result<i32, AppError> {
    raw.parse::<i32>()
        .map_err(|_| AppError::InvalidId(raw.to_string()))
}

/// Dates arrive as strings in either ISO or US order.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(s, "%m/%d/%Y").ok())
}

/// serde adapter for input fields validated by [`FieldKind::Date`].
pub mod loose_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_date(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized date '{s}'")))
    }
}
