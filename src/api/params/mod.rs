//
//  stripe-kit
//  api/params/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Parameters
//!
//! Stripe takes most request parameters as `application/x-www-form-urlencoded`
//! strings with bracket notation for nesting (`metadata[order_id]=6735`)
//! rather than JSON bodies. This module holds the value model those
//! parameters are built from and the encoder that flattens them.
//!
//! ## Value Model
//!
//! - [`Scalar`]: a string, integer, float or boolean leaf
//! - [`Value`]: a scalar, an ordered list of values, or a nested map
//! - [`Params`]: the top-level map handed to the encoder
//!
//! Maps are backed by a `BTreeMap`, so encoding is deterministic: keys are
//! always emitted in sorted order.
//!
//! ## Building Parameters
//!
//! ```rust
//! use stripe_kit::api::params::{encode, Params};
//!
//! let description: Option<String> = None;
//!
//! let params = Params::new()
//!     .with("name", "T-shirt")
//!     .with("active", true)
//!     .with_opt("description", description)
//!     .with("images", vec!["https://img.example/1.png"]);
//!
//! assert_eq!(
//!     encode(&params).unwrap(),
//!     "active=true&images[0]=https%3A%2F%2Fimg.example%2F1.png&name=T-shirt"
//! );
//! ```
//!
//! ## Absent vs Empty
//!
//! An optional input that is `None` is never inserted (see
//! [`Params::with_opt`]). To clear a field on Stripe's side, send an empty
//! value instead: an empty string (`metadata[key]=`) or an empty map or list
//! (`metadata=`). There is no null variant.

mod encode;

pub use encode::{decode_pairs, encode, EncodeError};

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A leaf parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Text, sent as-is (percent-encoded).
    String(String),
    /// Whole number, sent in decimal form.
    Integer(i64),
    /// Decimal number. Must be finite to be encodable.
    Float(f64),
    /// Sent as the literals `true` / `false`.
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
        }
    }
}

/// An encodable parameter value.
///
/// A closed recursive type: every value is a scalar, a list of values, or a
/// map from string keys to values.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A single leaf value.
    Scalar(Scalar),
    /// Encoded with indexed keys: `key[0]=a&key[1]=b`.
    List(Vec<Value>),
    /// Encoded with bracketed keys: `key[a]=1&key[b]=2`.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns a short name for this value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(Scalar::String(_)) => "string",
            Value::Scalar(Scalar::Integer(_)) => "integer",
            Value::Scalar(Scalar::Float(_)) => "float",
            Value::Scalar(Scalar::Bool(_)) => "boolean",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Converts a JSON value, tracking the key path for error reporting.
    fn from_json(json: serde_json::Value, path: &str) -> Result<Self, EncodeError> {
        use serde_json::Value as Json;

        match json {
            Json::Null => Err(EncodeError::UnsupportedValueKind {
                path: path.to_string(),
                kind: "null",
            }),
            Json::Bool(b) => Ok(Value::from(b)),
            Json::String(s) => Ok(Value::from(s)),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::from(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(Value::from(u))
                } else {
                    // serde_json numbers are always one of i64, u64 or f64
                    Ok(Value::from(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Json::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| Value::from_json(item, &format!("{path}[{i}]")))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            Json::Object(object) => object
                .into_iter()
                .map(|(key, item)| {
                    let child = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{path}[{key}]")
                    };
                    Value::from_json(item, &child).map(|v| (key, v))
                })
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(Value::Map),
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(Scalar::String(s))
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Scalar(Scalar::String(s.clone()))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Scalar(Scalar::Integer(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Scalar(Scalar::Integer(i64::from(i)))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Scalar(Scalar::Integer(i64::from(i)))
    }
}

impl From<u64> for Value {
    /// Values past `i64::MAX` keep their exact digits as a string.
    fn from(i: u64) -> Self {
        match i64::try_from(i) {
            Ok(i) => Value::Scalar(Scalar::Integer(i)),
            Err(_) => Value::Scalar(Scalar::String(i.to_string())),
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Scalar(Scalar::Float(x))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(Scalar::Bool(b))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Value>> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Value::List(items.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(map: BTreeMap<String, T>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Value>> From<HashMap<String, T>> for Value {
    fn from(map: HashMap<String, T>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<Params> for Value {
    fn from(params: Params) -> Self {
        Value::Map(params.0)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = EncodeError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        Value::from_json(json, "")
    }
}

/// The top-level parameter map for one request.
///
/// Built by route methods, one key per *present* input. Keys must already be
/// the wire-level snake_case names Stripe expects; no case conversion is
/// applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(BTreeMap<String, Value>);

impl Params {
    /// Creates an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, replacing any previous value under the same key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds a parameter only when `value` is `Some`.
    ///
    /// This is how absent optional inputs stay out of the encoded request.
    pub fn with_opt<V: Into<Value>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.insert_opt(key, value);
        self
    }

    /// Inserts a parameter in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Inserts a parameter in place only when `value` is `Some`.
    pub fn insert_opt<V: Into<Value>>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Merges every entry of `other` into this map. Entries in `other` win.
    pub fn merge(mut self, other: Params) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates entries in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl TryFrom<serde_json::Value> for Params {
    type Error = EncodeError;

    /// Converts a free-form JSON object, e.g. a list filter read from the
    /// command line. Non-object roots and `null` leaves are rejected.
    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match Value::try_from(json)? {
            Value::Map(map) => Ok(Self(map)),
            other => Err(EncodeError::UnsupportedValueKind {
                path: String::new(),
                kind: other.kind(),
            }),
        }
    }
}

/// Typed request parameters that know how to lower themselves into
/// [`Params`].
///
/// Implementors insert a key only for inputs that are present.
pub trait ToParams {
    fn to_params(&self) -> Params;
}

impl ToParams for Params {
    fn to_params(&self) -> Params {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_with_opt_skips_none() {
        let params = Params::new()
            .with("name", "Widget")
            .with_opt("description", None::<String>)
            .with_opt("active", Some(false));

        assert_eq!(params.len(), 2);
        assert!(!params.contains_key("description"));
        assert_eq!(params.get("active"), Some(&Value::from(false)));
    }

    #[test]
    fn test_u64_past_i64_max_keeps_digits() {
        assert_eq!(Value::from(42u64), Value::Scalar(Scalar::Integer(42)));
        assert_eq!(
            Value::from(u64::MAX),
            Value::Scalar(Scalar::String("18446744073709551615".to_string()))
        );
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::Bool(true).to_string(), "true");
        assert_eq!(Scalar::Integer(-7).to_string(), "-7");
        assert_eq!(Scalar::Float(10.0).to_string(), "10");
        assert_eq!(Scalar::Float(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_params_from_json_object() {
        let params = Params::try_from(json!({
            "limit": 3,
            "active": true,
            "created": {"gte": 1700000000},
            "ids": ["prod_1", "prod_2"]
        }))
        .unwrap();

        assert_eq!(params.get("limit"), Some(&Value::from(3i64)));
        assert_eq!(
            params.get("ids"),
            Some(&Value::from(vec!["prod_1", "prod_2"]))
        );
        assert!(matches!(params.get("created"), Some(Value::Map(_))));
    }

    #[test]
    fn test_params_from_json_rejects_null_with_path() {
        let err = Params::try_from(json!({"metadata": {"order": null}})).unwrap_err();
        match err {
            EncodeError::UnsupportedValueKind { path, kind } => {
                assert_eq!(path, "metadata[order]");
                assert_eq!(kind, "null");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_params_from_json_rejects_non_object_root() {
        let err = Params::try_from(json!(["a", "b"])).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::UnsupportedValueKind { kind: "list", .. }
        ));
    }

    #[test]
    fn test_merge_prefers_other() {
        let merged = Params::new()
            .with("limit", 10i64)
            .with("active", true)
            .merge(Params::new().with("limit", 3i64));

        assert_eq!(merged.get("limit"), Some(&Value::from(3i64)));
        assert_eq!(merged.get("active"), Some(&Value::from(true)));
    }
}
