//
//  stripe-kit
//  api/params/encode.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bracket-notation form encoding.
//!
//! Flattens a [`Params`] tree into `key=value` pairs joined by `&`:
//!
//! | Input | Output |
//! |-------|--------|
//! | `{"active": true}` | `active=true` |
//! | `{"metadata": {"a": "1"}}` | `metadata[a]=1` |
//! | `{"expand": ["data.price"]}` | `expand[0]=data.price` |
//! | `{"items": [{"price": "p"}]}` | `items[0][price]=p` |
//! | `{"metadata": {}}` | `metadata=` |
//!
//! Key segments and values are percent-encoded; only the RFC 3986 unreserved
//! characters (`A-Z a-z 0-9 - . _ ~`) pass through. A space becomes `%20`,
//! never `+`. The brackets the encoder adds are written literally.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

use super::{Params, Scalar, Value};

/// Characters percent-encoded inside a key segment or a value.
const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Errors raised while encoding request parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
    /// A value outside the string / number / boolean / list / map closure.
    ///
    /// `path` is the bracketed key path of the offending value, e.g.
    /// `default_price_data[unit_amount_decimal]`.
    #[error("Unsupported value kind `{kind}` at `{path}`")]
    UnsupportedValueKind {
        /// Key path of the value that failed to encode.
        path: String,
        /// The kind of value that was found.
        kind: &'static str,
    },

    /// A map key was the empty string.
    #[error("Empty parameter key under `{path}`")]
    EmptyKey {
        /// Key path of the map holding the empty key.
        path: String,
    },
}

/// Encodes parameters as an `application/x-www-form-urlencoded` string.
///
/// Keys are emitted in sorted order at every level. An empty map encodes
/// to the empty string.
///
/// # Errors
///
/// Returns [`EncodeError::UnsupportedValueKind`] for non-finite floats and
/// [`EncodeError::EmptyKey`] for empty keys. Nothing is returned partially.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use stripe_kit::api::params::{encode, Params};
///
/// let mut metadata = BTreeMap::new();
/// metadata.insert("order id".to_string(), "6735".to_string());
///
/// let params = Params::new().with("metadata", metadata);
/// assert_eq!(encode(&params).unwrap(), "metadata[order%20id]=6735");
/// ```
pub fn encode(params: &Params) -> Result<String, EncodeError> {
    let mut pairs = Vec::with_capacity(params.len());

    for (key, value) in params.iter() {
        let path = KeyPath::root(key)?;
        flatten(&path, value, &mut pairs)?;
    }

    Ok(pairs.join("&"))
}

/// Splits an encoded string back into decoded `(key, value)` pairs.
///
/// A `+` is read as a space, as in any form body. Invalid UTF-8 sequences
/// are replaced rather than rejected.
///
/// ```rust
/// use stripe_kit::api::params::decode_pairs;
///
/// let pairs = decode_pairs("metadata[note]=a%26b&active=true");
/// assert_eq!(pairs[0], ("metadata[note]".to_string(), "a&b".to_string()));
/// assert_eq!(pairs[1], ("active".to_string(), "true".to_string()));
/// ```
pub fn decode_pairs(encoded: &str) -> Vec<(String, String)> {
    encoded
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(component: &str) -> String {
    let component = component.replace('+', " ");
    percent_decode_str(&component)
        .decode_utf8_lossy()
        .into_owned()
}

fn escape(s: &str) -> String {
    utf8_percent_encode(s, FORM_ENCODE_SET).to_string()
}

/// A key path in both readable (`a[b][0]`) and wire (`a[b%20c][0]`) form.
struct KeyPath {
    raw: String,
    encoded: String,
}

impl KeyPath {
    fn root(key: &str) -> Result<Self, EncodeError> {
        if key.is_empty() {
            return Err(EncodeError::EmptyKey {
                path: String::new(),
            });
        }
        Ok(Self {
            raw: key.to_string(),
            encoded: escape(key),
        })
    }

    fn child(&self, key: &str) -> Result<Self, EncodeError> {
        if key.is_empty() {
            return Err(EncodeError::EmptyKey {
                path: self.raw.clone(),
            });
        }
        Ok(Self {
            raw: format!("{}[{}]", self.raw, key),
            encoded: format!("{}[{}]", self.encoded, escape(key)),
        })
    }

    fn index(&self, i: usize) -> Self {
        Self {
            raw: format!("{}[{}]", self.raw, i),
            encoded: format!("{}[{}]", self.encoded, i),
        }
    }
}

fn flatten(path: &KeyPath, value: &Value, out: &mut Vec<String>) -> Result<(), EncodeError> {
    match value {
        Value::Scalar(scalar) => {
            let text = scalar_text(path, scalar)?;
            out.push(format!("{}={}", path.encoded, escape(&text)));
        }
        // Empty containers are how Stripe unsets a field
        Value::List(items) if items.is_empty() => out.push(format!("{}=", path.encoded)),
        Value::Map(map) if map.is_empty() => out.push(format!("{}=", path.encoded)),
        Value::List(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten(&path.index(i), item, out)?;
            }
        }
        Value::Map(map) => {
            for (key, item) in map {
                flatten(&path.child(key)?, item, out)?;
            }
        }
    }
    Ok(())
}

fn scalar_text(path: &KeyPath, scalar: &Scalar) -> Result<String, EncodeError> {
    match scalar {
        Scalar::Float(x) if !x.is_finite() => Err(EncodeError::UnsupportedValueKind {
            path: path.raw.clone(),
            kind: "non-finite float",
        }),
        other => Ok(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use proptest::prelude::*;

    use super::*;

    fn metadata(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_params_encode_to_empty_string() {
        assert_eq!(encode(&Params::new()).unwrap(), "");
    }

    #[test]
    fn test_boolean_is_lowercase_literal() {
        let params = Params::new().with("active", true).with("shippable", false);
        assert_eq!(encode(&params).unwrap(), "active=true&shippable=false");
    }

    #[test]
    fn test_numbers() {
        let params = Params::new()
            .with("limit", 3i64)
            .with("balance", -500i64)
            .with("weight", 1.25);
        assert_eq!(
            encode(&params).unwrap(),
            "balance=-500&limit=3&weight=1.25"
        );
    }

    #[test]
    fn test_nested_map_uses_brackets() {
        let params = Params::new().with("metadata", metadata(&[("b", "2"), ("a", "1")]));
        assert_eq!(encode(&params).unwrap(), "metadata[a]=1&metadata[b]=2");
    }

    #[test]
    fn test_map_of_maps() {
        let recurring = Params::new().with("interval", "month").with("interval_count", 3i64);
        let price = Params::new()
            .with("currency", "usd")
            .with("unit_amount", 1500i64)
            .with("recurring", recurring);
        let params = Params::new().with("default_price_data", price);

        assert_eq!(
            encode(&params).unwrap(),
            "default_price_data[currency]=usd\
             &default_price_data[recurring][interval]=month\
             &default_price_data[recurring][interval_count]=3\
             &default_price_data[unit_amount]=1500"
        );
    }

    #[test]
    fn test_list_uses_indexes() {
        let params = Params::new().with("images", vec!["http://a", "http://b"]);
        assert_eq!(
            encode(&params).unwrap(),
            "images[0]=http%3A%2F%2Fa&images[1]=http%3A%2F%2Fb"
        );

        let decoded = decode_pairs(&encode(&params).unwrap());
        assert_eq!(
            decoded,
            vec![
                ("images[0]".to_string(), "http://a".to_string()),
                ("images[1]".to_string(), "http://b".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_of_maps() {
        let items = vec![
            Params::new().with("price", "price_1").with("quantity", 2i64),
            Params::new().with("price", "price_2"),
        ];
        let params = Params::new().with("items", items);
        assert_eq!(
            encode(&params).unwrap(),
            "items[0][price]=price_1&items[0][quantity]=2&items[1][price]=price_2"
        );
    }

    #[test]
    fn test_empty_containers_unset() {
        let params = Params::new()
            .with("metadata", BTreeMap::<String, String>::new())
            .with("images", Vec::<String>::new())
            .with("description", "");
        assert_eq!(encode(&params).unwrap(), "description=&images=&metadata=");
    }

    #[test]
    fn test_special_characters_are_percent_encoded() {
        let params = Params::new().with("name", "Tee & Mug = 2 ☕");
        let encoded = encode(&params).unwrap();
        assert_eq!(encoded, "name=Tee%20%26%20Mug%20%3D%202%20%E2%98%95");
        assert_eq!(
            decode_pairs(&encoded),
            vec![("name".to_string(), "Tee & Mug = 2 ☕".to_string())]
        );
    }

    #[test]
    fn test_keys_are_percent_encoded_per_segment() {
        let params = Params::new().with("metadata", metadata(&[("a&b", "x")]));
        assert_eq!(encode(&params).unwrap(), "metadata[a%26b]=x");
    }

    #[test]
    fn test_non_finite_float_is_rejected_with_path() {
        let dims = Params::new().with("height", 1.0).with("width", f64::NAN);
        let params = Params::new().with("package_dimensions", dims);

        let err = encode(&params).unwrap_err();
        assert_eq!(
            err,
            EncodeError::UnsupportedValueKind {
                path: "package_dimensions[width]".to_string(),
                kind: "non-finite float",
            }
        );
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let params = Params::new().with("metadata", metadata(&[("", "x")]));
        assert_eq!(
            encode(&params).unwrap_err(),
            EncodeError::EmptyKey {
                path: "metadata".to_string()
            }
        );
        assert!(encode(&Params::new().with("", "x")).is_err());
    }

    #[test]
    fn test_encode_does_not_mutate_input() {
        let params = Params::new().with("metadata", metadata(&[("a", "1")]));
        let before = params.clone();
        let _ = encode(&params).unwrap();
        assert_eq!(params, before);
    }

    #[test]
    fn test_decode_pairs_reads_plus_as_space() {
        assert_eq!(
            decode_pairs("q=name%3A%27shirt%27+AND+active%3A%27true%27"),
            vec![(
                "q".to_string(),
                "name:'shirt' AND active:'true'".to_string()
            )]
        );
    }

    fn key_strategy() -> impl Strategy<Value = String> {
        "\\PC{1,12}"
    }

    fn value_strategy() -> impl Strategy<Value = String> {
        "\\PC{0,24}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn test_scalar_map_roundtrip_ignores_insertion_order(
            entries in proptest::collection::hash_map(key_strategy(), value_strategy(), 0..8)
        ) {
            // HashMap iteration order is arbitrary; the encoding must not care
            let forward: Params = entries.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            let mut reversed: Vec<_> = entries.iter().collect();
            reversed.reverse();
            let backward: Params = reversed.into_iter().map(|(k, v)| (k.clone(), v.clone())).collect();

            let encoded = encode(&forward).unwrap();
            prop_assert_eq!(&encoded, &encode(&backward).unwrap());

            let decoded: HashMap<String, String> = decode_pairs(&encoded).into_iter().collect();
            prop_assert_eq!(decoded, entries);
        }

        #[test]
        fn test_metadata_values_roundtrip(
            key in key_strategy(),
            value in value_strategy(),
        ) {
            let mut map = BTreeMap::new();
            map.insert(key.clone(), value.clone());
            let params = Params::new().with("metadata", map);

            let decoded = decode_pairs(&encode(&params).unwrap());
            prop_assert_eq!(decoded, vec![(format!("metadata[{key}]"), value)]);
        }
    }
}
