//! Canonical encoding and content-derived naming of inline parameters
//!
//! The canonical key of a parameter is its compact JSON serialization with the
//! members of every object sorted by key. Two parameters share a definition
//! iff their keys are byte-identical.
//!
//! Names are derived from the key as:
//!
//! ```text
//! <name or "param"> "-" base64url(SHA-224(key)[..6])
//! ```
//!
//! Six digest bytes encode to exactly eight base64 characters, so no padding
//! is ever emitted.

use crate::error::{Error, Result};
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use oaspec_models::{InlineParameter, Reference};
use serde_json::{Map, Value};
use sha2::{Digest, Sha224};
use std::fmt;

/// Prefix of every reference emitted for a shared parameter
pub const PARAMETERS_REF_PREFIX: &str = "#/parameters/";

/// Base name used when a parameter has an empty `name`
pub const FALLBACK_PARAMETER_NAME: &str = "param";

/// Number of leading digest bytes used in a generated name
pub const DIGEST_PREFIX_BYTES: usize = 6;

/// Deterministic byte encoding of an inline parameter
///
/// Ordered by raw bytes, which is the order names are assigned in.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey(Vec<u8>);

impl CanonicalKey {
    /// Compute the canonical key of a parameter
    pub fn of(parameter: &InlineParameter) -> Result<Self> {
        ensure_no_shadowed_members(parameter)?;

        let value = serde_json::to_value(parameter).map_err(|e| Error::Canonicalization {
            parameter: parameter.name.clone(),
            reason: e.to_string(),
        })?;

        let bytes = serde_json::to_vec(&sorted(value)).map_err(|e| Error::Canonicalization {
            parameter: parameter.name.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The key as text; canonical keys are always valid UTF-8 JSON
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CanonicalKey").field(&self.as_str()).finish()
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rebuild a JSON value with object members inserted in sorted key order
///
/// Insertion order is what gets serialized when `serde_json` keeps object
/// order, and sorted order is what gets serialized when it doesn't, so the
/// output is identical under both configurations.
fn sorted(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            let mut out = Map::with_capacity(entries.len());
            for (k, v) in entries {
                out.insert(k, sorted(v));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sorted).collect()),
        other => other,
    }
}

/// An extension named like a modelled member is flattened into the same JSON
/// object as that member; one of the two silently overwrites the other, so
/// the serialized form would not describe the parameter.
fn ensure_no_shadowed_members(parameter: &InlineParameter) -> Result<()> {
    match InlineParameter::MEMBERS
        .iter()
        .find(|member| parameter.extensions.contains_key(**member))
    {
        Some(member) => Err(Error::Canonicalization {
            parameter: parameter.name.clone(),
            reason: format!("extension '{}' shadows a parameter member", member),
        }),
        None => Ok(()),
    }
}

/// Eight URL-safe base64 characters derived from the SHA-224 digest of a key
pub fn short_digest(key: &CanonicalKey) -> String {
    let hash = Sha224::digest(key.as_bytes());
    URL_SAFE.encode(&hash[..DIGEST_PREFIX_BYTES])
}

/// The un-hashed name a shared definition is derived from
pub fn base_name(parameter: &InlineParameter) -> &str {
    if parameter.name.is_empty() {
        FALLBACK_PARAMETER_NAME
    } else {
        &parameter.name
    }
}

/// Bare reference to a shared parameter definition
pub fn reference_for(name: &str) -> Reference {
    Reference::new(format!("{}{}", PARAMETERS_REF_PREFIX, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_is_sorted_compact_json() {
        let p = InlineParameter::new("limit", "query", "integer");
        let key = CanonicalKey::of(&p).unwrap();
        assert_eq!(
            key.as_str(),
            r#"{"in":"query","name":"limit","type":"integer"}"#
        );
    }

    #[test]
    fn key_ignores_member_order_in_nested_values() {
        let mut a = InlineParameter::body("body", json!({"type": "object", "required": ["id"]}));
        a.extensions.insert("x-b".into(), json!(1));
        a.extensions.insert("x-a".into(), json!({"z": 1, "y": [{"k": 2, "j": 3}]}));

        let mut schema = Map::new();
        schema.insert("required".into(), json!(["id"]));
        schema.insert("type".into(), json!("object"));
        let mut b = InlineParameter::body("body", Value::Object(schema));
        b.extensions.insert("x-a".into(), json!({"y": [{"j": 3, "k": 2}], "z": 1}));
        b.extensions.insert("x-b".into(), json!(1));

        assert_eq!(CanonicalKey::of(&a).unwrap(), CanonicalKey::of(&b).unwrap());
    }

    #[test]
    fn key_distinguishes_any_field() {
        let a = InlineParameter::new("limit", "query", "integer");
        let mut b = a.clone();
        b.required = Some(false);
        assert_ne!(CanonicalKey::of(&a).unwrap(), CanonicalKey::of(&b).unwrap());

        let mut c = a.clone();
        c.location = "header".into();
        assert_ne!(CanonicalKey::of(&a).unwrap(), CanonicalKey::of(&c).unwrap());
    }

    #[test]
    fn extension_shadowing_a_member_fails() {
        let mut p = InlineParameter::new("ratio", "query", "number");
        p.extensions.insert("in".into(), json!("header"));
        let err = CanonicalKey::of(&p).unwrap_err();
        assert!(matches!(err, Error::Canonicalization { ref parameter, .. } if parameter == "ratio"));

        let mut p = InlineParameter::new("ratio", "query", "number");
        p.extensions.insert("multipleOf".into(), json!(2));
        assert!(CanonicalKey::of(&p).is_err());
    }

    #[test]
    fn key_keeps_integer_bounds_exact() {
        let p: InlineParameter = serde_json::from_value(json!({
            "name": "limit",
            "in": "query",
            "type": "integer",
            "maximum": 500,
            "minimum": 1
        }))
        .unwrap();
        assert_eq!(
            CanonicalKey::of(&p).unwrap().as_str(),
            r#"{"in":"query","maximum":500,"minimum":1,"name":"limit","type":"integer"}"#
        );
    }

    #[test]
    fn short_digest_is_eight_url_safe_chars() {
        let key = CanonicalKey::of(&InlineParameter::new("limit", "query", "integer")).unwrap();
        let digest = short_digest(&key);
        assert_eq!(digest, "1JAuMIHu");

        let key = CanonicalKey::of(&InlineParameter::new("offset", "query", "integer")).unwrap();
        let digest = short_digest(&key);
        assert_eq!(digest.len(), 8);
        assert!(digest
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn base_name_falls_back_to_param() {
        assert_eq!(base_name(&InlineParameter::new("", "query", "string")), "param");
        assert_eq!(base_name(&InlineParameter::new("id", "path", "string")), "id");
    }

    #[test]
    fn reference_format() {
        assert_eq!(
            reference_for("limit-1JAuMIHu").ref_path,
            "#/parameters/limit-1JAuMIHu"
        );
    }
}
