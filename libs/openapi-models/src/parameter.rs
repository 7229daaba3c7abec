//! Request parameter model
//!
//! A parameter is either a bare `$ref` pointer to a shared definition or a
//! full inline definition. Never both.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// A single request input of an operation or path item
///
/// Deserialization tries [`Parameter::Ref`] first, so any object carrying a
/// `$ref` member becomes a reference and its sibling members are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Parameter {
    Ref(Reference),
    Inline(Box<InlineParameter>),
}

impl Parameter {
    pub fn reference(ref_path: impl Into<String>) -> Self {
        Parameter::Ref(Reference::new(ref_path))
    }

    pub fn inline(parameter: InlineParameter) -> Self {
        Parameter::Inline(Box::new(parameter))
    }

    pub fn is_ref(&self) -> bool {
        matches!(self, Parameter::Ref(_))
    }

    pub fn as_inline(&self) -> Option<&InlineParameter> {
        match self {
            Parameter::Inline(p) => Some(p),
            Parameter::Ref(_) => None,
        }
    }

    pub fn as_ref_path(&self) -> Option<&str> {
        match self {
            Parameter::Ref(r) => Some(&r.ref_path),
            Parameter::Inline(_) => None,
        }
    }
}

impl From<InlineParameter> for Parameter {
    fn from(parameter: InlineParameter) -> Self {
        Parameter::inline(parameter)
    }
}

impl From<Reference> for Parameter {
    fn from(reference: Reference) -> Self {
        Parameter::Ref(reference)
    }
}

/// JSON Reference to a named definition (e.g. `#/parameters/limit-AbCdEfGh`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "$ref")]
    pub ref_path: String,
}

impl Reference {
    pub fn new(ref_path: impl Into<String>) -> Self {
        Self {
            ref_path: ref_path.into(),
        }
    }
}

/// Full parameter definition
///
/// Field order here is the order of the serialized form. Members not modelled
/// explicitly (vendor `x-` extensions, unknown keys) are kept in `extensions`.
/// Numeric constraints keep the document's own JSON number, so `500` is
/// written back as `500` and not `500.0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineParameter {
    /// Name of the parameter; may be empty in malformed documents
    #[serde(default)]
    pub name: String,

    /// Location of the parameter (query | header | path | formData | body)
    #[serde(rename = "in", default)]
    pub location: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Schema of a `body` parameter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_empty_value: Option<bool>,

    /// Item schema when `type` is `array`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Value>,

    /// csv | ssv | tsv | pipes | multi
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<Number>,

    /// Vendor extensions and unmodelled members
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

impl InlineParameter {
    /// Serialized names of the explicitly modelled members
    pub const MEMBERS: &'static [&'static str] = &[
        "name",
        "in",
        "description",
        "required",
        "schema",
        "type",
        "format",
        "allowEmptyValue",
        "items",
        "collectionFormat",
        "default",
        "maximum",
        "exclusiveMaximum",
        "minimum",
        "exclusiveMinimum",
        "maxLength",
        "minLength",
        "pattern",
        "maxItems",
        "minItems",
        "uniqueItems",
        "enum",
        "multipleOf",
    ];

    /// Create a parameter with the given name, location and primitive type
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        type_: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            type_: Some(type_.into()),
            ..Default::default()
        }
    }

    /// Create a `body` parameter carrying a schema
    pub fn body(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            location: "body".to_string(),
            schema: Some(schema),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_reference() {
        let p: Parameter =
            serde_json::from_value(json!({"$ref": "#/parameters/limit-abcdefgh"})).unwrap();
        assert!(p.is_ref());
        assert_eq!(p.as_ref_path(), Some("#/parameters/limit-abcdefgh"));
    }

    #[test]
    fn reference_wins_over_sibling_members() {
        let p: Parameter = serde_json::from_value(json!({
            "$ref": "#/parameters/limit",
            "name": "ignored",
            "in": "query"
        }))
        .unwrap();
        assert_eq!(p, Parameter::reference("#/parameters/limit"));
    }

    #[test]
    fn deserializes_inline_with_extensions() {
        let p: Parameter = serde_json::from_value(json!({
            "name": "limit",
            "in": "query",
            "type": "integer",
            "maximum": 500,
            "x-go-name": "Limit"
        }))
        .unwrap();

        let inline = p.as_inline().unwrap();
        assert_eq!(inline.name, "limit");
        assert_eq!(inline.location, "query");
        assert_eq!(inline.type_.as_deref(), Some("integer"));
        assert_eq!(inline.maximum, Some(Number::from(500)));
        assert_eq!(inline.extensions.get("x-go-name"), Some(&json!("Limit")));
    }

    #[test]
    fn serializes_inline_without_absent_fields() {
        let p = Parameter::inline(InlineParameter::new("offset", "query", "integer"));
        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(
            value,
            json!({"name": "offset", "in": "query", "type": "integer"})
        );
    }

    #[test]
    fn body_parameter_keeps_schema() {
        let p = InlineParameter::body("body", json!({"$ref": "#/definitions/Pet"}));
        assert_eq!(p.location, "body");
        assert!(p.required.is_none());
        let value = serde_json::to_value(Parameter::from(p)).unwrap();
        assert_eq!(value["schema"]["$ref"], "#/definitions/Pet");
    }

    #[test]
    fn numeric_constraints_keep_their_json_form() {
        let value = json!({
            "name": "ratio",
            "in": "query",
            "type": "number",
            "maximum": 500,
            "minimum": 0.5,
            "multipleOf": 0.25
        });
        let p: Parameter = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&p).unwrap(), value);
        assert_eq!(
            serde_json::to_string(&p).unwrap(),
            r#"{"name":"ratio","in":"query","type":"number","maximum":500,"minimum":0.5,"multipleOf":0.25}"#
        );
    }

    #[test]
    fn members_cover_every_serialized_field() {
        let p = InlineParameter {
            description: Some(String::new()),
            required: Some(true),
            schema: Some(json!({})),
            type_: Some(String::new()),
            format: Some(String::new()),
            allow_empty_value: Some(true),
            items: Some(json!({})),
            collection_format: Some(String::new()),
            default: Some(json!(1)),
            maximum: Some(Number::from(1)),
            exclusive_maximum: Some(true),
            minimum: Some(Number::from(1)),
            exclusive_minimum: Some(true),
            max_length: Some(1),
            min_length: Some(1),
            pattern: Some(String::new()),
            max_items: Some(1),
            min_items: Some(1),
            unique_items: Some(true),
            enum_values: Some(vec![]),
            multiple_of: Some(Number::from(1)),
            ..Default::default()
        };
        let value = serde_json::to_value(&p).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        let mut members = InlineParameter::MEMBERS.to_vec();
        keys.sort_unstable();
        members.sort_unstable();
        assert_eq!(keys, members);
    }
}
