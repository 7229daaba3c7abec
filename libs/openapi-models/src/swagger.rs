//! Swagger 2.0 root document
//!
//! Every section other than short scalar lists is `Arc`-wrapped: cloning a
//! [`Swagger`] is shallow and the clone shares those sections with the
//! original until one is replaced.

use crate::error::{Error, Result};
use crate::parameter::{InlineParameter, Parameter};
use crate::path_item::PathItem;
use crate::serde_util::is_empty_list;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Root Swagger 2.0 document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swagger {
    /// Specification version - always "2.0"
    #[serde(default = "default_swagger_version")]
    pub swagger: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<Arc<Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Arc<Paths>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub definitions: Option<Arc<BTreeMap<String, Value>>>,

    /// Shared parameter definitions, the target of `#/parameters/<name>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Arc<BTreeMap<String, InlineParameter>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub responses: Option<Arc<BTreeMap<String, Value>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_definitions: Option<Arc<BTreeMap<String, Value>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Arc<Vec<BTreeMap<String, Vec<String>>>>>,

    #[serde(default, skip_serializing_if = "is_empty_list")]
    pub tags: Arc<Vec<Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<Arc<Value>>,

    #[serde(flatten)]
    pub extensions: Arc<BTreeMap<String, Value>>,
}

fn default_swagger_version() -> String {
    "2.0".to_string()
}

impl Default for Swagger {
    fn default() -> Self {
        Self {
            swagger: default_swagger_version(),
            info: None,
            host: None,
            base_path: None,
            schemes: Vec::new(),
            consumes: Vec::new(),
            produces: Vec::new(),
            paths: None,
            definitions: None,
            parameters: None,
            responses: None,
            security_definitions: None,
            security: None,
            tags: Arc::default(),
            external_docs: None,
            extensions: Arc::default(),
        }
    }
}

impl Swagger {
    /// Create a document holding the given paths
    pub fn with_paths(paths: Paths) -> Self {
        Self {
            paths: Some(Arc::new(paths)),
            ..Default::default()
        }
    }

    /// Parse from JSON Value
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::ExpectedObject);
        }
        serde_json::from_value(value).map_err(Error::from)
    }

    /// Convert to JSON Value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Error::from)
    }

    /// Get the path item for a path string
    pub fn path_item(&self, path: &str) -> Option<&Arc<PathItem>> {
        self.paths.as_ref().and_then(|p| p.paths.get(path))
    }

    /// Look up a shared parameter definition by name
    pub fn shared_parameter(&self, name: &str) -> Option<&InlineParameter> {
        self.parameters.as_ref().and_then(|p| p.get(name))
    }

    /// Every parameter in the document: operations first, then path-level, per path
    pub fn all_parameters(&self) -> impl Iterator<Item = &Parameter> + '_ {
        self.paths
            .iter()
            .flat_map(|p| p.paths.values())
            .flat_map(|item| item.all_parameters())
    }
}

/// Path collection keyed by path template (e.g. `/pets/{id}`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Paths {
    pub paths: BTreeMap<String, Arc<PathItem>>,
}

impl Paths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a path item, replacing any previous one for the same path
    pub fn insert(&mut self, path: impl Into<String>, item: PathItem) {
        self.paths.insert(path.into(), Arc::new(item));
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FromIterator<(String, PathItem)> for Paths {
    fn from_iter<I: IntoIterator<Item = (String, PathItem)>>(iter: I) -> Self {
        Self {
            paths: iter
                .into_iter()
                .map(|(path, item)| (path, Arc::new(item)))
                .collect(),
        }
    }
}
