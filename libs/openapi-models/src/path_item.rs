//! Path items, operations and the fixed set of HTTP method slots

use crate::parameter::Parameter;
use crate::serde_util::{is_empty_list, is_empty_map};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// HTTP methods that have an operation slot on a [`PathItem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
}

impl Method {
    /// All slots, in the order they are visited
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Put,
        Method::Post,
        Method::Delete,
        Method::Options,
        Method::Head,
        Method::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Put => "put",
            Method::Post => "post",
            Method::Delete => "delete",
            Method::Options => "options",
            Method::Head => "head",
            Method::Patch => "patch",
        }
    }
}

/// Operations and shared parameters available on a single path
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Arc<Operation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Arc<Operation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Arc<Operation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Arc<Operation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Arc<Operation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Arc<Operation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Arc<Operation>>,

    /// Parameters applicable to every operation on this path
    #[serde(default, skip_serializing_if = "is_empty_list")]
    pub parameters: Arc<Vec<Parameter>>,

    #[serde(flatten)]
    pub extensions: Arc<BTreeMap<String, Value>>,
}

impl PathItem {
    /// Get the operation in the given slot
    pub fn operation(&self, method: Method) -> Option<&Arc<Operation>> {
        match method {
            Method::Get => self.get.as_ref(),
            Method::Put => self.put.as_ref(),
            Method::Post => self.post.as_ref(),
            Method::Delete => self.delete.as_ref(),
            Method::Options => self.options.as_ref(),
            Method::Head => self.head.as_ref(),
            Method::Patch => self.patch.as_ref(),
        }
    }

    /// Mutable access to the given operation slot
    pub fn operation_slot_mut(&mut self, method: Method) -> &mut Option<Arc<Operation>> {
        match method {
            Method::Get => &mut self.get,
            Method::Put => &mut self.put,
            Method::Post => &mut self.post,
            Method::Delete => &mut self.delete,
            Method::Options => &mut self.options,
            Method::Head => &mut self.head,
            Method::Patch => &mut self.patch,
        }
    }

    /// Set (or clear) the operation in the given slot
    pub fn set_operation(&mut self, method: Method, operation: Option<Operation>) {
        *self.operation_slot_mut(method) = operation.map(Arc::new);
    }

    /// Present operations in [`Method::ALL`] order; absent slots are skipped
    pub fn operations(&self) -> impl Iterator<Item = (Method, &Arc<Operation>)> + '_ {
        Method::ALL
            .into_iter()
            .filter_map(move |method| self.operation(method).map(|op| (method, op)))
    }

    /// All parameters of this path item: every operation's, then the path-level list
    pub fn all_parameters(&self) -> impl Iterator<Item = &Parameter> + '_ {
        self.operations()
            .flat_map(|(_, op)| op.parameters.iter())
            .chain(self.parameters.iter())
    }
}

/// A single API operation on a path
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default, skip_serializing_if = "is_empty_list")]
    pub tags: Arc<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<Arc<Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    /// Responses keyed by status code (or `default`)
    #[serde(default, skip_serializing_if = "is_empty_map")]
    pub responses: Arc<BTreeMap<String, Value>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Arc<Vec<BTreeMap<String, Vec<String>>>>>,

    #[serde(flatten)]
    pub extensions: Arc<BTreeMap<String, Value>>,
}

impl Operation {
    /// Create an operation with the given id and parameters
    pub fn new(operation_id: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        Self {
            operation_id: Some(operation_id.into()),
            parameters,
            ..Default::default()
        }
    }
}
