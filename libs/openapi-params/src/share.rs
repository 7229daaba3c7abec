//! One-call sharing: collect, rewrite and merge the shared table
//!
//! The merge target is the document's top-level `parameters` section, which
//! is what every emitted `#/parameters/<name>` reference resolves against.

use crate::collector::collect_shared_parameters;
use crate::error::{Error, Result};
use crate::rewriter::replace_shared_parameters;
use oaspec_models::{InlineParameter, Swagger};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Share every distinct inline parameter of a document
///
/// Runs the collector, rewrites the document against its mapping, and merges
/// the shared table into `parameters`. A document with no inline parameters
/// is returned as the same `Arc`.
pub fn share_parameters(swagger: &Arc<Swagger>) -> Result<Arc<Swagger>> {
    let shared = collect_shared_parameters(swagger)?;
    if shared.is_empty() {
        return Ok(Arc::clone(swagger));
    }

    let rewritten = replace_shared_parameters(&shared.names_by_key, swagger)?;
    merge_shared_parameters(&rewritten, shared.parameters)
}

/// Merge a shared table into the document's `parameters` section
///
/// Existing entries are kept. An incoming name that already exists must carry
/// an identical definition.
pub fn merge_shared_parameters(
    swagger: &Arc<Swagger>,
    table: BTreeMap<String, InlineParameter>,
) -> Result<Arc<Swagger>> {
    if table.is_empty() {
        return Ok(Arc::clone(swagger));
    }

    let mut merged = swagger.parameters.as_deref().cloned().unwrap_or_default();
    for (name, parameter) in table {
        match merged.get(&name) {
            Some(existing) if *existing != parameter => {
                return Err(Error::ConflictingSharedParameter { name });
            }
            Some(_) => {}
            None => {
                merged.insert(name, parameter);
            }
        }
    }

    let mut out = Swagger::clone(swagger);
    out.parameters = Some(Arc::new(merged));
    Ok(Arc::new(out))
}
