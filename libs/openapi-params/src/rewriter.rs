//! Reference rewriting with structural sharing
//!
//! Every rewrite step returns `Option<new value>`: `None` means "unchanged,
//! keep the input", `Some` carries a freshly built replacement. Containers are
//! copied only when a step below them returned `Some`, so every untouched
//! path item and operation in the output is the same `Arc` as in the input,
//! and the input document itself is never mutated. Copying a container is
//! shallow: its `Arc`-held members (responses, extensions, tags, info and so
//! on) stay shared with the input.

use crate::canonical::{reference_for, CanonicalKey};
use crate::collector::NamesByKey;
use crate::error::Result;
use oaspec_models::{Operation, Parameter, PathItem, Paths, Swagger};
use std::sync::Arc;

/// Replace inline parameters that have a shared name with references to it
///
/// Returns the input `Arc` itself when nothing needed replacing, including
/// when the document has no paths. Reference parameters are never touched,
/// so rewriting an already rewritten document is a no-op.
pub fn replace_shared_parameters(
    names_by_key: &NamesByKey,
    swagger: &Arc<Swagger>,
) -> Result<Arc<Swagger>> {
    let mut rewriter = Rewriter::new(names_by_key);
    let rewritten = rewriter.rewrite_document(swagger)?;

    tracing::debug!(
        "Replaced {} parameters with shared references across {} paths",
        rewriter.replaced,
        rewriter.paths_changed
    );

    Ok(rewritten.unwrap_or_else(|| Arc::clone(swagger)))
}

/// Like [`replace_shared_parameters`], passing an absent document through
pub fn replace_shared_parameters_opt(
    names_by_key: &NamesByKey,
    swagger: Option<&Arc<Swagger>>,
) -> Result<Option<Arc<Swagger>>> {
    swagger
        .map(|sp| replace_shared_parameters(names_by_key, sp))
        .transpose()
}

struct Rewriter<'a> {
    names_by_key: &'a NamesByKey,
    replaced: usize,
    paths_changed: usize,
}

impl<'a> Rewriter<'a> {
    fn new(names_by_key: &'a NamesByKey) -> Self {
        Self {
            names_by_key,
            replaced: 0,
            paths_changed: 0,
        }
    }

    fn rewrite_document(&mut self, swagger: &Swagger) -> Result<Option<Arc<Swagger>>> {
        let Some(paths) = swagger.paths.as_ref() else {
            return Ok(None);
        };

        // Copied once, on the first changed path item; shares every other item.
        let mut new_paths: Option<Paths> = None;

        for (path, item) in &paths.paths {
            if let Some(new_item) = self.rewrite_path_item(item)? {
                self.paths_changed += 1;
                new_paths
                    .get_or_insert_with(|| Paths::clone(paths))
                    .paths
                    .insert(path.clone(), new_item);
            }
        }

        Ok(new_paths.map(|new_paths| {
            let mut out = swagger.clone();
            out.paths = Some(Arc::new(new_paths));
            Arc::new(out)
        }))
    }

    fn rewrite_path_item(&mut self, item: &PathItem) -> Result<Option<Arc<PathItem>>> {
        let mut new_item: Option<PathItem> = None;

        for (method, op) in item.operations() {
            if let Some(new_op) = self.rewrite_operation(op)? {
                *new_item
                    .get_or_insert_with(|| item.clone())
                    .operation_slot_mut(method) = Some(new_op);
            }
        }

        if let Some(parameters) = self.rewrite_parameters(&item.parameters)? {
            new_item.get_or_insert_with(|| item.clone()).parameters = Arc::new(parameters);
        }

        Ok(new_item.map(Arc::new))
    }

    fn rewrite_operation(&mut self, op: &Operation) -> Result<Option<Arc<Operation>>> {
        let Some(parameters) = self.rewrite_parameters(&op.parameters)? else {
            return Ok(None);
        };

        let mut new_op = op.clone();
        new_op.parameters = parameters;
        Ok(Some(Arc::new(new_op)))
    }

    fn rewrite_parameters(&mut self, parameters: &[Parameter]) -> Result<Option<Vec<Parameter>>> {
        let mut new_parameters: Option<Vec<Parameter>> = None;

        for (i, parameter) in parameters.iter().enumerate() {
            let Parameter::Inline(inline) = parameter else {
                continue;
            };

            let key = CanonicalKey::of(inline)?;
            if let Some(name) = self.names_by_key.get(&key) {
                new_parameters.get_or_insert_with(|| parameters.to_vec())[i] =
                    Parameter::Ref(reference_for(name));
                self.replaced += 1;
            }
        }

        Ok(new_parameters)
    }
}
