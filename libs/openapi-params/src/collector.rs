//! Parameter collection: content-addressing every inline parameter
//!
//! Every distinct inline parameter in the document becomes a shared
//! definition, including ones that occur only once. Occurrence counts are
//! tracked for logging only.

use crate::canonical::{base_name, short_digest, CanonicalKey};
use crate::error::Result;
use oaspec_models::{InlineParameter, Parameter, Swagger};
use std::collections::BTreeMap;

/// Canonical key → assigned shared name
pub type NamesByKey = BTreeMap<CanonicalKey, String>;

/// Result of a collection pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SharedParameters {
    /// Canonical key of each distinct definition and the name assigned to it
    pub names_by_key: NamesByKey,
    /// Shared table: assigned name → first-encountered definition
    pub parameters: BTreeMap<String, InlineParameter>,
}

impl SharedParameters {
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Name assigned to a canonical key
    pub fn name_for(&self, key: &CanonicalKey) -> Option<&str> {
        self.names_by_key.get(key).map(String::as_str)
    }

    /// Shared definition by assigned name
    pub fn get(&self, name: &str) -> Option<&InlineParameter> {
        self.parameters.get(name)
    }
}

/// First occurrence of a distinct definition and how often it was seen
struct Occurrence {
    parameter: InlineParameter,
    count: usize,
}

/// Collect every distinct inline parameter of a document and name it
///
/// A document without paths yields an empty result. References are skipped.
/// Any parameter that cannot be canonicalized aborts the pass.
pub fn collect_shared_parameters(swagger: &Swagger) -> Result<SharedParameters> {
    let Some(paths) = swagger.paths.as_ref() else {
        return Ok(SharedParameters::default());
    };

    let mut occurrences: BTreeMap<CanonicalKey, Occurrence> = BTreeMap::new();
    let mut scanned = 0usize;

    for item in paths.paths.values() {
        for parameter in item.all_parameters() {
            let Parameter::Inline(inline) = parameter else {
                continue;
            };

            let key = CanonicalKey::of(inline)?;
            scanned += 1;
            occurrences
                .entry(key)
                .or_insert_with(|| Occurrence {
                    parameter: (**inline).clone(),
                    count: 0,
                })
                .count += 1;
        }
    }

    let singletons = occurrences.values().filter(|o| o.count == 1).count();
    tracing::debug!(
        "Collected {} inline parameters: {} distinct, {} occurring once",
        scanned,
        occurrences.len(),
        singletons
    );

    let distinct = occurrences
        .into_iter()
        .map(|(key, occurrence)| (key, occurrence.parameter))
        .collect();

    Ok(assign_names(distinct, short_digest))
}

/// Like [`collect_shared_parameters`], treating an absent document as empty
pub fn collect_shared_parameters_opt(swagger: Option<&Swagger>) -> Result<SharedParameters> {
    match swagger {
        Some(sp) => collect_shared_parameters(sp),
        None => Ok(SharedParameters::default()),
    }
}

/// Name each distinct definition in ascending key order
///
/// The candidate `<base>-<digest>` is used unless an earlier key already took
/// it, in which case `<base>-0`, `<base>-1`, ... are tried in turn.
fn assign_names<F>(distinct: BTreeMap<CanonicalKey, InlineParameter>, digest: F) -> SharedParameters
where
    F: Fn(&CanonicalKey) -> String,
{
    let mut shared = SharedParameters::default();

    for (key, parameter) in distinct {
        let base = base_name(&parameter).to_string();
        let mut name = format!("{}-{}", base, digest(&key));

        let mut suffix = 0usize;
        while shared.parameters.contains_key(&name) {
            tracing::warn!("Shared parameter name '{}' already taken, renaming", name);
            name = format!("{}-{}", base, suffix);
            suffix += 1;
        }

        tracing::trace!("Shared parameter '{}' for {}", name, key);
        shared.parameters.insert(name.clone(), parameter);
        shared.names_by_key.insert(key, name);
    }

    shared
}
