//! Shared parameter definitions for Swagger documents
//!
//! Two passes over a [`Swagger`](oaspec_models::Swagger) document:
//!
//! ```text
//! Swagger → collect_shared_parameters → SharedParameters { names_by_key, parameters }
//!         → replace_shared_parameters(names_by_key) → Swagger with $refs
//! ```
//!
//! 1. The **collector** canonicalizes every inline parameter, and names each
//!    distinct definition `<name>-<8 char digest>`.
//! 2. The **rewriter** replaces every inline parameter whose canonical key has
//!    a name with `{"$ref": "#/parameters/<name>"}`, copying only the path
//!    items and operations that actually change.
//!
//! [`share_parameters`] runs both and merges the shared table into the
//! document's `parameters` section.

mod canonical;
mod collector;
mod error;
mod rewriter;
mod share;

pub use canonical::{
    base_name, reference_for, short_digest, CanonicalKey, DIGEST_PREFIX_BYTES,
    FALLBACK_PARAMETER_NAME, PARAMETERS_REF_PREFIX,
};
pub use collector::{
    collect_shared_parameters, collect_shared_parameters_opt, NamesByKey, SharedParameters,
};
pub use error::{Error, Result};
pub use rewriter::{replace_shared_parameters, replace_shared_parameters_opt};
pub use share::{merge_shared_parameters, share_parameters};
