//! Swagger 2.0 document model
//!
//! Serde model of the parts of an API specification document that the
//! parameter-sharing passes read and rewrite. Path items and operations are
//! held behind [`Arc`](std::sync::Arc) so a rewritten document can share every
//! untouched sub-tree with its input.

pub mod error;
pub mod parameter;
pub mod path_item;
mod serde_util;
pub mod swagger;

pub use error::{Error, Result};
pub use parameter::{InlineParameter, Parameter, Reference};
pub use path_item::{Method, Operation, PathItem};
pub use swagger::{Paths, Swagger};
