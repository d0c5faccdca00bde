//! Declaration model for the binding generator: classes, enums, fields,
//! methods, free functions and headers as handed over by the header parser.
//!
//! Everything here is passive data. Nothing in this crate resolves entity
//! references or decides how values cross the boundary; that is the job of
//! `cppglue-core`.

pub mod error;
pub mod node;
pub mod types;
pub mod validate;
pub mod visit;

/// Maximum length for any host-facing identifier.
pub const MAX_IDENT_LEN: usize = 128;

use crate::error::ErrorTree;
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        err,
        error::ErrorTree,
        node::*,
        types::{EntityId, Precision, Primitive, TypeRef},
        visit::Visitor,
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("malformed declaration batch: {0}")]
    Json(#[from] serde_json::Error),

    #[error("validation failed:\n{0}")]
    Validation(ErrorTree),
}
