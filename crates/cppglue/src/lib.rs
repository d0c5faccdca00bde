//! ## Crate layout
//! - `schema`: declaration model handed over by the header parser.
//! - `core`: type mapping, member synthesis, module assembly and the host
//!   runtime.
//! - `build`: pybind11 / CMake emission and generator configuration.
//!
//! The `prelude` module carries what a caller needs to go from a
//! declaration batch to a loaded module or to emitted sources.

pub use cppglue_build as build;
pub use cppglue_core as core;
pub use cppglue_schema as schema;

use thiserror::Error as ThisError;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Error
/// Any failure the facade can surface.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] cppglue_schema::Error),

    #[error(transparent)]
    Generate(#[from] core::GenerateError),

    #[error(transparent)]
    Runtime(#[from] core::RuntimeError),

    #[error(transparent)]
    Build(#[from] build::BuildError),
}

/// Parse a JSON declaration batch and assemble it into a module.
pub fn load_json(json: &str) -> Result<core::module::Module, Error> {
    let schema = schema::node::Schema::from_json(json)?;

    Ok(core::assemble::assemble_schema(&schema)?)
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error,
        build::{GeneratedSources, GeneratorConfig, generate, generate_to_disk},
        core::prelude::*,
        schema::prelude::*,
    };
}
