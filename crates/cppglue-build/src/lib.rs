//! Renders an assembled module as a pybind11 translation unit plus the CMake
//! project that builds it.

mod cmake;
mod config;
mod cpp;

pub use config::{ConfigError, GeneratorConfig};

use cppglue_core::{GenerateError, assemble::assemble_schema, module::Module};
use cppglue_schema::node::{Header, Schema};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use tracing::debug;

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot write '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },
}

///
/// GeneratedSources
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedSources {
    pub module_name: String,
    pub cpp: String,
    pub cmake: Option<String>,
}

impl GeneratedSources {
    #[must_use]
    pub fn cpp_file_name(&self) -> String {
        format!("{}.cpp", self.module_name)
    }

    /// Write every output into `<output_dir>/<module>_bindings`, returning
    /// that directory.
    pub fn write_to(&self, output_dir: &Path) -> Result<PathBuf, BuildError> {
        let dir = output_dir.join(format!("{}_bindings", self.module_name));
        fs::create_dir_all(&dir).map_err(|source| BuildError::Io {
            path: dir.clone(),
            source,
        })?;

        write_file(&dir.join(self.cpp_file_name()), &self.cpp)?;
        if let Some(cmake) = &self.cmake {
            write_file(&dir.join("CMakeLists.txt"), cmake)?;
        }
        debug!(dir = %dir.display(), "bindings written");

        Ok(dir)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    fs::write(path, contents).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Assemble `schema` and render its bindings.
#[tracing::instrument(level = "debug", skip_all, fields(module = %config.module_name))]
pub fn generate(schema: &Schema, config: &GeneratorConfig) -> Result<GeneratedSources, BuildError> {
    config.validate()?;
    let module = assemble_schema(schema)?;

    Ok(BindingBuilder::new(config, &module, &schema.headers).generate())
}

/// [`generate`] followed by [`GeneratedSources::write_to`] the configured
/// output directory.
pub fn generate_to_disk(schema: &Schema, config: &GeneratorConfig) -> Result<PathBuf, BuildError> {
    generate(schema, config)?.write_to(&config.output_dir)
}

///
/// BindingBuilder
///

pub(crate) struct BindingBuilder<'a> {
    pub(crate) config: &'a GeneratorConfig,
    pub(crate) module: &'a Module,
    pub(crate) headers: &'a [Header],
}

impl<'a> BindingBuilder<'a> {
    #[must_use]
    pub const fn new(config: &'a GeneratorConfig, module: &'a Module, headers: &'a [Header]) -> Self {
        Self {
            config,
            module,
            headers,
        }
    }

    #[must_use]
    pub fn generate(self) -> GeneratedSources {
        let cpp = cpp::generate(&self);
        let cmake = self.config.cmake.then(|| cmake::generate(&self));

        GeneratedSources {
            module_name: self.config.module_name.clone(),
            cpp,
            cmake,
        }
    }
}

#[cfg(test)]
mod tests;
