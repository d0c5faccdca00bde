use cppglue_schema::validate::naming::validate_module_name;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config has no module_name")]
    MissingModuleName,

    #[error("module_name '{name}' is invalid: {reason}")]
    InvalidModuleName { name: String, reason: String },
}

///
/// GeneratorConfig
///
/// ```toml
/// module_name = "my_module"
/// output_dir = "build"
/// sources = ["src/another_ex.cpp"]
/// compile_args = ["-O2"]
/// ```
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub module_name: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Extra native sources compiled into the extension module.
    #[serde(default)]
    pub sources: Vec<String>,

    /// Forwarded verbatim as compile options.
    #[serde(default)]
    pub compile_args: Vec<String>,

    #[serde(default = "default_cmake")]
    pub cmake: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

const fn default_cmake() -> bool {
    true
}

impl GeneratorConfig {
    #[must_use]
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            output_dir: default_output_dir(),
            sources: Vec::new(),
            compile_args: Vec::new(),
            cmake: default_cmake(),
        }
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.sources.push(source.into());
        self
    }

    #[must_use]
    pub fn with_compile_arg(mut self, arg: impl Into<String>) -> Self {
        self.compile_args.push(arg.into());
        self
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;

        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&s)
    }

    /// The module name doubles as the extension's import name, so it must
    /// be a valid host identifier.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.module_name.trim().is_empty() {
            return Err(ConfigError::MissingModuleName);
        }

        validate_module_name(&self.module_name).map_err(|reason| ConfigError::InvalidModuleName {
            name: self.module_name.clone(),
            reason,
        })
    }

    /// `<output_dir>/<module>_bindings`
    #[must_use]
    pub fn bindings_dir(&self) -> PathBuf {
        self.output_dir.join(format!("{}_bindings", self.module_name))
    }
}
