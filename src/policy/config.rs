//! Policy files.
//!
//! A policy file names a base preset and optionally overrides individual
//! settings:
//!
//! ```toml
//! preset = "lenient-immutable"
//! access-strategy = "accessor"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::{
    AccessStrategyKind, DefaultSubstitution, FieldMutability, FieldNullability, Preset,
    RootTypeResolution, StrictnessPolicy,
};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PolicyError {
    #[error("unknown policy preset: {0}")]
    UnknownPreset(String),

    #[error("policy file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read policy file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid policy: {0}")]
    Invalid(#[from] toml::de::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PolicyFile {
    preset: Option<Preset>,
    field_nullability: Option<FieldNullability>,
    default_substitution: Option<DefaultSubstitution>,
    field_mutability: Option<FieldMutability>,
    access_strategy: Option<AccessStrategyKind>,
    root_type_resolution: Option<RootTypeResolution>,
}

impl PolicyFile {
    fn into_policy(self) -> StrictnessPolicy {
        let base = StrictnessPolicy::preset(self.preset.unwrap_or_default());
        StrictnessPolicy {
            field_nullability: self.field_nullability.unwrap_or(base.field_nullability),
            default_substitution: self
                .default_substitution
                .unwrap_or(base.default_substitution),
            field_mutability: self.field_mutability.unwrap_or(base.field_mutability),
            access_strategy: self.access_strategy.unwrap_or(base.access_strategy),
            root_type_resolution: self
                .root_type_resolution
                .unwrap_or(base.root_type_resolution),
        }
    }
}

impl StrictnessPolicy {
    /// Reads a policy from TOML text, layering overrides onto the preset.
    pub fn from_toml_str(text: &str) -> Result<Self, PolicyError> {
        let file: PolicyFile = toml::from_str(text)?;
        Ok(file.into_policy())
    }

    /// Reads a policy file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PolicyError::FileNotFound(path.to_path_buf()))
            }
            Err(e) => Err(PolicyError::ReadError {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }
}
