//! Strictness policies controlling nullability, default substitution,
//! mutability and field access during binding.

mod config;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use config::PolicyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldNullability {
    AllNullable,
    AllNonNull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefaultSubstitution {
    None,
    PerFieldDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldMutability {
    Mutable,
    Immutable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessStrategyKind {
    Accessor,
    DirectField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RootTypeResolution {
    Explicit,
    FromTag,
}

/// The part of a policy that shapes derived type descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DescriptorProfile {
    pub nullability: FieldNullability,
    pub defaults: DefaultSubstitution,
    pub mutability: FieldMutability,
}

/// Binding policy for one bind call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StrictnessPolicy {
    pub field_nullability: FieldNullability,
    pub default_substitution: DefaultSubstitution,
    pub field_mutability: FieldMutability,
    pub access_strategy: AccessStrategyKind,
    pub root_type_resolution: RootTypeResolution,
}

impl StrictnessPolicy {
    /// Nullable fields with public mutators.
    pub const fn lenient_mutable() -> Self {
        Self {
            field_nullability: FieldNullability::AllNullable,
            default_substitution: DefaultSubstitution::None,
            field_mutability: FieldMutability::Mutable,
            access_strategy: AccessStrategyKind::Accessor,
            root_type_resolution: RootTypeResolution::Explicit,
        }
    }

    /// Nullable fields without mutators; needs direct field access.
    pub const fn lenient_immutable() -> Self {
        Self {
            field_mutability: FieldMutability::Immutable,
            access_strategy: AccessStrategyKind::DirectField,
            ..Self::lenient_mutable()
        }
    }

    /// Non-null fields whose omission falls back to the declared default.
    pub const fn defaulted_immutable() -> Self {
        Self {
            field_nullability: FieldNullability::AllNonNull,
            default_substitution: DefaultSubstitution::PerFieldDefault,
            ..Self::lenient_immutable()
        }
    }

    /// Non-null fields, no defaults: only positional construction remains.
    pub const fn strict_immutable() -> Self {
        Self {
            default_substitution: DefaultSubstitution::None,
            ..Self::defaulted_immutable()
        }
    }

    pub const fn preset(preset: Preset) -> Self {
        match preset {
            Preset::LenientMutable => Self::lenient_mutable(),
            Preset::LenientImmutable => Self::lenient_immutable(),
            Preset::DefaultedImmutable => Self::defaulted_immutable(),
            Preset::StrictImmutable => Self::strict_immutable(),
        }
    }

    pub const fn with_access_strategy(mut self, access_strategy: AccessStrategyKind) -> Self {
        self.access_strategy = access_strategy;
        self
    }

    pub const fn with_root_type_resolution(mut self, resolution: RootTypeResolution) -> Self {
        self.root_type_resolution = resolution;
        self
    }

    pub fn profile(&self) -> DescriptorProfile {
        DescriptorProfile {
            nullability: self.field_nullability,
            defaults: self.default_substitution,
            mutability: self.field_mutability,
        }
    }
}

impl Default for StrictnessPolicy {
    fn default() -> Self {
        Self::lenient_mutable()
    }
}

impl From<Preset> for StrictnessPolicy {
    fn from(preset: Preset) -> Self {
        Self::preset(preset)
    }
}

/// Named policy presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    #[default]
    LenientMutable,
    LenientImmutable,
    DefaultedImmutable,
    StrictImmutable,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::LenientMutable,
        Preset::LenientImmutable,
        Preset::DefaultedImmutable,
        Preset::StrictImmutable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::LenientMutable => "lenient-mutable",
            Preset::LenientImmutable => "lenient-immutable",
            Preset::DefaultedImmutable => "defaulted-immutable",
            Preset::StrictImmutable => "strict-immutable",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| PolicyError::UnknownPreset(s.to_string()))
    }
}
