use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;

use super::declared::{TypeKey, TypeRef};
use super::descriptor::TypeDescriptor;
use crate::policy::{DescriptorProfile, StrictnessPolicy};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no type registered for tag '{0}'")]
pub struct UnknownTag(pub String);

/// Derives and caches [`TypeDescriptor`]s, and resolves type tags.
///
/// Descriptors are keyed by declaration and [`DescriptorProfile`]; once
/// derived they are immutable and shared. The tag table is fixed when the
/// registry is built.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    cache: DashMap<(TypeKey, DescriptorProfile), Arc<TypeDescriptor>>,
    tags: HashMap<String, TypeRef>,
}

impl TypeRegistry {
    /// Creates a registry with an empty tag table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::default()
    }

    /// Returns the descriptor of `ty` under `policy`, deriving it on first use.
    pub fn describe(&self, ty: TypeRef, policy: &StrictnessPolicy) -> Arc<TypeDescriptor> {
        let profile = policy.profile();
        self.cache
            .entry((ty.key(), profile))
            .or_insert_with(|| {
                tracing::debug!(type_name = ty.name(), ?profile, "deriving type descriptor");
                Arc::new(TypeDescriptor::derive(ty, profile))
            })
            .clone()
    }

    /// Resolves a type tag to the descriptor of the registered type.
    pub fn tag_lookup(
        &self,
        tag: &str,
        policy: &StrictnessPolicy,
    ) -> Result<Arc<TypeDescriptor>, UnknownTag> {
        let ty = self
            .tags
            .get(tag)
            .copied()
            .ok_or_else(|| UnknownTag(tag.to_string()))?;
        Ok(self.describe(ty, policy))
    }

    pub fn is_registered(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    /// Number of descriptors derived so far.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

/// Builder for a [`TypeRegistry`] with a populated tag table.
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct TypeRegistryBuilder {
    tags: HashMap<String, TypeRef>,
}

impl TypeRegistryBuilder {
    /// Registers `ty` under its own name.
    pub fn register(self, ty: TypeRef) -> Self {
        self.register_as(ty.name(), ty)
    }

    /// Registers `ty` under an explicit tag. Later registrations of the same
    /// tag replace earlier ones.
    pub fn register_as(mut self, tag: impl Into<String>, ty: TypeRef) -> Self {
        self.tags.insert(tag.into(), ty);
        self
    }

    pub fn build(self) -> TypeRegistry {
        TypeRegistry {
            cache: DashMap::new(),
            tags: self.tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::{DeclaredType, FieldDecl, PrimitiveKind};
    use std::thread;

    fn song_fields() -> Vec<FieldDecl> {
        vec![FieldDecl::new("name", DeclaredType::Primitive(PrimitiveKind::Str))]
    }

    const SONG: TypeRef = TypeRef::new("Song", song_fields);

    #[test]
    fn test_describe_is_memoized() {
        let registry = TypeRegistry::new();
        let policy = StrictnessPolicy::lenient_mutable();

        let first = registry.describe(SONG, &policy);
        let second = registry.describe(SONG, &policy);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.cached(), 1);
    }

    #[test]
    fn test_profiles_are_cached_separately() {
        let registry = TypeRegistry::new();
        let lenient = registry.describe(SONG, &StrictnessPolicy::lenient_immutable());
        let strict = registry.describe(SONG, &StrictnessPolicy::strict_immutable());
        assert!(lenient.is_default_constructible());
        assert!(!strict.is_default_constructible());
        assert_eq!(registry.cached(), 2);
    }

    #[test]
    fn test_same_name_declarations_are_cached_separately() {
        fn record_fields() -> Vec<FieldDecl> {
            vec![
                FieldDecl::new("name", DeclaredType::Primitive(PrimitiveKind::Str)),
                FieldDecl::new("label", DeclaredType::Primitive(PrimitiveKind::Str)),
            ]
        }
        fn numbered_record_fields() -> Vec<FieldDecl> {
            vec![FieldDecl::new("title", DeclaredType::Primitive(PrimitiveKind::Int))]
        }
        const RECORD: TypeRef = TypeRef::new("Record", record_fields);
        const NUMBERED: TypeRef = TypeRef::new("Record", numbered_record_fields);

        let registry = TypeRegistry::new();
        let policy = StrictnessPolicy::strict_immutable();

        let positional = registry.describe(RECORD, &policy);
        let zero_argument = registry.describe(RECORD.with_zero_argument_constructor(), &policy);
        let numbered = registry.describe(NUMBERED, &policy);

        assert!(!positional.is_default_constructible());
        assert!(zero_argument.is_default_constructible());
        assert_eq!(positional.fields().len(), 2);
        assert_eq!(numbered.fields().len(), 1);
        assert_eq!(numbered.fields()[0].name(), "title");
        assert_eq!(registry.cached(), 3);
    }

    #[test]
    fn test_access_strategy_does_not_split_cache() {
        use crate::policy::AccessStrategyKind;

        let registry = TypeRegistry::new();
        let direct = StrictnessPolicy::lenient_immutable();
        let accessor = direct.with_access_strategy(AccessStrategyKind::Accessor);
        let a = registry.describe(SONG, &direct);
        let b = registry.describe(SONG, &accessor);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_tag_lookup() {
        let registry = TypeRegistry::builder()
            .register(SONG)
            .register_as("Track", SONG)
            .build();
        let policy = StrictnessPolicy::strict_immutable();

        assert_eq!(registry.tag_lookup("Song", &policy).unwrap().name(), "Song");
        assert_eq!(registry.tag_lookup("Track", &policy).unwrap().name(), "Song");
        assert!(registry.is_registered("Track"));
        assert!(!registry.is_registered("Album"));
        assert_eq!(
            registry.tag_lookup("Album", &policy).unwrap_err(),
            UnknownTag("Album".into())
        );
    }

    #[test]
    fn test_concurrent_describe_shares_one_descriptor() {
        let registry = Arc::new(TypeRegistry::new());
        let policy = StrictnessPolicy::defaulted_immutable();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.describe(SONG, &policy))
            })
            .collect();
        let descriptors: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(descriptors.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(registry.cached(), 1);
    }
}
