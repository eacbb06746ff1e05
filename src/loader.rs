use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::access::AccessStrategy;
use crate::bind::{reflect, Bindable, Binder};
use crate::describe::TypeRegistry;
use crate::node::Node;
use crate::parse::parse_str;
use crate::policy::StrictnessPolicy;
use crate::source::{DocumentSource, FileSource, Format, ResourceRoot, TextSource};
use crate::value::Value;
use crate::Error;

/// Builder that reads a document, parses it, and binds it.
///
/// ## Example
///
/// ```no_run
/// use docbind::{Bindable, Loader, StrictnessPolicy};
///
/// # fn demo<Band: Bindable>() -> Result<(), docbind::Error> {
/// let band: Band = Loader::builder()
///     .with_file("fixtures/band.yaml")
///     .with_policy(StrictnessPolicy::lenient_immutable())
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
#[must_use = "loaders do nothing until a load method is called"]
pub struct Loader {
    source: Option<Box<dyn DocumentSource>>,
    policy: StrictnessPolicy,
    registry: Option<Arc<TypeRegistry>>,
    strategy: Option<Arc<dyn AccessStrategy>>,
}

impl Loader {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: impl DocumentSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Reads the document from `path`; the format follows the extension.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_source(FileSource::new(path))
    }

    /// Reads the document named by `locator` under `root`.
    pub fn with_resource(self, root: &ResourceRoot, locator: &str) -> Self {
        self.with_source(root.source(locator))
    }

    pub fn with_text(self, text: impl Into<String>, format: Format) -> Self {
        self.with_source(TextSource::new(text, format))
    }

    pub fn with_policy(mut self, policy: impl Into<StrictnessPolicy>) -> Self {
        self.policy = policy.into();
        self
    }

    pub fn with_registry(mut self, registry: Arc<TypeRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_access_strategy(mut self, strategy: impl AccessStrategy + 'static) -> Self {
        self.strategy = Some(Arc::new(strategy));
        self
    }

    /// Binds the document to `T` (root type per the policy's resolution).
    pub fn load<T: Bindable>(self) -> Result<T, Error> {
        let (binder, node) = self.prepare()?;
        Ok(binder.bind(&node)?)
    }

    /// Binds the document against the type named by its root tag.
    pub fn load_tagged(self) -> Result<Value, Error> {
        let (binder, node) = self.prepare()?;
        Ok(binder.bind_tagged(&node)?)
    }

    /// Returns the document as untyped structured data.
    pub fn load_reflected(self) -> Result<Value, Error> {
        let node = self.parse()?;
        Ok(reflect(&node))
    }

    fn parse(&self) -> Result<Node, Error> {
        let source = self.source.as_ref().ok_or(Error::MissingSource)?;
        debug!(?source, "loading document");
        let text = source.read()?;
        Ok(parse_str(&text, source.format())?)
    }

    fn prepare(self) -> Result<(Binder, Node), Error> {
        let node = self.parse()?;
        let mut binder = Binder::new(self.policy);
        if let Some(registry) = self.registry {
            binder = binder.with_registry(registry);
        }
        if let Some(strategy) = self.strategy {
            binder = binder.with_shared_strategy(strategy);
        }
        Ok((binder, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::BindErrorKind;
    use crate::describe::{DeclaredType, FieldDecl, PrimitiveKind, TypeRef};
    use crate::parse::ParseError;
    use crate::source::SourceError;
    use std::io::Write;
    use tempfile::Builder;

    fn song_fields() -> Vec<FieldDecl> {
        vec![FieldDecl::new("name", DeclaredType::Primitive(PrimitiveKind::Str))]
    }

    const SONG: TypeRef = TypeRef::new("Song", song_fields);

    #[test]
    fn test_missing_source() {
        let result = Loader::builder().load_reflected();
        assert!(matches!(result, Err(Error::MissingSource)));
    }

    #[test]
    fn test_missing_file() {
        let result = Loader::builder().with_file("/nonexistent/song.yaml").load::<String>();
        assert!(matches!(result, Err(Error::Source(SourceError::NotFound(_)))));
    }

    #[test]
    fn test_parse_error_propagates() {
        let result = Loader::builder()
            .with_text("name: [unclosed", Format::Yaml)
            .load_reflected();
        assert!(matches!(result, Err(Error::Parse(ParseError::Yaml(_)))));
    }

    #[test]
    fn test_load_tagged_from_file() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "!Song [Stairway to Heaven]").unwrap();

        let registry = Arc::new(TypeRegistry::builder().register(SONG).build());
        let value = Loader::builder()
            .with_file(file.path())
            .with_policy(StrictnessPolicy::strict_immutable())
            .with_registry(registry)
            .load_tagged()
            .unwrap();
        let song = value.as_instance().unwrap();
        assert_eq!(song.get("name"), Some(&Value::from("Stairway to Heaven")));
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "name = \"Dreams\"").unwrap();

        let value = Loader::builder()
            .with_file(file.path())
            .load_reflected()
            .unwrap();
        assert_eq!(value.as_map().unwrap()["name"], Value::from("Dreams"));
    }

    #[test]
    fn test_bind_error_propagates() {
        let result = Loader::builder()
            .with_text("{name: Dreams}", Format::Yaml)
            .with_policy(StrictnessPolicy::strict_immutable())
            .load_tagged();
        match result {
            Err(Error::Bind(err)) => {
                assert_eq!(err.kind(), &BindErrorKind::UnknownType { tag: None })
            }
            other => panic!("expected bind error, got {other:?}"),
        }
    }
}
