//! Document sources: where the text handed to the tree parser comes from.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("document not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read document '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Markup format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Yaml,
    Toml,
}

impl Format {
    /// Infers the format from a file extension; anything but `.toml` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
            _ => Format::Yaml,
        }
    }
}

pub trait DocumentSource: Send + Sync + fmt::Debug {
    fn read(&self) -> Result<String, SourceError>;

    fn format(&self) -> Format;
}

/// A document on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: Format,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = Format::from_path(&path);
        Self { path, format }
    }

    /// Overrides the extension-derived format.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for FileSource {
    fn read(&self) -> Result<String, SourceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SourceError::NotFound(self.path.clone()))
            }
            Err(e) => Err(SourceError::Read {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    fn format(&self) -> Format {
        self.format
    }
}

/// A document already held in memory.
#[derive(Debug, Clone)]
pub struct TextSource {
    text: String,
    format: Format,
}

impl TextSource {
    pub fn new(text: impl Into<String>, format: Format) -> Self {
        Self {
            text: text.into(),
            format,
        }
    }
}

impl DocumentSource for TextSource {
    fn read(&self) -> Result<String, SourceError> {
        Ok(self.text.clone())
    }

    fn format(&self) -> Format {
        self.format
    }
}

/// Base directory that resource locators are resolved against.
#[derive(Debug, Clone)]
pub struct ResourceRoot {
    base: PathBuf,
}

impl ResourceRoot {
    pub fn new(base: impl AsRef<Path>) -> Self {
        Self {
            base: base.as_ref().to_path_buf(),
        }
    }

    /// Resolves `locator` (a relative path such as `albums/presence.yaml`).
    pub fn source(&self, locator: &str) -> FileSource {
        FileSource::new(self.base.join(locator))
    }

    /// Reads the resource named by `locator`.
    pub fn load(&self, locator: &str) -> Result<String, SourceError> {
        self.source(locator).read()
    }
}
