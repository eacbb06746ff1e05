//! Band / album / song declarations shared by the integration tests.
//!
//! One declaration per type; how strict it is comes from the policy. Two
//! Rust views read the bound instances: `nullable` for the lenient presets
//! and `required` for the non-null ones.
#![allow(dead_code)]

use std::sync::Arc;

use docbind::source::ResourceRoot;
use docbind::{
    BindError, Bindable, DeclaredType, FieldDecl, Loader, Node, PrimitiveKind, StrictnessPolicy,
    TypeRef, TypeRegistry, Value,
};

fn string() -> DeclaredType {
    DeclaredType::Primitive(PrimitiveKind::Str)
}

fn band_fields() -> Vec<FieldDecl> {
    vec![
        FieldDecl::new("name", string()).with_default(""),
        FieldDecl::new("albums", DeclaredType::list_of(DeclaredType::Composite(ALBUM)))
            .with_default(Value::List(vec![])),
    ]
}

fn album_fields() -> Vec<FieldDecl> {
    vec![
        FieldDecl::new("name", string()).with_default(""),
        FieldDecl::new("releaseYear", DeclaredType::Primitive(PrimitiveKind::Int))
            .with_default(0_i64),
        FieldDecl::new("label", string()).with_default(""),
        FieldDecl::new("tracks", DeclaredType::list_of(DeclaredType::Composite(SONG)))
            .with_default(Value::List(vec![])),
    ]
}

fn song_fields() -> Vec<FieldDecl> {
    vec![FieldDecl::new("name", string()).with_default("")]
}

pub const BAND: TypeRef = TypeRef::new("Band", band_fields);
pub const ALBUM: TypeRef = TypeRef::new("Album", album_fields);
pub const SONG: TypeRef = TypeRef::new("Song", song_fields);

pub fn registry() -> Arc<TypeRegistry> {
    Arc::new(
        TypeRegistry::builder()
            .register(BAND)
            .register(ALBUM)
            .register(SONG)
            .build(),
    )
}

pub fn fixtures() -> ResourceRoot {
    ResourceRoot::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}

pub fn loader(locator: &str, policy: StrictnessPolicy) -> Loader {
    Loader::builder()
        .with_resource(&fixtures(), locator)
        .with_policy(policy)
        .with_registry(registry())
}

pub fn yaml(text: &str) -> Node {
    docbind::parse::yaml::from_str(text).expect("test YAML must parse")
}

pub mod nullable {
    use super::*;

    #[derive(Debug, PartialEq)]
    pub struct Band {
        pub name: Option<String>,
        pub albums: Option<Vec<Album>>,
    }

    #[derive(Debug, PartialEq)]
    pub struct Album {
        pub name: Option<String>,
        pub release_year: Option<i32>,
        pub label: Option<String>,
        pub tracks: Option<Vec<Song>>,
    }

    #[derive(Debug, PartialEq)]
    pub struct Song {
        pub name: Option<String>,
    }

    impl Bindable for Band {
        fn declared_type() -> DeclaredType {
            DeclaredType::Composite(BAND)
        }

        fn from_value(value: Value) -> Result<Self, BindError> {
            let mut instance = value.into_instance(BAND.name())?;
            Ok(Band {
                name: instance.take_as("name")?,
                albums: instance.take_as("albums")?,
            })
        }
    }

    impl Bindable for Album {
        fn declared_type() -> DeclaredType {
            DeclaredType::Composite(ALBUM)
        }

        fn from_value(value: Value) -> Result<Self, BindError> {
            let mut instance = value.into_instance(ALBUM.name())?;
            Ok(Album {
                name: instance.take_as("name")?,
                release_year: instance.take_as("releaseYear")?,
                label: instance.take_as("label")?,
                tracks: instance.take_as("tracks")?,
            })
        }
    }

    impl Bindable for Song {
        fn declared_type() -> DeclaredType {
            DeclaredType::Composite(SONG)
        }

        fn from_value(value: Value) -> Result<Self, BindError> {
            let mut instance = value.into_instance(SONG.name())?;
            Ok(Song {
                name: instance.take_as("name")?,
            })
        }
    }
}

pub mod required {
    use super::*;

    #[derive(Debug, PartialEq)]
    pub struct Band {
        pub name: String,
        pub albums: Vec<Album>,
    }

    #[derive(Debug, PartialEq)]
    pub struct Album {
        pub name: String,
        pub release_year: i32,
        pub label: String,
        pub tracks: Vec<Song>,
    }

    #[derive(Debug, PartialEq)]
    pub struct Song {
        pub name: String,
    }

    impl Bindable for Band {
        fn declared_type() -> DeclaredType {
            DeclaredType::Composite(BAND)
        }

        fn from_value(value: Value) -> Result<Self, BindError> {
            let mut instance = value.into_instance(BAND.name())?;
            Ok(Band {
                name: instance.take_as("name")?,
                albums: instance.take_as("albums")?,
            })
        }
    }

    impl Bindable for Album {
        fn declared_type() -> DeclaredType {
            DeclaredType::Composite(ALBUM)
        }

        fn from_value(value: Value) -> Result<Self, BindError> {
            let mut instance = value.into_instance(ALBUM.name())?;
            Ok(Album {
                name: instance.take_as("name")?,
                release_year: instance.take_as("releaseYear")?,
                label: instance.take_as("label")?,
                tracks: instance.take_as("tracks")?,
            })
        }
    }

    impl Bindable for Song {
        fn declared_type() -> DeclaredType {
            DeclaredType::Composite(SONG)
        }

        fn from_value(value: Value) -> Result<Self, BindError> {
            let mut instance = value.into_instance(SONG.name())?;
            Ok(Song {
                name: instance.take_as("name")?,
            })
        }
    }
}

/// Unwraps the bind error out of a loader result.
pub fn bind_error<T: std::fmt::Debug>(result: Result<T, docbind::Error>) -> BindError {
    match result {
        Err(docbind::Error::Bind(err)) => err,
        other => panic!("expected a bind error, got {other:?}"),
    }
}
