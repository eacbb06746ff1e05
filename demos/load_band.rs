use docbind::{
    BindError, Bindable, DeclaredType, FieldDecl, Loader, PrimitiveKind, StrictnessPolicy,
    TypeRef, Value,
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
        FieldDecl::new("tracks", DeclaredType::list_of(string())).with_default(Value::List(vec![])),
    ]
}

const BAND: TypeRef = TypeRef::new("Band", band_fields);
const ALBUM: TypeRef = TypeRef::new("Album", album_fields);

#[derive(Debug)]
struct Band {
    name: String,
    albums: Vec<Album>,
}

#[derive(Debug)]
struct Album {
    name: String,
    release_year: i32,
    tracks: Vec<String>,
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
            tracks: instance.take_as("tracks")?,
        })
    }
}

fn main() -> Result<(), docbind::Error> {
    // Absent keys fall back to the declared defaults
    let band: Band = Loader::builder()
        .with_file("demos/band.yaml")
        .with_policy(StrictnessPolicy::defaulted_immutable())
        .load()?;

    println!("Band: {}", band.name);
    for album in &band.albums {
        println!("  {} ({}): {} tracks", album.name, album.release_year, album.tracks.len());
        for track in &album.tracks {
            println!("    {track}");
        }
    }

    Ok(())
}
