use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    #[error("malformed YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("malformed TOML document: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported mapping key (only scalar keys are allowed): {0}")]
    UnsupportedKey(String),
}
