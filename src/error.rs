use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Proxy mode needs at least one arm")]
    NoArms,

    #[error("Proxy mode needs at least one iteration")]
    ZeroIterations,

    #[error("No free identifier found after {attempts} attempts")]
    IdentifierSpaceExhausted { attempts: usize },

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
}

pub type Result<T> = std::result::Result<T, Error>;
