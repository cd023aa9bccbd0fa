use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Summarization error: {0}")]
    Summarization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Stable tag for API consumers.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Serialization(_) => "serialization",
            Error::InvalidInput(_) => "invalid_input",
            Error::Fetch(_) => "fetch",
            Error::Summarization(_) => "summarization",
            Error::Configuration(_) => "configuration",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
