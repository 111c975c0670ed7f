use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrapeError {
    #[error("Catalog fetch failed: {0}")]
    CatalogFetch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<confique::Error> for DrapeError {
    fn from(err: confique::Error) -> Self {
        DrapeError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DrapeError>;
