use thiserror::Error;

#[derive(Debug, Error)]
pub enum HoshimiError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("seed data error: {0}")]
    Seed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
