#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("Invalid numeric filter: {0}")]
    InvalidNumber(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for FilterError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
