use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Unknown memory type: {0}")]
    UnrecognizedMemoryKind(i32),

    #[error("Unknown memory type name: {0}")]
    InvalidKindName(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MemoryError>;
