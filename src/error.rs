use thiserror::Error;

#[derive(Debug, Error)]
pub enum DebugError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed preferences: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no file is currently open")]
    NoFile,

    #[error("no debug session is running")]
    NotDebugging,

    #[error("assembly failed: {0}")]
    Assembly(String),

    #[error("failed to load program: {0}")]
    Load(String),

    #[error("invalid address: `{0}`")]
    InvalidAddress(String),

    #[error("line {0} is out of range")]
    InvalidLine(usize),

    #[error("{0}")]
    Command(String),
}

pub type Result<T> = std::result::Result<T, DebugError>;
