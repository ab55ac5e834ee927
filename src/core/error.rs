use thiserror::Error;

#[derive(Error, Debug)]
pub enum PadHunterError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Digest {index} was already discarded (oldest buffered index is {oldest})")]
    Evicted { index: u64, oldest: u64 },

    #[error("Search interrupted")]
    Interrupted,

    #[error("Task error: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, PadHunterError>;
