use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown page size preset: {0}")]
    UnknownPreset(String),

    #[error("Text layout unavailable: no text measurer configured")]
    LayoutUnavailable,

    #[error("Internal consistency error: {0}")]
    InternalConsistency(String),
}

pub type Result<T> = std::result::Result<T, Error>;
