use thiserror::Error;

/// Why a raw hand token could not be read. Callers treat either kind as
/// "no hand selected".
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandError {
    #[error("Hand must be 2 or 3 characters, got {0}")]
    InvalidLength(usize),

    #[error("Invalid rank: {0}")]
    InvalidRank(char),
}

#[derive(Error, Debug)]
pub enum PulseError {
    #[error(transparent)]
    Hand(#[from] HandError),

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Invalid range context: {0}")]
    InvalidRangeContext(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PulseResult<T> = Result<T, PulseError>;
