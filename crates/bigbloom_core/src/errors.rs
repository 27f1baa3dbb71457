use thiserror::Error;

#[derive(Debug, Error)]
pub enum BloomError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("bit index {index} out of range for size {size}")]
    OutOfBounds { index: u64, size: u64 },

    #[error("bit storage holds {got} bits, geometry requires {expected}")]
    GeometryMismatch { expected: u64, got: u64 },
}

pub type Result<T> = std::result::Result<T, BloomError>;
