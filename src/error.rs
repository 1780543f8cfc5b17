use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
    #[error("the total approved sum is bigger than requested for symbol: {0}")]
    PoolExceedsDemand(String),

    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
}
