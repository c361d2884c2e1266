use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Order not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("Store error: {0}")]
    Store(String),
}
