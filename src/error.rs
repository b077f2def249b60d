use std::convert::Infallible;

use thiserror::Error;

/// Input validation failures. None of these are transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PromptPayError {
    #[error("invalid account type, use 'phone' or 'id'")]
    InvalidAccountType,
    #[error("invalid ID length, must be 13 digits")]
    InvalidIDLength,
    #[error("invalid ID, cannot start with 0")]
    InvalidIDStart,
    #[error("invalid ID format, must be digits only")]
    InvalidIDFormat,
    #[error("invalid amount, must be non-negative and at most 13 characters")]
    InvalidAmount,
}

// Lets an already-typed `AccountKind` go through the same entry points as text.
impl From<Infallible> for PromptPayError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

pub type Result<T> = std::result::Result<T, PromptPayError>;
