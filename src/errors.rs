use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Unified error type for ledger and storage operations.
///
/// Every variant is recoverable and intended for user-facing display by the
/// rendering layer; expected domain failures are signaled here rather than by
/// panicking.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: u64 },
    #[error("validation failed: {0}")]
    ValidationFailed(String),
    #[error("invalid transfer: {0}")]
    InvalidTransfer(String),
    #[error("insufficient funds: {available} available, {requested} requested")]
    InsufficientFunds { available: f64, requested: f64 },
    #[error("storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    pub fn not_found(entity: Entity, id: u64) -> Self {
        LedgerError::NotFound { entity, id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        LedgerError::ValidationFailed(message.into())
    }
}

/// Entity kinds referenced by [`LedgerError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Wallet,
    Category,
    Transaction,
    Budget,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Wallet => "wallet",
            Entity::Category => "category",
            Entity::Transaction => "transaction",
            Entity::Budget => "budget",
        };
        f.write_str(name)
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}
