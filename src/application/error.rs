use thiserror::Error;

use crate::domain::{DirectoryError, TransactionError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("No users registered yet")]
    NoUsersRegistered,

    #[error("No account selected")]
    NoAccountSelected,

    #[error("Transaction rejected: {0}")]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl AppError {
    /// True when a movement was refused by one of the account's guards.
    pub fn is_rejected_transaction(&self) -> bool {
        matches!(self, AppError::Transaction(_))
    }
}
