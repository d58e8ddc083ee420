//! Transaction error types.

use thiserror::Error;

/// Result type for transaction operations.
pub type TransactionResult<T> = Result<T, TransactionError>;

/// Errors raised by the transaction runner itself.
///
/// Hazards are never errors: a value modified after it was rendered only
/// sets the reflush flag (and, in diagnostic mode, produces a report).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// A transaction was started while another one is still open.
    #[error("a render transaction is already active (generation {generation})")]
    AlreadyInTransaction {
        /// Generation of the transaction that is still open.
        generation: u64,
    },

    /// Invalid runner configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TransactionError {
    /// Check if this error goes away by retrying once the active
    /// transaction has finished.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransactionError::AlreadyInTransaction { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        let busy = TransactionError::AlreadyInTransaction { generation: 3 };
        assert!(busy.is_retryable());

        let config = TransactionError::InvalidConfig("unknown tracking mode: loud".to_string());
        assert!(!config.is_retryable());
    }

    #[test]
    fn test_error_display() {
        let busy = TransactionError::AlreadyInTransaction { generation: 7 };
        assert_eq!(
            busy.to_string(),
            "a render transaction is already active (generation 7)"
        );
    }
}
