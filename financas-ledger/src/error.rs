use financas_core::ExpenseError;
use thiserror::Error;

/// Failures reading or writing the ledger file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed ledger row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },
}

/// Why a submission persisted nothing.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    InvalidInput(#[from] ExpenseError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
