use thiserror::Error;

/// Rejections raised while turning user input into ledger rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpenseError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ExpenseError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        ExpenseError::InvalidInput(reason.into())
    }
}
