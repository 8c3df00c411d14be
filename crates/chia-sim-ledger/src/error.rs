use chia_consensus::validation_error::ErrorCode;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Validation error: {0:?}")]
    Validation(ErrorCode),

    #[error("Block {0} has not been farmed")]
    UnknownBlock(u32),
}

impl LedgerError {
    /// The validation error code, if the ledger rejected a spend bundle.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Validation(code) => Some(*code),
            Self::UnknownBlock(_) => None,
        }
    }
}

impl From<ErrorCode> for LedgerError {
    fn from(code: ErrorCode) -> Self {
        Self::Validation(code)
    }
}
