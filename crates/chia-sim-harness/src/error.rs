use std::io;

use chia_sim_ledger::LedgerError;
use chia_sim_signer::SignerError;
use clvm_traits::{FromClvmError, ToClvmError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("To CLVM error: {0}")]
    ToClvm(#[from] ToClvmError),

    #[error("From CLVM error: {0}")]
    FromClvm(#[from] FromClvmError),

    #[error("Signer error: {0}")]
    Signer(#[from] SignerError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Could not find available coin containing {0} mojos")]
    InsufficientFunds(u64),

    #[error("Cannot spend {amount} mojos from a coin worth {coin_amount}")]
    AmountExceedsCoin { amount: u64, coin_amount: u64 },

    #[error("Cannot combine an empty set of coins")]
    EmptyCombine,

    #[error("Invalid network config: {0}")]
    InvalidConfig(&'static str),
}
