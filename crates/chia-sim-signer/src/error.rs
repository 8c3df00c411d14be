use chia_bls::PublicKey;
use chia_sim_types::ConditionError;
use clvm_traits::ToClvmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("Condition error: {0}")]
    Condition(#[from] ConditionError),

    #[error("To CLVM error: {0}")]
    ToClvm(#[from] ToClvmError),

    #[error("Infinity public key")]
    InfinityPublicKey,

    #[error("Missing secret key for public key {0:?}")]
    MissingKey(PublicKey),
}
