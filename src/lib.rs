#![doc = include_str!("../README.md")]

pub use chia_sim_harness::*;

pub mod ledger {
    pub use chia_sim_ledger::*;
}

pub mod signer {
    pub use chia_sim_signer::*;
}

pub mod types {
    pub use chia_sim_types::*;
}

pub use chia_bls as bls;
pub use chia_protocol as protocol;
pub use clvm_traits as traits;
pub use clvm_utils as utils;
pub use clvmr as clvm;
