mod coin_pair_search;
mod coin_wrapper;
mod config;
mod error;
mod keys;
mod network;
mod spend_request;
mod spend_result;
mod standard;
mod wallet;

pub use coin_pair_search::*;
pub use coin_wrapper::*;
pub use config::*;
pub use error::*;
pub use keys::*;
pub use network::*;
pub use spend_request::*;
pub use spend_result::*;
pub use standard::*;
pub use wallet::*;

use chia_protocol::{Bytes32, Program};
use clvm_traits::{FromClvm, ToClvm};
use clvm_utils::tree_hash;
use clvmr::Allocator;

pub fn to_program(value: impl ToClvm<Allocator>) -> Result<Program, NetworkError> {
    let mut allocator = Allocator::new();
    let ptr = value.to_clvm(&mut allocator)?;
    Ok(Program::from_clvm(&allocator, ptr)?)
}

pub fn to_puzzle(value: impl ToClvm<Allocator>) -> Result<(Bytes32, Program), NetworkError> {
    let mut allocator = Allocator::new();
    let ptr = value.to_clvm(&mut allocator)?;
    let puzzle_reveal = Program::from_clvm(&allocator, ptr)?;
    let puzzle_hash = tree_hash(&allocator, ptr);
    Ok((puzzle_hash.into(), puzzle_reveal))
}
