use chia_protocol::{Bytes32, Coin};
use chia_sha2::Sha256;

/// A block the simulator has farmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRecord {
    pub height: u32,
    pub header_hash: Bytes32,
    pub prev_header_hash: Bytes32,
    pub timestamp: u64,
    pub farmer_puzzle_hash: Bytes32,
    pub fees: u64,
    pub reward_coins: Vec<Coin>,
    pub additions: Vec<Coin>,
    pub removals: Vec<Coin>,
}

/// A deterministic stand-in for the header hash of the block at `height`.
pub fn header_hash(height: u32) -> Bytes32 {
    let mut hasher = Sha256::new();
    hasher.update(height.to_be_bytes());
    hasher.finalize().into()
}
