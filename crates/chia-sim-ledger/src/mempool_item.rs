use chia_protocol::{Bytes32, Coin, SpendBundle};

/// A validated spend bundle waiting to be included in the next block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MempoolItem {
    pub spend_bundle: SpendBundle,
    pub spend_bundle_name: Bytes32,
    pub fee: u64,
    pub cost: u64,
    pub additions: Vec<Coin>,
    pub removals: Vec<Coin>,
}
