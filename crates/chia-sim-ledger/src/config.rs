use std::time::Duration;

use chia_consensus::consensus_constants::{ConsensusConstants, TEST_CONSTANTS};

/// 18750 days and 61201 seconds after the epoch, which is past the
/// transaction freeze of the network the default constants describe.
pub const DEFAULT_START_TIME: Duration = Duration::from_secs(18_750 * 86_400 + 61_201);

/// The pool's share of the block reward, in mojos.
pub const POOL_REWARD: u64 = 1_750_000_000_000;

/// The farmer's share of the block reward, in mojos, before fees.
pub const FARMER_REWARD: u64 = 250_000_000_000;

#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub constants: ConsensusConstants,
    pub max_cost: u64,
    pub start_time: Duration,
    pub pool_reward: u64,
    pub farmer_reward: u64,
    pub rng_seed: u64,
}

impl LedgerConfig {
    pub fn block_reward(&self) -> u64 {
        self.pool_reward + self.farmer_reward
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            constants: TEST_CONSTANTS,
            max_cost: TEST_CONSTANTS.max_block_cost_clvm / 2,
            start_time: DEFAULT_START_TIME,
            pool_reward: POOL_REWARD,
            farmer_reward: FARMER_REWARD,
            rng_seed: 0,
        }
    }
}
