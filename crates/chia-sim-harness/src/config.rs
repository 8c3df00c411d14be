use std::time::Duration;

use chia_sim_ledger::LedgerConfig;

/// Seconds between blocks on mainnet.
pub const BLOCK_INTERVAL: Duration = Duration::from_millis(18_750);

#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub ledger: LedgerConfig,
    /// How far the clock moves after each farmed block. Must be non-zero.
    pub block_interval: Duration,
    /// Wallet key indexes are allocated as multiples of this.
    pub key_index_stride: u32,
    /// The name of the wallet that receives block rewards by default.
    pub reward_wallet_name: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            ledger: LedgerConfig::default(),
            block_interval: BLOCK_INTERVAL,
            key_index_stride: 1000,
            reward_wallet_name: "nobody".to_string(),
        }
    }
}
