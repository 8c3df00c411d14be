use chia_protocol::{Bytes32, Coin, CoinState};

/// The ledger's view of a single coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinRecord {
    pub coin: Coin,
    pub coinbase: bool,
    pub confirmed_block_index: u32,
    pub spent: bool,
    pub spent_block_index: u32,
    pub timestamp: u64,
}

impl CoinRecord {
    pub fn new(coin: Coin, coinbase: bool, confirmed_block_index: u32, timestamp: u64) -> Self {
        Self {
            coin,
            coinbase,
            confirmed_block_index,
            spent: false,
            spent_block_index: 0,
            timestamp,
        }
    }

    pub fn coin_id(&self) -> Bytes32 {
        self.coin.coin_id()
    }

    pub fn coin_state(&self) -> CoinState {
        CoinState::new(
            self.coin,
            self.spent.then_some(self.spent_block_index),
            Some(self.confirmed_block_index),
        )
    }
}
