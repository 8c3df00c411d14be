use std::{ops::Deref, sync::Arc, time::Duration};

use chia_protocol::{Bytes32, Coin, CoinSpend, SpendBundle, TransactionAck};
use tokio::sync::Mutex;

use crate::{BlockRecord, CoinRecord, LedgerConfig, LedgerError, MempoolItem, SpendSim};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MempoolInclusionStatus {
    Success = 1,
    Pending = 2,
    Failed = 3,
}

/// A cloneable handle to a shared [`SpendSim`].
///
/// Each call locks the simulator for the duration of a single operation.
#[derive(Debug, Default, Clone)]
pub struct SimClient {
    sim: Arc<Mutex<SpendSim>>,
}

impl Deref for SimClient {
    type Target = Mutex<SpendSim>;

    fn deref(&self) -> &Self::Target {
        &self.sim
    }
}

impl SimClient {
    pub fn new(sim: SpendSim) -> Self {
        Self {
            sim: Arc::new(Mutex::new(sim)),
        }
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self::new(SpendSim::with_config(config))
    }

    pub async fn config(&self) -> LedgerConfig {
        self.sim.lock().await.config().clone()
    }

    /// Submits a spend bundle to the mempool. Validation failures are
    /// reported in the acknowledgement rather than as an error.
    pub async fn push_tx(&self, spend_bundle: SpendBundle) -> TransactionAck {
        let txid = spend_bundle.name();

        match self.sim.lock().await.push_tx(spend_bundle) {
            Ok(_) => TransactionAck::new(txid, MempoolInclusionStatus::Success as u8, None),
            Err(error) => {
                let error = match error {
                    LedgerError::Validation(code) => format!("{code:?}"),
                    LedgerError::UnknownBlock(_) => error.to_string(),
                };
                TransactionAck::new(txid, MempoolInclusionStatus::Failed as u8, Some(error))
            }
        }
    }

    pub async fn farm_block(&self, puzzle_hash: Bytes32) -> (Vec<Coin>, Vec<Coin>) {
        self.sim.lock().await.farm_block(puzzle_hash)
    }

    pub async fn pass_time(&self, duration: Duration) {
        self.sim.lock().await.pass_time(duration);
    }

    pub async fn mint_coin(&self, puzzle_hash: Bytes32, amount: u64) -> Coin {
        self.sim.lock().await.mint_coin(puzzle_hash, amount)
    }

    pub async fn height(&self) -> u32 {
        self.sim.lock().await.height()
    }

    pub async fn time(&self) -> Duration {
        self.sim.lock().await.time()
    }

    pub async fn timestamp(&self) -> u64 {
        self.sim.lock().await.timestamp()
    }

    pub async fn get_peak(&self) -> Option<BlockRecord> {
        self.sim.lock().await.peak().cloned()
    }

    pub async fn get_coin_record_by_name(&self, coin_id: Bytes32) -> Option<CoinRecord> {
        self.sim.lock().await.coin_record(coin_id)
    }

    pub async fn get_coin_records_by_names(
        &self,
        coin_ids: &[Bytes32],
        include_spent: bool,
    ) -> Vec<CoinRecord> {
        self.sim
            .lock()
            .await
            .coin_records_by_names(coin_ids, include_spent)
    }

    pub async fn get_coin_records_by_puzzle_hash(
        &self,
        puzzle_hash: Bytes32,
        include_spent: bool,
    ) -> Vec<CoinRecord> {
        self.sim
            .lock()
            .await
            .coin_records_by_puzzle_hash(puzzle_hash, include_spent)
    }

    pub async fn get_coin_records_by_parent_ids(
        &self,
        parent_ids: &[Bytes32],
        include_spent: bool,
    ) -> Vec<CoinRecord> {
        self.sim
            .lock()
            .await
            .coin_records_by_parent_ids(parent_ids, include_spent)
    }

    pub async fn get_block_record_by_height(&self, height: u32) -> Option<BlockRecord> {
        self.sim.lock().await.block_record(height).cloned()
    }

    pub async fn get_additions_and_removals(
        &self,
        height: u32,
    ) -> Result<(Vec<CoinRecord>, Vec<CoinRecord>), LedgerError> {
        self.sim.lock().await.additions_and_removals(height)
    }

    pub async fn get_puzzle_and_solution(&self, coin_id: Bytes32, height: u32) -> Option<CoinSpend> {
        self.sim
            .lock()
            .await
            .puzzle_and_solution(coin_id, height)
            .cloned()
    }

    pub async fn get_all_mempool_items(&self) -> Vec<MempoolItem> {
        self.sim.lock().await.mempool_items().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chia_bls::Signature;

    use crate::test_utils::{to_program, to_puzzle};

    #[tokio::test]
    async fn test_push_tx_ack() -> anyhow::Result<()> {
        let client = SimClient::default();
        let (puzzle_hash, puzzle_reveal) = to_puzzle(1)?;

        let empty_bundle = SpendBundle::new(Vec::new(), Signature::default());
        let ack = client.push_tx(empty_bundle.clone()).await;
        assert_eq!(ack.status, MempoolInclusionStatus::Failed as u8);
        assert_eq!(ack.txid, empty_bundle.name());
        assert_eq!(ack.error.as_deref(), Some("InvalidSpendBundle"));

        let coin = client.mint_coin(puzzle_hash, 0).await;
        let spend_bundle = SpendBundle::new(
            vec![CoinSpend::new(coin, puzzle_reveal, to_program(())?)],
            Signature::default(),
        );

        let ack = client.push_tx(spend_bundle).await;
        assert_eq!(ack.status, MempoolInclusionStatus::Success as u8);
        assert_eq!(ack.error, None);
        assert_eq!(client.get_all_mempool_items().await.len(), 1);

        let (_, removals) = client.farm_block(Bytes32::default()).await;
        assert_eq!(removals, vec![coin]);
        assert!(client.get_all_mempool_items().await.is_empty());
        assert_eq!(client.height().await, 1);
        assert_eq!(
            client
                .get_peak()
                .await
                .map(|block| block.height),
            Some(0)
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_shared_state() {
        let client = SimClient::default();
        let other = client.clone();

        let before = client.timestamp().await;
        other.pass_time(Duration::from_secs(100)).await;
        assert_eq!(client.timestamp().await, before + 100);

        let coin = other.mint_coin(Bytes32::default(), 5).await;
        let record = client
            .get_coin_record_by_name(coin.coin_id())
            .await
            .expect("missing coin");
        assert_eq!(record.coin, coin);
        assert!(!record.spent);
    }
}
