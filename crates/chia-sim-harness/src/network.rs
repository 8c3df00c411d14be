use std::time::Duration;

use chia_bls::PublicKey;
use chia_protocol::{Bytes32, Coin, CoinSpend, SpendBundle};
use chia_sim_ledger::{BlockRecord, CoinRecord, MempoolInclusionStatus, SimClient};
use indexmap::IndexMap;

use crate::{CoinWrapper, NetworkConfig, NetworkError, PushTxResult, Wallet};

#[derive(Debug, Clone)]
struct WalletEntry {
    wallet: Wallet,
    usable_coins: Vec<CoinWrapper>,
}

/// A simulated network of wallets on top of a [`SimClient`].
///
/// Every accepted transaction is confirmed in its own block, and wallets'
/// usable coins are refreshed from the ledger after every block.
#[derive(Debug)]
pub struct Network {
    config: NetworkConfig,
    sim: SimClient,
    wallets: IndexMap<PublicKey, WalletEntry>,
    next_wallet_counter: u32,
    reward_wallet: Wallet,
}

impl Network {
    pub async fn create() -> Result<Self, NetworkError> {
        Self::with_config(NetworkConfig::default()).await
    }

    pub async fn with_config(config: NetworkConfig) -> Result<Self, NetworkError> {
        if config.block_interval.is_zero() {
            return Err(NetworkError::InvalidConfig("the block interval must be non-zero"));
        }

        if config.key_index_stride == 0 {
            return Err(NetworkError::InvalidConfig(
                "the key index stride must be non-zero",
            ));
        }

        let sim = SimClient::with_config(config.ledger.clone());
        let reward_wallet = Wallet::new(&config.reward_wallet_name, 0, &config.ledger.constants)?;

        let mut network = Self {
            config,
            sim,
            wallets: IndexMap::new(),
            next_wallet_counter: 1,
            reward_wallet: reward_wallet.clone(),
        };
        network.register(reward_wallet);

        tracing::info!(
            timestamp = network.sim.timestamp().await,
            "created simulated network"
        );

        Ok(network)
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// The underlying ledger client, shared with this network.
    pub fn sim(&self) -> &SimClient {
        &self.sim
    }

    /// The wallet that receives the rewards of blocks farmed by default.
    pub fn reward_wallet(&self) -> &Wallet {
        &self.reward_wallet
    }

    pub fn wallets(&self) -> impl Iterator<Item = &Wallet> {
        self.wallets.values().map(|entry| &entry.wallet)
    }

    /// Creates a wallet with the next unused key index and starts tracking
    /// its coins.
    pub fn make_wallet(&mut self, name: &str) -> Result<Wallet, NetworkError> {
        let key_index = self.next_wallet_counter * self.config.key_index_stride;
        let wallet = Wallet::new(name, key_index, &self.config.ledger.constants)?;
        self.next_wallet_counter += 1;
        self.register(wallet.clone());

        tracing::info!(name, key_index, puzzle_hash = %wallet.puzzle_hash(), "created wallet");

        Ok(wallet)
    }

    fn register(&mut self, wallet: Wallet) {
        self.wallets.insert(
            wallet.pk(),
            WalletEntry {
                wallet,
                usable_coins: Vec::new(),
            },
        );
    }

    /// The coins a wallet held as of the last farmed block.
    pub fn usable_coins(&self, wallet: &Wallet) -> Vec<CoinWrapper> {
        self.wallets
            .get(&wallet.pk())
            .map(|entry| entry.usable_coins.clone())
            .unwrap_or_default()
    }

    /// Farms a block that pays its rewards to the reward wallet.
    pub async fn farm_block(&mut self) -> (Vec<Coin>, Vec<Coin>) {
        self.farm_block_to(self.reward_wallet.puzzle_hash()).await
    }

    pub async fn farm_block_for(&mut self, farmer: &Wallet) -> (Vec<Coin>, Vec<Coin>) {
        self.farm_block_to(farmer.puzzle_hash()).await
    }

    async fn farm_block_to(&mut self, puzzle_hash: Bytes32) -> (Vec<Coin>, Vec<Coin>) {
        let (additions, removals) = self.sim.farm_block(puzzle_hash).await;

        for entry in self.wallets.values_mut() {
            entry.usable_coins = self
                .sim
                .get_coin_records_by_puzzle_hash(entry.wallet.puzzle_hash(), false)
                .await
                .into_iter()
                .map(|record| entry.wallet.smart_coin().wrap(record.coin))
                .collect();
        }

        self.sim.pass_time(self.config.block_interval).await;

        tracing::debug!(
            height = self.sim.height().await,
            additions = additions.len(),
            removals = removals.len(),
            "farmed block"
        );

        (additions, removals)
    }

    /// Submits a spend bundle and, if the mempool accepts it, confirms it in
    /// a new block.
    pub async fn push_tx(&mut self, spend_bundle: SpendBundle) -> PushTxResult {
        let ack = self.sim.push_tx(spend_bundle).await;

        if ack.status != MempoolInclusionStatus::Success as u8 {
            let error = ack
                .error
                .unwrap_or_else(|| format!("inclusion status {}", ack.status));
            tracing::debug!(txid = %ack.txid, %error, "transaction rejected");
            return PushTxResult::Rejected { error };
        }

        let (additions, removals) = self.farm_block().await;
        PushTxResult::Confirmed {
            additions,
            removals,
        }
    }

    /// Farms blocks until at least `duration` has passed, returning how
    /// many blocks were farmed.
    pub async fn skip_time(&mut self, duration: Duration) -> u32 {
        self.skip_time_to(duration, self.reward_wallet.puzzle_hash())
            .await
    }

    pub async fn skip_time_for(&mut self, duration: Duration, farmer: &Wallet) -> u32 {
        self.skip_time_to(duration, farmer.puzzle_hash()).await
    }

    async fn skip_time_to(&mut self, duration: Duration, puzzle_hash: Bytes32) -> u32 {
        let target = self.sim.time().await + duration;
        let mut blocks = 0;

        while self.sim.time().await < target {
            self.farm_block_to(puzzle_hash).await;
            blocks += 1;
        }

        blocks
    }

    pub async fn time(&self) -> Duration {
        self.sim.time().await
    }

    pub async fn timestamp(&self) -> u64 {
        self.sim.timestamp().await
    }

    pub async fn height(&self) -> u32 {
        self.sim.height().await
    }

    pub async fn block_record_by_height(&self, height: u32) -> Option<BlockRecord> {
        self.sim.get_block_record_by_height(height).await
    }

    pub async fn additions_and_removals(
        &self,
        height: u32,
    ) -> Result<(Vec<CoinRecord>, Vec<CoinRecord>), NetworkError> {
        Ok(self.sim.get_additions_and_removals(height).await?)
    }

    pub async fn coin_record_by_name(&self, coin_id: Bytes32) -> Option<CoinRecord> {
        self.sim.get_coin_record_by_name(coin_id).await
    }

    pub async fn coin_records_by_names(
        &self,
        coin_ids: &[Bytes32],
        include_spent: bool,
    ) -> Vec<CoinRecord> {
        self.sim
            .get_coin_records_by_names(coin_ids, include_spent)
            .await
    }

    pub async fn coin_records_by_parent_ids(
        &self,
        parent_ids: &[Bytes32],
        include_spent: bool,
    ) -> Vec<CoinRecord> {
        self.sim
            .get_coin_records_by_parent_ids(parent_ids, include_spent)
            .await
    }

    pub async fn puzzle_and_solution(&self, coin_id: Bytes32, height: u32) -> Option<CoinSpend> {
        self.sim.get_puzzle_and_solution(coin_id, height).await
    }
}

/// Creates a network with two wallets, alice and bob.
pub async fn setup() -> Result<(Network, Wallet, Wallet), NetworkError> {
    let mut network = Network::create().await?;
    let alice = network.make_wallet("alice")?;
    let bob = network.make_wallet("bob")?;
    Ok((network, alice, bob))
}
