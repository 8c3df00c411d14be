use std::{collections::HashSet, time::Duration};

use chia_consensus::{
    owned_conditions::{OwnedSpendBundleConditions, OwnedSpendConditions},
    validation_error::ErrorCode,
};
use chia_protocol::{Bytes32, Coin, CoinSpend, SpendBundle};
use indexmap::IndexMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    create_farmer_coin, create_pool_coin, header_hash, BlockRecord, BundleConditions,
    CoinRecord, LedgerConfig, LedgerError, MempoolItem,
};

/// An in-memory coin-set ledger.
///
/// Spend bundles are validated and queued with [`SpendSim::push_tx`], and
/// only take effect once a block is farmed with [`SpendSim::farm_block`].
/// Time never passes on its own, it has to be advanced with
/// [`SpendSim::pass_time`].
#[derive(Debug, Clone)]
pub struct SpendSim {
    config: LedgerConfig,
    rng: ChaCha8Rng,
    height: u32,
    time: Duration,
    coin_records: IndexMap<Bytes32, CoinRecord>,
    blocks: Vec<BlockRecord>,
    mempool: IndexMap<Bytes32, MempoolItem>,
    coin_spends: IndexMap<Bytes32, (u32, CoinSpend)>,
}

impl Default for SpendSim {
    fn default() -> Self {
        Self::with_config(LedgerConfig::default())
    }
}

impl SpendSim {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            height: 0,
            time: config.start_time,
            coin_records: IndexMap::new(),
            blocks: Vec::new(),
            mempool: IndexMap::new(),
            coin_spends: IndexMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// The height of the next block to be farmed.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn time(&self) -> Duration {
        self.time
    }

    /// The current time in whole seconds, as stamped on new coin records.
    pub fn timestamp(&self) -> u64 {
        self.time.as_secs()
    }

    pub fn pass_time(&mut self, duration: Duration) {
        self.time += duration;
    }

    pub fn peak(&self) -> Option<&BlockRecord> {
        self.blocks.last()
    }

    /// Creates a coin out of thin air, confirmed at the current height.
    pub fn mint_coin(&mut self, puzzle_hash: Bytes32, amount: u64) -> Coin {
        let coin = Coin::new(Bytes32::new(self.rng.gen()), puzzle_hash, amount);
        let record = CoinRecord::new(coin, false, self.height, self.timestamp());
        self.coin_records.insert(coin.coin_id(), record);
        coin
    }

    /// Validates a spend bundle against the current state of the ledger and
    /// adds it to the mempool. Returns the queued mempool item.
    pub fn push_tx(&mut self, spend_bundle: SpendBundle) -> Result<MempoolItem, LedgerError> {
        let spend_bundle_name = spend_bundle.name();

        let result = self.validate(&spend_bundle);

        let (conditions, additions, removals, fee) = match result {
            Ok(validated) => validated,
            Err(error) => {
                tracing::debug!("rejected spend bundle {spend_bundle_name}: {error}");
                return Err(error);
            }
        };

        tracing::debug!(
            "added spend bundle {spend_bundle_name} to the mempool with {} removals and a fee of {fee}",
            removals.len()
        );

        let item = MempoolItem {
            spend_bundle,
            spend_bundle_name,
            fee,
            cost: conditions.cost,
            additions,
            removals,
        };
        self.mempool.insert(spend_bundle_name, item.clone());

        Ok(item)
    }

    fn validate(
        &self,
        spend_bundle: &SpendBundle,
    ) -> Result<(OwnedSpendBundleConditions, Vec<Coin>, Vec<Coin>, u64), LedgerError> {
        if spend_bundle.coin_spends.is_empty() {
            return Err(ErrorCode::InvalidSpendBundle.into());
        }

        let bundle = BundleConditions::run(spend_bundle, &self.config)?;

        if !bundle.verify_signature(&spend_bundle.aggregated_signature) {
            return Err(ErrorCode::BadAggregateSignature.into());
        }

        let conditions = bundle.conditions;

        let puzzle_hashes: HashSet<Bytes32> = conditions
            .spends
            .iter()
            .map(|spend| spend.puzzle_hash)
            .collect();

        let bundle_puzzle_hashes: HashSet<Bytes32> = spend_bundle
            .coin_spends
            .iter()
            .map(|cs| cs.coin.puzzle_hash)
            .collect();

        if puzzle_hashes != bundle_puzzle_hashes {
            return Err(ErrorCode::InvalidSpendBundle.into());
        }

        let additions: Vec<Coin> = conditions
            .spends
            .iter()
            .flat_map(|spend| {
                spend
                    .create_coin
                    .iter()
                    .map(|new_coin| Coin::new(spend.coin_id, new_coin.0, new_coin.1))
            })
            .collect();

        let ephemeral: HashSet<Bytes32> = additions.iter().map(Coin::coin_id).collect();

        let pending: HashSet<Bytes32> = self
            .mempool
            .values()
            .flat_map(|item| item.removals.iter().map(Coin::coin_id))
            .collect();

        let now = self.timestamp();
        let mut removals = Vec::with_capacity(conditions.spends.len());

        for spend in &conditions.spends {
            let (confirmed_height, confirmed_timestamp) = if ephemeral.contains(&spend.coin_id) {
                (self.height, now)
            } else {
                let record = self
                    .coin_records
                    .get(&spend.coin_id)
                    .ok_or(ErrorCode::UnknownUnspent)?;

                if record.spent || pending.contains(&spend.coin_id) {
                    return Err(ErrorCode::DoubleSpend.into());
                }

                (record.confirmed_block_index, record.timestamp)
            };

            check_coin_locks(spend, confirmed_height, confirmed_timestamp, self.height, now)?;

            removals.push(Coin::new(
                spend.parent_id,
                spend.puzzle_hash,
                spend.coin_amount,
            ));
        }

        check_bundle_locks(&conditions, self.height, now)?;

        let fee = conditions
            .removal_amount
            .checked_sub(conditions.addition_amount)
            .and_then(|fee| u64::try_from(fee).ok())
            .ok_or(ErrorCode::MintingCoin)?;

        Ok((conditions, additions, removals, fee))
    }

    /// Farms a block containing every mempool item, in the order they were
    /// added. The pool and farmer reward coins go to `puzzle_hash`, and the
    /// farmer coin also collects the fees.
    ///
    /// Returns the coins the transactions in the block created and spent,
    /// not including the reward coins.
    pub fn farm_block(&mut self, puzzle_hash: Bytes32) -> (Vec<Coin>, Vec<Coin>) {
        let height = self.height;
        let timestamp = self.timestamp();
        let genesis_challenge = self.config.constants.genesis_challenge;

        let items: Vec<MempoolItem> = self.mempool.drain(..).map(|(_, item)| item).collect();
        let fees: u64 = items.iter().map(|item| item.fee).sum();

        let reward_coins = vec![
            create_pool_coin(
                height,
                puzzle_hash,
                self.config.pool_reward,
                genesis_challenge,
            ),
            create_farmer_coin(
                height,
                puzzle_hash,
                self.config.farmer_reward + fees,
                genesis_challenge,
            ),
        ];

        for coin in &reward_coins {
            self.coin_records
                .insert(coin.coin_id(), CoinRecord::new(*coin, true, height, timestamp));
        }

        let mut additions = Vec::new();
        let mut removals = Vec::new();

        for item in items {
            for coin in &item.additions {
                self.coin_records.insert(
                    coin.coin_id(),
                    CoinRecord::new(*coin, false, height, timestamp),
                );
            }

            for coin in &item.removals {
                if let Some(record) = self.coin_records.get_mut(&coin.coin_id()) {
                    record.spent = true;
                    record.spent_block_index = height;
                }
            }

            for coin_spend in item.spend_bundle.coin_spends {
                self.coin_spends
                    .insert(coin_spend.coin.coin_id(), (height, coin_spend));
            }

            additions.extend(item.additions);
            removals.extend(item.removals);
        }

        let prev_header_hash = self
            .blocks
            .last()
            .map_or(Bytes32::default(), |block| block.header_hash);

        self.blocks.push(BlockRecord {
            height,
            header_hash: header_hash(height),
            prev_header_hash,
            timestamp,
            farmer_puzzle_hash: puzzle_hash,
            fees,
            reward_coins,
            additions: additions.clone(),
            removals: removals.clone(),
        });

        self.height += 1;

        tracing::debug!(
            "farmed block {height} with {} additions, {} removals and {fees} in fees",
            additions.len(),
            removals.len()
        );

        (additions, removals)
    }

    pub fn coin_record(&self, coin_id: Bytes32) -> Option<CoinRecord> {
        self.coin_records.get(&coin_id).copied()
    }

    pub fn coin_records_by_names(
        &self,
        coin_ids: &[Bytes32],
        include_spent: bool,
    ) -> Vec<CoinRecord> {
        coin_ids
            .iter()
            .filter_map(|coin_id| self.coin_records.get(coin_id))
            .filter(|record| include_spent || !record.spent)
            .copied()
            .collect()
    }

    pub fn coin_records_by_puzzle_hash(
        &self,
        puzzle_hash: Bytes32,
        include_spent: bool,
    ) -> Vec<CoinRecord> {
        self.filter_records(include_spent, |record| {
            record.coin.puzzle_hash == puzzle_hash
        })
    }

    pub fn coin_records_by_parent_ids(
        &self,
        parent_ids: &[Bytes32],
        include_spent: bool,
    ) -> Vec<CoinRecord> {
        self.filter_records(include_spent, |record| {
            parent_ids.contains(&record.coin.parent_coin_info)
        })
    }

    fn filter_records(
        &self,
        include_spent: bool,
        predicate: impl Fn(&CoinRecord) -> bool,
    ) -> Vec<CoinRecord> {
        self.coin_records
            .values()
            .filter(|record| (include_spent || !record.spent) && predicate(record))
            .copied()
            .collect()
    }

    pub fn block_record(&self, height: u32) -> Option<&BlockRecord> {
        self.blocks.get(height as usize)
    }

    /// The records of every coin created and spent in the block at `height`.
    /// Unlike [`BlockRecord::additions`], this includes the reward coins.
    pub fn additions_and_removals(
        &self,
        height: u32,
    ) -> Result<(Vec<CoinRecord>, Vec<CoinRecord>), LedgerError> {
        if height >= self.height {
            return Err(LedgerError::UnknownBlock(height));
        }

        let additions = self.filter_records(true, |record| {
            record.confirmed_block_index == height
        });
        let removals = self.filter_records(true, |record| {
            record.spent && record.spent_block_index == height
        });

        Ok((additions, removals))
    }

    /// The coin spend that spent `coin_id` in the block at `height`.
    pub fn puzzle_and_solution(&self, coin_id: Bytes32, height: u32) -> Option<&CoinSpend> {
        self.coin_spends
            .get(&coin_id)
            .filter(|(spent_height, _)| *spent_height == height)
            .map(|(_, coin_spend)| coin_spend)
    }

    pub fn mempool_items(&self) -> impl Iterator<Item = &MempoolItem> {
        self.mempool.values()
    }
}

fn check_coin_locks(
    spend: &OwnedSpendConditions,
    confirmed_height: u32,
    confirmed_timestamp: u64,
    height: u32,
    now: u64,
) -> Result<(), ErrorCode> {
    if let Some(relative) = spend.height_relative {
        if height < confirmed_height.saturating_add(relative) {
            return Err(ErrorCode::AssertHeightRelativeFailed);
        }
    }

    if let Some(relative) = spend.seconds_relative {
        if now < confirmed_timestamp.saturating_add(relative) {
            return Err(ErrorCode::AssertSecondsRelativeFailed);
        }
    }

    if let Some(relative) = spend.before_height_relative {
        if height >= confirmed_height.saturating_add(relative) {
            return Err(ErrorCode::AssertBeforeHeightRelativeFailed);
        }
    }

    if let Some(relative) = spend.before_seconds_relative {
        if now >= confirmed_timestamp.saturating_add(relative) {
            return Err(ErrorCode::AssertBeforeSecondsRelativeFailed);
        }
    }

    if spend
        .birth_height
        .is_some_and(|birth| birth != confirmed_height)
    {
        return Err(ErrorCode::AssertMyBirthHeightFailed);
    }

    if spend
        .birth_seconds
        .is_some_and(|birth| birth != confirmed_timestamp)
    {
        return Err(ErrorCode::AssertMyBirthSecondsFailed);
    }

    Ok(())
}

fn check_bundle_locks(
    conditions: &OwnedSpendBundleConditions,
    height: u32,
    now: u64,
) -> Result<(), ErrorCode> {
    if height < conditions.height_absolute {
        return Err(ErrorCode::AssertHeightAbsoluteFailed);
    }

    if now < conditions.seconds_absolute {
        return Err(ErrorCode::AssertSecondsAbsoluteFailed);
    }

    if conditions
        .before_height_absolute
        .is_some_and(|before| height >= before)
    {
        return Err(ErrorCode::AssertBeforeHeightAbsoluteFailed);
    }

    if conditions
        .before_seconds_absolute
        .is_some_and(|before| now >= before)
    {
        return Err(ErrorCode::AssertBeforeSecondsAbsoluteFailed);
    }

    Ok(())
}
