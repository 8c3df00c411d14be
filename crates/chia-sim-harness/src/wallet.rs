use chia_bls::{PublicKey, SecretKey, Signature};
use chia_consensus::consensus_constants::ConsensusConstants;
use chia_protocol::{Bytes32, Coin, CoinSpend, Program, SpendBundle};
use chia_sim_signer::{sign_coin_spends, AggSigConstants, SignerError};
use chia_sim_types::{announcement_id, Condition};

use crate::{
    aggregate_signatures, standard_puzzle, standard_solution, CoinPairSearch, CoinWrapper,
    KeyPair, Network, NetworkError, PaymentTarget, SmartCoinWrapper, SpendRequest, SpendResult,
};

/// A named actor that owns the coins locked by the standard puzzle of its
/// synthetic key.
///
/// The wallet itself is only an identity. Its coins are tracked by the
/// [`Network`] it was created by, which refreshes them after every block.
#[derive(Debug, Clone)]
pub struct Wallet {
    name: String,
    keys: KeyPair,
    smart_coin: SmartCoinWrapper,
    constants: AggSigConstants,
}

impl Wallet {
    pub(crate) fn new(
        name: &str,
        key_index: u32,
        constants: &ConsensusConstants,
    ) -> Result<Self, NetworkError> {
        let keys = KeyPair::new(key_index);
        let smart_coin = SmartCoinWrapper::new(
            constants.genesis_challenge,
            standard_puzzle(keys.synthetic_pk)?,
        )?;
        debug_assert_eq!(smart_coin.puzzle_hash(), keys.puzzle_hash);

        Ok(Self {
            name: name.to_string(),
            keys,
            smart_coin,
            constants: AggSigConstants::from(constants),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key_index(&self) -> u32 {
        self.keys.index
    }

    pub fn keys(&self) -> &KeyPair {
        &self.keys
    }

    pub fn pk(&self) -> PublicKey {
        self.keys.pk
    }

    pub fn sk(&self) -> &SecretKey {
        &self.keys.sk
    }

    pub fn puzzle(&self) -> &Program {
        self.smart_coin.puzzle()
    }

    pub fn puzzle_hash(&self) -> Bytes32 {
        self.keys.puzzle_hash
    }

    /// The wallet's standard puzzle, for locking coins to this wallet.
    pub fn smart_coin(&self) -> &SmartCoinWrapper {
        &self.smart_coin
    }

    pub fn pk_to_sk(&self, public_key: &PublicKey) -> Option<SecretKey> {
        self.keys.secret_key_for(public_key)
    }

    pub fn usable_coins(&self, network: &Network) -> Vec<CoinWrapper> {
        network.usable_coins(self)
    }

    pub fn balance(&self, network: &Network) -> u64 {
        network
            .usable_coins(self)
            .iter()
            .map(|coin| coin.amount)
            .sum()
    }

    /// Finds a single coin worth at least `amount`, combining the fewest,
    /// largest coins into one if no single coin is large enough.
    pub async fn choose_coin(
        &self,
        network: &mut Network,
        amount: u64,
    ) -> Result<Option<CoinWrapper>, NetworkError> {
        let attempts = self.usable_coins(network).len();

        for _ in 0..attempts {
            let mut search = CoinPairSearch::new(amount);
            search.extend(
                self.usable_coins(network)
                    .iter()
                    .map(CoinWrapper::as_coin),
            );

            let (coins, total) = search.result();
            if coins.is_empty() || total < u128::from(amount) {
                return Ok(None);
            }

            let mut coins: Vec<CoinWrapper> = coins
                .into_iter()
                .map(|coin| self.smart_coin.wrap(coin))
                .collect();

            if coins.len() == 1 {
                return Ok(coins.pop());
            }

            let result = self.combine_coins(network, &coins).await?;
            if let Some(error) = result.error {
                tracing::debug!(wallet = %self.name, %error, "could not combine coins");
                return Ok(None);
            }
        }

        if attempts > 0 {
            tracing::warn!(wallet = %self.name, amount, "coin selection did not converge");
        }

        Ok(None)
    }

    /// Merges `coins` into a single coin in one atomic bundle.
    ///
    /// The last coin creates the merged coin and announces its id. Every
    /// other coin asserts that announcement, so none of them can be spent
    /// without the rest.
    pub async fn combine_coins(
        &self,
        network: &mut Network,
        coins: &[CoinWrapper],
    ) -> Result<SpendResult, NetworkError> {
        let Some((last, rest)) = coins.split_last() else {
            return Err(NetworkError::EmptyCombine);
        };

        let beginning_balance = self.balance(network);
        let beginning_count = self.usable_coins(network).len();

        let total: u64 = coins.iter().map(|coin| coin.amount).sum();
        let final_coin = Coin::new(last.coin_id(), self.puzzle_hash(), total);
        let final_coin_id = final_coin.coin_id();

        let mut coin_spends = Vec::with_capacity(coins.len());
        let mut signatures = Vec::with_capacity(coins.len());

        let announcement = announcement_id(last.coin_id(), final_coin_id);
        let assertion = [Condition::<Program>::assert_coin_announcement(announcement)];

        for coin in rest {
            let (coin_spend, signature) =
                coin.create_standard_spend(self.sk(), &assertion, &self.constants)?;
            coin_spends.push(coin_spend);
            signatures.push(signature);
        }

        let (coin_spend, signature) = last.create_standard_spend(
            self.sk(),
            &[
                Condition::create_coin_announcement(final_coin_id.to_vec()),
                Condition::create_coin(self.puzzle_hash(), total),
            ],
            &self.constants,
        )?;
        coin_spends.push(coin_spend);
        signatures.push(signature);

        let result = network
            .push_tx(SpendBundle::new(
                coin_spends,
                aggregate_signatures(signatures),
            ))
            .await;

        let (expected_balance, expected_count) = if result.is_confirmed() {
            // The block confirming the combine pays its rewards to the sink.
            let (reward, reward_coins) = if network.reward_wallet().pk() == self.pk() {
                (network.config().ledger.block_reward(), 2)
            } else {
                (0, 0)
            };
            (
                beginning_balance + reward,
                beginning_count + reward_coins - rest.len(),
            )
        } else {
            (beginning_balance, beginning_count)
        };

        assert_eq!(
            self.balance(network),
            expected_balance,
            "combining coins changed the balance of {}",
            self.name
        );
        assert_eq!(
            self.usable_coins(network).len(),
            expected_count,
            "combining coins left {} with an unexpected number of coins",
            self.name
        );

        Ok(result.into())
    }

    /// Builds and signs a spend of `coin` without submitting it.
    ///
    /// Spends this wallet cannot sign for, including puzzles that fail to
    /// run with the given solution, get an empty signature.
    pub fn build_spend(
        &self,
        coin: &CoinWrapper,
        request: SpendRequest,
    ) -> Result<SpendBundle, NetworkError> {
        let solution = match request {
            SpendRequest::RawSolution(solution) => solution,
            SpendRequest::Conditions { mut conditions, remain } => {
                push_change(coin, &mut conditions, remain)?;
                standard_solution(&conditions)?.0
            }
            SpendRequest::Standard { to, amount, remain } => {
                let to = to.map_or(self.puzzle_hash(), |target| target.puzzle_hash());
                let mut conditions = vec![Condition::create_coin(to, amount)];
                push_change(coin, &mut conditions, remain)?;
                standard_solution(&conditions)?.0
            }
        };

        let coin_spend = CoinSpend::new(coin.as_coin(), coin.puzzle().clone(), solution);

        match sign_coin_spends(
            vec![coin_spend.clone()],
            |public_key| self.pk_to_sk(public_key),
            &self.constants,
        ) {
            Ok(spend_bundle) => Ok(spend_bundle),
            Err(error @ (SignerError::MissingKey(_) | SignerError::Condition(_))) => {
                tracing::debug!(wallet = %self.name, %error, "using an empty signature");
                Ok(SpendBundle::new(vec![coin_spend], Signature::default()))
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Builds a spend of `coin` and submits it to the network.
    pub async fn spend_coin(
        &self,
        network: &mut Network,
        coin: &CoinWrapper,
        request: SpendRequest,
    ) -> Result<SpendResult, NetworkError> {
        let spend_bundle = self.build_spend(coin, request)?;
        Ok(network.push_tx(spend_bundle).await.into())
    }

    /// Creates a coin of `amount` mojos locked by `smart_coin`, funded by
    /// `launcher` or by a coin chosen from this wallet.
    ///
    /// Returns `None` if the network rejects the launch.
    pub async fn launch_smart_coin(
        &self,
        network: &mut Network,
        smart_coin: &SmartCoinWrapper,
        amount: u64,
        launcher: Option<CoinWrapper>,
    ) -> Result<Option<CoinWrapper>, NetworkError> {
        let found = match launcher {
            Some(launcher) => launcher,
            None => self
                .choose_coin(network, amount)
                .await?
                .ok_or(NetworkError::InsufficientFunds(amount))?,
        };

        let mut conditions: Vec<Condition<Program>> =
            vec![Condition::create_coin(smart_coin.puzzle_hash(), amount)];
        if amount < found.amount {
            conditions.push(Condition::create_coin(
                self.puzzle_hash(),
                found.amount - amount,
            ));
        }

        let (coin_spend, signature) =
            found.create_standard_spend(self.sk(), &conditions, &self.constants)?;
        let result = network
            .push_tx(SpendBundle::new(vec![coin_spend], signature))
            .await;

        if let Some(error) = result.error() {
            tracing::debug!(wallet = %self.name, %error, "smart coin launch rejected");
            return Ok(None);
        }

        Ok(Some(smart_coin.custom_coin(&found, amount)))
    }

    /// Sends `amount` mojos to another wallet.
    pub async fn give_chia(
        &self,
        network: &mut Network,
        target: &Wallet,
        amount: u64,
    ) -> Result<Option<CoinWrapper>, NetworkError> {
        self.launch_smart_coin(network, target.smart_coin(), amount, None)
            .await
    }

    pub fn payment_target(&self) -> PaymentTarget {
        PaymentTarget::from(self)
    }
}

/// Sends whatever `conditions` leave of the coin to `remain`. Without a
/// `remain` target the difference is left to the ledger, as a fee or a
/// rejected overspend.
fn push_change(
    coin: &Coin,
    conditions: &mut Vec<Condition<Program>>,
    remain: Option<PaymentTarget>,
) -> Result<(), NetworkError> {
    let Some(remain) = remain else {
        return Ok(());
    };

    let spent: u128 = conditions
        .iter()
        .filter_map(|condition| match condition {
            Condition::CreateCoin(create_coin) => Some(u128::from(create_coin.amount)),
            _ => None,
        })
        .sum();

    let Some(change) = u128::from(coin.amount)
        .checked_sub(spent)
        .and_then(|change| u64::try_from(change).ok())
    else {
        return Err(NetworkError::AmountExceedsCoin {
            amount: u64::try_from(spent).unwrap_or(u64::MAX),
            coin_amount: coin.amount,
        });
    };

    conditions.push(Condition::create_coin(remain.puzzle_hash(), change));
    Ok(())
}
