use std::ops::Deref;

use chia_bls::{sign, SecretKey, Signature};
use chia_protocol::{Bytes32, Coin, CoinSpend, Program};
use chia_puzzle_types::DeriveSynthetic;
use chia_sim_signer::AggSigConstants;
use chia_sim_types::Condition;

use crate::{puzzle_hash, standard_solution, NetworkError};

/// A puzzle that coins can be locked to, with its tree hash cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartCoinWrapper {
    genesis_challenge: Bytes32,
    puzzle: Program,
    puzzle_hash: Bytes32,
}

impl SmartCoinWrapper {
    pub fn new(genesis_challenge: Bytes32, puzzle: Program) -> Result<Self, NetworkError> {
        let puzzle_hash = puzzle_hash(&puzzle)?;
        Ok(Self {
            genesis_challenge,
            puzzle,
            puzzle_hash,
        })
    }

    pub fn genesis_challenge(&self) -> Bytes32 {
        self.genesis_challenge
    }

    pub fn puzzle(&self) -> &Program {
        &self.puzzle
    }

    pub fn puzzle_hash(&self) -> Bytes32 {
        self.puzzle_hash
    }

    /// The coin of `amount` mojos that spending `parent` would create with
    /// this puzzle.
    pub fn custom_coin(&self, parent: &Coin, amount: u64) -> CoinWrapper {
        self.wrap(Coin::new(parent.coin_id(), self.puzzle_hash, amount))
    }

    pub(crate) fn wrap(&self, coin: Coin) -> CoinWrapper {
        debug_assert_eq!(coin.puzzle_hash, self.puzzle_hash);
        CoinWrapper {
            coin,
            source: self.clone(),
        }
    }
}

/// A coin together with the puzzle it is locked by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinWrapper {
    coin: Coin,
    source: SmartCoinWrapper,
}

impl Deref for CoinWrapper {
    type Target = Coin;

    fn deref(&self) -> &Self::Target {
        &self.coin
    }
}

impl CoinWrapper {
    /// Wraps a coin, checking that the puzzle actually locks it.
    pub fn from_coin(coin: Coin, source: &SmartCoinWrapper) -> Option<Self> {
        (coin.puzzle_hash == source.puzzle_hash()).then(|| source.wrap(coin))
    }

    pub fn as_coin(&self) -> Coin {
        self.coin
    }

    pub fn puzzle(&self) -> &Program {
        self.source.puzzle()
    }

    pub fn puzzle_hash(&self) -> Bytes32 {
        self.source.puzzle_hash()
    }

    pub fn smart_coin(&self) -> SmartCoinWrapper {
        self.source.clone()
    }

    /// Spends this coin as a standard transaction that outputs `conditions`.
    ///
    /// The signature covers the delegated puzzle hash with `AGG_SIG_ME`
    /// semantics and is made with the synthetic key of `secret_key`.
    pub fn create_standard_spend(
        &self,
        secret_key: &SecretKey,
        conditions: &[Condition<Program>],
        constants: &AggSigConstants,
    ) -> Result<(CoinSpend, Signature), NetworkError> {
        let (solution, delegated_puzzle_hash) = standard_solution(conditions)?;

        let mut message = delegated_puzzle_hash.to_vec();
        message.extend_from_slice(self.coin.coin_id().as_ref());
        message.extend_from_slice(constants.agg_sig_me().as_ref());

        let signature = sign(&secret_key.derive_synthetic(), message);
        let coin_spend = CoinSpend::new(self.coin, self.puzzle().clone(), solution);

        Ok((coin_spend, signature))
    }
}
