use chia_bls::PublicKey;
use chia_consensus::make_aggsig_final_message::u64_to_bytes;
use chia_protocol::{Bytes, Bytes32, Coin};
use chia_sim_types::{AggSig, AggSigKind};

use crate::AggSigConstants;

/// A single BLS signature a coin spend needs, along with what it signs.
#[derive(Debug, Clone)]
pub struct RequiredBlsSignature {
    pub public_key: PublicKey,
    pub raw_message: Bytes,
    pub appended_info: Vec<u8>,
    pub domain_string: Option<Bytes32>,
}

impl RequiredBlsSignature {
    pub fn from_condition(coin: &Coin, condition: AggSig, constants: &AggSigConstants) -> Self {
        let appended_info = match condition.kind {
            AggSigKind::Parent => coin.parent_coin_info.to_vec(),
            AggSigKind::Puzzle => coin.puzzle_hash.to_vec(),
            AggSigKind::Amount => u64_to_bytes(coin.amount),
            AggSigKind::PuzzleAmount => {
                [coin.puzzle_hash.to_vec(), u64_to_bytes(coin.amount)].concat()
            }
            AggSigKind::ParentAmount => {
                [coin.parent_coin_info.to_vec(), u64_to_bytes(coin.amount)].concat()
            }
            AggSigKind::ParentPuzzle => {
                [coin.parent_coin_info.to_vec(), coin.puzzle_hash.to_vec()].concat()
            }
            AggSigKind::Unsafe => Vec::new(),
            AggSigKind::Me => coin.coin_id().to_vec(),
        };

        Self {
            public_key: condition.public_key,
            raw_message: condition.message,
            appended_info,
            domain_string: constants.domain(condition.kind),
        }
    }

    /// The full message to sign: `raw ++ appended info ++ domain`.
    pub fn message(&self) -> Vec<u8> {
        let mut message = Vec::from(self.raw_message.as_ref());
        message.extend(&self.appended_info);
        if let Some(domain_string) = self.domain_string {
            message.extend(domain_string.to_bytes());
        }
        message
    }
}
