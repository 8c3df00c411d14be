use chia_bls::PublicKey;
use chia_protocol::{Bytes32, CoinSpend};
use chia_sim_types::coin_spend_conditions;
use clvmr::Allocator;

use crate::{AggSigConstants, RequiredBlsSignature, SignerError};

/// A signature that a specific coin spend in a bundle requires.
#[derive(Debug, Clone)]
pub struct RequiredSignature {
    pub coin_id: Bytes32,
    pub bls: RequiredBlsSignature,
}

impl RequiredSignature {
    pub fn public_key(&self) -> &PublicKey {
        &self.bls.public_key
    }

    pub fn final_message(&self) -> Vec<u8> {
        self.bls.message()
    }

    /// Runs the coin spend and collects every AGG_SIG condition it outputs.
    pub fn from_coin_spend(
        allocator: &mut Allocator,
        coin_spend: &CoinSpend,
        constants: &AggSigConstants,
    ) -> Result<Vec<Self>, SignerError> {
        let coin_id = coin_spend.coin.coin_id();
        let mut result = Vec::new();

        for condition in coin_spend_conditions(allocator, coin_spend)? {
            let Some(agg_sig) = condition.into_agg_sig() else {
                continue;
            };

            if agg_sig.public_key.is_inf() {
                return Err(SignerError::InfinityPublicKey);
            }

            result.push(Self {
                coin_id,
                bls: RequiredBlsSignature::from_condition(&coin_spend.coin, agg_sig, constants),
            });
        }

        Ok(result)
    }

    /// Collects the required signatures of every coin spend, in order.
    /// Aggregated together, their signatures sign the whole bundle.
    pub fn from_coin_spends(
        allocator: &mut Allocator,
        coin_spends: &[CoinSpend],
        constants: &AggSigConstants,
    ) -> Result<Vec<Self>, SignerError> {
        let mut required_signatures = Vec::new();
        for coin_spend in coin_spends {
            required_signatures.extend(Self::from_coin_spend(allocator, coin_spend, constants)?);
        }
        Ok(required_signatures)
    }
}
