use chia_bls::{aggregate_verify, PublicKey, Signature};
use chia_consensus::{
    allocator::make_allocator, owned_conditions::OwnedSpendBundleConditions,
    spendbundle_conditions::run_spendbundle, validation_error::ErrorCode,
};
use chia_protocol::{Bytes, SpendBundle};
use clvmr::LIMIT_HEAP;

use crate::LedgerConfig;

/// The result of running every coin spend in a bundle.
#[derive(Debug, Clone)]
pub struct BundleConditions {
    pub conditions: OwnedSpendBundleConditions,
    /// Every public key and message pair the bundle's signature has to cover.
    pub signed_messages: Vec<(PublicKey, Bytes)>,
}

impl BundleConditions {
    /// Runs the bundle under the ledger's cost limit and consensus constants,
    /// validating the conditions the spends output against each other.
    ///
    /// Conditions that depend on ledger state, such as which coins exist and
    /// the time locks, are not checked here.
    pub fn run(spend_bundle: &SpendBundle, config: &LedgerConfig) -> Result<Self, ErrorCode> {
        let mut allocator = make_allocator(LIMIT_HEAP);

        let (conditions, signed_messages) = run_spendbundle(
            &mut allocator,
            spend_bundle,
            config.max_cost,
            0,
            0,
            &config.constants,
        )
        .map_err(|error| error.1)?;

        Ok(Self {
            conditions: OwnedSpendBundleConditions::from(&allocator, conditions),
            signed_messages,
        })
    }

    /// Checks an aggregate signature against every required message, using
    /// the augmented scheme.
    pub fn verify_signature(&self, signature: &Signature) -> bool {
        aggregate_verify(
            signature,
            self.signed_messages
                .iter()
                .map(|(public_key, message)| (public_key, message.as_slice())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chia_bls::{sign, SecretKey};
    use chia_protocol::{Bytes32, Coin, CoinSpend};
    use chia_sim_types::{AggSig, AggSigKind, Condition};
    use clvmr::NodePtr;

    use crate::test_utils::{to_program, to_puzzle};

    #[test]
    fn test_signed_messages() -> anyhow::Result<()> {
        let sk = SecretKey::from_seed(&[7; 32]);
        let pk = sk.public_key();
        let (puzzle_hash, puzzle_reveal) = to_puzzle(1)?;
        let coin = Coin::new(Bytes32::default(), puzzle_hash, 100);

        let conditions: Vec<Condition<NodePtr>> = vec![
            Condition::AggSig(AggSig::new(
                AggSigKind::Unsafe,
                pk,
                b"hello".to_vec().into(),
            )),
            Condition::create_coin(puzzle_hash, 100),
        ];
        let spend_bundle = SpendBundle::new(
            vec![CoinSpend::new(coin, puzzle_reveal, to_program(conditions)?)],
            Signature::default(),
        );

        let bundle = BundleConditions::run(&spend_bundle, &LedgerConfig::default())
            .map_err(|code| anyhow::anyhow!("{code:?}"))?;
        assert_eq!(
            bundle.signed_messages,
            vec![(pk, Bytes::from(b"hello".to_vec()))]
        );
        assert_eq!(bundle.conditions.spends.len(), 1);
        assert_eq!(bundle.conditions.removal_amount, 100);
        assert_eq!(bundle.conditions.addition_amount, 100);

        assert!(bundle.verify_signature(&sign(&sk, b"hello")));
        assert!(!bundle.verify_signature(&sign(&sk, b"world")));
        assert!(!bundle.verify_signature(&Signature::default()));

        Ok(())
    }
}
