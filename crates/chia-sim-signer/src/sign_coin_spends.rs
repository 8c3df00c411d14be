use chia_bls::{sign, PublicKey, SecretKey, Signature};
use chia_protocol::{CoinSpend, SpendBundle};
use clvmr::Allocator;

use crate::{AggSigConstants, RequiredSignature, SignerError};

/// Signs every AGG_SIG condition the coin spends output and bundles them.
///
/// The resolver maps each required public key to its secret key. A key the
/// resolver can't find fails the whole bundle with [`SignerError::MissingKey`].
pub fn sign_coin_spends(
    coin_spends: Vec<CoinSpend>,
    resolver: impl Fn(&PublicKey) -> Option<SecretKey>,
    constants: &AggSigConstants,
) -> Result<SpendBundle, SignerError> {
    let mut allocator = Allocator::new();

    let required_signatures =
        RequiredSignature::from_coin_spends(&mut allocator, &coin_spends, constants)?;

    let mut aggregated_signature = Signature::default();

    for required in required_signatures {
        let pk = required.public_key();
        let sk = resolver(pk).ok_or_else(|| SignerError::MissingKey(*pk))?;
        aggregated_signature += &sign(&sk, required.final_message());
    }

    Ok(SpendBundle::new(coin_spends, aggregated_signature))
}

#[cfg(test)]
mod tests {
    use super::*;

    use chia_bls::aggregate_verify;
    use chia_consensus::consensus_constants::TEST_CONSTANTS;
    use chia_protocol::{Bytes, Bytes32, Coin, Program};
    use chia_sim_types::{AggSig, AggSigKind, Condition};
    use clvm_traits::{FromClvm, ToClvm};
    use clvmr::NodePtr;

    fn pay_to_conditions(
        coin: Coin,
        conditions: Vec<Condition<NodePtr>>,
        allocator: &mut Allocator,
    ) -> anyhow::Result<CoinSpend> {
        let puzzle = 1.to_clvm(allocator)?;
        let solution = conditions.to_clvm(allocator)?;
        Ok(CoinSpend::new(
            coin,
            Program::from_clvm(allocator, puzzle)?,
            Program::from_clvm(allocator, solution)?,
        ))
    }

    #[test]
    fn test_sign_agg_sig_me() -> anyhow::Result<()> {
        let mut allocator = Allocator::new();
        let constants = AggSigConstants::from(&TEST_CONSTANTS);

        let sk = SecretKey::from_seed(&[7; 32]);
        let pk = sk.public_key();
        let coin = Coin::new(Bytes32::new([1; 32]), Bytes32::new([2; 32]), 100);
        let message = Bytes::new(b"hello".to_vec());

        let coin_spend = pay_to_conditions(
            coin,
            vec![Condition::AggSig(AggSig::new(
                AggSigKind::Me,
                pk,
                message.clone(),
            ))],
            &mut allocator,
        )?;

        let bundle = sign_coin_spends(
            vec![coin_spend],
            |key| (key == &pk).then(|| sk.clone()),
            &constants,
        )?;

        let expected = [
            message.to_vec(),
            coin.coin_id().to_vec(),
            constants.agg_sig_me().to_vec(),
        ]
        .concat();

        assert!(aggregate_verify(
            &bundle.aggregated_signature,
            [(&pk, expected.as_slice())]
        ));

        Ok(())
    }

    #[test]
    fn test_missing_key() -> anyhow::Result<()> {
        let mut allocator = Allocator::new();
        let pk = SecretKey::from_seed(&[1; 32]).public_key();
        let coin = Coin::new(Bytes32::default(), Bytes32::default(), 1);

        let coin_spend = pay_to_conditions(
            coin,
            vec![Condition::AggSig(AggSig::new(
                AggSigKind::Unsafe,
                pk,
                Bytes::new(vec![1]),
            ))],
            &mut allocator,
        )?;

        let result = sign_coin_spends(
            vec![coin_spend],
            |_| None,
            &AggSigConstants::from(&TEST_CONSTANTS),
        );
        assert!(matches!(result, Err(SignerError::MissingKey(_))));

        Ok(())
    }

    #[test]
    fn test_no_signatures_required() -> anyhow::Result<()> {
        let mut allocator = Allocator::new();
        let coin = Coin::new(Bytes32::default(), Bytes32::default(), 1);
        let coin_spend = pay_to_conditions(
            coin,
            vec![Condition::create_coin(Bytes32::default(), 1)],
            &mut allocator,
        )?;

        let bundle = sign_coin_spends(
            vec![coin_spend],
            |_| None,
            &AggSigConstants::from(&TEST_CONSTANTS),
        )?;
        assert_eq!(bundle.aggregated_signature, Signature::default());

        Ok(())
    }
}
