use chia_consensus::validation_error::ErrorCode;
use chia_protocol::Coin;
use chia_sim_harness::{setup, NetworkError, PaymentTarget, SpendRequest};
use chia_sim_ledger::{FARMER_REWARD, POOL_REWARD};
use chia_sim_types::Condition;
use rstest::rstest;

const BLOCK_REWARD: u64 = POOL_REWARD + FARMER_REWARD;

#[tokio::test]
async fn test_setup() -> anyhow::Result<()> {
    let (mut network, alice, bob) = setup().await?;

    assert_eq!(network.reward_wallet().key_index(), 0);
    assert_eq!(alice.key_index(), 1000);
    assert_eq!(bob.key_index(), 2000);
    assert_eq!(network.wallets().count(), 3);

    let start = network.timestamp().await;
    network.farm_block_for(&alice).await;

    assert_eq!(network.height().await, 1);
    assert_eq!(network.timestamp().await, start + 18);
    assert_eq!(alice.balance(&network), BLOCK_REWARD);
    assert_eq!(alice.usable_coins(&network).len(), 2);
    assert_eq!(bob.balance(&network), 0);

    Ok(())
}

#[tokio::test]
async fn test_give_chia() -> anyhow::Result<()> {
    let (mut network, alice, bob) = setup().await?;
    network.farm_block_for(&alice).await;

    let coin = alice
        .give_chia(&mut network, &bob, 100)
        .await?
        .expect("the transfer was rejected");

    assert_eq!(coin.amount, 100);
    assert_eq!(coin.puzzle_hash, bob.puzzle_hash());
    assert_eq!(bob.balance(&network), 100);
    assert_eq!(alice.balance(&network), BLOCK_REWARD - 100);
    assert_eq!(bob.usable_coins(&network), vec![coin]);

    let error = bob
        .give_chia(&mut network, &alice, 101)
        .await
        .expect_err("bob cannot afford this");
    assert!(matches!(error, NetworkError::InsufficientFunds(101)));

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_multispend(
    #[values(1, 2, 3, 4)] blocks: u64,
    #[values(1, 250_000_000_000, 1_750_000_000_001)] amount: u64,
) -> anyhow::Result<()> {
    let (mut network, alice, bob) = setup().await?;

    for _ in 0..blocks {
        network.farm_block_for(&alice).await;
    }

    let total = blocks * BLOCK_REWARD;
    assert_eq!(alice.balance(&network), total);

    alice
        .give_chia(&mut network, &bob, amount)
        .await?
        .expect("the transfer was rejected");

    assert_eq!(bob.balance(&network), amount);
    assert_eq!(alice.balance(&network), total - amount);

    Ok(())
}

#[tokio::test]
async fn test_choose_coin() -> anyhow::Result<()> {
    let (mut network, alice, _bob) = setup().await?;
    network.farm_block_for(&alice).await;

    let height = network.height().await;
    let coin = alice
        .choose_coin(&mut network, FARMER_REWARD)
        .await?
        .expect("no coin was chosen");
    assert_eq!(coin.amount, POOL_REWARD);
    assert_eq!(network.height().await, height);

    let coin = alice
        .choose_coin(&mut network, BLOCK_REWARD)
        .await?
        .expect("no coin was chosen");
    assert_eq!(coin.amount, BLOCK_REWARD);
    assert_eq!(network.height().await, height + 1);
    assert_eq!(alice.usable_coins(&network), vec![coin]);

    assert_eq!(alice.choose_coin(&mut network, BLOCK_REWARD + 1).await?, None);

    Ok(())
}

#[tokio::test]
async fn test_combine_coins() -> anyhow::Result<()> {
    let (mut network, alice, _bob) = setup().await?;
    network.farm_block_for(&alice).await;
    network.farm_block_for(&alice).await;

    let coins = alice.usable_coins(&network);
    assert_eq!(coins.len(), 4);

    let result = alice.combine_coins(&mut network, &coins).await?;
    assert!(result.is_ok());
    assert_eq!(
        result.find_standard_coins(alice.puzzle_hash()),
        alice
            .usable_coins(&network)
            .iter()
            .map(|coin| coin.as_coin())
            .collect::<Vec<_>>()
    );
    assert_eq!(alice.balance(&network), 2 * BLOCK_REWARD);

    // The original coins are already spent, so nothing changes.
    let result = alice.combine_coins(&mut network, &coins).await?;
    assert!(!result.is_ok());
    assert!(result.outputs.is_empty());
    assert_eq!(alice.usable_coins(&network).len(), 1);
    assert_eq!(alice.balance(&network), 2 * BLOCK_REWARD);

    assert!(matches!(
        alice.combine_coins(&mut network, &[]).await,
        Err(NetworkError::EmptyCombine)
    ));

    Ok(())
}

#[tokio::test]
async fn test_reward_wallet_combine() -> anyhow::Result<()> {
    let (mut network, _alice, _bob) = setup().await?;
    network.farm_block().await;

    let nobody = network.reward_wallet().clone();
    let coins = nobody.usable_coins(&network);
    assert_eq!(coins.len(), 2);

    let result = nobody.combine_coins(&mut network, &coins).await?;
    assert!(result.is_ok());
    assert_eq!(nobody.balance(&network), 2 * BLOCK_REWARD);
    assert_eq!(nobody.usable_coins(&network).len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_resync_is_idempotent() -> anyhow::Result<()> {
    let (mut network, alice, bob) = setup().await?;
    network.farm_block_for(&alice).await;
    alice
        .give_chia(&mut network, &bob, 1000)
        .await?
        .expect("the transfer was rejected");

    let alice_coins = alice.usable_coins(&network);
    let bob_coins = bob.usable_coins(&network);

    network.farm_block().await;
    network.farm_block().await;

    assert_eq!(alice.usable_coins(&network), alice_coins);
    assert_eq!(bob.usable_coins(&network), bob_coins);

    Ok(())
}

#[tokio::test]
async fn test_standard_spend_with_change() -> anyhow::Result<()> {
    let (mut network, alice, bob) = setup().await?;
    network.farm_block_for(&alice).await;

    let coin = alice
        .choose_coin(&mut network, 1000)
        .await?
        .expect("no coin was chosen");

    let result = alice
        .spend_coin(
            &mut network,
            &coin,
            SpendRequest::pay_with_change(&bob, 1000, &alice),
        )
        .await?;

    assert!(result.is_ok());
    assert_eq!(result.find_standard_coins(bob.puzzle_hash()).len(), 1);
    assert_eq!(
        result.find_standard_coins(alice.puzzle_hash())[0].amount,
        coin.amount - 1000
    );
    assert_eq!(bob.balance(&network), 1000);
    assert_eq!(alice.balance(&network), BLOCK_REWARD - 1000);

    Ok(())
}

#[tokio::test]
async fn test_default_spend_pays_self() -> anyhow::Result<()> {
    let (mut network, alice, _bob) = setup().await?;
    network.farm_block_for(&alice).await;

    let coin = alice.usable_coins(&network)[0].clone();
    let result = alice
        .spend_coin(&mut network, &coin, SpendRequest::default())
        .await?;

    assert!(result.is_ok());
    assert_eq!(result.outputs.len(), 1);
    assert_eq!(result.outputs[0].puzzle_hash, alice.puzzle_hash());
    assert_eq!(result.outputs[0].amount, 1);

    Ok(())
}

#[tokio::test]
async fn test_fees_go_to_the_farmer() -> anyhow::Result<()> {
    let (mut network, alice, bob) = setup().await?;
    network.farm_block_for(&alice).await;

    let nobody = network.reward_wallet().clone();
    let before = nobody.balance(&network);

    let coin = alice.usable_coins(&network)[0].clone();
    let fee = coin.amount - 1000;
    let result = alice
        .spend_coin(
            &mut network,
            &coin,
            SpendRequest::Standard {
                to: Some(PaymentTarget::from(&bob)),
                amount: 1000,
                remain: None,
            },
        )
        .await?;

    assert!(result.is_ok());
    assert_eq!(nobody.balance(&network), before + BLOCK_REWARD + fee);

    let peak = network
        .block_record_by_height(network.height().await - 1)
        .await
        .expect("missing block");
    assert_eq!(peak.fees, fee);
    assert_eq!(peak.reward_coins[1].amount, FARMER_REWARD + fee);

    Ok(())
}

#[tokio::test]
async fn test_overspend_is_rejected_by_ledger() -> anyhow::Result<()> {
    let (mut network, alice, bob) = setup().await?;
    network.farm_block_for(&alice).await;

    let coin = alice.usable_coins(&network)[0].clone();
    let height = network.height().await;

    let result = alice
        .spend_coin(&mut network, &coin, SpendRequest::pay(&bob, coin.amount + 1))
        .await?;

    assert_eq!(result.error, Some(format!("{:?}", ErrorCode::MintingCoin)));
    assert!(result.outputs.is_empty());
    assert_eq!(network.height().await, height);
    assert_eq!(alice.balance(&network), BLOCK_REWARD);
    assert_eq!(bob.balance(&network), 0);

    Ok(())
}

#[tokio::test]
async fn test_change_larger_than_coin() -> anyhow::Result<()> {
    let (mut network, alice, bob) = setup().await?;
    network.farm_block_for(&alice).await;

    let coin = alice.usable_coins(&network)[0].clone();
    let error = alice
        .build_spend(
            &coin,
            SpendRequest::pay_with_change(&bob, coin.amount + 1, &alice),
        )
        .expect_err("the spend is larger than the coin");

    assert!(matches!(
        error,
        NetworkError::AmountExceedsCoin { amount, coin_amount }
            if amount == coin.amount + 1 && coin_amount == coin.amount
    ));

    let error = alice
        .build_spend(
            &coin,
            SpendRequest::Conditions {
                conditions: vec![
                    Condition::create_coin(bob.puzzle_hash(), coin.amount),
                    Condition::create_coin(alice.puzzle_hash(), 1),
                ],
                remain: Some(PaymentTarget::from(&alice)),
            },
        )
        .expect_err("the outputs are larger than the coin");

    assert!(matches!(
        error,
        NetworkError::AmountExceedsCoin { amount, .. } if amount == coin.amount + 1
    ));

    Ok(())
}

#[tokio::test]
async fn test_conditions_with_change() -> anyhow::Result<()> {
    let (mut network, alice, bob) = setup().await?;
    network.farm_block_for(&alice).await;

    let coin = alice.usable_coins(&network)[0].clone();
    let result = alice
        .spend_coin(
            &mut network,
            &coin,
            SpendRequest::Conditions {
                conditions: vec![
                    Condition::create_coin(bob.puzzle_hash(), 1000),
                    Condition::create_coin(bob.puzzle_hash(), 2000),
                ],
                remain: Some(PaymentTarget::from(&alice)),
            },
        )
        .await?;

    assert!(result.is_ok());
    assert_eq!(result.find_standard_coins(bob.puzzle_hash()).len(), 2);
    assert_eq!(
        result.find_standard_coins(alice.puzzle_hash())[0].amount,
        coin.amount - 3000
    );
    assert_eq!(bob.balance(&network), 3000);
    assert_eq!(alice.balance(&network), BLOCK_REWARD - 3000);

    let peak = network
        .block_record_by_height(network.height().await - 1)
        .await
        .expect("missing block");
    assert_eq!(peak.fees, 0);

    Ok(())
}

#[tokio::test]
async fn test_rejected_combine_leaves_inputs_unspent() -> anyhow::Result<()> {
    let (mut network, alice, bob) = setup().await?;
    network.farm_block_for(&alice).await;
    network.farm_block_for(&bob).await;

    let mut coins = alice.usable_coins(&network);
    assert_eq!(coins.len(), 2);
    let alice_coins = coins.clone();

    // Alice cannot sign for bob's coin, so the whole bundle fails.
    coins.push(bob.usable_coins(&network)[0].clone());
    let total = coins.iter().map(|coin| coin.amount).sum();
    let merged = Coin::new(coins[2].coin_id(), alice.puzzle_hash(), total);
    let height = network.height().await;

    let result = alice.combine_coins(&mut network, &coins).await?;

    assert_eq!(
        result.error,
        Some(format!("{:?}", ErrorCode::BadAggregateSignature))
    );
    assert_eq!(network.height().await, height);

    for coin in &alice_coins {
        let record = network
            .coin_record_by_name(coin.coin_id())
            .await
            .expect("missing coin");
        assert!(!record.spent);
    }

    assert_eq!(network.coin_record_by_name(merged.coin_id()).await, None);
    assert_eq!(alice.usable_coins(&network), alice_coins);
    assert_eq!(bob.balance(&network), BLOCK_REWARD);

    Ok(())
}
