use chia_protocol::{Bytes32, Coin};

fn reward_parent_id(prefix: &[u8], height: u32) -> Bytes32 {
    let mut parent = [0; 32];
    parent[..16].copy_from_slice(prefix);
    parent[16..].copy_from_slice(&u128::from(height).to_be_bytes());
    parent.into()
}

/// The parent id of the pool reward coin at a height: the first half of the
/// genesis challenge followed by the height as a 16 byte big endian integer.
pub fn pool_parent_id(height: u32, genesis_challenge: Bytes32) -> Bytes32 {
    reward_parent_id(&genesis_challenge.to_bytes()[..16], height)
}

/// Like [`pool_parent_id`], but with the second half of the genesis challenge.
pub fn farmer_parent_id(height: u32, genesis_challenge: Bytes32) -> Bytes32 {
    reward_parent_id(&genesis_challenge.to_bytes()[16..], height)
}

pub fn create_pool_coin(
    height: u32,
    puzzle_hash: Bytes32,
    amount: u64,
    genesis_challenge: Bytes32,
) -> Coin {
    Coin::new(pool_parent_id(height, genesis_challenge), puzzle_hash, amount)
}

pub fn create_farmer_coin(
    height: u32,
    puzzle_hash: Bytes32,
    amount: u64,
    genesis_challenge: Bytes32,
) -> Coin {
    Coin::new(
        farmer_parent_id(height, genesis_challenge),
        puzzle_hash,
        amount,
    )
}
