use chia_bls::{master_to_wallet_hardened, sign, PublicKey, SecretKey, Signature};
use chia_protocol::Bytes32;
use chia_puzzle_types::{standard::StandardArgs, DeriveSynthetic};
use chia_sha2::Sha256;

/// The deterministic generator key for an index: the BLS key generated
/// from `sha256("foo" ++ index as a 32 byte big endian integer)`.
pub fn private_key_for_index(index: u32) -> SecretKey {
    let mut blob = [0; 32];
    blob[28..].copy_from_slice(&index.to_be_bytes());

    let mut hasher = Sha256::new();
    hasher.update(b"foo");
    hasher.update(blob);
    SecretKey::from_seed(&hasher.finalize())
}

pub fn public_key_for_index(index: u32) -> PublicKey {
    private_key_for_index(index).public_key()
}

pub fn sign_message_with_index(index: u32, message: &str) -> Signature {
    sign(&private_key_for_index(index), message)
}

pub fn sign_messages_with_indexes<'a>(
    messages: impl IntoIterator<Item = (u32, &'a str)>,
) -> Signature {
    aggregate_signatures(
        messages
            .into_iter()
            .map(|(index, message)| sign_message_with_index(index, message)),
    )
}

pub fn aggregate_signatures(signatures: impl IntoIterator<Item = Signature>) -> Signature {
    let mut aggregated = Signature::default();
    for signature in signatures {
        aggregated += &signature;
    }
    aggregated
}

/// The keys of a wallet, derived from its key index.
///
/// The wallet key is the first hardened wallet key of the generator key, and
/// coins are locked to the standard puzzle of its synthetic key.
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub index: u32,
    pub generator_sk: SecretKey,
    pub sk: SecretKey,
    pub pk: PublicKey,
    pub synthetic_sk: SecretKey,
    pub synthetic_pk: PublicKey,
    pub puzzle_hash: Bytes32,
}

impl KeyPair {
    pub fn new(index: u32) -> Self {
        let generator_sk = private_key_for_index(index);
        let sk = master_to_wallet_hardened(&generator_sk, 0);
        let pk = sk.public_key();
        let synthetic_sk = sk.derive_synthetic();
        let synthetic_pk = synthetic_sk.public_key();

        Self {
            index,
            generator_sk,
            sk,
            pk,
            synthetic_sk,
            synthetic_pk,
            puzzle_hash: StandardArgs::curry_tree_hash(synthetic_pk).into(),
        }
    }

    /// Looks up the secret key for either the wallet key or its synthetic key.
    pub fn secret_key_for(&self, public_key: &PublicKey) -> Option<SecretKey> {
        if public_key == &self.pk {
            Some(self.sk.clone())
        } else if public_key == &self.synthetic_pk {
            Some(self.synthetic_sk.clone())
        } else {
            None
        }
    }
}
