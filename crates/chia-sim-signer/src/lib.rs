mod agg_sig_constants;
mod error;
mod required_bls_signature;
mod required_signature;
mod sign_coin_spends;

pub use agg_sig_constants::*;
pub use error::*;
pub use required_bls_signature::*;
pub use required_signature::*;
pub use sign_coin_spends::*;
