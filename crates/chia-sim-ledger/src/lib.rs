mod block_record;
mod bundle_validation;
mod coin_record;
mod config;
mod error;
mod mempool_item;
mod rewards;
mod sim_client;
mod spend_sim;

pub use block_record::*;
pub use bundle_validation::*;
pub use coin_record::*;
pub use config::*;
pub use error::*;
pub use mempool_item::*;
pub use rewards::*;
pub use sim_client::*;
pub use spend_sim::*;
