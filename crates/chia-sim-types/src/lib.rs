mod condition_error;
mod conditions;
mod run_puzzle;

pub use condition_error::*;
pub use conditions::*;
pub use run_puzzle::*;
