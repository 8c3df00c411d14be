use chia_protocol::{Bytes32, Program};
use chia_sim_types::Condition;

use crate::{SmartCoinWrapper, Wallet};

/// Where a standard spend sends its mojos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentTarget {
    Wallet(Bytes32),
    Puzzle(Bytes32),
}

impl PaymentTarget {
    pub fn puzzle_hash(&self) -> Bytes32 {
        match self {
            Self::Wallet(puzzle_hash) | Self::Puzzle(puzzle_hash) => *puzzle_hash,
        }
    }
}

impl From<&Wallet> for PaymentTarget {
    fn from(wallet: &Wallet) -> Self {
        Self::Wallet(wallet.puzzle_hash())
    }
}

impl From<&SmartCoinWrapper> for PaymentTarget {
    fn from(smart_coin: &SmartCoinWrapper) -> Self {
        Self::Puzzle(smart_coin.puzzle_hash())
    }
}

/// How a wallet should solve a coin it spends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpendRequest {
    /// Pays `amount` to `to`, or back to the spender when unset. If `remain`
    /// is set, the rest of the coin is sent there, otherwise it becomes a fee.
    /// An `amount` larger than the coin is left for the ledger to reject.
    Standard {
        to: Option<PaymentTarget>,
        amount: u64,
        remain: Option<PaymentTarget>,
    },
    /// Outputs these conditions through the standard puzzle. If `remain` is
    /// set, whatever the `CREATE_COIN` conditions leave of the coin is sent
    /// there.
    Conditions {
        conditions: Vec<Condition<Program>>,
        remain: Option<PaymentTarget>,
    },
    /// Uses the solution as is, for coins not locked by the standard puzzle.
    RawSolution(Program),
}

impl Default for SpendRequest {
    fn default() -> Self {
        Self::Standard {
            to: None,
            amount: 1,
            remain: None,
        }
    }
}

impl SpendRequest {
    pub fn pay(to: impl Into<PaymentTarget>, amount: u64) -> Self {
        Self::Standard {
            to: Some(to.into()),
            amount,
            remain: None,
        }
    }

    pub fn conditions(conditions: Vec<Condition<Program>>) -> Self {
        Self::Conditions {
            conditions,
            remain: None,
        }
    }

    pub fn pay_with_change(
        to: impl Into<PaymentTarget>,
        amount: u64,
        remain: impl Into<PaymentTarget>,
    ) -> Self {
        Self::Standard {
            to: Some(to.into()),
            amount,
            remain: Some(remain.into()),
        }
    }
}
