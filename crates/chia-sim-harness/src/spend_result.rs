use chia_protocol::{Bytes32, Coin};

/// The outcome of submitting a spend bundle to a [`Network`](crate::Network).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushTxResult {
    Rejected {
        error: String,
    },
    Confirmed {
        additions: Vec<Coin>,
        removals: Vec<Coin>,
    },
}

impl PushTxResult {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Rejected { error } => Some(error),
            Self::Confirmed { .. } => None,
        }
    }
}

/// A flattened [`PushTxResult`], as returned by wallet spends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendResult {
    pub error: Option<String>,
    pub outputs: Vec<Coin>,
}

impl SpendResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The created coins locked by the given puzzle hash.
    pub fn find_standard_coins(&self, puzzle_hash: Bytes32) -> Vec<Coin> {
        self.outputs
            .iter()
            .filter(|coin| coin.puzzle_hash == puzzle_hash)
            .copied()
            .collect()
    }
}

impl From<PushTxResult> for SpendResult {
    fn from(result: PushTxResult) -> Self {
        match result {
            PushTxResult::Rejected { error } => Self {
                error: Some(error),
                outputs: Vec::new(),
            },
            PushTxResult::Confirmed { additions, .. } => Self {
                error: None,
                outputs: additions,
            },
        }
    }
}
