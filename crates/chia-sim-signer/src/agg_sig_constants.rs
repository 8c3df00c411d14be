use chia_consensus::consensus_constants::ConsensusConstants;
use chia_protocol::Bytes32;
use chia_sha2::Sha256;
use chia_sim_types::AggSigKind;

/// The domain strings appended to each kind of AGG_SIG message.
///
/// Every kind other than `AGG_SIG_ME` derives its domain from the
/// `AGG_SIG_ME` additional data by hashing it with the condition's opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggSigConstants {
    me: Bytes32,
    parent: Bytes32,
    puzzle: Bytes32,
    amount: Bytes32,
    puzzle_amount: Bytes32,
    parent_amount: Bytes32,
    parent_puzzle: Bytes32,
}

impl AggSigConstants {
    pub fn new(agg_sig_me: Bytes32) -> Self {
        let derive = |kind: AggSigKind| {
            let mut hasher = Sha256::new();
            hasher.update(agg_sig_me);
            hasher.update([kind as u8]);
            Bytes32::from(hasher.finalize())
        };

        Self {
            me: agg_sig_me,
            parent: derive(AggSigKind::Parent),
            puzzle: derive(AggSigKind::Puzzle),
            amount: derive(AggSigKind::Amount),
            puzzle_amount: derive(AggSigKind::PuzzleAmount),
            parent_amount: derive(AggSigKind::ParentAmount),
            parent_puzzle: derive(AggSigKind::ParentPuzzle),
        }
    }

    pub fn agg_sig_me(&self) -> Bytes32 {
        self.me
    }

    /// The domain string for a kind of AGG_SIG, or `None` for `AGG_SIG_UNSAFE`.
    pub fn domain(&self, kind: AggSigKind) -> Option<Bytes32> {
        Some(match kind {
            AggSigKind::Me => self.me,
            AggSigKind::Parent => self.parent,
            AggSigKind::Puzzle => self.puzzle,
            AggSigKind::Amount => self.amount,
            AggSigKind::PuzzleAmount => self.puzzle_amount,
            AggSigKind::ParentAmount => self.parent_amount,
            AggSigKind::ParentPuzzle => self.parent_puzzle,
            AggSigKind::Unsafe => return None,
        })
    }
}

impl From<&ConsensusConstants> for AggSigConstants {
    fn from(constants: &ConsensusConstants) -> Self {
        Self {
            me: constants.agg_sig_me_additional_data,
            parent: constants.agg_sig_parent_additional_data,
            puzzle: constants.agg_sig_puzzle_additional_data,
            amount: constants.agg_sig_amount_additional_data,
            puzzle_amount: constants.agg_sig_puzzle_amount_additional_data,
            parent_amount: constants.agg_sig_parent_amount_additional_data,
            parent_puzzle: constants.agg_sig_parent_puzzle_additional_data,
        }
    }
}
