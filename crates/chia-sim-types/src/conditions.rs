use chia_protocol::{Bytes, Bytes32, CoinSpend};
use clvm_traits::{FromClvm, ToClvm};
use clvmr::{Allocator, NodePtr};

use crate::{run_puzzle, ConditionError};

mod agg_sig;
mod announcements;
mod coin_info;
mod output;
mod time;

pub use agg_sig::*;
pub use announcements::*;
pub use coin_info::*;
pub use output::*;
pub use time::*;

/// Any condition a puzzle can output.
///
/// Conditions the simulator doesn't model are kept as [`Condition::Other`],
/// so that parsing a puzzle's output never fails on an unknown opcode.
#[derive(Debug, Clone, PartialEq, Eq, ToClvm, FromClvm)]
#[clvm(transparent)]
pub enum Condition<T = NodePtr> {
    AggSig(AggSig),
    CreateCoin(CreateCoin),
    ReserveFee(ReserveFee),
    CreateCoinAnnouncement(CreateCoinAnnouncement),
    AssertCoinAnnouncement(AssertCoinAnnouncement),
    CreatePuzzleAnnouncement(CreatePuzzleAnnouncement),
    AssertPuzzleAnnouncement(AssertPuzzleAnnouncement),
    AssertMyCoinId(AssertMyCoinId),
    AssertMyParentId(AssertMyParentId),
    AssertMyPuzzleHash(AssertMyPuzzleHash),
    AssertMyAmount(AssertMyAmount),
    AssertSecondsRelative(AssertSecondsRelative),
    AssertSecondsAbsolute(AssertSecondsAbsolute),
    AssertHeightRelative(AssertHeightRelative),
    AssertHeightAbsolute(AssertHeightAbsolute),
    AssertBeforeSecondsRelative(AssertBeforeSecondsRelative),
    AssertBeforeSecondsAbsolute(AssertBeforeSecondsAbsolute),
    AssertBeforeHeightRelative(AssertBeforeHeightRelative),
    AssertBeforeHeightAbsolute(AssertBeforeHeightAbsolute),
    Other(T),
}

impl<T> Condition<T> {
    pub fn create_coin(puzzle_hash: Bytes32, amount: u64) -> Self {
        Self::CreateCoin(CreateCoin::new(puzzle_hash, amount))
    }

    pub fn reserve_fee(amount: u64) -> Self {
        Self::ReserveFee(ReserveFee::new(amount))
    }

    pub fn create_coin_announcement(message: impl Into<Bytes>) -> Self {
        Self::CreateCoinAnnouncement(CreateCoinAnnouncement::new(message.into()))
    }

    pub fn assert_coin_announcement(announcement_id: Bytes32) -> Self {
        Self::AssertCoinAnnouncement(AssertCoinAnnouncement::new(announcement_id))
    }

    pub fn create_puzzle_announcement(message: impl Into<Bytes>) -> Self {
        Self::CreatePuzzleAnnouncement(CreatePuzzleAnnouncement::new(message.into()))
    }

    pub fn assert_puzzle_announcement(announcement_id: Bytes32) -> Self {
        Self::AssertPuzzleAnnouncement(AssertPuzzleAnnouncement::new(announcement_id))
    }

    pub fn assert_seconds_relative(seconds: u64) -> Self {
        Self::AssertSecondsRelative(AssertSecondsRelative::new(seconds))
    }

    pub fn assert_height_relative(height: u32) -> Self {
        Self::AssertHeightRelative(AssertHeightRelative::new(height))
    }

    pub fn into_agg_sig(self) -> Option<AggSig> {
        match self {
            Self::AggSig(agg_sig) => Some(agg_sig),
            _ => None,
        }
    }

    pub fn into_create_coin(self) -> Option<CreateCoin> {
        match self {
            Self::CreateCoin(create_coin) => Some(create_coin),
            _ => None,
        }
    }
}

pub fn parse_conditions(
    allocator: &mut Allocator,
    conditions: NodePtr,
) -> Result<Vec<Condition<NodePtr>>, ConditionError> {
    Vec::<NodePtr>::from_clvm(allocator, conditions)?
        .into_iter()
        .map(|condition| Ok(Condition::from_clvm(allocator, condition)?))
        .collect()
}

pub fn puzzle_conditions(
    allocator: &mut Allocator,
    puzzle: NodePtr,
    solution: NodePtr,
) -> Result<Vec<Condition<NodePtr>>, ConditionError> {
    let output = run_puzzle(allocator, puzzle, solution)?;
    parse_conditions(allocator, output)
}

/// Runs the puzzle reveal of a coin spend against its solution.
pub fn coin_spend_conditions(
    allocator: &mut Allocator,
    coin_spend: &CoinSpend,
) -> Result<Vec<Condition<NodePtr>>, ConditionError> {
    let puzzle = coin_spend.puzzle_reveal.to_clvm(allocator)?;
    let solution = coin_spend.solution.to_clvm(allocator)?;
    puzzle_conditions(allocator, puzzle, solution)
}
