use chia_bls::PublicKey;
use chia_protocol::{Bytes32, Program};
use chia_puzzle_types::standard::{StandardArgs, StandardSolution};
use chia_puzzles::P2_DELEGATED_PUZZLE_OR_HIDDEN_PUZZLE;
use chia_sim_types::Condition;
use clvm_traits::{clvm_quote, FromClvm, ToClvm};
use clvm_utils::{tree_hash, CurriedProgram};
use clvmr::{serde::node_from_bytes, Allocator, NodePtr};

use crate::NetworkError;

/// The standard transaction puzzle curried with a synthetic public key.
pub fn standard_puzzle(synthetic_key: PublicKey) -> Result<Program, NetworkError> {
    let mut allocator = Allocator::new();
    let mod_ptr = node_from_bytes(&mut allocator, &P2_DELEGATED_PUZZLE_OR_HIDDEN_PUZZLE)?;

    let puzzle = CurriedProgram {
        program: mod_ptr,
        args: StandardArgs::new(synthetic_key),
    }
    .to_clvm(&mut allocator)?;

    Ok(Program::from_clvm(&allocator, puzzle)?)
}

/// Builds `(() (q . conditions) ())` and returns it alongside the tree hash
/// of the delegated puzzle, which is the message the synthetic key signs.
pub fn standard_solution(
    conditions: &[Condition<Program>],
) -> Result<(Program, Bytes32), NetworkError> {
    let mut allocator = Allocator::new();
    let delegated_puzzle = clvm_quote!(conditions).to_clvm(&mut allocator)?;
    let delegated_puzzle_hash = tree_hash(&allocator, delegated_puzzle);

    let solution = StandardSolution {
        original_public_key: None,
        delegated_puzzle,
        solution: NodePtr::NIL,
    }
    .to_clvm(&mut allocator)?;

    Ok((
        Program::from_clvm(&allocator, solution)?,
        delegated_puzzle_hash.into(),
    ))
}

pub fn puzzle_hash(puzzle: &Program) -> Result<Bytes32, NetworkError> {
    let mut allocator = Allocator::new();
    let ptr = puzzle.to_clvm(&mut allocator)?;
    Ok(tree_hash(&allocator, ptr).into())
}
