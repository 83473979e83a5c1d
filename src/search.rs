//! Boundary to an external best-move search engine.
//!
//! The engine is a black box: it gets the board as a numeric grid plus a
//! simulation budget, and answers with the grid as it looks after its chosen
//! move. This module converts board state into that format and digs the
//! chosen square back out of the answer. No search algorithm lives in this
//! crate.

use itertools::Itertools;

use crate::board::{Board, Square};
use crate::core::{GameError, PlayerMark};

pub type Grid = [[i8; 3]; 3];

/// What the external engine gets to see: 0 for empty, +1 for X, -1 for O,
/// whose turn it is in the same encoding, and how much effort to spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchState {
    pub grid: Grid,
    pub next_to_move: i8,
    pub simulation_budget: u32,
}

/// The engine contract: run to completion and return the grid after the one
/// move it picked. Exactly one empty cell may change.
pub trait SearchStrategy {
    fn best_state(&mut self, state: &SearchState) -> Grid;
}

/// The search is only ever consulted for the human side's move, so
/// `next_to_move` is fixed at X's code (+1).
pub fn to_search_state(board: &Board, simulation_budget: u32) -> SearchState {
    SearchState {
        grid: board.to_grid(),
        next_to_move: PlayerMark::Cross.code(),
        simulation_budget,
    }
}

/// Locate the single cell where `after` differs from `before` and convert it
/// back to a 1-9 square.
///
/// A well-behaved engine changes exactly one cell, from 0 to +1 or -1.
/// Anything else is a contract breach and comes back as
/// [`GameError::InvariantViolation`]; guessing a move instead would corrupt
/// the game.
pub fn extract_move(before: &Grid, after: &Grid) -> Result<Square, GameError> {
    let changed = before
        .iter()
        .flatten()
        .zip(after.iter().flatten())
        .positions(|(b, a)| b != a)
        .collect_vec();
    match changed[..] {
        [idx] => {
            if before[idx / 3][idx % 3] != 0 {
                return Err(GameError::InvariantViolation(format!(
                    "search overwrote the occupied cell at flat index {idx}"
                )));
            }
            Ok(Square(idx + 1))
        }
        _ => Err(GameError::InvariantViolation(format!(
            "search changed {} cells, expected exactly 1",
            changed.len()
        ))),
    }
}

/// One full round trip over the boundary: serialize, ask, extract.
pub fn search_move(
    strategy: &mut dyn SearchStrategy,
    board: &Board,
    simulation_budget: u32,
) -> Result<Square, GameError> {
    let state = to_search_state(board, simulation_budget);
    let after = strategy.best_state(&state);
    extract_move(&state.grid, &after)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn search_state_carries_grid_and_budget() {
        let b: Board = "x   o    ".parse().unwrap();
        let state = to_search_state(&b, 500);
        assert_eq!(state.grid, [[1, 0, 0], [0, -1, 0], [0, 0, 0]]);
        assert_eq!(state.next_to_move, 1);
        assert_eq!(state.simulation_budget, 500);
    }

    #[test]
    fn extract_recovers_every_single_cell_change() {
        let b: Board = "xo  x   o".parse().unwrap();
        let before = b.to_grid();
        for idx in 0..9 {
            if before[idx / 3][idx % 3] != 0 {
                continue;
            }
            let mut after = before;
            after[idx / 3][idx % 3] = 1;
            assert_eq!(extract_move(&before, &after).unwrap(), Square(idx + 1));
        }
    }

    #[test]
    fn extract_rejects_no_change() {
        let grid = Board::new().to_grid();
        assert!(matches!(
            extract_move(&grid, &grid),
            Err(GameError::InvariantViolation(_))
        ));
    }

    #[test]
    fn extract_rejects_two_changes() {
        let before = Board::new().to_grid();
        let mut after = before;
        after[0][0] = 1;
        after[2][2] = -1;
        assert!(matches!(
            extract_move(&before, &after),
            Err(GameError::InvariantViolation(_))
        ));
    }

    #[test]
    fn extract_rejects_flipping_an_occupied_cell() {
        let b: Board = "o        ".parse().unwrap();
        let before = b.to_grid();
        let mut after = before;
        after[0][0] = 1;
        assert!(matches!(
            extract_move(&before, &after),
            Err(GameError::InvariantViolation(_))
        ));
    }
}
