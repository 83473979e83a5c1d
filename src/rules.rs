//! Move legality and win detection.
//!
//! These are free functions over [`Board`] rather than board methods, so that
//! every mutation of a board runs through [`apply_move`] and its legality
//! check.

use crate::board::{Board, Square, WIN_LINES};
use crate::core::PlayerMark;

/// A move is legal iff its square is in range 1-9 and currently empty.
pub fn is_legal_move(board: &Board, sq: Square) -> bool {
    (1..=9).contains(&sq.0) && board.cell(sq.index()).is_none()
}

/// True iff some winning line is fully held by `player`.
///
/// Scans all eight lines against the current board rather than only the
/// lines through the last move. At 8x3 cells the difference is negligible.
pub fn is_winning(board: &Board, player: PlayerMark) -> bool {
    WIN_LINES
        .iter()
        .any(|line| line.iter().all(|&i| board.cell(i) == Some(player)))
}

/// Place `player` on `sq` if legal and report `(accepted, wins)`.
///
/// An illegal move returns `(false, false)` and leaves the board untouched.
/// With `speculative` the square is reverted to empty before returning, so
/// the caller can probe "would this move win?" and observe a board identical
/// to the one it passed in. Nothing else may touch the board between the
/// apply and the revert; the engine is single-threaded so this holds.
pub fn apply_move(
    board: &mut Board,
    player: PlayerMark,
    sq: Square,
    speculative: bool,
) -> (bool, bool) {
    if !is_legal_move(board, sq) {
        return (false, false);
    }
    board.set_cell(sq.index(), Some(player));
    let wins = is_winning(board, player);
    if speculative {
        board.set_cell(sq.index(), None);
    }
    (true, wins)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn legality_bounds() {
        let b: Board = "x        ".parse().unwrap();
        assert!(!is_legal_move(&b, Square(0)));
        assert!(!is_legal_move(&b, Square(10)));
        assert!(!is_legal_move(&b, Square(1))); // occupied
        for n in 2..=9 {
            assert!(is_legal_move(&b, Square(n)), "square {n} should be legal");
        }
    }

    #[test]
    fn every_win_line_detected_for_both_marks() {
        for player in [PlayerMark::Cross, PlayerMark::Naught] {
            for line in WIN_LINES {
                let mut b = Board::new();
                for idx in line {
                    b.set_cell(idx, Some(player));
                }
                assert!(is_winning(&b, player), "line {line:?} missed for {player}");
                assert!(
                    !is_winning(&b, player.other()),
                    "line {line:?} falsely credited to {}",
                    player.other()
                );
            }
        }
    }

    #[test]
    fn no_win_on_broken_line() {
        let b: Board = "xx o o   ".parse().unwrap();
        assert!(!is_winning(&b, PlayerMark::Cross));
        assert!(!is_winning(&b, PlayerMark::Naught));
    }

    #[test]
    fn speculative_apply_restores_the_board() {
        let before: Board = "xo  x    ".parse().unwrap();
        let mut b = before;
        // legal, non-winning
        let (accepted, wins) = apply_move(&mut b, PlayerMark::Naught, Square(4), true);
        assert!(accepted && !wins);
        assert_eq!(b, before);
        // legal, winning
        let (accepted, wins) = apply_move(&mut b, PlayerMark::Cross, Square(9), true);
        assert!(accepted && wins);
        assert_eq!(b, before);
        // illegal
        let (accepted, wins) = apply_move(&mut b, PlayerMark::Cross, Square(1), true);
        assert!(!accepted && !wins);
        assert_eq!(b, before);
    }

    #[test]
    fn committed_apply_mutates() {
        let mut b = Board::new();
        let (accepted, wins) = apply_move(&mut b, PlayerMark::Cross, Square(5), false);
        assert!(accepted && !wins);
        assert_eq!(b.cell(4), Some(PlayerMark::Cross));
        let (accepted, _) = apply_move(&mut b, PlayerMark::Naught, Square(5), false);
        assert!(!accepted);
        assert_eq!(b.cell(4), Some(PlayerMark::Cross));
    }

    #[test]
    fn win_checked_against_whole_board() {
        // the winning line was completed long before the probed move
        let mut b: Board = "ooo x x  ".parse().unwrap();
        let (accepted, wins) = apply_move(&mut b, PlayerMark::Naught, Square(5), true);
        assert!(accepted && wins);
    }
}
