//! The hand-coded move chooser used by the computer, and by the human side
//! when the game plays itself.
//!
//! Priority, re-evaluated from scratch every turn: take a winning square if
//! one exists, else deny the opponent theirs, else fall back to a preferred
//! square.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::{Board, Square};
use crate::core::PlayerMark;
use crate::rules;

/// Corners, center and edges, respectively. The fallback shuffles the group
/// order and each group before taking the first legal square, so equally
/// ranked squares vary between games.
const PREFERENCE_GROUPS: [&[usize]; 3] = [&[1, 7, 3, 9], &[5], &[2, 4, 6, 8]];

pub struct HeuristicPolicy {
    rng: StdRng,
}

impl HeuristicPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: match seed {
                None => StdRng::from_entropy(),
                Some(seed) => StdRng::seed_from_u64(seed),
            },
        }
    }

    /// Choose a move for `acting` and commit it, reporting the committed
    /// move's `(accepted, wins)` pair. `accepted` is false only when no
    /// legal square exists anywhere, i.e. the board was already full.
    pub fn play(&mut self, board: &mut Board, acting: PlayerMark) -> (bool, bool) {
        match self.select(board, acting) {
            Some(sq) => {
                debug!("Heuristic plays {sq} for {acting}");
                rules::apply_move(board, acting, sq, false)
            }
            None => (false, false),
        }
    }

    /// The move [`play`](Self::play) would commit. Probes squares
    /// speculatively, so the board passed in is unchanged on return.
    pub fn select(&mut self, board: &mut Board, acting: PlayerMark) -> Option<Square> {
        // If I can win, others don't matter.
        for n in 1..=9 {
            if rules::apply_move(board, acting, Square(n), true).1 {
                return Some(Square(n));
            }
        }
        // If the opponent could win there, take the square to deny it.
        for n in 1..=9 {
            if rules::apply_move(board, acting.other(), Square(n), true).1 {
                return Some(Square(n));
            }
        }
        // Otherwise one of the preferred squares.
        let mut groups: Vec<Vec<usize>> =
            PREFERENCE_GROUPS.iter().map(|g| g.to_vec()).collect();
        groups.shuffle(&mut self.rng);
        for group in groups.iter_mut() {
            group.shuffle(&mut self.rng);
            for &n in group.iter() {
                if rules::is_legal_move(board, Square(n)) {
                    return Some(Square(n));
                }
            }
        }
        None
    }
}
