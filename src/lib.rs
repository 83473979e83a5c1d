//! Tic-tac-toe on the command line, with a hand-coded opponent and a
//! pluggable best-move search.
//!
//! The human side is always X, the automated opponent always O. The crate
//! holds the game-state engine: the board, move legality and win detection,
//! the win/block/preferred-square opponent policy, and the adapter that
//! translates board state to and from an external search engine. The search
//! itself is not implemented here; plug one in through
//! [`search::SearchStrategy`].

pub mod board;
pub mod core;
pub mod game;
pub mod policy;
pub mod record;
pub mod rules;
pub mod search;
