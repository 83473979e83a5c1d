//! The core types for this application
//!

use std::fmt::Display;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Cross is the human player (X), Naught the automated opponent (O).
/// The assignment never changes mid-game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub enum PlayerMark {
    Cross,
    Naught,
}

impl PlayerMark {
    pub fn other(&self) -> Self {
        match *self {
            Self::Cross => Self::Naught,
            Self::Naught => Self::Cross,
        }
    }

    /// The numeric code used in the search-engine grid: X is +1, O is -1.
    pub fn code(&self) -> i8 {
        match *self {
            Self::Cross => 1,
            Self::Naught => -1,
        }
    }
}

impl Display for PlayerMark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cross => write!(f, "X"),
            Self::Naught => write!(f, "O"),
        }
    }
}

/// Where the game stands. The three last variants are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GamePhase {
    NotStarted,
    InProgress,
    PlayerWon,
    ComputerWon,
    Drawn,
}

/// The final result of a game, set exactly once when the loop terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    PlayerWin,
    ComputerWin,
    Draw,
}

impl Outcome {
    /// +1 for a player win, 0 for a draw, -1 for a loss.
    pub fn score(&self) -> i32 {
        match self {
            Self::PlayerWin => 1,
            Self::Draw => 0,
            Self::ComputerWin => -1,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlayerWin => write!(f, "player win"),
            Self::ComputerWin => write!(f, "computer win"),
            Self::Draw => write!(f, "draw"),
        }
    }
}

/// How the human side picks its moves when the game is not interactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum MovePolicy {
    /// The same win/block/preferred-square policy the computer uses
    Heuristic,
    /// Delegate to an external best-move search engine
    Search,
}

impl FromStr for MovePolicy {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heuristic" => Ok(Self::Heuristic),
            "search" => Ok(Self::Search),
            other => Err(GameError::BadConfig(format!(
                "unrecognized policy '{other}', expected 'heuristic' or 'search'"
            ))),
        }
    }
}

#[derive(Debug)]
pub enum GameError {
    /// A move target outside 1-9 or on an occupied square.
    /// Recovered locally in interactive play by re-prompting.
    InvalidMove(usize),
    /// A contract breach by a collaborator, e.g. the search engine returning
    /// a grid that does not differ from its input in exactly one empty cell.
    /// Aborts the game rather than guessing a move.
    InvariantViolation(String),
    /// Rejected at construction, before any board mutation.
    BadConfig(String),
    /// The interactive input source reached end-of-file mid-game.
    InputClosed,
}

impl Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMove(n) => write!(f, "invalid move {n}, must be an empty square 1-9"),
            Self::InvariantViolation(msg) => write!(f, "invariant violation: {msg}"),
            Self::BadConfig(msg) => write!(f, "bad configuration: {msg}"),
            Self::InputClosed => write!(f, "move input closed before the game ended"),
        }
    }
}

impl std::error::Error for GameError {}
