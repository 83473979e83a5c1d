//! The 3x3 board and its canonical serializations.

use std::str::FromStr;

use crate::core::{GameError, PlayerMark};

/// A square on the board, numbered like the layout shown to the player:
///
///  1 2 3
///  4 5 6
///  7 8 9
///
/// invariant: the number inside must be 1-9
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct Square(pub usize);

impl Square {
    pub fn try_new(n: usize) -> Result<Self, GameError> {
        if (1..=9).contains(&n) {
            Ok(Self(n))
        } else {
            Err(GameError::InvalidMove(n))
        }
    }

    /// The flat 0-8 storage index.
    pub fn index(&self) -> usize {
        self.0 - 1
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The eight winning lines: 3 rows (top to bottom), 3 columns (left to
/// right) and the two diagonals. Flat 0-8 indices.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// The board entries from top left, row wise, to bottom right.
/// Created empty at game start; all mutation goes through [`crate::rules`],
/// so legality checks stay in one place.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct Board([Option<PlayerMark>; 9]);

impl Board {
    pub fn new() -> Self {
        Self([None; 9])
    }

    pub fn cell(&self, idx: usize) -> Option<PlayerMark> {
        self.0[idx]
    }

    pub(crate) fn set_cell(&mut self, idx: usize, mark: Option<PlayerMark>) {
        self.0[idx] = mark;
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(|c| c.is_some())
    }

    pub fn n_moves_made(&self) -> usize {
        self.0.iter().filter(|c| c.is_some()).count()
    }

    /// The numeric serialization the search engine understands:
    /// empty is 0, X is +1, O is -1, reshaped row-major into 3x3.
    pub fn to_grid(&self) -> [[i8; 3]; 3] {
        let mut grid = [[0i8; 3]; 3];
        for (i, cell) in self.0.iter().enumerate() {
            grid[i / 3][i % 3] = cell.map_or(0, |m| m.code());
        }
        grid
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let m = |c: Option<PlayerMark>| match c {
            None => ' ',
            Some(PlayerMark::Cross) => 'X',
            Some(PlayerMark::Naught) => 'O',
        };
        for row in 0..3 {
            writeln!(
                f,
                " {} | {} | {} ",
                m(self.0[row * 3]),
                m(self.0[row * 3 + 1]),
                m(self.0[row * 3 + 2])
            )?;
            if row < 2 {
                writeln!(f, "-----------")?;
            }
        }
        Ok(())
    }
}

/// Parse a board from a 9-character string, row-major: 'x', 'o' or ' '.
/// Mostly useful for setting up test positions.
impl FromStr for Board {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().count() != 9 {
            return Err(GameError::BadConfig(format!(
                "board string must be 9 characters, got {}",
                s.chars().count()
            )));
        }
        let mut b = Self::new();
        for (i, c) in s.chars().enumerate() {
            let mark = match c {
                'x' | 'X' => Some(PlayerMark::Cross),
                'o' | 'O' => Some(PlayerMark::Naught),
                ' ' => None,
                other => {
                    return Err(GameError::BadConfig(format!(
                        "board string may only contain x, o or space, got '{other}'"
                    )))
                }
            };
            b.set_cell(i, mark);
        }
        Ok(b)
    }
}
