//! The game loop: alternate turns, apply moves through the rules, track the
//! outcome.

use std::io::BufRead;

use clap::ValueEnum;
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::board::{Board, Square};
use crate::core::{GameError, GamePhase, MovePolicy, Outcome, PlayerMark};
use crate::policy::HeuristicPolicy;
use crate::rules;
use crate::search::{self, SearchStrategy};

const PLAYER: PlayerMark = PlayerMark::Cross;
const COMPUTER: PlayerMark = PlayerMark::Naught;

/// Who gets the opening move. `Random` is the normal game; the fixed
/// variants make games reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FirstMover {
    Random,
    Player,
    Computer,
}

pub struct GameConfig {
    /// Read the human side's moves from the input, instead of automating them
    pub interactive: bool,
    /// Effort budget handed to the search engine, if one is consulted
    pub simulation_budget: u32,
    /// The mover for the human side in non-interactive play
    pub policy: MovePolicy,
    /// Print the board and status lines as the game goes
    pub verbose: bool,
    /// Seed for the opening toss and the heuristic fallback shuffles
    pub seed: Option<u64>,
    pub first_mover: FirstMover,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            interactive: true,
            simulation_budget: 1000,
            policy: MovePolicy::Heuristic,
            verbose: true,
            seed: None,
            first_mover: FirstMover::Random,
        }
    }
}

/// One game of tic-tac-toe. Construct, [`run`](Self::run) once, then read
/// the [`outcome`](Self::outcome).
pub struct Game {
    board: Board,
    config: GameConfig,
    policy: HeuristicPolicy,
    strategy: Option<Box<dyn SearchStrategy>>,
    phase: GamePhase,
    outcome: Option<Outcome>,
    rng: StdRng,
}

impl Game {
    /// Configuration problems surface here, before any board exists to
    /// mutate. In particular `policy = search` without a strategy to call is
    /// refused.
    pub fn new(
        config: GameConfig,
        strategy: Option<Box<dyn SearchStrategy>>,
    ) -> Result<Self, GameError> {
        if !config.interactive && config.policy == MovePolicy::Search && strategy.is_none() {
            return Err(GameError::BadConfig(
                "policy 'search' requires a search strategy".into(),
            ));
        }
        let mut rng = match config.seed {
            None => StdRng::from_entropy(),
            Some(seed) => StdRng::seed_from_u64(seed),
        };
        let policy = HeuristicPolicy::new(Some(rng.gen()));
        Ok(Self {
            board: Board::new(),
            config,
            policy,
            strategy,
            phase: GamePhase::NotStarted,
            outcome: None,
            rng,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// `None` until the game has been run to completion; immutable after.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Play the game to its end. Interactive moves are read line by line
    /// from `input`; invalid ones are reported and re-prompted without
    /// consuming a turn. Errors mean the game was aborted, not lost.
    pub fn run(&mut self, input: &mut dyn BufRead) -> Result<Outcome, GameError> {
        if self.phase != GamePhase::NotStarted {
            return Err(GameError::InvariantViolation(
                "this game has already been played".into(),
            ));
        }
        self.phase = GamePhase::InProgress;
        self.say(&format!("Player is [{PLAYER}] and computer is [{COMPUTER}]"));
        let computer_starts = match self.config.first_mover {
            FirstMover::Random => self.rng.gen_bool(0.5),
            FirstMover::Player => false,
            FirstMover::Computer => true,
        };
        if computer_starts {
            self.say("Computer starts");
            self.policy.play(&mut self.board, COMPUTER);
        } else {
            self.say("Player starts");
        }
        let outcome = loop {
            if self.board.is_full() {
                break Outcome::Draw;
            }
            if self.config.verbose {
                print!("{}", self.board);
            }
            let (moved, won) = self.player_turn(input)?;
            if !moved {
                if self.config.interactive {
                    self.say(" >> Invalid move! Try again!");
                    continue;
                }
                // An automated mover has no prompt to return to.
                return Err(GameError::InvariantViolation(
                    "automated mover produced an illegal move".into(),
                ));
            }
            if won {
                break Outcome::PlayerWin;
            }
            if self.policy.play(&mut self.board, COMPUTER).1 {
                break Outcome::ComputerWin;
            }
        };
        self.phase = match outcome {
            Outcome::PlayerWin => GamePhase::PlayerWon,
            Outcome::ComputerWin => GamePhase::ComputerWon,
            Outcome::Draw => GamePhase::Drawn,
        };
        self.outcome = Some(outcome);
        if self.config.verbose {
            print!("{}", self.board);
        }
        match outcome {
            Outcome::PlayerWin => self.say("*** Congratulations! You won! ***"),
            Outcome::ComputerWin => self.say("=== You lose! ==="),
            Outcome::Draw => self.say("%%% Draw! %%%"),
        }
        debug!("Game over: {outcome}");
        Ok(outcome)
    }

    /// One attempt at the human side's move. `(false, false)` means the
    /// attempt was invalid and did not touch the board.
    fn player_turn(&mut self, input: &mut dyn BufRead) -> Result<(bool, bool), GameError> {
        if self.config.interactive {
            self.say("# Make your move! [1-9]:");
            let mut line = String::new();
            let n_read = input
                .read_line(&mut line)
                .map_err(|_| GameError::InputClosed)?;
            if n_read == 0 {
                return Err(GameError::InputClosed);
            }
            let sq = match line.trim().parse::<usize>().map(Square::try_new) {
                Ok(Ok(sq)) => sq,
                _ => return Ok((false, false)),
            };
            debug!("Player plays {sq}");
            return Ok(rules::apply_move(&mut self.board, PLAYER, sq, false));
        }
        match self.config.policy {
            MovePolicy::Heuristic => Ok(self.policy.play(&mut self.board, PLAYER)),
            MovePolicy::Search => {
                let strategy = self.strategy.as_deref_mut().ok_or_else(|| {
                    GameError::BadConfig("policy 'search' requires a search strategy".into())
                })?;
                let sq =
                    search::search_move(strategy, &self.board, self.config.simulation_budget)?;
                debug!("Search plays {sq}");
                Ok(rules::apply_move(&mut self.board, PLAYER, sq, false))
            }
        }
    }

    fn say(&self, msg: &str) {
        if self.config.verbose {
            println!("{msg}");
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::search::{Grid, SearchState};
    use std::io::Cursor;

    fn quiet_config() -> GameConfig {
        GameConfig {
            verbose: false,
            seed: Some(7),
            first_mover: FirstMover::Player,
            ..GameConfig::default()
        }
    }

    /// Start an interactive game from a preset position.
    fn game_from(board: &str) -> Game {
        let mut g = Game::new(quiet_config(), None).unwrap();
        g.board = board.parse().unwrap();
        g
    }

    #[test]
    fn dead_board_ends_in_a_draw() {
        // 8 squares taken, no line open for either side, X to fill square 9
        let mut g = game_from("xoxxooox ");
        let outcome = g.run(&mut Cursor::new("9\n")).unwrap();
        assert_eq!(outcome, Outcome::Draw);
        assert_eq!(g.phase(), GamePhase::Drawn);
        assert_eq!(g.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn invalid_input_is_reprompted_without_consuming_a_turn() {
        let mut g = game_from("xoxxooox ");
        // out of range, non-numeric, out of range, occupied, then the move
        let outcome = g.run(&mut Cursor::new("0\nabc\n10\n3\n9\n")).unwrap();
        assert_eq!(outcome, Outcome::Draw);
    }

    #[test]
    fn winning_player_move_ends_the_game() {
        let mut g = game_from("xx  oo   ");
        let outcome = g.run(&mut Cursor::new("3\n")).unwrap();
        assert_eq!(outcome, Outcome::PlayerWin);
        assert_eq!(g.phase(), GamePhase::PlayerWon);
    }

    #[test]
    fn winning_computer_reply_ends_the_game() {
        // X ignores O's open line at 3, so the reply completes it
        let mut g = game_from("oo  x    ");
        let outcome = g.run(&mut Cursor::new("9\n")).unwrap();
        assert_eq!(outcome, Outcome::ComputerWin);
        assert_eq!(g.phase(), GamePhase::ComputerWon);
    }

    #[test]
    fn a_game_runs_only_once() {
        let mut g = game_from("xx  oo   ");
        g.run(&mut Cursor::new("3\n")).unwrap();
        assert!(matches!(
            g.run(&mut Cursor::new("1\n")),
            Err(GameError::InvariantViolation(_))
        ));
        // the recorded outcome did not change
        assert_eq!(g.outcome(), Some(Outcome::PlayerWin));
    }

    #[test]
    fn exhausted_input_aborts_instead_of_spinning() {
        let mut g = game_from("         ");
        assert!(matches!(
            g.run(&mut Cursor::new("")),
            Err(GameError::InputClosed)
        ));
    }

    #[test]
    fn search_mode_without_a_strategy_is_refused() {
        let config = GameConfig {
            interactive: false,
            policy: MovePolicy::Search,
            ..quiet_config()
        };
        assert!(matches!(
            Game::new(config, None),
            Err(GameError::BadConfig(_))
        ));
    }

    /// A stand-in engine for tests: claim the first empty cell.
    struct FirstEmpty;
    impl SearchStrategy for FirstEmpty {
        fn best_state(&mut self, state: &SearchState) -> Grid {
            let mut after = state.grid;
            for row in after.iter_mut() {
                for cell in row.iter_mut() {
                    if *cell == 0 {
                        *cell = state.next_to_move;
                        return after;
                    }
                }
            }
            after
        }
    }

    /// An engine that breaks its contract by returning the input unchanged.
    struct Lazy;
    impl SearchStrategy for Lazy {
        fn best_state(&mut self, state: &SearchState) -> Grid {
            state.grid
        }
    }

    #[test]
    fn search_mode_plays_a_full_game() {
        let config = GameConfig {
            interactive: false,
            policy: MovePolicy::Search,
            ..quiet_config()
        };
        let mut g = Game::new(config, Some(Box::new(FirstEmpty))).unwrap();
        let outcome = g.run(&mut std::io::empty()).unwrap();
        assert_eq!(g.outcome(), Some(outcome));
        check_outcome_matches_board(&g, outcome);
    }

    #[test]
    fn search_contract_breach_aborts_the_game() {
        let config = GameConfig {
            interactive: false,
            policy: MovePolicy::Search,
            ..quiet_config()
        };
        let mut g = Game::new(config, Some(Box::new(Lazy))).unwrap();
        assert!(matches!(
            g.run(&mut std::io::empty()),
            Err(GameError::InvariantViolation(_))
        ));
        assert_eq!(g.outcome(), None);
    }

    #[test]
    fn automated_heuristic_games_end_consistently() {
        for seed in 0..20 {
            let config = GameConfig {
                interactive: false,
                policy: MovePolicy::Heuristic,
                verbose: false,
                seed: Some(seed),
                first_mover: FirstMover::Random,
                ..GameConfig::default()
            };
            let mut g = Game::new(config, None).unwrap();
            let outcome = g.run(&mut std::io::empty()).unwrap();
            check_outcome_matches_board(&g, outcome);
        }
    }

    fn check_outcome_matches_board(g: &Game, outcome: Outcome) {
        match outcome {
            Outcome::PlayerWin => assert!(rules::is_winning(g.board(), PLAYER)),
            Outcome::ComputerWin => assert!(rules::is_winning(g.board(), COMPUTER)),
            Outcome::Draw => {
                assert!(g.board().is_full());
                assert!(!rules::is_winning(g.board(), PLAYER));
                assert!(!rules::is_winning(g.board(), COMPUTER));
            }
        }
    }
}
