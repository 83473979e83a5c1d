//! Play tic-tac-toe on the command line.
//!
//! You are X, the computer is O. Finished games land in a score file so you
//! can see how you do over time with `oxo report`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use oxo::core::MovePolicy;
use oxo::game::{FirstMover, Game, GameConfig};
use oxo::record::{self, GameRecord};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Where game results are recorded
    #[arg(short, long, default_value = "score.csv")]
    outfile: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play one game
    Play {
        /// Let the program play your side too, instead of reading moves
        /// from stdin
        #[arg(long)]
        auto: bool,

        /// How the automated player side picks moves (only with --auto).
        /// Note: 'search' needs an external engine, which this binary does
        /// not link.
        #[arg(long, default_value = "heuristic")]
        policy: MovePolicy,

        /// Simulation budget for the search engine, if one is used
        #[arg(long, default_value = "1000")]
        sims: u32,

        /// Suppress the board printout between turns
        #[arg(long)]
        quiet: bool,

        /// Seed the random generator for a reproducible game
        #[arg(long)]
        seed: Option<u64>,

        /// Who makes the opening move
        #[arg(long, default_value = "random")]
        first: FirstMover,
    },
    /// Summarize recorded results
    Report,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Play {
            auto,
            policy,
            sims,
            quiet,
            seed,
            first,
        } => {
            simple_logger::SimpleLogger::new()
                .with_level(if quiet {
                    log::LevelFilter::Warn
                } else {
                    log::LevelFilter::Info
                })
                .init()?;
            let config = GameConfig {
                interactive: !auto,
                simulation_budget: sims,
                policy,
                verbose: !quiet,
                seed,
                first_mover: first,
            };
            // No search engine is linked into this binary; a 'search' game
            // fails fast here rather than mid-game.
            let mut game = Game::new(config, None)?;
            let stdin = std::io::stdin();
            let outcome = game.run(&mut stdin.lock())?;
            record::record_result(&cli.outfile, &GameRecord::new(policy, !auto, outcome))?;
            Ok(())
        }
        Commands::Report => record::print_out_report(&cli.outfile),
    }
}
