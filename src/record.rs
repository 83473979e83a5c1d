//! Keeping score across games.
//!
//! Every finished game is appended as one CSV row, so the file doubles as a
//! play history and the input for the `report` subcommand.

use std::io::Seek;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::{MovePolicy, Outcome};

#[derive(Serialize, Deserialize)]
pub struct GameRecord {
    pub policy: MovePolicy,
    pub interactive: bool,
    pub outcome: Outcome,
    pub played_at: chrono::DateTime<chrono::Local>,
}

impl GameRecord {
    pub fn new(policy: MovePolicy, interactive: bool, outcome: Outcome) -> Self {
        Self {
            policy,
            interactive,
            outcome,
            played_at: chrono::Local::now(),
        }
    }
}

/// Append `record` to the score file, writing the header only when the file
/// is new or empty.
pub fn record_result(outfile: &Path, record: &GameRecord) -> anyhow::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(outfile)
        .with_context(|| format!("cannot open score file {}", outfile.display()))?;
    let needs_headers = file.seek(std::io::SeekFrom::End(0))? == 0;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);
    wtr.serialize(record)?;
    wtr.flush()?;
    Ok(())
}

/// Tally the score file: wins, losses, draws and the mean score from the
/// player's point of view.
pub fn print_out_report(outfile: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::open(outfile)
        .with_context(|| format!("no score file at {}", outfile.display()))?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut n_games = 0u32;
    let mut n_wins = 0u32;
    let mut n_losses = 0u32;
    let mut n_draws = 0u32;
    let mut total_score = 0i32;
    for line in rdr.deserialize() {
        let record: GameRecord = line?;
        n_games += 1;
        total_score += record.outcome.score();
        match record.outcome {
            Outcome::PlayerWin => n_wins += 1,
            Outcome::ComputerWin => n_losses += 1,
            Outcome::Draw => n_draws += 1,
        }
    }
    if n_games == 0 {
        println!("No games recorded in {}", outfile.display());
        return Ok(());
    }
    println!("{n_games} games: {n_wins} won, {n_losses} lost, {n_draws} drawn");
    println!("mean score: {:.2}", f64::from(total_score) / f64::from(n_games));
    Ok(())
}
