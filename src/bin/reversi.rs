//! Disc-flipping game on stdin/stdout.
//!
//! Each turn reads one `row col` line. Invalid input re-prompts the same
//! player until a legal move arrives.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::prelude::*;

use blockfall::reversi::{parse_move, Game, GameResult, MoveOutcome};

#[derive(Debug, Parser)]
#[command(name = "reversi", version, about = "Two-player disc-flipping game")]
struct Cli {
    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help = "Log to stderr (-v = DEBUG, -vv = TRACE)"
    )]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.verbose > 0 {
        let level = if cli.verbose == 1 { Level::DEBUG } else { Level::TRACE };
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(false),
            )
            .with(tracing_subscriber::filter::LevelFilter::from_level(level))
            .init();
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut out = io::stdout().lock();

    let mut game = Game::new();
    write!(out, "{}", game.board())?;

    while !game.is_over() {
        write!(
            out,
            "Player {}'s turn. Enter row and column (0-7): ",
            game.current_player()
        )?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out, "\nInput closed; game abandoned.")?;
            return Ok(());
        };
        let line = line.context("reading move from stdin")?;

        let Some((row, col)) = parse_move(&line) else {
            writeln!(out, "Enter two numbers, for example `2 4`.")?;
            continue;
        };

        match game.apply_move(row, col) {
            MoveOutcome::Applied { passed, .. } => {
                writeln!(out)?;
                write!(out, "{}", game.board())?;
                if let Some(player) = passed {
                    writeln!(out, "Player {player} has no legal move and passes.")?;
                }
            }
            MoveOutcome::Rejected(reason) => {
                writeln!(out, "Invalid move: {reason}. Try again.")?;
            }
        }
    }

    let (x, o) = game.counts();
    writeln!(out, "X: {x}  O: {o}")?;
    match game.winner() {
        Some(GameResult::Won(player)) => writeln!(out, "Player {player} wins!")?,
        Some(GameResult::Tie) | None => writeln!(out, "It's a tie!")?,
    }
    Ok(())
}
