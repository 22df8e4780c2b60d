//! Terminal falling-block runner (default binary).
//!
//! It uses crossterm for input and a custom framebuffer-based renderer.
//! Configuration comes from `BLOCKFALL_*` environment variables, overridden
//! by command-line flags.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event};
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use blockfall::core::{GameConfig, GameSession, GameSnapshot, ScoringPolicy, SpawnPolicy};
use blockfall::input::{map_key, map_mouse, GravityClock, InputCommand};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, ViewStatus, Viewport};
use blockfall::types::TICK_MS;

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum ScoringArg {
    Flat,
    PerLine,
}

impl From<ScoringArg> for ScoringPolicy {
    fn from(value: ScoringArg) -> Self {
        match value {
            ScoringArg::Flat => ScoringPolicy::Flat,
            ScoringArg::PerLine => ScoringPolicy::PerLine,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "blockfall", version, about = "Falling-block puzzle game for the terminal")]
struct Cli {
    #[arg(long, help = "Seed for the piece sequence")]
    seed: Option<u32>,

    #[arg(long, value_enum, help = "Award per clear event (flat) or per cleared row")]
    scoring: Option<ScoringArg>,

    #[arg(long, help = "Draw pieces from a shuffled 7-bag instead of uniformly")]
    bag: bool,

    #[arg(long, help = "Field width in cells")]
    width: Option<u8>,

    #[arg(long, help = "Field height in cells")]
    height: Option<u8>,

    #[arg(long, help = "Write logs to this file (the terminal is in raw mode while playing)")]
    log_file: Option<PathBuf>,

    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help = "Increase log verbosity (-v = DEBUG, -vv = TRACE)"
    )]
    verbose: u8,

    #[arg(long, help = "Print the final snapshot as JSON on exit")]
    json: bool,
}

impl Cli {
    fn config(&self) -> GameConfig {
        let mut config = GameConfig::from_env();
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(scoring) = self.scoring {
            config = config.with_scoring(scoring.into());
        }
        if self.bag {
            config = config.with_spawn(SpawnPolicy::Bag);
        }
        config.with_size(
            self.width.unwrap_or(config.width),
            self.height.unwrap_or(config.height),
        )
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.config();
    let mut session = GameSession::new(config).context("invalid game configuration")?;
    info!(?config, "starting session");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    let snap = session.snapshot();
    match snap.final_score() {
        Some(score) => println!("Game over! Score: {score}"),
        None => println!("Score: {}", snap.score),
    }
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snap)?);
    }
    Ok(())
}

fn run(term: &mut TerminalRenderer, session: &mut GameSession) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let mut clock = GravityClock::new(session.gravity_interval_ms());
    let mut paused = false;

    let mut last_frame = Instant::now();
    let frame_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into_with_status(&snap, ViewStatus { paused }, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next frame.
        let timeout = frame_duration
            .checked_sub(last_frame.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match map_key(key) {
                    Some(InputCommand::Quit) => return Ok(()),
                    Some(InputCommand::Pause) if !session.is_game_over() => {
                        paused = !paused;
                        info!(paused, "pause toggled");
                    }
                    Some(InputCommand::Reset) => {
                        session.reset();
                        paused = false;
                        clock = GravityClock::new(session.gravity_interval_ms());
                        info!("session reset");
                    }
                    Some(InputCommand::Action(action)) if !paused => {
                        session.apply(action);
                    }
                    _ => {}
                },
                Event::Mouse(mouse) if !paused => {
                    if let Some(action) = map_mouse(mouse) {
                        session.apply(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity.
        let elapsed = last_frame.elapsed();
        if elapsed >= frame_duration {
            last_frame = Instant::now();
            if paused || session.is_game_over() {
                continue;
            }

            clock.set_interval(session.gravity_interval_ms());
            let due = clock.update(elapsed.as_millis() as u32);
            for _ in 0..due {
                if !session.tick() {
                    break;
                }
            }
        }
    }
}
