//! Game session - the Running/GameOver state machine
//!
//! This module ties together the field, the active piece, the spawner and
//! the score tracker. It owns the lock cycle:
//!
//! 1. the active piece fails to move down (gravity, soft drop or hard drop)
//! 2. it is committed to the field
//! 3. full rows are detected, removed and scored
//! 4. the next piece spawns; if it does not fit the session is over
//!
//! The session never sleeps or polls. A front-end calls [`GameSession::tick`]
//! whenever a gravity interval has elapsed and [`GameSession::apply`] for
//! each player intent.

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::controller::{ActivePieceController, HeldShape};
use crate::error::ConfigError;
use crate::field::PlayField;
use crate::piece::Piece;
use crate::scoring::{ScoreResult, ScoreTracker};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::spawner::PieceSpawner;
use crate::types::{GameAction, LockEvent, SessionState};

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    field: PlayField,
    controller: ActivePieceController,
    spawner: PieceSpawner,
    scores: ScoreTracker,
    state: SessionState,
    /// Natural spawns since the session (re)started
    pieces_spawned: u32,
    /// Last lock event (consumed by observers)
    last_event: Option<LockEvent>,
}

impl GameSession {
    /// Start a session on an empty field
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let field = PlayField::new(config.width, config.height);
        Ok(Self::start(config, field))
    }

    /// Reference rules with a specific seed
    pub fn with_seed(seed: u32) -> Self {
        let config = GameConfig::default().with_seed(seed);
        Self::start(config, PlayField::new(config.width, config.height))
    }

    /// Start on a pre-populated field. The field's dimensions override the
    /// configured ones. A blocked first spawn ends the session immediately.
    pub fn with_field(config: GameConfig, field: PlayField) -> Result<Self, ConfigError> {
        let config = config.with_size(field.width(), field.height());
        config.validate()?;
        Ok(Self::start(config, field))
    }

    fn start(config: GameConfig, field: PlayField) -> Self {
        let mut session = Self {
            config,
            field,
            controller: ActivePieceController::new(),
            spawner: PieceSpawner::new(config.seed, config.spawn, config.width),
            scores: ScoreTracker::from_config(&config),
            state: SessionState::Running,
            pieces_spawned: 0,
            last_event: None,
        };
        session.spawn_next();
        session
    }

    /// Spawn the next natural piece, or end the session if it does not fit
    fn spawn_next(&mut self) -> bool {
        let piece = self.spawner.spawn();
        if self.field.is_top_out(&piece.shape, piece.col, piece.row) {
            self.controller.take_active();
            self.state = SessionState::GameOver;
            info!(
                score = self.scores.score(),
                lines = self.scores.lines(),
                pieces = self.pieces_spawned,
                "game over"
            );
            return false;
        }

        self.controller.set_active(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        true
    }

    /// Move down one row, locking the piece if it has landed
    fn step_down(&mut self) -> bool {
        if self.controller.active().is_none() {
            return false;
        }
        if !self.controller.soft_drop(&self.field) {
            self.lock_active();
        }
        true
    }

    /// Commit the active piece, clear rows, score, spawn the next piece
    fn lock_active(&mut self) {
        let Some(piece) = self.controller.take_active() else {
            return;
        };

        self.field.commit(&piece.shape, piece.col, piece.row);
        debug!(kind = ?piece.kind, col = piece.col, row = piece.row, "piece locked");

        let full = self.field.detect_full_rows();
        let result = if full.is_empty() {
            ScoreResult::default()
        } else {
            let removed = self.field.clear_and_compact(&full);
            let result = self.scores.on_rows_cleared(removed);
            debug!(rows = ?full.as_slice(), points = result.points, "rows cleared");
            result
        };

        if result.leveled_up {
            info!(
                level = self.scores.level(),
                speed = self.scores.speed_multiplier(),
                "level up"
            );
        }

        let topped_out = !self.spawn_next();
        self.last_event = Some(LockEvent {
            rows_cleared: full.len() as u32,
            points: result.points,
            leveled_up: result.leveled_up,
            topped_out,
        });
    }

    /// Apply a player intent. Returns whether the session changed.
    ///
    /// Every action is ignored once the session is over.
    pub fn apply(&mut self, action: GameAction) -> bool {
        if self.is_game_over() {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.controller.move_left(&self.field),
            GameAction::MoveRight => self.controller.move_right(&self.field),
            GameAction::Rotate => self.controller.rotate(&self.field),
            GameAction::SoftDrop => self.step_down(),
            GameAction::HardDrop => {
                if self.controller.active().is_none() {
                    return false;
                }
                self.controller.hard_drop(&self.field);
                self.lock_active();
                true
            }
            GameAction::Hold => self.controller.hold(&self.field, &mut self.spawner),
        }
    }

    /// One gravity step
    pub fn tick(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.step_down()
    }

    /// Start over with the same configuration. The piece sequence continues
    /// from the current RNG state rather than repeating the first game.
    pub fn reset(&mut self) {
        self.spawner = PieceSpawner::new(self.spawner.seed(), self.config.spawn, self.config.width);
        self.field.clear();
        self.controller.clear();
        self.scores.reset();
        self.state = SessionState::Running;
        self.pieces_spawned = 0;
        self.last_event = None;
        self.spawn_next();
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    /// The score to surface once the game has ended
    pub fn final_score(&self) -> Option<u32> {
        self.is_game_over().then(|| self.scores.score())
    }

    pub fn score(&self) -> u32 {
        self.scores.score()
    }

    pub fn level(&self) -> u32 {
        self.scores.level()
    }

    pub fn lines(&self) -> u32 {
        self.scores.lines()
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.scores.speed_multiplier()
    }

    /// How long a front-end should wait between gravity ticks
    pub fn gravity_interval_ms(&self) -> u32 {
        self.scores.gravity_interval_ms()
    }

    pub fn field(&self) -> &PlayField {
        &self.field
    }

    pub fn active(&self) -> Option<Piece> {
        self.controller.active()
    }

    pub fn held(&self) -> Option<HeldShape> {
        self.controller.held()
    }

    pub fn can_hold(&self) -> bool {
        self.controller.can_hold()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Row the active piece would land on
    pub fn ghost_row(&self) -> Option<i8> {
        self.controller.ghost_row(&self.field)
    }

    /// Fill `out` in place, reusing its cell buffer
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.field.width();
        out.height = self.field.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.field.cells());

        out.active = self.controller.active().map(ActiveSnapshot::from);
        out.ghost_row = self.ghost_row();
        out.held = self.controller.held();
        out.can_hold = self.controller.can_hold();
        out.score = self.scores.score();
        out.level = self.scores.level();
        out.lines = self.scores.lines();
        out.speed_multiplier = self.scores.speed_multiplier();
        out.state = self.state;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::with_seed(1)
    }
}
