//! Read-only view of a session for renderers and external observers.

use serde::{Deserialize, Serialize};

use crate::controller::HeldShape;
use crate::piece::Piece;
use crate::shape::Shape;
use crate::types::{Cell, SessionState, ShapeKind, FIELD_HEIGHT, FIELD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub shape: Shape,
    pub col: i8,
    pub row: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            col: value.col,
            row: value.row,
        }
    }
}

impl ActiveSnapshot {
    /// Absolute `(col, row)` of every occupied cell, with the origin moved
    /// to `row`
    pub fn cells_at(&self, row: i8) -> impl Iterator<Item = (i16, i16)> {
        let (col, row) = (self.col as i16, row as i16);
        self.shape
            .cells()
            .map(move |(r, c)| (col + c as i16, row + r as i16))
    }

    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> {
        self.cells_at(self.row)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major locked cells
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub ghost_row: Option<i8>,
    pub held: Option<HeldShape>,
    pub can_hold: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub speed_multiplier: f64,
    pub state: SessionState,
}

impl GameSnapshot {
    /// Locked cell at (col, row); `None` if out of bounds
    pub fn cell(&self, col: i16, row: i16) -> Option<Cell> {
        if col < 0 || row < 0 || col >= self.width as i16 || row >= self.height as i16 {
            return None;
        }
        self.cells
            .get(row as usize * self.width as usize + col as usize)
            .copied()
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn final_score(&self) -> Option<u32> {
        self.is_game_over().then_some(self.score)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            cells: vec![Cell::Empty; FIELD_WIDTH as usize * FIELD_HEIGHT as usize],
            active: None,
            ghost_row: None,
            held: None,
            can_hold: true,
            score: 0,
            level: 1,
            lines: 0,
            speed_multiplier: 1.0,
            state: SessionState::Running,
        }
    }
}
