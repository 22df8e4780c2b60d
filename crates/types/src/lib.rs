//! Shared types and constants.
//!
//! Everything here is plain data with no game logic, so it can be used by the
//! core engine, the terminal front-end and any external renderer alike.
//!
//! # Field Dimensions
//!
//! The reference play field is 10 columns by 20 rows:
//!
//! - **Width**: columns indexed 0-9 (left to right)
//! - **Height**: rows indexed 0-19 (top to bottom)
//!
//! Other sizes are allowed between [`MIN_FIELD_DIM`] and [`MAX_FIELD_DIM`].
//!
//! # Scoring and Speed
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SCORE_PER_CLEAR` | 100 | Points for one clear event |
//! | `LEVEL_SCORE_THRESHOLD` | 500 | Score needed per level step |
//! | `SPEED_STEP` | 0.1 | Speed multiplier added per level |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `TICK_MS` | 16 | Front-end frame interval |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, ShapeKind, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(FIELD_WIDTH, 10);
//! assert_eq!(FIELD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Reference field width in cells (10 columns)
pub const FIELD_WIDTH: u8 = 10;

/// Reference field height in cells (20 rows)
pub const FIELD_HEIGHT: u8 = 20;

/// Smallest accepted field dimension (a 4x4 shape must fit)
pub const MIN_FIELD_DIM: u8 = 4;

/// Largest accepted field dimension (row sets are tracked in a `u64`)
pub const MAX_FIELD_DIM: u8 = 64;

/// Largest shape dimension in either direction
pub const MAX_SHAPE_DIM: u8 = 4;

/// Points awarded for a clear event
pub const SCORE_PER_CLEAR: u32 = 100;

/// Score needed for each level step
pub const LEVEL_SCORE_THRESHOLD: u32 = 500;

/// Speed multiplier increase per level above 1
pub const SPEED_STEP: f64 = 0.1;

/// Gravity interval at level 1 (one row per second)
pub const BASE_DROP_MS: u32 = 1000;

/// Front-end frame interval in milliseconds (16ms is roughly 60 FPS)
pub const TICK_MS: u32 = 16;


/// The seven catalog shapes
///
/// - **I**: straight bar
/// - **O**: 2x2 square
/// - **T**: T-shaped
/// - **S**: S-shaped
/// - **Z**: Z-shaped (mirror of S)
/// - **J**: J-shaped
/// - **L**: L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl ShapeKind {
    /// Every kind in catalog order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Parse a kind from a string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::T => "t",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
        }
    }

    /// Upper-case letter for display
    pub fn letter(&self) -> char {
        match self {
            ShapeKind::I => 'I',
            ShapeKind::O => 'O',
            ShapeKind::T => 'T',
            ShapeKind::S => 'S',
            ShapeKind::Z => 'Z',
            ShapeKind::J => 'J',
            ShapeKind::L => 'L',
        }
    }
}

/// Player intents delivered to a session
///
/// These are the only inputs the engine understands. Raw device events are
/// mapped to them by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it has landed
    SoftDrop,
    /// Rotate piece 90° clockwise in place
    Rotate,
    /// Drop piece to its lowest legal position and lock it
    HardDrop,
    /// Swap the active piece with the held shape (once per spawn)
    Hold,
}

impl GameAction {
    /// Every action, in declaration order
    pub const ALL: [GameAction; 6] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::Rotate,
        GameAction::HardDrop,
        GameAction::Hold,
    ];

    /// Parse an action from a string (case-insensitive camelCase names)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "hold" => Some(GameAction::Hold),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Hold => "hold",
        }
    }
}

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Running,
    /// Terminal: a freshly spawned piece could not be placed
    GameOver,
}

/// A cell of the play field
///
/// Cells are colorless: the field only records whether something is there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Filled,
}

impl Cell {
    pub fn is_filled(self) -> bool {
        matches!(self, Cell::Filled)
    }
}

/// Emitted every time a piece locks.
///
/// Observers take it from the session after a tick or drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LockEvent {
    pub rows_cleared: u32,
    pub points: u32,
    pub leveled_up: bool,
    /// The piece spawned after this lock did not fit
    pub topped_out: bool,
}
