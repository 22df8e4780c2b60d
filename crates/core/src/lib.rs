//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game and nothing else.
//! It has no dependencies on terminals, input devices or timers, so it is:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Testable**: every rule is exercised by unit tests
//! - **Portable**: a terminal, a GUI or a headless script can drive it
//!
//! # Module Structure
//!
//! - [`shape`]: the seven-shape catalog and clockwise rotation
//! - [`field`]: the grid of locked cells, placement checks and row clearing
//! - [`piece`] / [`spawner`]: the falling piece and where new ones come from
//! - [`controller`]: movement, rotation, drops and hold for the active piece
//! - [`scoring`]: score, level and speed
//! - [`session`]: the Running/GameOver state machine that ties it together
//! - [`snapshot`]: a serializable view for renderers
//!
//! # Game Rules
//!
//! - **Spawn**: new pieces appear on the top row, horizontally centered
//! - **Rotation**: clockwise in place, without wall kicks
//! - **Lock**: a piece that cannot move down is committed immediately
//! - **Hold**: one shape can be parked, once per spawned piece
//! - **Scoring**: a flat award per clear event; a level every 500 points
//! - **Top-out**: a spawn that does not fit ends the game
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameSession::with_seed(12345);
//!
//! game.apply(GameAction::MoveRight);
//! game.apply(GameAction::Rotate);
//! game.apply(GameAction::HardDrop);
//!
//! assert_eq!(game.field().filled_count(), 4);
//! assert_eq!(game.score(), 0);
//! ```
//!
//! # Timing
//!
//! The session has no clock. Call [`GameSession::tick`] once per gravity
//! interval, which starts at 1000ms and shrinks as the level rises; see
//! [`GameSession::gravity_interval_ms`].

pub mod config;
pub mod controller;
pub mod error;
pub mod field;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shape;
pub mod snapshot;
pub mod spawner;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use config::GameConfig;
pub use controller::{ActivePieceController, HeldShape};
pub use error::{ConfigError, ShapeParseError};
pub use field::{FullRows, PlayField};
pub use piece::Piece;
pub use rng::{ShapeBag, SimpleRng};
pub use scoring::{ScoreResult, ScoreTracker, ScoringPolicy};
pub use session::GameSession;
pub use shape::{random_shape, rotate, shape_of, Shape, CATALOG};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use spawner::{PieceSpawner, SpawnPolicy};
