//! Disc-flipping board game (Reversi rules) on an 8x8 board.
//!
//! Independent of the falling-block engine; it shares only the workspace.
//!
//! ```
//! use blockfall_reversi::{Game, MoveOutcome, Player};
//!
//! let mut game = Game::new();
//! assert_eq!(game.current_player(), Player::X);
//! assert!(game.apply_move(2, 4).is_applied());
//! assert!(matches!(game.apply_move(0, 0), MoveOutcome::Rejected(_)));
//! ```

pub mod board;
pub mod game;

pub use board::{Board, Flips, Player, BOARD_SIZE};
pub use game::{parse_move, Game, GameResult, MoveOutcome, RejectReason};
