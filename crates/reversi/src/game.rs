//! Turn-taking state machine over a [`Board`].
//!
//! A move is either applied (discs flipped, turn handed over) or rejected
//! with a reason and no change. When the player to move next has no legal
//! move the turn passes back automatically; when neither side can move the
//! game is over.

use thiserror::Error;
use tracing::debug;

use crate::board::{Board, Player, BOARD_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("({row}, {col}) is off the board; rows and columns run 0..{size}", size = BOARD_SIZE)]
    OutOfBounds { row: i32, col: i32 },
    #[error("({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },
    #[error("({row}, {col}) does not flank any opponent disc")]
    NoFlips { row: usize, col: usize },
    #[error("the game is over")]
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied {
        flipped: usize,
        /// Player whose turn was skipped for lack of a legal move
        passed: Option<Player>,
        game_over: bool,
    },
    Rejected(RejectReason),
}

impl MoveOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Won(Player),
    Tie,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current: Player,
    over: bool,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard opening, X to move
    pub fn new() -> Self {
        Self::from_board(Board::new(), Player::X)
    }

    /// Continue from an arbitrary position. If `to_move` has no legal move
    /// the turn passes; if neither side has one the game is already over.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        let mut game = Self {
            board,
            current: to_move,
            over: false,
        };
        if !game.board.has_legal_move(to_move) {
            game.hand_over_from(to_move);
        }
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// `(x, o)` disc counts
    pub fn counts(&self) -> (u32, u32) {
        (self.board.count(Player::X), self.board.count(Player::O))
    }

    pub fn legal_moves(&self) -> Vec<(usize, usize)> {
        if self.over {
            return Vec::new();
        }
        self.board.legal_moves(self.current)
    }

    /// Final result; `None` while the game is still running
    pub fn winner(&self) -> Option<GameResult> {
        if !self.over {
            return None;
        }
        let (x, o) = self.counts();
        Some(match x.cmp(&o) {
            std::cmp::Ordering::Greater => GameResult::Won(Player::X),
            std::cmp::Ordering::Less => GameResult::Won(Player::O),
            std::cmp::Ordering::Equal => GameResult::Tie,
        })
    }

    /// Play for the current player at (row, col)
    pub fn apply_move(&mut self, row: i32, col: i32) -> MoveOutcome {
        if self.over {
            return MoveOutcome::Rejected(RejectReason::GameOver);
        }
        let size = BOARD_SIZE as i32;
        if !(0..size).contains(&row) || !(0..size).contains(&col) {
            return MoveOutcome::Rejected(RejectReason::OutOfBounds { row, col });
        }

        let (row, col) = (row as usize, col as usize);
        if self.board.get(row, col).is_some() {
            return MoveOutcome::Rejected(RejectReason::Occupied { row, col });
        }

        let flipped = self.board.play(self.current, row, col).len();
        if flipped == 0 {
            return MoveOutcome::Rejected(RejectReason::NoFlips { row, col });
        }
        debug!(player = %self.current, row, col, flipped, "disc placed");

        let passed = self.hand_over_from(self.current);
        MoveOutcome::Applied {
            flipped,
            passed,
            game_over: self.over,
        }
    }

    /// Give the turn to the opponent of `player`, skipping whoever cannot
    /// move. Returns the skipped player, if any.
    fn hand_over_from(&mut self, player: Player) -> Option<Player> {
        let next = player.opponent();
        if self.board.has_legal_move(next) {
            self.current = next;
            return None;
        }
        if self.board.has_legal_move(player) {
            debug!(player = %next, "no legal move, turn passes");
            self.current = player;
            return Some(next);
        }
        self.over = true;
        debug!(x = self.board.count(Player::X), o = self.board.count(Player::O), "game over");
        None
    }
}

/// Parse a `row col` line (whitespace or comma separated)
pub fn parse_move(line: &str) -> Option<(i32, i32)> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((row, col))
}
