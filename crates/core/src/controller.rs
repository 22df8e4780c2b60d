//! Active piece controller - movement, rotation, drops and hold
//!
//! Every operation checks the candidate position against the [`PlayField`]
//! first and only then mutates; a rejected request leaves everything as it
//! was and returns `false`. The controller never locks a piece: when
//! [`ActivePieceController::soft_drop`] fails the piece has landed and the
//! caller decides what happens next.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::field::PlayField;
use crate::piece::Piece;
use crate::shape::{rotate, Shape};
use crate::spawner::PieceSpawner;
use crate::types::ShapeKind;

/// A shape parked in the hold slot, kept in the orientation it was held in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeldShape {
    pub kind: ShapeKind,
    pub shape: Shape,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivePieceController {
    active: Option<Piece>,
    held: Option<HeldShape>,
}

impl ActivePieceController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn held(&self) -> Option<HeldShape> {
        self.held
    }

    /// Hold is available once per natural spawn
    pub fn can_hold(&self) -> bool {
        self.active.is_some_and(|p| p.hold_eligible)
    }

    /// Install a freshly spawned piece
    pub fn set_active(&mut self, piece: Piece) {
        self.active = Some(piece);
    }

    /// Remove the active piece (to lock it, or on game over)
    pub fn take_active(&mut self) -> Option<Piece> {
        self.active.take()
    }

    /// Forget both the active piece and the held shape
    pub fn clear(&mut self) {
        self.active = None;
        self.held = None;
    }

    /// Try to move the active piece
    fn try_shift(&mut self, field: &PlayField, dcol: i8, drow: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dcol, drow);
        if moved.is_legal(field) {
            self.active = Some(moved);
            return true;
        }
        false
    }

    pub fn move_left(&mut self, field: &PlayField) -> bool {
        self.try_shift(field, -1, 0)
    }

    pub fn move_right(&mut self, field: &PlayField) -> bool {
        self.try_shift(field, 1, 0)
    }

    /// One row down. `false` means the piece has landed.
    pub fn soft_drop(&mut self, field: &PlayField) -> bool {
        self.try_shift(field, 0, 1)
    }

    /// Rotate clockwise in place. No kicks: the rotated shape must fit at
    /// the current origin.
    pub fn rotate(&mut self, field: &PlayField) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.with_shape(rotate(&active.shape));
        if rotated.is_legal(field) {
            self.active = Some(rotated);
            return true;
        }
        false
    }

    /// Drop as far as possible and return the rows travelled.
    ///
    /// The piece is left resting; the caller must lock it.
    pub fn hard_drop(&mut self, field: &PlayField) -> u32 {
        let Some(active) = self.active else {
            return 0;
        };

        let distance = field.drop_distance(&active.shape, active.col, active.row);
        if distance > 0 {
            self.active = Some(active.shifted(0, distance));
        }
        distance as u32
    }

    /// Row the active piece would land on
    pub fn ghost_row(&self, field: &PlayField) -> Option<i8> {
        let active = self.active?;
        Some(active.row + field.drop_distance(&active.shape, active.col, active.row))
    }

    /// Swap the active piece into hold.
    ///
    /// With an empty hold slot the spawner supplies the next piece; otherwise
    /// the held shape comes back at the spawn origin. The incoming piece is
    /// not hold-eligible. If it would not fit, the request is rejected and
    /// neither the controller nor the spawner changes.
    pub fn hold(&mut self, field: &PlayField, spawner: &mut PieceSpawner) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if !active.hold_eligible {
            return false;
        }

        let (incoming, advanced) = match self.held {
            Some(held) => (spawner.spawn_shape(held.kind, held.shape, false), None),
            None => {
                let mut next = spawner.clone();
                let mut piece = next.spawn();
                piece.hold_eligible = false;
                (piece, Some(next))
            }
        };

        if !incoming.is_legal(field) {
            return false;
        }

        if let Some(next) = advanced {
            *spawner = next;
        }
        trace!(held = ?active.kind, active = ?incoming.kind, "hold");
        self.held = Some(HeldShape {
            kind: active.kind,
            shape: active.shape,
        });
        self.active = Some(incoming);
        true
    }
}
