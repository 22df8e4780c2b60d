//! The active piece: a shape placed at an origin on the field.

use serde::{Deserialize, Serialize};

use crate::field::PlayField;
use crate::shape::Shape;
use crate::types::ShapeKind;

/// A shape at a position
///
/// `col`/`row` locate the shape's top-left corner. Both are signed so a
/// candidate move past the left or top edge can be expressed and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: ShapeKind,
    pub shape: Shape,
    pub col: i8,
    pub row: i8,
    /// Whether this piece may still be swapped into hold
    pub hold_eligible: bool,
}

impl Piece {
    pub fn new(kind: ShapeKind, shape: Shape, col: i8, row: i8) -> Self {
        Self {
            kind,
            shape,
            col,
            row,
            hold_eligible: true,
        }
    }

    /// Same piece moved by `(dcol, drow)`
    pub fn shifted(&self, dcol: i8, drow: i8) -> Self {
        Self {
            col: self.col.saturating_add(dcol),
            row: self.row.saturating_add(drow),
            ..*self
        }
    }

    /// Same origin, different shape
    pub fn with_shape(&self, shape: Shape) -> Self {
        Self { shape, ..*self }
    }

    pub fn is_legal(&self, field: &PlayField) -> bool {
        field.is_legal_placement(&self.shape, self.col, self.row)
    }

    /// Absolute `(col, row)` of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> {
        let (col, row) = (self.col as i16, self.row as i16);
        self.shape
            .cells()
            .map(move |(r, c)| (col + c as i16, row + r as i16))
    }
}
