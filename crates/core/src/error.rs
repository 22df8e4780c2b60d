//! Typed errors for the fallible edges of the engine.
//!
//! Gameplay itself never errors: an illegal move is a `false` return and a
//! broken internal invariant is a panic. What remains is input that comes
//! from outside, configuration and shape art.

use thiserror::Error;

use crate::types::{MAX_FIELD_DIM, MAX_SHAPE_DIM, MIN_FIELD_DIM};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("field width {0} is outside {min}..={max}", min = MIN_FIELD_DIM, max = MAX_FIELD_DIM)]
    Width(u8),
    #[error("field height {0} is outside {min}..={max}", min = MIN_FIELD_DIM, max = MAX_FIELD_DIM)]
    Height(u8),
    #[error("level threshold must be positive")]
    ZeroLevelThreshold,
    #[error("score per clear must be positive")]
    ZeroScorePerClear,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeParseError {
    #[error("shape art is empty")]
    Empty,
    #[error("shape is {rows}x{cols}, larger than {max}x{max}", max = MAX_SHAPE_DIM)]
    TooLarge { rows: usize, cols: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unexpected character {0:?} in shape art")]
    InvalidChar(char),
    #[error("row {0} has no filled cell")]
    EmptyRow(usize),
    #[error("column {0} has no filled cell")]
    EmptyColumn(usize),
    #[error("shape is {rows}x{cols}, each side must be 1..={max}", max = MAX_SHAPE_DIM)]
    BadDimensions { rows: u8, cols: u8 },
    #[error("bits {bits:#06x} reach outside a {rows}x{cols} shape")]
    BitsOutside { rows: u8, cols: u8, bits: u16 },
}
