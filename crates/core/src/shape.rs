//! Shape catalog - boolean occupancy grids and their rotation
//!
//! A [`Shape`] is a tight rectangle of at most 4x4 cells. Every row and every
//! column it claims holds at least one filled cell, so a shape's width is the
//! width of its blocks. Rotation never mutates: it returns a new shape whose
//! dimensions are swapped.
//!
//! Shapes parse from and print as ASCII art (`X` filled, `.` empty):
//!
//! ```
//! use blockfall_core::shape::{rotate, Shape};
//!
//! let t: Shape = ".X.\nXXX".parse().unwrap();
//! assert_eq!((t.rows(), t.cols()), (2, 3));
//!
//! let r = rotate(&t);
//! assert_eq!(r.to_string(), "X.\nXX\nX.");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShapeParseError;
use crate::rng::SimpleRng;
use crate::types::{ShapeKind, MAX_SHAPE_DIM};

/// Bit stride between rows inside [`Shape::bits`]
const STRIDE: u8 = MAX_SHAPE_DIM;

/// Immutable occupancy grid of a piece
///
/// Deserialization runs the same checks as parsing, so a shape read from
/// JSON is always tight and inside its rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ShapeRepr", into = "ShapeRepr")]
pub struct Shape {
    rows: u8,
    cols: u8,
    /// Row-major occupancy, bit `row * 4 + col`
    bits: u16,
}

impl Shape {
    /// Build a shape from per-row bit masks.
    ///
    /// Masks read left to right: for a 3-wide shape `0b100` is the leftmost
    /// column. Only the first `rows` masks are used.
    pub const fn from_row_masks(rows: u8, cols: u8, masks: [u8; 4]) -> Self {
        assert!(rows >= 1 && rows <= MAX_SHAPE_DIM);
        assert!(cols >= 1 && cols <= MAX_SHAPE_DIM);

        let mut bits = 0u16;
        let mut r = 0;
        while r < rows {
            let mut c = 0;
            while c < cols {
                if (masks[r as usize] >> (cols - 1 - c)) & 1 == 1 {
                    bits |= 1 << (r * STRIDE + c);
                }
                c += 1;
            }
            r += 1;
        }
        Self { rows, cols, bits }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether `(row, col)` is occupied. Out-of-range cells are empty.
    #[inline(always)]
    pub fn is_filled(&self, row: u8, col: u8) -> bool {
        row < self.rows && col < self.cols && (self.bits >> (row * STRIDE + col)) & 1 == 1
    }

    /// Number of occupied cells
    pub fn cell_count(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Occupied cells as `(row, col)`, top to bottom then left to right
    pub fn cells(&self) -> impl Iterator<Item = (u8, u8)> {
        let shape = *self;
        (0..shape.rows).flat_map(move |r| {
            (0..shape.cols)
                .filter(move |&c| shape.is_filled(r, c))
                .map(move |c| (r, c))
        })
    }

    /// Bits covering the `rows x cols` rectangle
    fn rect_mask(rows: u8, cols: u8) -> u16 {
        let row_mask = (1u16 << cols) - 1;
        (0..rows).fold(0, |mask, r| mask | row_mask << (r * STRIDE))
    }

    /// Every row and column holds at least one filled cell.
    fn check_tight(&self) -> Result<(), ShapeParseError> {
        let empty_row = (0..self.rows).find(|&r| (0..self.cols).all(|c| !self.is_filled(r, c)));
        if let Some(r) = empty_row {
            return Err(ShapeParseError::EmptyRow(r as usize));
        }
        let empty_col = (0..self.cols).find(|&c| (0..self.rows).all(|r| !self.is_filled(r, c)));
        if let Some(c) = empty_col {
            return Err(ShapeParseError::EmptyColumn(c as usize));
        }
        Ok(())
    }

    /// 90° clockwise copy: `rotated[j][rows - 1 - i] = self[i][j]`
    pub fn rotated(&self) -> Shape {
        let mut bits = 0u16;
        for (i, j) in self.cells() {
            let (r, c) = (j, self.rows - 1 - i);
            bits |= 1 << (r * STRIDE + c);
        }
        Shape {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }
}

/// Rotate a shape 90° clockwise
pub fn rotate(shape: &Shape) -> Shape {
    shape.rotated()
}

/// The fixed catalog, in [`ShapeKind::ALL`] order
pub const CATALOG: [(ShapeKind, Shape); 7] = [
    (ShapeKind::I, Shape::from_row_masks(1, 4, [0b1111, 0, 0, 0])),
    (ShapeKind::O, Shape::from_row_masks(2, 2, [0b11, 0b11, 0, 0])),
    (ShapeKind::T, Shape::from_row_masks(2, 3, [0b010, 0b111, 0, 0])),
    (ShapeKind::S, Shape::from_row_masks(2, 3, [0b011, 0b110, 0, 0])),
    (ShapeKind::Z, Shape::from_row_masks(2, 3, [0b110, 0b011, 0, 0])),
    (ShapeKind::J, Shape::from_row_masks(2, 3, [0b100, 0b111, 0, 0])),
    (ShapeKind::L, Shape::from_row_masks(2, 3, [0b001, 0b111, 0, 0])),
];

/// Canonical (spawn) orientation of a catalog kind
pub fn shape_of(kind: ShapeKind) -> Shape {
    match kind {
        ShapeKind::I => CATALOG[0].1,
        ShapeKind::O => CATALOG[1].1,
        ShapeKind::T => CATALOG[2].1,
        ShapeKind::S => CATALOG[3].1,
        ShapeKind::Z => CATALOG[4].1,
        ShapeKind::J => CATALOG[5].1,
        ShapeKind::L => CATALOG[6].1,
    }
}

/// Pick a catalog entry uniformly at random
pub fn random_shape(rng: &mut SimpleRng) -> (ShapeKind, Shape) {
    CATALOG[rng.next_range(CATALOG.len() as u32) as usize]
}

impl FromStr for Shape {
    type Err = ShapeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let Some(first) = lines.first() else {
            return Err(ShapeParseError::Empty);
        };
        let rows = lines.len();
        let cols = first.chars().count();
        if rows > MAX_SHAPE_DIM as usize || cols > MAX_SHAPE_DIM as usize {
            return Err(ShapeParseError::TooLarge { rows, cols });
        }

        let mut masks = [0u8; 4];
        for (r, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(ShapeParseError::Ragged {
                    row: r,
                    expected: cols,
                    found,
                });
            }
            for ch in line.chars() {
                let bit = match ch {
                    'X' | 'x' | '#' => 1,
                    '.' | '-' => 0,
                    other => return Err(ShapeParseError::InvalidChar(other)),
                };
                masks[r] = (masks[r] << 1) | bit;
            }
        }

        let shape = Shape::from_row_masks(rows as u8, cols as u8, masks);
        shape.check_tight()?;
        Ok(shape)
    }
}

/// Wire form of [`Shape`]; converted back only through [`TryFrom`]
#[derive(Serialize, Deserialize)]
struct ShapeRepr {
    rows: u8,
    cols: u8,
    bits: u16,
}

impl From<Shape> for ShapeRepr {
    fn from(shape: Shape) -> Self {
        Self {
            rows: shape.rows,
            cols: shape.cols,
            bits: shape.bits,
        }
    }
}

impl TryFrom<ShapeRepr> for Shape {
    type Error = ShapeParseError;

    fn try_from(repr: ShapeRepr) -> Result<Self, Self::Error> {
        let ShapeRepr { rows, cols, bits } = repr;
        let dims = 1..=MAX_SHAPE_DIM;
        if !dims.contains(&rows) || !dims.contains(&cols) {
            return Err(ShapeParseError::BadDimensions { rows, cols });
        }
        if bits & !Shape::rect_mask(rows, cols) != 0 {
            return Err(ShapeParseError::BitsOutside { rows, cols, bits });
        }
        let shape = Shape { rows, cols, bits };
        shape.check_tight()?;
        Ok(shape)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            if r > 0 {
                f.write_str("\n")?;
            }
            for c in 0..self.cols {
                f.write_str(if self.is_filled(r, c) { "X" } else { "." })?;
            }
        }
        Ok(())
    }
}
