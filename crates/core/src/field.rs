//! Play field - the grid of locked cells
//!
//! The field is a `width x height` grid of [`Cell`]s stored as one flat
//! row-major vector. Coordinates are `(col, row)` with `col` growing to the
//! right and `row` growing downward; row 0 is the top (spawn) row.
//!
//! Only [`PlayField::commit`] and [`PlayField::clear_and_compact`] change the
//! grid during play. Both treat a broken precondition as a bug and panic
//! instead of writing a corrupt grid.

use std::fmt;

use arrayvec::ArrayVec;

use crate::shape::Shape;
use crate::types::{Cell, MAX_FIELD_DIM, MIN_FIELD_DIM};

/// Row indices returned by [`PlayField::detect_full_rows`], ascending
pub type FullRows = ArrayVec<usize, { MAX_FIELD_DIM as usize }>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayField {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
}

impl PlayField {
    /// Create an empty field.
    ///
    /// Panics if either dimension is outside `MIN_FIELD_DIM..=MAX_FIELD_DIM`;
    /// use [`crate::GameConfig::validate`] to check user-supplied sizes first.
    pub fn new(width: u8, height: u8) -> Self {
        assert!(
            (MIN_FIELD_DIM..=MAX_FIELD_DIM).contains(&width)
                && (MIN_FIELD_DIM..=MAX_FIELD_DIM).contains(&height),
            "field size {width}x{height} outside {MIN_FIELD_DIM}..={MAX_FIELD_DIM}"
        );
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(&self, col: i16, row: i16) -> Option<usize> {
        if col < 0 || col >= self.width as i16 || row < 0 || row >= self.height as i16 {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at (col, row); `None` if out of bounds
    pub fn get(&self, col: i8, row: i8) -> Option<Cell> {
        self.index(col as i16, row as i16).map(|idx| self.cells[idx])
    }

    /// Set cell at (col, row); returns false if out of bounds
    pub fn set(&mut self, col: i8, row: i8, cell: Cell) -> bool {
        match self.index(col as i16, row as i16) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    #[inline(always)]
    fn is_vacant(&self, col: i16, row: i16) -> bool {
        matches!(self.index(col, row), Some(idx) if self.cells[idx] == Cell::Empty)
    }

    /// In bounds and filled
    pub fn is_filled(&self, col: i8, row: i8) -> bool {
        matches!(self.get(col, row), Some(Cell::Filled))
    }

    /// Whether `shape` with its top-left corner at (col, row) fits: every
    /// occupied cell lands inside the field on an empty cell.
    pub fn is_legal_placement(&self, shape: &Shape, col: i8, row: i8) -> bool {
        shape
            .cells()
            .all(|(r, c)| self.is_vacant(col as i16 + c as i16, row as i16 + r as i16))
    }

    /// A spawn position that is not legal ends the game
    pub fn is_top_out(&self, shape: &Shape, col: i8, row: i8) -> bool {
        !self.is_legal_placement(shape, col, row)
    }

    /// Rows `shape` can still fall from (col, row) before landing
    pub fn drop_distance(&self, shape: &Shape, col: i8, row: i8) -> i8 {
        let mut distance: i8 = 0;
        while self.is_legal_placement(shape, col, row.saturating_add(distance + 1)) {
            distance += 1;
        }
        distance
    }

    /// Lock a shape into the grid.
    ///
    /// Panics if the placement is not legal: callers check legality before
    /// committing, so an illegal commit means engine state is already wrong.
    pub fn commit(&mut self, shape: &Shape, col: i8, row: i8) {
        assert!(
            self.is_legal_placement(shape, col, row),
            "commit of illegal placement at ({col}, {row}):\n{shape}"
        );
        for (r, c) in shape.cells() {
            let idx = (row as usize + r as usize) * self.width as usize + col as usize + c as usize;
            self.cells[idx] = Cell::Filled;
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.height as usize {
            return false;
        }
        let width = self.width as usize;
        let start = row * width;
        self.cells[start..start + width]
            .iter()
            .all(|cell| cell.is_filled())
    }

    /// Indices of every full row, top to bottom
    pub fn detect_full_rows(&self) -> FullRows {
        (0..self.height as usize)
            .filter(|&row| self.is_row_full(row))
            .collect()
    }

    /// Remove the given rows and let everything above fall into the gaps.
    ///
    /// The row set is collected first and then compacted in one bottom-up
    /// sweep, so several (even non-adjacent) rows are removed correctly in a
    /// single call. Duplicate indices count once. Returns the number of rows
    /// removed. Panics on an index outside the field.
    pub fn clear_and_compact(&mut self, rows: &[usize]) -> usize {
        let height = self.height as usize;
        let width = self.width as usize;

        let mut removed: u64 = 0;
        for &row in rows {
            assert!(row < height, "row {row} out of range for field height {height}");
            removed |= 1 << row;
        }
        if removed == 0 {
            return 0;
        }

        // Two-pointer sweep: `write` never passes `read`, so a source row is
        // always copied before it is overwritten.
        let mut write = height;
        for read in (0..height).rev() {
            if removed & (1 << read) != 0 {
                continue;
            }
            write -= 1;
            if write != read {
                let src = read * width;
                self.cells.copy_within(src..src + width, write * width);
            }
        }

        self.cells[..write * width].fill(Cell::Empty);
        removed.count_ones() as usize
    }

    /// Detect and remove all full rows; returns the removed indices
    pub fn clear_full_rows(&mut self) -> FullRows {
        let rows = self.detect_full_rows();
        self.clear_and_compact(&rows);
        rows
    }

    /// Fill every cell of a row (puzzle and test setup)
    pub fn fill_row(&mut self, row: usize) {
        assert!(row < self.height as usize, "row {row} out of range");
        let width = self.width as usize;
        self.cells[row * width..(row + 1) * width].fill(Cell::Filled);
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_filled()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width as usize)
    }

    /// Empty the whole field
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }
}

impl fmt::Display for PlayField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for cell in row {
                f.write_str(if cell.is_filled() { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}
