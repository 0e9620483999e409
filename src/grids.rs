//! Grid type aliases sized by the integer type indexing their link graph.
//!
//! A smaller index type makes the graph more compact but caps the number of cells (and passages)
//! a grid can hold, so construction fails with `ErrorKind::GridTooLarge` instead of overflowing.

use crate::errors::*;
use crate::grid::Grid;
use crate::units::{ColumnsCount, RowsCount};

pub type SmallGrid = Grid<u8>;
pub type MediumGrid = Grid<u16>;
pub type LargeGrid = Grid<u32>;

pub fn small_grid(rows: RowsCount, columns: ColumnsCount) -> Result<SmallGrid> {
    SmallGrid::new(rows, columns)
}

pub fn medium_grid(rows: RowsCount, columns: ColumnsCount) -> Result<MediumGrid> {
    MediumGrid::new(rows, columns)
}

pub fn large_grid(rows: RowsCount, columns: ColumnsCount) -> Result<LargeGrid> {
    LargeGrid::new(rows, columns)
}
