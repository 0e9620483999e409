use std::fmt;

use crate::cells::GridCoordinate;
use crate::units::{ColumnIndex, ColumnsCount, RowIndex, RowsCount};

/// Row-major iteration over every coordinate of a rectangular grid.
#[derive(Copy, Clone)]
pub struct CellIter {
    columns: ColumnsCount,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub(crate) fn new(rows: RowsCount, columns: ColumnsCount) -> CellIter {
        CellIter {
            columns,
            current_cell_number: 0,
            cells_count: rows.0 * columns.0,
        }
    }
}

impl fmt::Debug for CellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = GridCoordinate::from_row_major_index(self.current_cell_number, self.columns);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        (lower_bound, Some(lower_bound))
    }
}

#[derive(Debug, Copy, Clone)]
enum BatchIterType {
    Row,
    Column,
}

/// Iterates a grid one whole row (west to east) or one whole column (north to south) at a time.
#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    iter_type: BatchIterType,
    current_index: usize,
    rows: RowsCount,
    columns: ColumnsCount,
}

impl BatchIter {
    pub(crate) fn rows(rows: RowsCount, columns: ColumnsCount) -> BatchIter {
        BatchIter::new(BatchIterType::Row, rows, columns)
    }

    pub(crate) fn columns(rows: RowsCount, columns: ColumnsCount) -> BatchIter {
        BatchIter::new(BatchIterType::Column, rows, columns)
    }

    fn new(iter_type: BatchIterType, rows: RowsCount, columns: ColumnsCount) -> BatchIter {
        BatchIter {
            iter_type,
            current_index: 0,
            rows,
            columns,
        }
    }

    fn batches_count(&self) -> usize {
        match self.iter_type {
            BatchIterType::Row => self.rows.0,
            BatchIterType::Column => self.columns.0,
        }
    }
}

impl ExactSizeIterator for BatchIter {} // default impl using size_hint()
impl Iterator for BatchIter {
    type Item = Vec<GridCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {

        if self.current_index >= self.batches_count() {
            return None;
        }

        let index = self.current_index;
        let coords = match self.iter_type {
            BatchIterType::Row => {
                (0..self.columns.0)
                    .map(|i| GridCoordinate::from_row_column_indices(RowIndex(index), ColumnIndex(i)))
                    .collect()
            }
            BatchIterType::Column => {
                (0..self.rows.0)
                    .map(|i| GridCoordinate::from_row_column_indices(RowIndex(i), ColumnIndex(index)))
                    .collect()
            }
        };
        self.current_index += 1;
        Some(coords)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.batches_count() - self.current_index;
        (lower_bound, Some(lower_bound))
    }
}
