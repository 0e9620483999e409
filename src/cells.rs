use smallvec::SmallVec;
use std::convert::From;

use crate::units::{ColumnIndex, ColumnsCount, RowIndex};

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;
pub type CoordinateOptionSmallVec = SmallVec<[Option<GridCoordinate>; 4]>;

/// The (row, column) identity of a cell. Row 0 is the northern edge of a grid and column 0 the
/// western edge.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: u32,
    pub column: u32,
}

impl GridCoordinate {
    pub fn new(row: u32, column: u32) -> GridCoordinate {
        GridCoordinate { row, column }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, columns: ColumnsCount) -> GridCoordinate {
        let ColumnsCount(width) = columns;
        GridCoordinate::new((index / width) as u32, (index % width) as u32)
    }

    #[inline]
    pub fn from_row_column_indices(row_index: RowIndex, col_index: ColumnIndex) -> GridCoordinate {
        let (RowIndex(row), ColumnIndex(col)) = (row_index, col_index);
        GridCoordinate::new(row as u32, col as u32)
    }

    /// Grid steps between two coordinates ignoring any walls.
    pub fn manhattan_distance(&self, other: GridCoordinate) -> u32 {
        let row_delta = (i64::from(self.row) - i64::from(other.row)).abs();
        let col_delta = (i64::from(self.column) - i64::from(other.column)).abs();
        (row_delta + col_delta) as u32
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::East,
                                          CompassPrimary::West];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    /// (row, column) shift for one step in this direction.
    #[inline]
    pub fn offset(self) -> (isize, isize) {
        match self {
            CompassPrimary::North => (-1, 0),
            CompassPrimary::South => (1, 0),
            CompassPrimary::East => (0, 1),
            CompassPrimary::West => (0, -1),
        }
    }

    #[inline]
    fn slot(self) -> usize {
        match self {
            CompassPrimary::North => 0,
            CompassPrimary::South => 1,
            CompassPrimary::East => 2,
            CompassPrimary::West => 3,
        }
    }
}

/// A node of the grid graph.
///
/// Adjacency is filled in once by the owning `Grid` when it is constructed; the link relation
/// (carved passages) lives in the grid's graph because every algorithm mutates it through the grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    coordinate: GridCoordinate,
    neighbours: [Option<GridCoordinate>; 4],
}

impl Cell {
    pub(crate) fn new(coordinate: GridCoordinate) -> Cell {
        Cell {
            coordinate,
            neighbours: [None; 4],
        }
    }

    pub(crate) fn set_neighbour(&mut self, dir: CompassPrimary, neighbour: Option<GridCoordinate>) {
        self.neighbours[dir.slot()] = neighbour;
    }

    #[inline]
    pub fn coordinate(&self) -> GridCoordinate {
        self.coordinate
    }

    /// The adjacent cell in a direction, `None` at the grid boundary.
    #[inline]
    pub fn neighbour(&self, dir: CompassPrimary) -> Option<GridCoordinate> {
        self.neighbours[dir.slot()]
    }

    /// Cells to the North, South, East or West, in that order, skipping boundaries.
    pub fn neighbours(&self) -> CoordinateSmallVec {
        CompassPrimary::ALL.iter()
            .filter_map(|dir| self.neighbour(*dir))
            .collect()
    }

    pub fn neighbours_at_directions(&self, dirs: &[CompassPrimary]) -> CoordinateOptionSmallVec {
        dirs.iter().map(|dir| self.neighbour(*dir)).collect()
    }

    /// The direction of `other` from this cell if they are adjacent.
    pub fn direction_to(&self, other: GridCoordinate) -> Option<CompassPrimary> {
        CompassPrimary::ALL.iter()
            .cloned()
            .find(|dir| self.neighbour(*dir) == Some(other))
    }

    pub fn is_neighbour(&self, other: GridCoordinate) -> bool {
        self.direction_to(other).is_some()
    }
}
