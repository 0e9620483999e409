use std::fmt;
use std::slice;

use log::trace;
use petgraph::graph;
pub use petgraph::graph::IndexType;
use petgraph::{Directed, Graph};
use rand::Rng;

use crate::cells::{Cell, CompassPrimary, CoordinateOptionSmallVec, CoordinateSmallVec, GridCoordinate};
use crate::errors::*;
use crate::grid_iterators::{BatchIter, CellIter};
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};

/// A rectangular grid of cells and the passages carved between them.
///
/// Each link direction is a separate graph edge, so `a -> b` may exist without `b -> a`.
/// The generators only ever add links in both directions.
pub struct Grid<GridIndexType: IndexType = u32> {
    graph: Graph<(), (), Directed, GridIndexType>,
    rows: RowsCount,
    columns: ColumnsCount,
    cells: Vec<Cell>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
}

impl fmt::Display for CellLinkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CellLinkError::InvalidGridCoordinate => write!(f, "coordinate is outside the grid"),
            CellLinkError::SelfLink => write!(f, "a cell cannot be linked to itself"),
        }
    }
}

impl std::error::Error for CellLinkError {}

impl<GridIndexType: IndexType> fmt::Debug for Grid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: graph: {:?}, rows: {:?}, columns: {:?}",
               self.graph, self.rows, self.columns)
    }
}

impl<GridIndexType: IndexType> Grid<GridIndexType> {

    /// Create a grid with every cell in place and the North/South/East/West adjacency wired up.
    ///
    /// Fails when either dimension is zero, or when the graph needed to link every pair of
    /// adjacent cells in both directions cannot be indexed by `GridIndexType`.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<Grid<GridIndexType>> {

        let (RowsCount(rows_count), ColumnsCount(columns_count)) = (rows, columns);
        if rows_count == 0 || columns_count == 0 {
            return Err(ErrorKind::InvalidGridDimensions(rows_count, columns_count).into());
        }

        let (NodesCount(nodes), EdgesCount(max_edges)) =
            graph_size(rows, columns).ok_or(ErrorKind::GridTooLarge(usize::max_value()))?;
        let index_limit = <GridIndexType as IndexType>::max().index();
        if nodes > index_limit || max_edges > index_limit {
            return Err(ErrorKind::GridTooLarge(nodes).into());
        }

        // A perfect maze needs one passage, two directed edges, per cell bar one.
        let edges_hint = 2 * (nodes - 1);
        let mut grid = Grid {
            graph: Graph::with_capacity(nodes, edges_hint),
            rows,
            columns,
            cells: (0..nodes)
                .map(|index| Cell::new(GridCoordinate::from_row_major_index(index, columns)))
                .collect(),
        };
        for _ in 0..nodes {
            let _ = grid.graph.add_node(());
        }

        for index in 0..nodes {
            let coord = grid.cells[index].coordinate();
            for dir in CompassPrimary::ALL.iter() {
                let (row_offset, column_offset) = dir.offset();
                let neighbour = grid.at(coord.row as isize + row_offset,
                                        coord.column as isize + column_offset)
                    .map(Cell::coordinate);
                grid.cells[index].set_neighbour(*dir, neighbour);
            }
        }

        trace!("created {} x {} grid", rows_count, columns_count);
        Ok(grid)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// The cell at a signed (row, column) position, `None` for anything off the grid.
    #[inline]
    pub fn at(&self, row: isize, column: isize) -> Option<&Cell> {
        if row < 0 || column < 0 {
            return None;
        }
        let (row, column) = (row as usize, column as usize);
        if row < self.rows.0 && column < self.columns.0 {
            self.cells.get(row * self.columns.0 + column)
        } else {
            None
        }
    }

    #[inline]
    pub fn cell(&self, coord: GridCoordinate) -> Option<&Cell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    /// Uniformly pick any cell of the grid.
    #[inline]
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> GridCoordinate {
        let index = rng.gen_range(0..self.size());
        self.cells[index].coordinate()
    }

    /// Link two cells in both directions.
    ///
    /// Adjacency is not checked: callers carving a maze must only link neighbouring cells.
    /// Linking already linked cells changes nothing.
    pub fn link(&mut self, a: GridCoordinate, b: GridCoordinate) -> std::result::Result<(), CellLinkError> {
        let (a_index, b_index) = self.link_endpoints(a, b)?;
        let _ = self.graph.update_edge(a_index, b_index, ());
        let _ = self.graph.update_edge(b_index, a_index, ());
        Ok(())
    }

    /// Link `a` to `b` without linking `b` back to `a`.
    pub fn link_one_way(&mut self, a: GridCoordinate, b: GridCoordinate) -> std::result::Result<(), CellLinkError> {
        let (a_index, b_index) = self.link_endpoints(a, b)?;
        let _ = self.graph.update_edge(a_index, b_index, ());
        Ok(())
    }

    /// Unlink two cells in both directions, if the grid coordinates are valid and a link exists.
    /// Returns true if an unlink occurred.
    pub fn unlink(&mut self, a: GridCoordinate, b: GridCoordinate) -> bool {
        let forward = self.unlink_one_way(a, b);
        let backward = self.unlink_one_way(b, a);
        forward || backward
    }

    /// Remove only the `a -> b` direction of a link.
    pub fn unlink_one_way(&mut self, a: GridCoordinate, b: GridCoordinate) -> bool {
        let a_index_opt = self.grid_coordinate_graph_index(a);
        let b_index_opt = self.grid_coordinate_graph_index(b);

        if let (Some(a_index), Some(b_index)) = (a_index_opt, b_index_opt) {
            if let Some(edge_index) = self.graph.find_edge(a_index, b_index) {
                // This will invalidate the last edge index in the graph, which is fine as we
                // are not storing them for any reason.
                self.graph.remove_edge(edge_index);
                return true;
            }
        }

        false
    }

    /// Cells that a particular cell is linked to by a passage.
    pub fn links(&self, coord: GridCoordinate) -> Option<CoordinateSmallVec> {
        self.grid_coordinate_graph_index(coord).map(|node_index| {
            self.graph
                .neighbors(node_index)
                .map(|linked| GridCoordinate::from_row_major_index(linked.index(), self.columns))
                .collect()
        })
    }

    /// Number of distinct cell pairs joined by a passage, whichever directions it runs in.
    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    /// Is `b` in the link set of `a`?
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        let a_index_opt = self.grid_coordinate_graph_index(a);
        let b_index_opt = self.grid_coordinate_graph_index(b);
        if let (Some(a_index), Some(b_index)) = (a_index_opt, b_index_opt) {
            self.graph.find_edge(a_index, b_index).is_some()
        } else {
            false
        }
    }

    pub fn is_neighbour_linked(&self, coord: GridCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    /// Cells to the North, South, East or West of a particular cell, but not
    /// necessarily linked by a passage.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        self.cell(coord).map_or_else(CoordinateSmallVec::new, Cell::neighbours)
    }

    pub fn neighbours_at_directions(&self,
                                    coord: GridCoordinate,
                                    dirs: &[CompassPrimary])
                                    -> CoordinateOptionSmallVec {
        dirs.iter()
            .map(|direction| self.neighbour_at_direction(coord, *direction))
            .collect()
    }

    #[inline]
    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<GridCoordinate> {
        self.cell(coord).and_then(|cell| cell.neighbour(direction))
    }

    /// Cells with exactly one passage leading out of them.
    pub fn dead_ends(&self) -> Vec<GridCoordinate> {
        self.graph
            .node_indices()
            .filter(|node_index| self.graph.neighbors(*node_index).count() == 1)
            .map(|node_index| GridCoordinate::from_row_major_index(node_index.index(), self.columns))
            .collect()
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row as usize * self.columns.0 + coord.column as usize)
        } else {
            None
        }
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.row as usize) < self.rows.0 && (coord.column as usize) < self.columns.0
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.rows, self.columns)
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter::rows(self.rows, self.columns)
    }

    #[inline]
    pub fn iter_column(&self) -> BatchIter {
        BatchIter::columns(self.rows, self.columns)
    }

    /// Every passage once, as a (source, target) pair.
    pub fn iter_links(&self) -> LinksIter<GridIndexType> {
        LinksIter {
            graph: &self.graph,
            graph_edge_iter: self.graph.raw_edges().iter(),
            columns: self.columns,
        }
    }

    fn link_endpoints(&self,
                      a: GridCoordinate,
                      b: GridCoordinate)
                      -> std::result::Result<(graph::NodeIndex<GridIndexType>,
                                              graph::NodeIndex<GridIndexType>),
                                             CellLinkError> {
        if a == b {
            return Err(CellLinkError::SelfLink);
        }
        match (self.grid_coordinate_graph_index(a), self.grid_coordinate_graph_index(b)) {
            (Some(a_index), Some(b_index)) => Ok((a_index, b_index)),
            _ => Err(CellLinkError::InvalidGridCoordinate),
        }
    }

    /// Convert a grid coordinate into petgraph nodeindex
    /// Returns None if the grid coordinate is invalid (out of the grid's dimensions).
    #[inline]
    fn grid_coordinate_graph_index(&self,
                                   coord: GridCoordinate)
                                   -> Option<graph::NodeIndex<GridIndexType>> {
        self.grid_coordinate_to_index(coord).map(graph::NodeIndex::<GridIndexType>::new)
    }
}

/// Nodes and the directed edges needed if every adjacent pair were linked both ways.
fn graph_size(rows: RowsCount, columns: ColumnsCount) -> Option<(NodesCount, EdgesCount)> {
    let (RowsCount(r), ColumnsCount(c)) = (rows, columns);
    let nodes = r.checked_mul(c)?;
    let horizontal_pairs = r.checked_mul(c - 1)?;
    let vertical_pairs = c.checked_mul(r - 1)?;
    let edges = horizontal_pairs.checked_add(vertical_pairs)?.checked_mul(2)?;
    Some((NodesCount(nodes), EdgesCount(edges)))
}

pub struct LinksIter<'a, GridIndexType: IndexType> {
    graph: &'a Graph<(), (), Directed, GridIndexType>,
    graph_edge_iter: slice::Iter<'a, graph::Edge<(), GridIndexType>>,
    columns: ColumnsCount,
}

impl<'a, GridIndexType: IndexType> Iterator for LinksIter<'a, GridIndexType> {
    type Item = (GridCoordinate, GridCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        // A two way link is reported from its lower index end only.
        let edge = self.graph_edge_iter.find(|edge| {
            edge.source() < edge.target() || graph.find_edge(edge.target(), edge.source()).is_none()
        })?;
        let src_cell_coord = GridCoordinate::from_row_major_index(edge.source().index(), self.columns);
        let dst_cell_coord = GridCoordinate::from_row_major_index(edge.target().index(), self.columns);
        Some((src_cell_coord, dst_cell_coord))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.graph_edge_iter.size_hint().1)
    }
}

impl<'a, GridIndexType: IndexType> fmt::Debug for LinksIter<'a, GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LinksIter :: edges iter : {:?}", self.graph_edge_iter)
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;
    use smallvec::SmallVec;
    use std::u32;

    use super::*;
    use crate::grids::{medium_grid, small_grid, MediumGrid, SmallGrid};

    fn gc(row: u32, column: u32) -> GridCoordinate {
        GridCoordinate::new(row, column)
    }

    fn medium(rows: usize, columns: usize) -> MediumGrid {
        medium_grid(RowsCount(rows), ColumnsCount(columns)).expect("grid dimensions too large for medium grid")
    }

    fn small(rows: usize, columns: usize) -> SmallGrid {
        small_grid(RowsCount(rows), ColumnsCount(columns)).expect("grid dimensions too large for small grid")
    }

    // Compare a smallvec to e.g. a vec! or &[T].
    macro_rules! assert_smallvec_eq {
        ($x:expr, $y:expr) => (assert_eq!(&*$x, &*$y))
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        for &(r, c) in &[(0, 0), (0, 5), (5, 0)] {
            let err = Grid::<u32>::new(RowsCount(r), ColumnsCount(c)).unwrap_err();
            match *err.kind() {
                ErrorKind::InvalidGridDimensions(rows, columns) => assert_eq!((rows, columns), (r, c)),
                ref other => panic!("unexpected error {:?}", other),
            }
        }
    }

    #[test]
    fn index_type_limits_grid_size() {
        assert!(small_grid(RowsCount(8), ColumnsCount(8)).is_ok());
        let err = small_grid(RowsCount(20), ColumnsCount(20)).unwrap_err();
        assert!(matches!(*err.kind(), ErrorKind::GridTooLarge(400)));
        assert!(medium_grid(RowsCount(20), ColumnsCount(20)).is_ok());
    }

    #[test]
    fn neighbour_cells() {
        let g = medium(10, 10);

        let check_expected_neighbours = |coord, expected_neighbours: &[GridCoordinate]| {
            let neighbours = g.neighbours(coord).iter().cloned().sorted().collect::<Vec<_>>();
            let expected = expected_neighbours.iter().cloned().sorted().collect::<Vec<_>>();
            assert_eq!(neighbours, expected);
        };

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(0, 1), gc(1, 0)]);
        check_expected_neighbours(gc(0, 9), &[gc(0, 8), gc(1, 9)]);
        check_expected_neighbours(gc(9, 0), &[gc(8, 0), gc(9, 1)]);
        check_expected_neighbours(gc(9, 9), &[gc(8, 9), gc(9, 8)]);

        // side element examples
        check_expected_neighbours(gc(0, 1), &[gc(0, 0), gc(1, 1), gc(0, 2)]);
        check_expected_neighbours(gc(1, 0), &[gc(0, 0), gc(2, 0), gc(1, 1)]);
        check_expected_neighbours(gc(8, 9), &[gc(7, 9), gc(9, 9), gc(8, 8)]);

        // Some place with 4 neighbours inside the grid
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);

        // Off the grid
        check_expected_neighbours(gc(10, 10), &[]);
    }

    #[test]
    fn neighbours_at_dirs() {
        let g = small(2, 2);

        let check_neighbours =
            |coord, dirs: &[CompassPrimary], neighbour_opts: &[Option<GridCoordinate>]| {
                let neighbour_options = g.neighbours_at_directions(coord, dirs);
                assert_eq!(&*neighbour_options, neighbour_opts);
            };
        check_neighbours(gc(0, 0), &[], &[]);
        check_neighbours(gc(0, 0), &[CompassPrimary::North], &[None]);
        check_neighbours(gc(0, 0), &[CompassPrimary::West], &[None]);
        check_neighbours(gc(0, 0),
                         &[CompassPrimary::East, CompassPrimary::South],
                         &[Some(gc(0, 1)), Some(gc(1, 0))]);

        check_neighbours(gc(1, 1),
                         &[CompassPrimary::South, CompassPrimary::East],
                         &[None, None]);
        check_neighbours(gc(1, 1),
                         &[CompassPrimary::West, CompassPrimary::North],
                         &[Some(gc(1, 0)), Some(gc(0, 1))]);
    }

    #[test]
    fn neighbour_at_dir() {
        let g = small(2, 2);
        let check_neighbour = |coord, dir: CompassPrimary, expected| {
            assert_eq!(g.neighbour_at_direction(coord, dir), expected);
        };
        check_neighbour(gc(0, 0), CompassPrimary::North, None);
        check_neighbour(gc(0, 0), CompassPrimary::South, Some(gc(1, 0)));
        check_neighbour(gc(0, 0), CompassPrimary::East, Some(gc(0, 1)));
        check_neighbour(gc(0, 0), CompassPrimary::West, None);

        check_neighbour(gc(1, 1), CompassPrimary::North, Some(gc(0, 1)));
        check_neighbour(gc(1, 1), CompassPrimary::South, None);
        check_neighbour(gc(1, 1), CompassPrimary::East, None);
        check_neighbour(gc(1, 1), CompassPrimary::West, Some(gc(1, 0)));
    }

    #[test]
    fn indexer_returns_none_off_grid() {
        let g = small(3, 4);
        assert_eq!(g.at(0, 0).map(Cell::coordinate), Some(gc(0, 0)));
        assert_eq!(g.at(2, 3).map(Cell::coordinate), Some(gc(2, 3)));
        assert!(g.at(-1, 0).is_none());
        assert!(g.at(0, -1).is_none());
        assert!(g.at(3, 0).is_none());
        assert!(g.at(0, 4).is_none());
        assert!(g.at(isize::min_value(), isize::max_value()).is_none());
        assert!(g.cell(gc(u32::MAX, u32::MAX)).is_none());
    }

    #[test]
    fn adjacency_is_symmetric() {
        let g = medium(5, 7);
        for coord in g.iter() {
            let cell = g.cell(coord).unwrap();
            for dir in CompassPrimary::ALL.iter() {
                if let Some(n) = cell.neighbour(*dir) {
                    assert_eq!(g.cell(n).unwrap().neighbour(dir.opposite()), Some(coord));
                    assert_eq!(coord.manhattan_distance(n), 1);
                }
            }
        }
    }

    #[test]
    fn grid_size() {
        let g = medium(10, 12);
        assert_eq!(g.size(), 120);
        assert_eq!(g.rows(), RowsCount(10));
        assert_eq!(g.columns(), ColumnsCount(12));
    }

    #[test]
    fn grid_coordinate_as_index() {
        let g = small(3, 3);
        let coords = &[gc(0, 0), gc(0, 1), gc(0, 2), gc(1, 0), gc(1, 1), gc(1, 2), gc(2, 0),
                       gc(2, 1), gc(2, 2)];
        let indices: Vec<Option<usize>> = coords.iter()
            .map(|coord| g.grid_coordinate_to_index(*coord))
            .collect();
        let expected = (0..9).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(expected, indices);

        assert_eq!(g.grid_coordinate_to_index(gc(3, 2)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(2, 3)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(u32::MAX, u32::MAX)), None);
    }

    #[test]
    fn random_cell() {
        let g = small(4, 5);
        let mut rng = XorShiftRng::seed_from_u64(7);
        let mut seen = crate::utils::fnv_hashset(g.size());
        for _ in 0..1000 {
            let coord = g.random_cell(&mut rng);
            assert!(g.is_valid_coordinate(coord));
            seen.insert(coord);
        }
        assert_eq!(seen.len(), g.size());
    }

    #[test]
    fn cell_iter() {
        let g = small(2, 2);
        assert_eq!(g.iter().collect::<Vec<GridCoordinate>>(),
                   &[gc(0, 0), gc(0, 1), gc(1, 0), gc(1, 1)]);
    }

    #[test]
    fn row_iter() {
        let g = small(2, 2);
        assert_eq!(g.iter_row().collect::<Vec<Vec<GridCoordinate>>>(),
                   &[&[gc(0, 0), gc(0, 1)], &[gc(1, 0), gc(1, 1)]]);
    }

    #[test]
    fn column_iter() {
        let g = small(2, 2);
        assert_eq!(g.iter_column().collect::<Vec<Vec<GridCoordinate>>>(),
                   &[&[gc(0, 0), gc(1, 0)], &[gc(0, 1), gc(1, 1)]]);
    }

    #[test]
    fn linking_cells() {
        let mut g = small(4, 4);
        let a = gc(1, 0);
        let b = gc(2, 0);
        let c = gc(3, 0);

        let sorted_links = |grid: &SmallGrid, coord| -> Vec<GridCoordinate> {
            grid.links(coord).expect("coordinate is invalid").iter().cloned().sorted().collect()
        };
        macro_rules! links_sorted {
            ($x:expr) => (sorted_links(&g, $x))
        }

        // Testing that the order of the arguments to `is_linked` does not matter
        macro_rules! bi_check_linked {
            ($x:expr, $y:expr) => (g.is_linked($x, $y) && g.is_linked($y, $x))
        }

        let directional_links_check = |grid: &SmallGrid,
                                       coord: GridCoordinate,
                                       expected_dirs_linked: &[CompassPrimary]| {

            let expected_complement: SmallVec<[CompassPrimary; 4]> = CompassPrimary::ALL.iter()
                .cloned()
                .filter(|dir: &CompassPrimary| !expected_dirs_linked.contains(dir))
                .collect();
            for exp_dir in expected_dirs_linked {
                assert!(grid.is_neighbour_linked(coord, *exp_dir));
            }
            for not_exp_dir in expected_complement.iter() {
                assert!(!grid.is_neighbour_linked(coord, *not_exp_dir));
            }
        };
        macro_rules! check_directional_links {
            ($coord:expr, $expected:expr) => (directional_links_check(&g, $coord, &$expected))
        }

        // a, b and c start with no links
        assert!(!bi_check_linked!(a, b));
        assert!(!bi_check_linked!(a, c));
        assert!(!bi_check_linked!(b, c));
        assert_eq!(links_sorted!(a), vec![]);
        assert_eq!(links_sorted!(b), vec![]);
        assert_eq!(links_sorted!(c), vec![]);
        check_directional_links!(a, []);
        check_directional_links!(b, []);
        check_directional_links!(c, []);

        g.link(a, b).expect("link failed");
        assert!(bi_check_linked!(a, b));
        assert_eq!(links_sorted!(a), vec![b]);
        assert_eq!(links_sorted!(b), vec![a]);
        check_directional_links!(a, [CompassPrimary::South]);
        check_directional_links!(b, [CompassPrimary::North]);
        check_directional_links!(c, []);

        g.link(b, c).expect("link failed");
        assert!(bi_check_linked!(a, b));
        assert!(bi_check_linked!(b, c));
        assert!(!bi_check_linked!(a, c));
        assert_eq!(links_sorted!(a), vec![b]);
        assert_eq!(links_sorted!(b), vec![a, c]);
        assert_eq!(links_sorted!(c), vec![b]);
        assert_eq!(g.links_count(), 2);

        check_directional_links!(a, [CompassPrimary::South]);
        check_directional_links!(b, [CompassPrimary::North, CompassPrimary::South]);
        check_directional_links!(c, [CompassPrimary::North]);

        // a - b unlinked, b still linked to c bi-directionally
        assert!(g.unlink(a, b));
        assert!(!bi_check_linked!(a, b));
        assert!(bi_check_linked!(b, c));
        assert_eq!(links_sorted!(a), vec![]);
        assert_eq!(links_sorted!(b), vec![c]);
        assert_eq!(links_sorted!(c), vec![b]);
        check_directional_links!(a, []);
        check_directional_links!(b, [CompassPrimary::South]);
        check_directional_links!(c, [CompassPrimary::North]);

        assert!(g.unlink(b, c));
        assert!(!g.unlink(b, c));
        assert!(!bi_check_linked!(b, c));
        assert_eq!(g.links_count(), 0);
    }

    #[test]
    fn one_way_links() {
        let mut g = small(2, 2);
        let a = gc(0, 0);
        let b = gc(0, 1);

        g.link_one_way(a, b).expect("link failed");
        assert!(g.is_linked(a, b));
        assert!(!g.is_linked(b, a));
        assert_smallvec_eq!(g.links(a).unwrap(), &[b]);
        assert_smallvec_eq!(g.links(b).unwrap(), &[]);
        assert_eq!(g.links_count(), 1);
        assert_eq!(g.iter_links().collect::<Vec<_>>(), vec![(a, b)]);

        // Completing the link from the other side still counts as one passage.
        g.link_one_way(b, a).expect("link failed");
        assert_eq!(g.links_count(), 1);

        assert!(g.unlink_one_way(a, b));
        assert!(!g.is_linked(a, b));
        assert!(g.is_linked(b, a));
        assert_eq!(g.iter_links().collect::<Vec<_>>(), vec![(b, a)]);
    }

    #[test]
    fn no_self_linked_cycles() {
        let mut g = small(4, 4);
        let a = gc(0, 0);
        assert_eq!(g.link(a, a), Err(CellLinkError::SelfLink));
        assert_eq!(g.link_one_way(a, a), Err(CellLinkError::SelfLink));
    }

    #[test]
    fn no_links_to_invalid_coordinates() {
        let mut g = small(4, 4);
        let good_coord = gc(0, 0);
        let invalid_coord = gc(100, 100);
        assert_eq!(g.link(good_coord, invalid_coord), Err(CellLinkError::InvalidGridCoordinate));
        assert_eq!(g.link(invalid_coord, good_coord), Err(CellLinkError::InvalidGridCoordinate));
        assert!(g.links(invalid_coord).is_none());
        assert!(!g.unlink(good_coord, invalid_coord));
    }

    #[test]
    fn no_parallel_duplicated_linked_cells() {
        let mut g = small(4, 4);
        let a = gc(0, 0);
        let b = gc(1, 0);
        g.link(a, b).expect("link failed");
        g.link(a, b).expect("link failed");
        assert_smallvec_eq!(g.links(a).unwrap(), &[b]);
        assert_smallvec_eq!(g.links(b).unwrap(), &[a]);
        assert_eq!(g.links_count(), 1);

        g.unlink(a, b);
        assert_smallvec_eq!(g.links(a).unwrap(), &[]);
        assert_smallvec_eq!(g.links(b).unwrap(), &[]);
    }

    #[test]
    fn dead_ends_have_one_link() {
        let mut g = small(1, 4);
        g.link(gc(0, 0), gc(0, 1)).expect("link failed");
        g.link(gc(0, 1), gc(0, 2)).expect("link failed");
        assert_eq!(g.dead_ends(), vec![gc(0, 0), gc(0, 2)]);
    }
}
