//! Perfect maze generation.
//!
//! Every generator carves passages into a grid that starts out with no links, leaving the
//! link relation as a spanning tree over all of the grid's cells. They only differ in the
//! texture of the mazes they make. All randomness comes from the caller's `Rng`, so a seeded
//! generator reproduces the same maze on every run.

use std::fmt;
use std::str::FromStr;

use bit_set::BitSet;
use log::{debug, trace, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cells::{CompassPrimary, CoordinateSmallVec, GridCoordinate};
use crate::errors::*;
use crate::grid::{Grid, IndexType};
use crate::utils;

/// A maze generation algorithm as a plain function pointer.
pub type Generator<GridIndexType, R> = fn(&mut Grid<GridIndexType>, &mut R);

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum MazeAlgorithm {
    BinaryTree,
    Sidewinder,
    AldousBroder,
    Wilson,
    HuntAndKill,
    RecursiveBacktracker,
}

impl MazeAlgorithm {
    pub const ALL: [MazeAlgorithm; 6] = [MazeAlgorithm::BinaryTree,
                                         MazeAlgorithm::Sidewinder,
                                         MazeAlgorithm::AldousBroder,
                                         MazeAlgorithm::Wilson,
                                         MazeAlgorithm::HuntAndKill,
                                         MazeAlgorithm::RecursiveBacktracker];

    pub fn name(self) -> &'static str {
        match self {
            MazeAlgorithm::BinaryTree => "binary",
            MazeAlgorithm::Sidewinder => "sidewinder",
            MazeAlgorithm::AldousBroder => "aldous-broder",
            MazeAlgorithm::Wilson => "wilson",
            MazeAlgorithm::HuntAndKill => "hunt-kill",
            MazeAlgorithm::RecursiveBacktracker => "recursive-backtracker",
        }
    }

    pub fn generator<GridIndexType, R>(self) -> Generator<GridIndexType, R>
        where GridIndexType: IndexType,
              R: Rng
    {
        match self {
            MazeAlgorithm::BinaryTree => binary_tree::<GridIndexType, R>,
            MazeAlgorithm::Sidewinder => sidewinder::<GridIndexType, R>,
            MazeAlgorithm::AldousBroder => aldous_broder::<GridIndexType, R>,
            MazeAlgorithm::Wilson => wilson::<GridIndexType, R>,
            MazeAlgorithm::HuntAndKill => hunt_and_kill::<GridIndexType, R>,
            MazeAlgorithm::RecursiveBacktracker => recursive_backtracker::<GridIndexType, R>,
        }
    }

    /// Run this algorithm over a grid that has no links yet.
    pub fn generate<GridIndexType, R>(self, grid: &mut Grid<GridIndexType>, rng: &mut R)
        where GridIndexType: IndexType,
              R: Rng
    {
        debug!("generating {} maze on a {} x {} grid", self, grid.rows().0, grid.columns().0);
        let generator: Generator<GridIndexType, R> = self.generator();
        generator(grid, rng);
    }
}

impl fmt::Display for MazeAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for MazeAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<MazeAlgorithm> {
        MazeAlgorithm::ALL.iter()
            .cloned()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| ErrorKind::UnknownAlgorithm(s.to_owned()).into())
    }
}

/// Apply the binary tree maze generation algorithm to a grid
/// It works simply by visiting each cell in the grid and choosing to carve a passage
/// either North or East.
/// The two directions are constant for the entire maze generation process,
/// otherwise we'd have a good way for generating many areas with no way in or out. We would not be
/// generating a perfect maze.
/// The northern row and the eastern column always end up as unbroken corridors.
pub fn binary_tree<GridIndexType, R>(grid: &mut Grid<GridIndexType>, rng: &mut R)
    where GridIndexType: IndexType,
          R: Rng + ?Sized
{
    const NEIGHBOURS_TO_CHECK: [CompassPrimary; 2] = [CompassPrimary::North, CompassPrimary::East];

    for cell_coord in grid.iter() {

        let neighbours = grid.neighbours_at_directions(cell_coord, &NEIGHBOURS_TO_CHECK)
            .into_iter()
            .flatten()
            .collect::<CoordinateSmallVec>();

        // Unless there are no neighbours, randomly choose a neighbour to connect.
        if let Some(&link_coord) = neighbours.choose(rng) {
            carve(grid, cell_coord, link_coord);
        }
    }
}

/// Apply the sidewinder maze generation algorithm to the grid
/// Sidewinder visits the cells row by row from the western column eastwards.
/// Like the simple binary tree algorithm it picks from one of two directions. The difference is
/// that the East direction just carves in that direction but when we close out a run
/// we carve a passage north from a random cell of the most recent run of horizontal cells.
/// A run always closes at the eastern boundary, and elsewhere on a coin flip as long as there
/// is a row to the north to close out into. The northern row is therefore one long corridor.
/// This algorithm will display a vertical bias, with most passages leading north.
pub fn sidewinder<GridIndexType, R>(grid: &mut Grid<GridIndexType>, rng: &mut R)
    where GridIndexType: IndexType,
          R: Rng + ?Sized
{
    for coordinates_line in grid.iter_row() {
        let mut run = Vec::with_capacity(coordinates_line.len());

        for coord in coordinates_line {
            run.push(coord);

            let next_in_run_cell = grid.neighbour_at_direction(coord, CompassPrimary::East);
            let at_run_end_boundary = next_in_run_cell.is_none();
            let at_close_out_direction_boundary =
                grid.neighbour_at_direction(coord, CompassPrimary::North).is_none();

            let should_close_out = at_run_end_boundary ||
                                   (!at_close_out_direction_boundary && rng.gen::<bool>()); // coin flip

            if should_close_out {
                if let Some(&run_member) = run.choose(rng) {
                    if let Some(close_out_coord) = grid.neighbour_at_direction(run_member, CompassPrimary::North) {
                        carve(grid, run_member, close_out_coord);
                    }
                }
                run.clear();
            } else if let Some(next_coord) = next_in_run_cell {
                carve(grid, coord, next_coord);
            }
        }
    }
}

/// Apply the Aldous-Broder maze generation algorithm to the grid.
/// A random walk that carves a passage whenever it steps into a cell it has never been to before.
/// Every spanning tree of the grid is equally likely, but the walk wastes a lot of time
/// wandering through visited territory once most of the grid is done.
pub fn aldous_broder<GridIndexType, R>(grid: &mut Grid<GridIndexType>, rng: &mut R)
    where GridIndexType: IndexType,
          R: Rng + ?Sized
{
    let mut visited = utils::visited_set(grid.size());
    let mut current = grid.random_cell(rng);
    visited.insert(cell_index(grid, current));

    let mut unvisited = grid.size() - 1;
    let mut steps = 0usize;

    while unvisited > 0 {
        let next = match grid.neighbours(current).choose(rng) {
            Some(&neighbour) => neighbour,
            None => break,
        };
        steps += 1;

        if visited.insert(cell_index(grid, next)) {
            carve(grid, current, next);
            unvisited -= 1;
        }
        current = next;
    }

    debug!("aldous-broder walk took {} steps", steps);
}

/// Apply Wilson's maze generation algorithm to the grid.
/// Loop erased random walks start from unvisited cells and wander until they hit the maze
/// built so far; the walk, minus any loops it made, is then carved into the maze.
/// Like Aldous-Broder every spanning tree is equally likely. It is slow to begin with, as the
/// first walk has to find a single visited cell, and speeds up as the maze grows.
pub fn wilson<GridIndexType, R>(grid: &mut Grid<GridIndexType>, rng: &mut R)
    where GridIndexType: IndexType,
          R: Rng + ?Sized
{
    let cells_count = grid.size();
    let mut visited = utils::visited_set(cells_count);

    // Candidates for walk starts. Entries that get visited are dropped lazily when sampled.
    let mut unvisited: Vec<GridCoordinate> = grid.iter().collect();
    let first = unvisited.swap_remove(rng.gen_range(0..unvisited.len()));
    visited.insert(cell_index(grid, first));

    let mut path: Vec<GridCoordinate> = Vec::new();
    let mut path_positions = utils::fnv_hashmap::<GridCoordinate, usize>(cells_count);
    let mut walks = 0usize;

    loop {
        let start = {
            let grid_ref = &*grid;
            let visited_ref = &visited;
            take_random(&mut unvisited,
                        |coord| visited_ref.contains(cell_index(grid_ref, coord)),
                        rng)
        };
        let start = match start {
            Some(coord) => coord,
            None => break,
        };
        walks += 1;

        path.clear();
        path_positions.clear();
        path.push(start);
        path_positions.insert(start, 0);

        let mut current = start;
        while !visited.contains(cell_index(grid, current)) {
            let next = match grid.neighbours(current).choose(rng) {
                Some(&neighbour) => neighbour,
                None => break,
            };

            if let Some(&position) = path_positions.get(&next) {
                // Erase the loop, back to the earlier visit of `next`.
                for erased in path.drain(position + 1..) {
                    path_positions.remove(&erased);
                }
            } else {
                path_positions.insert(next, path.len());
                path.push(next);
            }
            current = next;
        }

        trace!("wilson walk {} carving {} cells", walks, path.len());
        for pair in path.windows(2) {
            carve(grid, pair[0], pair[1]);
        }
        for coord in &path {
            visited.insert(cell_index(grid, *coord));
        }
    }

    debug!("wilson finished after {} loop erased walks", walks);
}

/// Apply the hunt and kill maze generation algorithm to the grid.
/// Random walk ("kill") through unvisited cells until the walk is boxed in. Then "hunt" by
/// scanning the grid from the north west for the first unvisited cell bordering the maze,
/// connect it to a random visited neighbour and start walking again from there.
/// The mazes have long winding passages and relatively few dead ends.
pub fn hunt_and_kill<GridIndexType, R>(grid: &mut Grid<GridIndexType>, rng: &mut R)
    where GridIndexType: IndexType,
          R: Rng + ?Sized
{
    let mut visited = utils::visited_set(grid.size());
    let start = grid.random_cell(rng);
    visited.insert(cell_index(grid, start));

    let mut current = Some(start);
    let mut hunts = 0usize;

    while let Some(walk_coord) = current {
        let unvisited = neighbours_by_visited(grid, &visited, walk_coord, false);

        current = if let Some(&next) = unvisited.choose(rng) {
            carve(grid, walk_coord, next);
            visited.insert(cell_index(grid, next));
            Some(next)
        } else {
            hunts += 1;
            hunt(grid, &mut visited, rng)
        };
    }

    debug!("hunt and kill finished after {} hunts", hunts);
}

fn hunt<GridIndexType, R>(grid: &mut Grid<GridIndexType>, visited: &mut BitSet, rng: &mut R) -> Option<GridCoordinate>
    where GridIndexType: IndexType,
          R: Rng + ?Sized
{
    for coord in grid.iter() {
        if visited.contains(cell_index(grid, coord)) {
            continue;
        }

        let visited_neighbours = neighbours_by_visited(grid, visited, coord, true);
        if let Some(&neighbour) = visited_neighbours.choose(rng) {
            carve(grid, coord, neighbour);
            visited.insert(cell_index(grid, coord));
            return Some(coord);
        }
    }
    None
}

/// Apply the recursive backtracker maze generation algorithm to the grid.
/// A depth first random walk that backs up to the most recent cell with unvisited neighbours
/// whenever it gets stuck. The backtracking uses an explicit stack, so large grids cannot
/// overflow the call stack.
/// The mazes have long twisty passages and few short dead ends.
pub fn recursive_backtracker<GridIndexType, R>(grid: &mut Grid<GridIndexType>, rng: &mut R)
    where GridIndexType: IndexType,
          R: Rng + ?Sized
{
    let mut visited = utils::visited_set(grid.size());
    let start = grid.random_cell(rng);
    visited.insert(cell_index(grid, start));

    let mut stack = vec![start];
    let mut deepest = 1usize;

    while let Some(&current) = stack.last() {
        let unvisited = neighbours_by_visited(grid, &visited, current, false);

        if let Some(&next) = unvisited.choose(rng) {
            carve(grid, current, next);
            visited.insert(cell_index(grid, next));
            stack.push(next);
            deepest = deepest.max(stack.len());
        } else {
            stack.pop();
        }
    }

    debug!("recursive backtracker stack peaked at {} cells", deepest);
}

/// Row-major index of a coordinate the grid handed out.
#[inline]
fn cell_index<GridIndexType: IndexType>(grid: &Grid<GridIndexType>, coord: GridCoordinate) -> usize {
    coord.row as usize * grid.columns().0 + coord.column as usize
}

fn neighbours_by_visited<GridIndexType: IndexType>(grid: &Grid<GridIndexType>,
                                                   visited: &BitSet,
                                                   coord: GridCoordinate,
                                                   want_visited: bool)
                                                   -> CoordinateSmallVec {
    grid.neighbours(coord)
        .into_iter()
        .filter(|neighbour| visited.contains(cell_index(grid, *neighbour)) == want_visited)
        .collect()
}

/// Pick uniformly among the entries `is_stale` rejects, removing stale entries as they turn up.
fn take_random<F, R>(candidates: &mut Vec<GridCoordinate>, is_stale: F, rng: &mut R) -> Option<GridCoordinate>
    where F: Fn(GridCoordinate) -> bool,
          R: Rng + ?Sized
{
    while !candidates.is_empty() {
        let position = rng.gen_range(0..candidates.len());
        let candidate = candidates[position];
        if is_stale(candidate) {
            candidates.swap_remove(position);
        } else {
            return Some(candidate);
        }
    }
    None
}

/// Link neighbouring cells the generator picked, both of which came from the grid itself.
/// Returns false, leaving the grid untouched, if the link was refused.
#[inline]
fn carve<GridIndexType: IndexType>(grid: &mut Grid<GridIndexType>, a: GridCoordinate, b: GridCoordinate) -> bool {
    match grid.link(a, b) {
        Ok(()) => true,
        Err(link_error) => {
            warn!("generator tried to carve {:?} to {:?}: {}", a, b, link_error);
            false
        }
    }
}
