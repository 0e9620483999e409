// Distances are flood filled over the passages of a maze, not over raw grid adjacency, so they
// measure how far apart two cells are for someone walking the maze.
//
// The distance map keeps no reference to the grid it was computed from. Any later mutation of the
// grid's links can invalidate it, so compute a fresh one after changing the maze.

use std::fmt::{Debug, Display};
use itertools::Itertools;
use log::trace;
use num::traits::{CheckedAdd, One, Unsigned, Zero};
use smallvec::SmallVec;

use crate::cells::GridCoordinate;
use crate::grid::{Grid, IndexType};
use crate::utils::{self, FnvHashMap};


// Trait (hack) used purely as a generic type parameter alias because it looks ugly to type this out each time
// Note generic parameter type aliases are not in the langauge.
// `type X = Y;` only works with concrete types.
pub trait MaxDistance
    : Zero + One + CheckedAdd + Unsigned + Debug + Clone + Copy + Display + Ord
    {
}
impl<T: Zero + One + CheckedAdd + Unsigned + Debug + Clone + Copy + Display + Ord> MaxDistance for T {}


/// Breadth first distances from a start cell to every cell reachable from it through passages.
///
/// `MaxDistanceT` must be wide enough for the longest path in the maze, a perfect maze can have
/// paths up to `size - 1` passages long. Construction fails rather than wrapping when it is not.
#[derive(Debug, Clone)]
pub struct Distances<MaxDistanceT = u32> {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, MaxDistanceT>,
    furthest: (GridCoordinate, MaxDistanceT),
}

impl<MaxDistanceT> Distances<MaxDistanceT>
    where MaxDistanceT: MaxDistance
{
    /// Flood fill the grid's passages outwards from `start_coordinate`.
    /// Returns None if the start coordinate is not on the grid, or if some reachable cell is
    /// further away than `MaxDistanceT` can count.
    pub fn for_grid<GridIndexType>(grid: &Grid<GridIndexType>,
                                   start_coordinate: GridCoordinate)
                                   -> Option<Distances<MaxDistanceT>>
        where GridIndexType: IndexType
    {
        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, MaxDistanceT::zero());
        let mut furthest = (start_coordinate, MaxDistanceT::zero());

        // We don't have any weights on the links to consider, every step is just one from the previous cell
        // so we never have to change the distance to a cell once it has been set - the shortest
        // distance has already been found for that cell.
        //
        // The frontier vec does not need to be a set datastructure as the distances map effectively tracks whether
        // a cell has already been processed.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_link = match distances[cell_coord].checked_add(&MaxDistanceT::one()) {
                    Some(distance) => distance,
                    None => {
                        trace!("distances from {:?} overflow the distance type", start_coordinate);
                        return None;
                    }
                };
                let links = grid.links(*cell_coord).unwrap_or_default();

                for link_coordinate in links {
                    if distances.contains_key(&link_coordinate) {
                        continue;
                    }
                    distances.insert(link_coordinate, distance_to_link);
                    // Strictly further only, so ties go to the first cell discovered.
                    if distance_to_link > furthest.1 {
                        furthest = (link_coordinate, distance_to_link);
                    }
                    new_frontier.push(link_coordinate);
                }
            }
            frontier = new_frontier;
        }

        trace!("distances from {:?} reached {} cells", start_coordinate, distances.len());

        Some(Distances {
            start_coordinate,
            distances,
            furthest,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    /// The cell furthest from the start and its distance.
    ///
    /// When several cells share the greatest distance the one the flood fill reached first wins.
    #[inline(always)]
    pub fn max(&self) -> (GridCoordinate, MaxDistanceT) {
        self.furthest
    }

    #[inline(always)]
    pub fn max_distance(&self) -> MaxDistanceT {
        self.furthest.1
    }

    /// None means the coordinate cannot be reached from the start, or is not on the grid.
    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<MaxDistanceT> {
        self.distances.get(&coord).cloned()
    }

    /// Number of cells reachable from the start, the start included.
    #[inline]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// All the cells at the greatest distance from the start, in row-major order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[GridCoordinate; 8]> {
        let furthest_distance = self.max_distance();

        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .sorted()
            .collect()
    }
}

/// Trace the path from the start of `distances_from_start` to `end_point` by repeatedly stepping
/// to a linked neighbour closer to the start.
///
/// Returns None if the end point is not reachable from start.
pub fn shortest_path<GridIndexType, MaxDistanceT>(grid: &Grid<GridIndexType>,
                                                  distances_from_start: &Distances<MaxDistanceT>,
                                                  end_point: GridCoordinate)
                                                  -> Option<Vec<GridCoordinate>>
    where GridIndexType: IndexType,
          MaxDistanceT: MaxDistance
{
    let mut current_distance_to_start = distances_from_start.distance_from_start_to(end_point)?;

    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        let closest_to_start = grid.neighbours(current_coord)
            .into_iter()
            .filter(|neighbour_coord| grid.is_linked(*neighbour_coord, current_coord))
            .filter_map(|neighbour_coord| {
                distances_from_start.distance_from_start_to(neighbour_coord)
                    .map(|distance| (neighbour_coord, distance))
            })
            .min_by_key(|&(_, distance)| distance);

        match closest_to_start {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance_to_start => {
                current_coord = closer_coord;
                current_distance_to_start = closer_distance;
                path.push(current_coord);
            }
            // Not getting any closer, the distances do not belong to this grid's current links.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// Works only as long as we are looking at a perfect maze, otherwise you get back some arbitrary path back.
pub fn longest_path<GridIndexType, MaxDistanceT>(grid: &Grid<GridIndexType>) -> Option<Vec<GridCoordinate>>
    where GridIndexType: IndexType,
          MaxDistanceT: MaxDistance
{
    // Distances to everywhere from an arbitrary start coordinate
    let first_distances = Distances::<MaxDistanceT>::for_grid(grid, GridCoordinate::new(0, 0))?;

    // The start of the longest path is just the point furthest away from an arbitrary initial point
    let (long_path_start_coordinate, _) = first_distances.max();

    let distances_from_start = Distances::<MaxDistanceT>::for_grid(grid, long_path_start_coordinate)?;
    let (end_point, _) = distances_from_start.max();

    shortest_path(grid, &distances_from_start, end_point)
}

/// Do the grid's links form a spanning tree: two way passages, one fewer than there are cells,
/// and every cell reachable?
pub fn is_perfect_maze<GridIndexType: IndexType>(grid: &Grid<GridIndexType>) -> bool {
    if grid.links_count() != grid.size() - 1 {
        return false;
    }
    if !grid.iter_links().all(|(a, b)| grid.is_linked(b, a)) {
        return false;
    }
    Distances::<u32>::for_grid(grid, GridCoordinate::new(0, 0))
        .map_or(false, |distances| distances.len() == grid.size())
}
