//! **mazes** is a maze generation and route finding library.
//!
//! A `Grid` is a rectangle of cells joined by passages (links). The `generators` carve perfect
//! mazes into a grid and `pathing` measures distances and paths through the carved passages.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_iterators;
pub mod grids;
pub mod pathing;
pub mod units;
mod utils;
