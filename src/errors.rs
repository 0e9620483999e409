//! Library error types.
//!
//! `error_chain!` creates the `Error`, `ErrorKind`, `ResultExt` and `Result` types.
//! Other modules `use crate::errors::*;` to get access to them.

#![allow(deprecated)] // error_chain still emits `description` impls

use error_chain::*;

error_chain! {
    errors {
        InvalidGridDimensions(rows: usize, columns: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions: {} rows by {} columns, both must be at least 1", rows, columns)
        }

        GridTooLarge(cells: usize) {
            description("grid too large for its index type")
            display("a grid of {} cells cannot be indexed by the chosen graph index type", cells)
        }

        UnknownAlgorithm(name: String) {
            description("unknown maze generation algorithm")
            display("unknown maze generation algorithm '{}'", name)
        }
    }
}
