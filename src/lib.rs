//! Maze generation by wave function collapse followed by connectivity repair
//!
//! A grid of cells starts with every rotated tile template possible. The
//! solver repeatedly collapses the cell with the fewest remaining options and
//! filters its direct neighbours, then a depth-first walk opens passages until
//! every maze cell is reachable from the first one.

#![forbid(unsafe_code)]

/// Template registry, cell collapse, solver and connectivity repair
pub mod algorithm;
/// Configuration, command-line interface, rendering and export
pub mod io;
/// Directions, tile archetypes and the cell grid
pub mod spatial;

pub use io::error::{MazeError, Result};
