//! Spatial data structures and grid manipulation
//!
//! This module contains spatial-related functionality including:
//! - Cardinal directions and per-direction maps
//! - Tile archetypes, connection masks and the catalog
//! - The fixed-size grid of cells

/// Cardinal directions and per-direction storage
pub mod direction;
/// Maze grid addressed by column and row
pub mod grid;
/// Archetypes, connection masks and the archetype catalog
pub mod tiles;

pub use direction::Direction;
pub use grid::MazeGrid;
