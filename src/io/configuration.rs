//! Generation constants and runtime configuration defaults

use crate::algorithm::solver::ContradictionPolicy;
use crate::io::error::{Result, invalid_parameter};

// Window-sized defaults; the grid is derived from these by integer division
/// Default rendered width in pixels
pub const DEFAULT_SCREEN_WIDTH: usize = 800;
/// Default rendered height in pixels
pub const DEFAULT_SCREEN_HEIGHT: usize = 800;
/// Default cell width in pixels
pub const DEFAULT_CELL_WIDTH: usize = 40;
/// Default cell height in pixels
pub const DEFAULT_CELL_HEIGHT: usize = 40;

/// Default ticks per second; one solver or repair step per tick
pub const DEFAULT_FPS: u32 = 30;

/// Seed for reproducible runs in benchmarks and examples
pub const DEFAULT_SEED: u64 = 42;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension in cells
pub const MAX_GRID_DIMENSION: usize = 1_000;

// Output settings
/// Default output file name
pub const DEFAULT_OUTPUT: &str = "maze.png";
/// Suffix added to the animation file name
pub const VISUALIZATION_SUFFIX: &str = "_generation";
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 20;

/// Everything a host needs to size, seed and drive one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeConfig {
    /// Rendered width in pixels
    pub screen_width: usize,
    /// Rendered height in pixels
    pub screen_height: usize,
    /// Width of one cell in pixels
    pub cell_width: usize,
    /// Height of one cell in pixels
    pub cell_height: usize,
    /// Ticks per second
    pub fps: u32,
    /// Seed for reproducible generation; drawn at random when absent
    pub seed: Option<u64>,
    /// Reaction to an exhausted cell
    pub contradiction_policy: ContradictionPolicy,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            fps: DEFAULT_FPS,
            seed: None,
            contradiction_policy: ContradictionPolicy::Abort,
        }
    }
}

impl MazeConfig {
    /// Number of grid columns
    pub const fn columns(&self) -> usize {
        match self.cell_width {
            0 => 0,
            width => self.screen_width / width,
        }
    }

    /// Number of grid rows
    pub const fn rows(&self) -> usize {
        match self.cell_height {
            0 => 0,
            height => self.screen_height / height,
        }
    }

    /// Milliseconds per tick
    pub const fn frame_delay_ms(&self) -> u32 {
        match self.fps {
            0 => 1000,
            fps => 1000 / fps,
        }
    }

    /// Reject configurations that cannot produce a grid
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error for a zero cell size, a zero frame
    /// rate, or a derived grid that is empty or larger than
    /// `MAX_GRID_DIMENSION` in either direction.
    pub fn validate(&self) -> Result<()> {
        if self.cell_width == 0 {
            return Err(invalid_parameter("cell_width", &0, &"must be positive"));
        }
        if self.cell_height == 0 {
            return Err(invalid_parameter("cell_height", &0, &"must be positive"));
        }
        if self.fps == 0 {
            return Err(invalid_parameter("fps", &0, &"must be positive"));
        }
        // Images are addressed in u32 pixels
        for (parameter, value) in [
            ("cell_width", self.cell_width),
            ("cell_height", self.cell_height),
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
        ] {
            u32::try_from(value).map_err(|error| invalid_parameter(parameter, &value, &error))?;
        }
        for (parameter, cells, pixels) in [
            ("screen_width", self.columns(), self.screen_width),
            ("screen_height", self.rows(), self.screen_height),
        ] {
            if cells == 0 {
                return Err(invalid_parameter(
                    parameter,
                    &pixels,
                    &"smaller than a single cell",
                ));
            }
            if cells > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &pixels,
                    &format!("exceeds {MAX_GRID_DIMENSION} cells"),
                ));
            }
        }
        Ok(())
    }
}
