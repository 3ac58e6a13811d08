//! PNG export of rendered mazes

use image::RgbaImage;
use std::path::Path;

use crate::algorithm::cell::Cell;
use crate::algorithm::registry::TemplateRegistry;
use crate::io::error::{MazeError, Result};
use crate::io::render::TileRenderer;
use crate::spatial::grid::MazeGrid;

/// Render the grid and save it as a PNG
///
/// Cells listed in `markers` are drawn as contradiction markers.
///
/// # Errors
///
/// Returns an error if:
/// - No cell of the grid has been resolved
/// - A resolved template has no painter
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_maze_as_png(
    grid: &MazeGrid,
    registry: &TemplateRegistry,
    renderer: &TileRenderer,
    markers: &[(usize, usize)],
    output_path: &Path,
) -> Result<()> {
    if !grid.iter().any(Cell::is_resolved) {
        return Err(MazeError::Configuration {
            reason: "No templates have been placed in the grid".to_string(),
        });
    }

    let image = renderer.render(grid, registry, markers)?;
    save_png(&image, output_path)
}

/// Save an already rendered image, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the image
/// cannot be encoded to `output_path`.
pub fn save_png(image: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| MazeError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image
        .save(output_path)
        .map_err(|e| MazeError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    log::info!(
        "Saved {}x{} maze image to {}",
        image.width(),
        image.height(),
        output_path.display()
    );
    Ok(())
}
