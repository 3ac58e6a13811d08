//! Tests for PNG export

#[cfg(test)]
mod tests {
    use mazewave::MazeError;
    use mazewave::algorithm::registry::TemplateRegistry;
    use mazewave::io::image::{export_maze_as_png, save_png};
    use mazewave::io::render::{MARKER_COLOR, TileRenderer};
    use mazewave::spatial::grid::MazeGrid;
    use mazewave::spatial::tiles::standard;

    // Tests export writes a PNG sized by the grid and creates parent directories
    // Verified by removing the create_dir_all call
    #[test]
    fn test_export_png() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let output = temp_dir.path().join("a").join("b").join("maze.png");
        let registry = TemplateRegistry::standard().expect("standard registry");
        let renderer = TileRenderer::standard(registry.catalog(), 12, 12).expect("renderer");
        let mut grid = MazeGrid::new(2, 2, &registry).expect("grid");
        let cross = registry.lookup(standard::CROSS, 0).expect("cross");
        grid.set_resolved(0, 0, cross).expect("cross");

        export_maze_as_png(&grid, &registry, &renderer, &[(1, 1)], &output).expect("exported");

        let image = image::open(&output).expect("readable png").to_rgba8();
        assert_eq!(image.dimensions(), (24, 24));
        assert_eq!(image.get_pixel(18, 18), &MARKER_COLOR);
    }

    // Tests a grid with nothing resolved is not exported
    // Verified by rendering an empty canvas
    #[test]
    fn test_export_rejects_unresolved_grid() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let output = temp_dir.path().join("empty.png");
        let registry = TemplateRegistry::standard().expect("standard registry");
        let renderer = TileRenderer::standard(registry.catalog(), 12, 12).expect("renderer");
        let grid = MazeGrid::new(2, 2, &registry).expect("grid");

        assert!(matches!(
            export_maze_as_png(&grid, &registry, &renderer, &[], &output),
            Err(MazeError::Configuration { .. })
        ));
        assert!(!output.exists());
    }

    // Tests unknown extensions surface as export errors
    // Verified by mapping encoder failures to file system errors
    #[test]
    fn test_save_png_unknown_extension() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let output = temp_dir.path().join("maze.unknown");
        let renderer = TileRenderer::new(4, 4).expect("renderer");

        assert!(matches!(
            save_png(&renderer.canvas(1, 1), &output),
            Err(MazeError::ImageExport { .. })
        ));
    }
}
