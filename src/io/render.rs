//! Raster drawing of resolved grids
//!
//! Drawing is looked up per archetype in a capability registry, so the
//! generation core never needs to know how a template looks. Passages are
//! drawn as half-width black strips meeting in the cell centre, one strip per
//! open side.

use image::{Rgba, RgbaImage};
use std::collections::HashMap;

use crate::algorithm::registry::{TemplateId, TemplateRegistry};
use crate::io::error::{MazeError, Result, invalid_parameter};
use crate::spatial::direction::Direction;
use crate::spatial::grid::MazeGrid;
use crate::spatial::tiles::{ArchetypeId, Catalog, Category, ConnectionMask};

/// Canvas colour behind every cell
pub const BACKGROUND_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// Colour of open passages
pub const PASSAGE_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
/// Colour of decorative rooms
pub const ROOM_COLOR: Rgba<u8> = Rgba([96, 96, 96, 255]);
/// Colour of cells left unresolved by a contradiction
pub const MARKER_COLOR: Rgba<u8> = Rgba([220, 30, 30, 255]);
/// Colour of the repair walk's active path
pub const PATH_COLOR: Rgba<u8> = Rgba([20, 20, 20, 255]);

/// Pixel rectangle occupied by one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    /// Left edge in pixels
    pub x: u32,
    /// Top edge in pixels
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Draws one resolved template into its cell rectangle
pub type DrawFn = fn(&mut RgbaImage, CellRect, ConnectionMask);

/// Capability registry mapping archetypes to drawing routines
#[derive(Debug, Clone)]
pub struct TileRenderer {
    cell_width: u32,
    cell_height: u32,
    painters: HashMap<ArchetypeId, DrawFn>,
}

impl TileRenderer {
    /// Create a renderer with no painters registered
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if either cell dimension is zero.
    pub fn new(cell_width: u32, cell_height: u32) -> Result<Self> {
        if cell_width == 0 {
            return Err(invalid_parameter("cell_width", &0, &"must be positive"));
        }
        if cell_height == 0 {
            return Err(invalid_parameter("cell_height", &0, &"must be positive"));
        }
        Ok(Self {
            cell_width,
            cell_height,
            painters: HashMap::new(),
        })
    }

    /// Renderer with a painter for every archetype in `catalog`, chosen by category
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if either cell dimension is zero.
    pub fn standard(catalog: &Catalog, cell_width: u32, cell_height: u32) -> Result<Self> {
        let mut renderer = Self::new(cell_width, cell_height)?;
        for (id, archetype) in catalog.iter() {
            let painter: DrawFn = match archetype.category {
                Category::Maze => draw_passages,
                Category::Decorative => draw_room,
                Category::Unresolved => draw_nothing,
            };
            renderer.register(id, painter);
        }
        Ok(renderer)
    }

    /// Install or replace the painter for `archetype`
    pub fn register(&mut self, archetype: ArchetypeId, painter: DrawFn) {
        self.painters.insert(archetype, painter);
    }

    /// Whether `archetype` has a painter
    pub fn has_painter(&self, archetype: ArchetypeId) -> bool {
        self.painters.contains_key(&archetype)
    }

    /// Pixel rectangle of the cell at `(x, y)`
    pub const fn cell_rect(&self, x: usize, y: usize) -> CellRect {
        CellRect {
            x: x as u32 * self.cell_width,
            y: y as u32 * self.cell_height,
            width: self.cell_width,
            height: self.cell_height,
        }
    }

    /// Blank canvas sized for a `columns` x `rows` grid
    pub fn canvas(&self, columns: usize, rows: usize) -> RgbaImage {
        RgbaImage::from_pixel(
            columns as u32 * self.cell_width,
            rows as u32 * self.cell_height,
            BACKGROUND_COLOR,
        )
    }

    /// Draw `template` into the cell at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the template is not registered or its
    /// archetype has no painter.
    pub fn draw_template(
        &self,
        image: &mut RgbaImage,
        registry: &TemplateRegistry,
        x: usize,
        y: usize,
        template: TemplateId,
    ) -> Result<()> {
        let instance = registry
            .instance(template)
            .ok_or_else(|| MazeError::Configuration {
                reason: format!("template {template} is not registered"),
            })?;
        let painter =
            self.painters
                .get(&instance.archetype)
                .ok_or_else(|| MazeError::Configuration {
                    reason: format!("no painter registered for archetype {}", instance.archetype),
                })?;
        painter(image, self.cell_rect(x, y), instance.connections);
        Ok(())
    }

    /// Paint the whole cell at `(x, y)` in one colour
    pub fn fill_cell(&self, image: &mut RgbaImage, x: usize, y: usize, color: Rgba<u8>) {
        let rect = self.cell_rect(x, y);
        fill_rect(image, rect.x, rect.y, rect.width, rect.height, color);
    }

    /// Fill the cell at `(x, y)` with the contradiction marker
    pub fn draw_marker(&self, image: &mut RgbaImage, x: usize, y: usize) {
        self.fill_cell(image, x, y, MARKER_COLOR);
    }

    /// Render every resolved cell, then the markers on top
    ///
    /// Unresolved cells stay blank.
    ///
    /// # Errors
    ///
    /// Propagates errors from `draw_template`.
    pub fn render(
        &self,
        grid: &MazeGrid,
        registry: &TemplateRegistry,
        markers: &[(usize, usize)],
    ) -> Result<RgbaImage> {
        let mut image = self.canvas(grid.columns(), grid.rows());
        for cell in grid.iter() {
            if let Some(template) = cell.resolved() {
                self.draw_template(&mut image, registry, cell.x(), cell.y(), template)?;
            }
        }
        for &(x, y) in markers {
            self.draw_marker(&mut image, x, y);
        }
        Ok(image)
    }
}

/// Centre square plus one half-width arm per open side
pub fn draw_passages(image: &mut RgbaImage, rect: CellRect, connections: ConnectionMask) {
    let CellRect {
        x,
        y,
        width: w,
        height: h,
    } = rect;
    fill_rect(image, x + w / 4, y + h / 4, w / 2, h / 2, PASSAGE_COLOR);

    for direction in Direction::ALL {
        if !connections.is_open(direction) {
            continue;
        }
        let (ax, ay, aw, ah) = match direction {
            Direction::Up => (x + w / 4, y, w / 2, h / 2),
            Direction::Right => (x + w / 2, y + h / 4, w - w / 2, h / 2),
            Direction::Down => (x + w / 4, y + h / 2, w / 2, h - h / 2),
            Direction::Left => (x, y + h / 4, w / 2, h / 2),
        };
        fill_rect(image, ax, ay, aw, ah, PASSAGE_COLOR);
    }
}

/// Inset square for a closed decorative room
pub fn draw_room(image: &mut RgbaImage, rect: CellRect, _connections: ConnectionMask) {
    let (inset_x, inset_y) = (rect.width / 8, rect.height / 8);
    fill_rect(
        image,
        rect.x + inset_x,
        rect.y + inset_y,
        rect.width - 2 * inset_x,
        rect.height - 2 * inset_y,
        ROOM_COLOR,
    );
}

/// Painter for archetypes that have no picture
pub const fn draw_nothing(_image: &mut RgbaImage, _rect: CellRect, _connections: ConnectionMask) {}

// Pixels outside the image are skipped
fn fill_rect(image: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: Rgba<u8>) {
    for py in y..y.saturating_add(height) {
        for px in x..x.saturating_add(width) {
            if let Some(pixel) = image.get_pixel_mut_checked(px, py) {
                *pixel = color;
            }
        }
    }
}
