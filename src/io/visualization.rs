//! Event capture and GIF generation for generation playback

use image::codecs::gif::GifEncoder;
use image::{Delay, Frame, RgbaImage};
use ndarray::Array2;
use std::path::Path;

use crate::algorithm::registry::{TemplateId, TemplateRegistry};
use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{MazeError, Result};
use crate::io::render::{BACKGROUND_COLOR, MARKER_COLOR, PATH_COLOR, TileRenderer};

/// Number of frame delays the last frame stays on screen
const FINAL_FRAME_HOLD: u32 = 25;

/// What happened to a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The cell now shows this template
    Resolved(TemplateId),
    /// The cell was found exhausted and left unresolved
    Contradiction,
    /// The repair walk stepped onto the cell
    PathEntered,
    /// The repair walk retired the cell
    PathLeft,
}

/// A single cell change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellEvent {
    /// Column of the cell
    pub x: usize,
    /// Row of the cell
    pub y: usize,
    /// Kind of change
    pub kind: EventKind,
    /// Tick the change happened in
    pub tick: usize,
}

/// Captures cell events for visualization
///
/// Events are replayed onto a single canvas at export time, one frame per
/// tick, so memory grows with the number of events rather than frames.
pub struct VisualizationCapture {
    events: Vec<CellEvent>,
    columns: usize,
    rows: usize,
    renderer: TileRenderer,
}

impl VisualizationCapture {
    /// Create an empty capture for a `columns` x `rows` grid
    pub const fn new(columns: usize, rows: usize, renderer: TileRenderer) -> Self {
        Self {
            events: Vec::new(),
            columns,
            rows,
            renderer,
        }
    }

    /// Records a change of the cell at `(x, y)` during `tick`
    pub fn record(&mut self, x: usize, y: usize, kind: EventKind, tick: usize) {
        self.events.push(CellEvent { x, y, kind, tick });
    }

    /// Returns all recorded events
    pub fn events(&self) -> &[CellEvent] {
        &self.events
    }

    /// Returns the total number of recorded events
    pub const fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Export the captured events as a GIF with automatic frame skipping
    ///
    /// Automatically skips frames if the requested frame rate exceeds viewer
    /// capabilities. A 5 ms delay against a 20 ms viewer floor keeps every 4th
    /// frame so the apparent animation speed is preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No events were captured
    /// - A resolved template cannot be drawn
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(
        &self,
        output_path: &Path,
        registry: &TemplateRegistry,
        frame_delay_ms: u32,
    ) -> Result<()> {
        if self.events.is_empty() {
            return Err(MazeError::Configuration {
                reason: "No cell events captured for visualization".to_string(),
            });
        }

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
        } else {
            1
        };

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| MazeError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| MazeError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;
        let mut encoder = GifEncoder::new(file);
        let mut encode = |image: &RgbaImage, delay_ms: u32| {
            encoder
                .encode_frame(Frame::from_parts(
                    image.clone(),
                    0,
                    0,
                    Delay::from_numer_denom_ms(delay_ms, 1),
                ))
                .map_err(|e| MazeError::ImageExport {
                    path: output_path.to_path_buf(),
                    source: e,
                })
        };

        let mut replay = Replay::new(self.columns, self.rows);
        let mut canvas = self.renderer.canvas(self.columns, self.rows);
        encode(&canvas, effective_delay_ms)?;

        let mut frame_total = 1;
        let mut pending = false;
        for (tick_index, tick) in self.events.chunk_by(|a, b| a.tick == b.tick).enumerate() {
            for event in tick {
                replay.apply(event);
                self.repaint(&mut canvas, registry, &replay, event.x, event.y)?;
            }
            pending = true;
            if (tick_index + 1) % skip_factor == 0 {
                encode(&canvas, effective_delay_ms)?;
                frame_total += 1;
                pending = false;
            }
        }
        if pending {
            encode(&canvas, effective_delay_ms)?;
            frame_total += 1;
        }

        // Final frame displays longer for better visibility
        encode(&canvas, effective_delay_ms * FINAL_FRAME_HOLD)?;
        frame_total += 1;

        log::info!(
            "Saved {frame_total} frame animation to {}",
            output_path.display()
        );
        Ok(())
    }

    fn repaint(
        &self,
        canvas: &mut RgbaImage,
        registry: &TemplateRegistry,
        replay: &Replay,
        x: usize,
        y: usize,
    ) -> Result<()> {
        let Some(state) = replay.cells.get([y, x]) else {
            return Ok(());
        };
        let background = if state.marked {
            MARKER_COLOR
        } else if state.on_path {
            PATH_COLOR
        } else {
            BACKGROUND_COLOR
        };
        self.renderer.fill_cell(canvas, x, y, background);
        if let Some(template) = state.template {
            self.renderer
                .draw_template(canvas, registry, x, y, template)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ReplayCell {
    template: Option<TemplateId>,
    marked: bool,
    on_path: bool,
}

struct Replay {
    cells: Array2<ReplayCell>,
}

impl Replay {
    fn new(columns: usize, rows: usize) -> Self {
        Self {
            cells: Array2::default((rows, columns)),
        }
    }

    fn apply(&mut self, event: &CellEvent) {
        let Some(cell) = self.cells.get_mut([event.y, event.x]) else {
            return;
        };
        match event.kind {
            EventKind::Resolved(template) => cell.template = Some(template),
            EventKind::Contradiction => cell.marked = true,
            EventKind::PathEntered => cell.on_path = true,
            EventKind::PathLeft => cell.on_path = false,
        }
    }
}
