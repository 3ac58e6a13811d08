//! Command-line interface and the tick-driven generation runner

use clap::Parser;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::algorithm::registry::TemplateRegistry;
use crate::algorithm::repair::{ConnectivityRepairer, RepairStep};
use crate::algorithm::selection::RandomSelector;
use crate::algorithm::solver::{ContradictionPolicy, Solver, SolverStep};
use crate::io::configuration::{
    DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, DEFAULT_FPS, DEFAULT_OUTPUT, DEFAULT_SCREEN_HEIGHT,
    DEFAULT_SCREEN_WIDTH, MazeConfig, VISUALIZATION_SUFFIX,
};
use crate::io::error::{ErrorContext, Result, WithContext, invalid_parameter};
use crate::io::image::export_maze_as_png;
use crate::io::progress::{Phase, ProgressManager};
use crate::io::render::TileRenderer;
use crate::io::visualization::{EventKind, VisualizationCapture};

#[derive(Parser, Debug)]
#[command(name = "mazewave")]
#[command(
    author,
    version,
    about = "Generate mazes by wave function collapse and repair their connectivity"
)]
/// Command-line arguments for the maze generator
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Output PNG file
    #[arg(value_name = "OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Image width in pixels
    #[arg(short = 'w', long, default_value_t = DEFAULT_SCREEN_WIDTH)]
    pub width: usize,

    /// Image height in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_SCREEN_HEIGHT)]
    pub height: usize,

    /// Cell width in pixels
    #[arg(long, default_value_t = DEFAULT_CELL_WIDTH)]
    pub cell_width: usize,

    /// Cell height in pixels
    #[arg(long, default_value_t = DEFAULT_CELL_HEIGHT)]
    pub cell_height: usize,

    /// Playback speed of the animation in ticks per second
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Enable visualization output as animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Leave exhausted cells unresolved instead of aborting
    #[arg(short, long)]
    pub lenient: bool,

    /// Skip the connectivity repair walk
    #[arg(long)]
    pub skip_repair: bool,
}

impl Cli {
    /// Generation settings described by the arguments
    pub const fn to_config(&self) -> MazeConfig {
        MazeConfig {
            screen_width: self.width,
            screen_height: self.height,
            cell_width: self.cell_width,
            cell_height: self.cell_height,
            fps: self.fps,
            seed: self.seed,
            contradiction_policy: if self.lenient {
                ContradictionPolicy::Mark
            } else {
                ContradictionPolicy::Abort
            },
        }
    }

    /// Output and presentation settings described by the arguments
    pub fn to_options(&self) -> RunOptions {
        RunOptions {
            output: self.output.clone(),
            visualize: self.visualize,
            repair: !self.skip_repair,
            show_progress: !self.quiet,
        }
    }
}

/// Where results go and which optional phases run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// PNG destination
    pub output: PathBuf,
    /// Also write an animated GIF next to the PNG
    pub visualize: bool,
    /// Run the connectivity repair walk after solving
    pub repair: bool,
    /// Draw progress bars
    pub show_progress: bool,
}

/// Statistics of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Seed the run used
    pub seed: u64,
    /// Grid width in cells
    pub columns: usize,
    /// Grid height in cells
    pub rows: usize,
    /// Solver steps that selected a cell
    pub solver_steps: usize,
    /// Repair walk steps, excluding the final one
    pub repair_steps: usize,
    /// Openings forced by the repair walk
    pub forced_connections: usize,
    /// Cells left unresolved in lenient mode
    pub contradictions: Vec<(usize, usize)>,
    /// Written PNG
    pub image_path: PathBuf,
    /// Written GIF, if any
    pub animation_path: Option<PathBuf>,
}

/// Drives one generation from configuration to exported files
///
/// Each tick performs one solver step, then one repair step once solving is
/// finished, which is what the progress bars and the animation follow.
pub struct MazeRunner {
    config: MazeConfig,
    options: RunOptions,
}

impl MazeRunner {
    /// Create a runner for the given settings
    pub const fn new(config: MazeConfig, options: RunOptions) -> Self {
        Self { config, options }
    }

    /// Create a runner from parsed command-line arguments
    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(cli.to_config(), cli.to_options())
    }

    /// Solve, repair and export
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the solver aborts on
    /// a contradiction, the repair walk meets an unrepresentable shape, or an
    /// export fails.
    pub fn run(&self) -> Result<RunSummary> {
        self.config.validate()?;
        let (columns, rows) = (self.config.columns(), self.config.rows());

        let selector = self
            .config
            .seed
            .map_or_else(RandomSelector::from_entropy, RandomSelector::new);
        let seed = selector.seed();
        log::info!("Generating {columns}x{rows} maze with seed {seed}");

        let registry = Rc::new(TemplateRegistry::standard().with_context(ErrorContext {
            operation: Some("build templates"),
            ..ErrorContext::default()
        })?);
        let cell_width = u32::try_from(self.config.cell_width)
            .map_err(|error| invalid_parameter("cell_width", &self.config.cell_width, &error))?;
        let cell_height = u32::try_from(self.config.cell_height)
            .map_err(|error| invalid_parameter("cell_height", &self.config.cell_height, &error))?;
        let renderer = TileRenderer::standard(registry.catalog(), cell_width, cell_height)?;
        let progress = self
            .options
            .show_progress
            .then(|| ProgressManager::new(columns * rows));
        let mut capture = self
            .options
            .visualize
            .then(|| VisualizationCapture::new(columns, rows, renderer.clone()));

        let mut solver = Solver::new(
            Rc::clone(&registry),
            columns,
            rows,
            selector,
            self.config.contradiction_policy,
        )?;
        let mut tick = 0;
        let mut resolved = 0;
        loop {
            let event = match solver.step()? {
                SolverStep::Collapsed { x, y, template } => {
                    resolved += 1;
                    (x, y, EventKind::Resolved(template))
                }
                SolverStep::Contradiction { x, y } => {
                    if let Some(progress) = &progress {
                        let count = solver.contradictions().len();
                        progress.set_message(Phase::Solve, format!("{count} contradictions"));
                    }
                    (x, y, EventKind::Contradiction)
                }
                SolverStep::Finished => break,
            };
            if let Some(capture) = capture.as_mut() {
                capture.record(event.0, event.1, event.2, tick);
            }
            if let Some(progress) = &progress {
                progress.update(Phase::Solve, resolved);
            }
            tick += 1;
        }
        if let Some(progress) = &progress {
            progress.complete(Phase::Solve);
        }

        let solver_steps = solver.iteration();
        let contradictions = solver.contradictions().to_vec();
        let (grid, selector) = solver.into_parts();

        let (grid, repair_steps, forced_connections) = if self.options.repair {
            let mut repairer = ConnectivityRepairer::new(grid, Rc::clone(&registry), selector);
            if let (Some(capture), Some((x, y))) = (capture.as_mut(), repairer.current()) {
                capture.record(x, y, EventKind::PathEntered, tick);
            }
            let mut steps = 0;
            loop {
                let step = repairer.step()?;
                if let Some(capture) = capture.as_mut() {
                    record_repair_step(capture, &repairer, step, tick);
                }
                if step == RepairStep::Finished {
                    break;
                }
                steps += 1;
                tick += 1;
                if let Some(progress) = &progress {
                    progress.update(Phase::Repair, repairer.backtracked().len());
                }
            }
            if let Some(progress) = &progress {
                progress.complete(Phase::Repair);
            }
            let forced = repairer.forced_connections();
            (repairer.into_grid(), steps, forced)
        } else {
            (grid, 0, 0)
        };

        if let Some(progress) = &progress {
            progress.finish();
        }

        export_maze_as_png(
            &grid,
            &registry,
            &renderer,
            &contradictions,
            &self.options.output,
        )?;

        let animation_path = match &capture {
            Some(capture) => {
                let path = visualization_path(&self.options.output);
                capture.export_gif(&path, &registry, self.config.frame_delay_ms())?;
                Some(path)
            }
            None => None,
        };

        Ok(RunSummary {
            seed,
            columns,
            rows,
            solver_steps,
            repair_steps,
            forced_connections,
            contradictions,
            image_path: self.options.output.clone(),
            animation_path,
        })
    }
}

// A forced opening re-resolves both ends, so both are redrawn
fn record_repair_step(
    capture: &mut VisualizationCapture,
    repairer: &ConnectivityRepairer,
    step: RepairStep,
    tick: usize,
) {
    let redraw = |capture: &mut VisualizationCapture, (x, y): (usize, usize)| {
        if let Some(template) = repairer.grid().resolved_at(x, y) {
            capture.record(x, y, EventKind::Resolved(template), tick);
        }
    };
    match step {
        RepairStep::Advanced { to, .. } => {
            capture.record(to.0, to.1, EventKind::PathEntered, tick);
        }
        RepairStep::Connected { from, to, .. } => {
            redraw(capture, from);
            redraw(capture, to);
            capture.record(to.0, to.1, EventKind::PathEntered, tick);
        }
        RepairStep::Backtracked { from, .. } => {
            capture.record(from.0, from.1, EventKind::PathLeft, tick);
        }
        // The walk's origin is retired by the finishing step
        RepairStep::Finished => {
            if let Some(&(x, y)) = repairer.backtracked().last() {
                capture.record(x, y, EventKind::PathLeft, tick);
            }
        }
    }
}

/// GIF path next to the PNG: `<stem>_generation.gif`
pub fn visualization_path(output: &Path) -> PathBuf {
    let stem = output.file_stem().unwrap_or_default();
    let name = format!("{}{VISUALIZATION_SUFFIX}.gif", stem.to_string_lossy());

    match output.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}
