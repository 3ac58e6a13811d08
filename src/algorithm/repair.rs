//! Connectivity repair walk over a solved grid
//!
//! The walk is a depth-first traversal with backtracking that starts at the
//! first maze cell in row-major order (normally `(0, 0)`). From the current
//! cell it prefers an unseen maze neighbour that already opens towards it;
//! failing that it forces an opening into a random unseen maze neighbour.
//! When no unseen maze neighbour is left the cell is retired and the walk
//! steps back along its path. Each cell is visited at most once and retired
//! at most once, so the walk ends within `2 * cells + 1` steps.

use ndarray::Array2;
use std::rc::Rc;

use crate::algorithm::cell::Cell;
use crate::algorithm::registry::{TemplateId, TemplateRegistry};
use crate::algorithm::selection::RandomSelector;
use crate::io::error::{MazeError, Result};
use crate::spatial::direction::Direction;
use crate::spatial::grid::MazeGrid;
use crate::spatial::tiles::ConnectionMask;

/// Outcome of a single repair step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairStep {
    /// Moved through an existing opening
    Advanced {
        /// Cell the walk left
        from: (usize, usize),
        /// Cell the walk entered
        to: (usize, usize),
    },
    /// Opened a new passage and moved through it
    Connected {
        /// Cell the walk left
        from: (usize, usize),
        /// Cell the walk entered
        to: (usize, usize),
        /// Direction from `from` to `to`
        direction: Direction,
    },
    /// Retired the current cell and stepped back
    Backtracked {
        /// Cell the walk retired
        from: (usize, usize),
        /// Cell the walk resumed from
        to: (usize, usize),
    },
    /// Every reachable maze cell has been retired
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkMark {
    Unseen,
    Visited,
    Backtracked,
}

/// Owns the solved grid while the repair walk runs
#[derive(Debug)]
pub struct ConnectivityRepairer {
    registry: Rc<TemplateRegistry>,
    grid: MazeGrid,
    selector: RandomSelector,
    current: Option<(usize, usize)>,
    visited: Vec<(usize, usize)>,
    backtracked: Vec<(usize, usize)>,
    marks: Array2<WalkMark>,
    forced_connections: usize,
}

impl ConnectivityRepairer {
    /// Start a walk over a resolved grid
    pub fn new(grid: MazeGrid, registry: Rc<TemplateRegistry>, selector: RandomSelector) -> Self {
        let mut marks = Array2::from_elem((grid.rows(), grid.columns()), WalkMark::Unseen);
        let start = grid
            .iter()
            .find(|cell| cell.resolved().is_some_and(|id| registry.is_maze(id)))
            .map(Cell::position);

        let mut visited = Vec::new();
        if let Some((x, y)) = start {
            if let Some(mark) = marks.get_mut([y, x]) {
                *mark = WalkMark::Visited;
            }
            visited.push((x, y));
            log::info!("Repair walk starting at ({x}, {y})");
        } else {
            log::warn!("Repair walk has no maze cell to start from");
        }

        Self {
            registry,
            grid,
            selector,
            current: start,
            visited,
            backtracked: Vec::new(),
            marks,
            forced_connections: 0,
        }
    }

    /// Take one walk step
    ///
    /// # Errors
    ///
    /// Returns a lookup error if a forced opening produces a mask no maze
    /// archetype can represent.
    pub fn step(&mut self) -> Result<RepairStep> {
        let Some(current) = self.current else {
            return Ok(RepairStep::Finished);
        };

        let mut candidates: Vec<(Direction, (usize, usize))> = self
            .grid
            .neighbors(current.0, current.1)
            .filter(|&(_, (x, y))| {
                self.mark(x, y) == WalkMark::Unseen
                    && self
                        .grid
                        .resolved_at(x, y)
                        .is_some_and(|id| self.registry.is_maze(id))
            })
            .collect();
        self.selector.shuffle(&mut candidates);

        let open = candidates.iter().copied().find(|&(direction, (x, y))| {
            self.connections_at(x, y)
                .is_some_and(|mask| mask.is_open(direction.opposite()))
        });
        if let Some((_, next)) = open {
            self.enter(next);
            return Ok(RepairStep::Advanced {
                from: current,
                to: next,
            });
        }

        if let Some(&(direction, next)) = self.selector.choose(&candidates) {
            force_connect(&mut self.grid, &self.registry, current, direction)?;
            self.forced_connections += 1;
            log::debug!("Forced opening {direction} from {current:?} into {next:?}");
            self.enter(next);
            return Ok(RepairStep::Connected {
                from: current,
                to: next,
                direction,
            });
        }

        Ok(self.backtrack(current))
    }

    /// Step until the walk finishes, returning the number of steps taken
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `step`.
    pub fn run_to_completion(&mut self) -> Result<usize> {
        let mut steps = 0;
        while self.step()? != RepairStep::Finished {
            steps += 1;
        }
        Ok(steps)
    }

    fn enter(&mut self, position: (usize, usize)) {
        self.set_mark(position, WalkMark::Visited);
        self.visited.push(position);
        self.current = Some(position);
    }

    fn backtrack(&mut self, current: (usize, usize)) -> RepairStep {
        self.set_mark(current, WalkMark::Backtracked);
        self.backtracked.push(current);
        if self.visited.last() == Some(&current) {
            self.visited.pop();
        }

        match self.visited.last().copied() {
            Some(previous) => {
                self.current = Some(previous);
                RepairStep::Backtracked {
                    from: current,
                    to: previous,
                }
            }
            None => {
                self.current = None;
                log::info!(
                    "Repair walk finished: {} cells retired, {} openings forced",
                    self.backtracked.len(),
                    self.forced_connections
                );
                RepairStep::Finished
            }
        }
    }

    fn mark(&self, x: usize, y: usize) -> WalkMark {
        self.marks
            .get([y, x])
            .copied()
            .unwrap_or(WalkMark::Backtracked)
    }

    fn set_mark(&mut self, (x, y): (usize, usize), mark: WalkMark) {
        if let Some(slot) = self.marks.get_mut([y, x]) {
            *slot = mark;
        }
    }

    fn connections_at(&self, x: usize, y: usize) -> Option<ConnectionMask> {
        self.grid
            .resolved_at(x, y)
            .and_then(|id| self.registry.instance(id))
            .map(|instance| instance.connections)
    }

    /// Whether the walk has ended
    pub const fn is_finished(&self) -> bool {
        self.current.is_none()
    }

    /// Cell the walk is standing on
    pub const fn current(&self) -> Option<(usize, usize)> {
        self.current
    }

    /// Cells on the active path, oldest first
    pub fn visited(&self) -> &[(usize, usize)] {
        &self.visited
    }

    /// Retired cells in retirement order
    pub fn backtracked(&self) -> &[(usize, usize)] {
        &self.backtracked
    }

    /// Number of openings the walk has forced
    pub const fn forced_connections(&self) -> usize {
        self.forced_connections
    }

    /// Grid being repaired
    pub const fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    /// Hand the repaired grid back
    pub fn into_grid(self) -> MazeGrid {
        self.grid
    }
}

/// Open the shared side between `from` and its neighbour in `direction`
///
/// Both cells must hold maze templates. Each side's mask gains the bit facing
/// the other cell, and each cell is re-resolved to the maze template whose
/// shape matches its new mask. Returns the new templates of `from` and of the
/// neighbour.
///
/// # Errors
///
/// Returns an out-of-bounds error if the neighbour lies outside the grid, a
/// configuration error if either cell is unresolved or not a maze cell, and a
/// lookup error if a new mask matches no maze archetype.
pub fn force_connect(
    grid: &mut MazeGrid,
    registry: &TemplateRegistry,
    from: (usize, usize),
    direction: Direction,
) -> Result<(TemplateId, TemplateId)> {
    let to = grid
        .neighbor_position(from.0, from.1, direction)
        .ok_or_else(|| {
            let (dx, dy) = direction.offset();
            MazeError::OutOfBounds {
                x: from.0.wrapping_add_signed(dx),
                y: from.1.wrapping_add_signed(dy),
                columns: grid.columns(),
                rows: grid.rows(),
            }
        })?;

    let from_mask = maze_connections(grid, registry, from)?.with_open(direction);
    let to_mask = maze_connections(grid, registry, to)?.with_open(direction.opposite());

    let from_template = registry.template_for_mask(from_mask)?;
    let to_template = registry.template_for_mask(to_mask)?;

    grid.set_resolved(from.0, from.1, from_template)?;
    grid.set_resolved(to.0, to.1, to_template)?;
    Ok((from_template, to_template))
}

fn maze_connections(
    grid: &MazeGrid,
    registry: &TemplateRegistry,
    (x, y): (usize, usize),
) -> Result<ConnectionMask> {
    let template = grid
        .cell(x, y)?
        .resolved()
        .filter(|&id| registry.is_maze(id))
        .ok_or_else(|| MazeError::Configuration {
            reason: format!("cell ({x}, {y}) does not hold a maze template"),
        })?;
    registry
        .instance(template)
        .map(|instance| instance.connections)
        .ok_or_else(|| MazeError::Configuration {
            reason: format!("template {template} is not registered"),
        })
}
