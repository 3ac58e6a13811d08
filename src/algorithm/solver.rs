//! Minimum-entropy solver driving cell collapse one step at a time
//!
//! Each `step` picks an unresolved cell with the smallest domain, breaking
//! ties uniformly at random, and collapses it. The solver is greedy: it never
//! rolls back an earlier collapse.

use std::rc::Rc;

use crate::algorithm::cell::collapse;
use crate::algorithm::registry::{TemplateId, TemplateRegistry};
use crate::algorithm::selection::RandomSelector;
use crate::io::error::{MazeError, Result, WithContext, invalid_parameter};
use crate::spatial::grid::MazeGrid;
use crate::spatial::tiles::ArchetypeId;

/// Lifecycle of a solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    /// Unresolved cells remain
    Running,
    /// Nothing left to select
    Finished,
}

/// What to do when a selected cell has an empty domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContradictionPolicy {
    /// Return the domain exhaustion error to the caller
    #[default]
    Abort,
    /// Record the cell, leave it unresolved and never select it again
    Mark,
}

/// Outcome of a single solver step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStep {
    /// A cell was resolved
    Collapsed {
        /// Column of the resolved cell
        x: usize,
        /// Row of the resolved cell
        y: usize,
        /// Template it resolved to
        template: TemplateId,
    },
    /// A cell turned out to be exhausted and was marked
    Contradiction {
        /// Column of the exhausted cell
        x: usize,
        /// Row of the exhausted cell
        y: usize,
    },
    /// No selectable cell remained
    Finished,
}

/// Owns the grid while it is being solved
#[derive(Debug)]
pub struct Solver {
    registry: Rc<TemplateRegistry>,
    grid: MazeGrid,
    selector: RandomSelector,
    policy: ContradictionPolicy,
    state: SolverState,
    contradictions: Vec<(usize, usize)>,
    iteration: usize,
}

impl Solver {
    /// Create a solver over a fresh `columns` x `rows` grid
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero.
    pub fn new(
        registry: Rc<TemplateRegistry>,
        columns: usize,
        rows: usize,
        selector: RandomSelector,
        policy: ContradictionPolicy,
    ) -> Result<Self> {
        let grid = MazeGrid::new(columns, rows, &registry)?;
        log::info!(
            "Solving {columns}x{rows} grid with {} templates (seed {})",
            registry.len(),
            selector.seed()
        );
        Ok(Self {
            registry,
            grid,
            selector,
            policy,
            state: SolverState::Running,
            contradictions: Vec::new(),
            iteration: 0,
        })
    }

    /// Resolve a cell to a fixed template before solving
    ///
    /// The template must still be in the cell's domain; its neighbours are
    /// filtered exactly as after a normal collapse.
    ///
    /// # Errors
    ///
    /// Returns an out-of-bounds error for bad coordinates, a lookup error for
    /// an unregistered pair, or an invalid parameter error if the template is
    /// not allowed at that position.
    pub fn seed_cell(
        &mut self,
        x: usize,
        y: usize,
        archetype: ArchetypeId,
        rotation: usize,
    ) -> Result<TemplateId> {
        let template = self.registry.lookup(archetype, rotation)?;
        let cell = self.grid.cell(x, y)?;
        if cell.is_resolved() || !cell.domain().contains(template) {
            return Err(invalid_parameter(
                "seed_cell",
                &format!("{template} at ({x}, {y})"),
                &"template is not in the cell's domain",
            ));
        }
        collapse(
            &mut self.grid,
            &self.registry,
            x,
            y,
            Some(template),
            &mut self.selector,
        )
    }

    /// Resolve one cell
    ///
    /// # Errors
    ///
    /// Under `ContradictionPolicy::Abort`, returns a domain exhaustion error
    /// when the selected cell has an empty domain.
    pub fn step(&mut self) -> Result<SolverStep> {
        if self.state == SolverState::Finished {
            return Ok(SolverStep::Finished);
        }

        let candidates = self.lowest_entropy_cells();
        let Some(&(x, y)) = self.selector.choose(&candidates) else {
            self.state = SolverState::Finished;
            log::info!(
                "Solver finished after {} steps with {} contradictions",
                self.iteration,
                self.contradictions.len()
            );
            return Ok(SolverStep::Finished);
        };

        self.iteration += 1;
        match collapse(&mut self.grid, &self.registry, x, y, None, &mut self.selector)
            .with_cell(x, y)
        {
            Ok(template) => {
                log::trace!("Step {}: ({x}, {y}) -> {template}", self.iteration);
                Ok(SolverStep::Collapsed { x, y, template })
            }
            Err(MazeError::DomainExhaustion { .. }) if self.policy == ContradictionPolicy::Mark => {
                log::warn!("Contradiction at ({x}, {y}); cell left unresolved");
                self.contradictions.push((x, y));
                Ok(SolverStep::Contradiction { x, y })
            }
            Err(error) => Err(error),
        }
    }

    /// Step until finished, returning the number of steps taken
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `step`.
    pub fn run_to_completion(&mut self) -> Result<usize> {
        let start = self.iteration;
        while self.step()? != SolverStep::Finished {}
        Ok(self.iteration - start)
    }

    fn lowest_entropy_cells(&self) -> Vec<(usize, usize)> {
        let mut lowest = usize::MAX;
        let mut cells = Vec::new();

        for cell in self.grid.iter() {
            if cell.is_resolved() || self.contradictions.contains(&cell.position()) {
                continue;
            }
            let entropy = cell.entropy();
            if entropy < lowest {
                lowest = entropy;
                cells.clear();
            }
            if entropy == lowest {
                cells.push(cell.position());
            }
        }

        cells
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SolverState {
        self.state
    }

    /// Whether the solver has finished
    pub fn is_finished(&self) -> bool {
        self.state == SolverState::Finished
    }

    /// Number of steps that selected a cell
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Grid being solved
    pub const fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    /// Shared template registry
    pub fn registry(&self) -> Rc<TemplateRegistry> {
        Rc::clone(&self.registry)
    }

    /// Cells marked as exhausted, in the order they were found
    pub fn contradictions(&self) -> &[(usize, usize)] {
        &self.contradictions
    }

    /// Hand over the grid and the random stream
    pub fn into_parts(self) -> (MazeGrid, RandomSelector) {
        (self.grid, self.selector)
    }
}
