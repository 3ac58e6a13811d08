//! Grid cells: domain, entropy, collapse and one-hop propagation
//!
//! A cell's domain only ever shrinks. Collapse resolves the cell to a single
//! template and filters each unresolved orthogonal neighbour against the
//! chosen template's adjacency table. Filtering is not cascaded further.

use crate::algorithm::bitset::DomainBitset;
use crate::algorithm::registry::{TemplateId, TemplateRegistry};
use crate::algorithm::selection::RandomSelector;
use crate::io::error::{MazeError, Result};
use crate::spatial::grid::MazeGrid;

/// One grid position with its remaining possibilities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    x: usize,
    y: usize,
    domain: DomainBitset,
    resolved: Option<TemplateId>,
}

impl Cell {
    /// Create an unresolved cell
    pub const fn new(x: usize, y: usize, domain: DomainBitset) -> Self {
        Self {
            x,
            y,
            domain,
            resolved: None,
        }
    }

    /// Column index
    pub const fn x(&self) -> usize {
        self.x
    }

    /// Row index
    pub const fn y(&self) -> usize {
        self.y
    }

    /// `(x, y)` coordinates
    pub const fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Templates still possible here
    pub const fn domain(&self) -> &DomainBitset {
        &self.domain
    }

    /// Domain size
    ///
    /// 0 on an unresolved cell is a contradiction, 1 means the outcome is
    /// determined but not yet applied, anything larger is still ambiguous.
    pub fn entropy(&self) -> usize {
        self.domain.count()
    }

    /// Template this cell resolved to
    pub const fn resolved(&self) -> Option<TemplateId> {
        self.resolved
    }

    /// Whether a template has been chosen
    pub const fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// Pick a template from the domain by weighted acceptance
    ///
    /// # Errors
    ///
    /// Returns a domain exhaustion error if the domain is empty.
    pub fn choose(
        &self,
        registry: &TemplateRegistry,
        selector: &mut RandomSelector,
    ) -> Result<TemplateId> {
        let candidates = self.domain.to_vec();
        selector
            .weighted_acceptance(&candidates, registry)
            .ok_or(MazeError::DomainExhaustion {
                x: self.x,
                y: self.y,
            })
    }

    /// Resolve to `template`, leaving it as the only member of the domain
    pub fn resolve(&mut self, template: TemplateId) {
        self.domain = DomainBitset::singleton(self.domain.capacity(), template);
        self.resolved = Some(template);
    }

    /// Keep only domain members that are also in `allowed`
    ///
    /// Resolved cells are left untouched. Returns the entropy afterwards.
    pub fn restrict(&mut self, allowed: &DomainBitset) -> usize {
        if self.resolved.is_none() {
            self.domain.intersect_with(allowed);
        }
        self.entropy()
    }
}

/// Collapse the cell at `(x, y)` and propagate to its neighbours
///
/// With `forced` the cell resolves to that template directly; otherwise the
/// template is drawn from the domain by weighted acceptance. Each in-bounds
/// unresolved neighbour then keeps only the templates listed in the chosen
/// template's adjacency table for the direction pointing at it. The whole
/// operation completes before control returns to the caller.
///
/// # Errors
///
/// Returns an out-of-bounds error for coordinates outside the grid and a
/// domain exhaustion error if no template is forced and the domain is empty.
pub fn collapse(
    grid: &mut MazeGrid,
    registry: &TemplateRegistry,
    x: usize,
    y: usize,
    forced: Option<TemplateId>,
    selector: &mut RandomSelector,
) -> Result<TemplateId> {
    let cell = grid.cell_mut(x, y)?;
    let chosen = match forced {
        Some(template) => template,
        None => cell.choose(registry, selector)?,
    };
    cell.resolve(chosen);

    let neighbors: Vec<_> = grid.neighbors(x, y).collect();
    for (direction, (nx, ny)) in neighbors {
        let allowed = registry.compatible_set(chosen, direction);
        let remaining = grid.cell_mut(nx, ny)?.restrict(&allowed);
        if remaining == 0 {
            log::trace!("Cell ({nx}, {ny}) exhausted by {chosen} at ({x}, {y})");
        }
    }

    Ok(chosen)
}
