//! Adjacency construction for plain maze templates
//!
//! Plain adjacency follows the equality law: a neighbour fits in direction
//! `d` when its side facing back agrees with ours, open/open or
//! closed/closed. Special templates author their own tables; the builder
//! mirrors every plain entry of a registered special into that plain
//! template's table, which is the only place cross-category adjacency appears.

use crate::algorithm::registry::{AdjacencyTable, TemplateId, TemplateRegistry};
use crate::io::error::{MazeError, Result};
use crate::spatial::direction::Direction;

/// Collects special templates and writes plain adjacency into a registry
#[derive(Debug, Clone, Default)]
pub struct MazeGraphBuilder {
    specials: Vec<TemplateId>,
}

impl MazeGraphBuilder {
    /// Create a builder with no registered specials
    pub const fn new() -> Self {
        Self {
            specials: Vec::new(),
        }
    }

    /// Include a special template's back-references in the next `construct`
    pub fn register_special(&mut self, template: TemplateId) {
        if !self.specials.contains(&template) {
            self.specials.push(template);
        }
    }

    /// Specials registered so far
    pub fn specials(&self) -> &[TemplateId] {
        &self.specials
    }

    /// Rebuild the adjacency tables of every plain template
    ///
    /// Plain tables are cleared first, so calling this twice gives the same
    /// result as calling it once.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a registered special is not part of
    /// the registry.
    pub fn construct(&self, registry: &mut TemplateRegistry) -> Result<()> {
        let plain = registry.plain_ids();

        let mut tables = Vec::with_capacity(plain.len());
        for &origin in &plain {
            let Some(origin_mask) = registry.instance(origin).map(|i| i.connections) else {
                continue;
            };
            let mut table = AdjacencyTable::default();
            for direction in Direction::ALL {
                for &other in &plain {
                    let compatible = registry
                        .instance(other)
                        .is_some_and(|i| origin_mask.compatible_with(i.connections, direction));
                    if compatible {
                        table[direction].push(other);
                    }
                }
            }
            tables.push((origin, table));
        }

        let mut back_references = Vec::new();
        for &special in &self.specials {
            let table = registry
                .adjacency(special)
                .ok_or_else(|| MazeError::Configuration {
                    reason: format!("special template {special} is not registered"),
                })?;
            for (direction, neighbors) in table.iter() {
                for &neighbor in neighbors {
                    if registry.is_maze(neighbor) {
                        back_references.push((neighbor, direction.opposite(), special));
                    }
                }
            }
        }

        for (origin, table) in tables {
            if let Some(slot) = registry.adjacency_mut(origin) {
                *slot = table;
            }
        }
        for (plain_template, direction, special) in back_references {
            if let Some(slot) = registry.adjacency_mut(plain_template) {
                slot[direction].push(special);
            }
        }

        log::debug!(
            "Constructed maze graph: {} plain templates, {} specials",
            plain.len(),
            self.specials.len()
        );
        Ok(())
    }
}
