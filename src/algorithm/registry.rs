//! Template instances and their directional adjacency tables
//!
//! Every `(archetype, rotation)` pair is materialised once as a
//! `TemplateInstance` and addressed by a `TemplateId`. Cells never copy
//! instances; they hold bitsets of ids into this registry.
//!
//! Plain (maze) instances get their adjacency from the graph builder. Special
//! archetypes bring adjacency authored for rotation 0 only, and the registry
//! derives the remaining rotations from that single source table.

use std::collections::HashMap;
use std::fmt;

use crate::algorithm::bitset::DomainBitset;
use crate::algorithm::graph::MazeGraphBuilder;
use crate::io::error::{MazeError, Result, configuration_error};
use crate::spatial::direction::{Direction, DirectionMap};
use crate::spatial::tiles::{
    Archetype, ArchetypeId, Catalog, Category, ConnectionMask, standard,
};

/// Index of a template instance inside its `TemplateRegistry`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(usize);

impl TemplateId {
    /// Wrap a registry position
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Registry position
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// One concrete `(archetype, rotation)` combination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInstance {
    /// Shape this instance was derived from
    pub archetype: ArchetypeId,
    /// Clockwise quarter turns applied to the canonical shape
    pub rotation: usize,
    /// Open sides after rotation
    pub connections: ConnectionMask,
    /// Sides allowed to touch the grid edge after rotation
    pub allowed_border: ConnectionMask,
}

/// Compatible neighbours per direction
///
/// Duplicates are allowed; order is stable.
pub type AdjacencyTable = DirectionMap<Vec<TemplateId>>;

/// Adjacency authored for rotation 0 of a special archetype
pub type AuthoredAdjacency = DirectionMap<Vec<(ArchetypeId, usize)>>;

/// Shared store of every template instance and its adjacency
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    catalog: Catalog,
    instances: Vec<TemplateInstance>,
    adjacency: Vec<AdjacencyTable>,
    index: HashMap<(ArchetypeId, usize), TemplateId>,
}

impl TemplateRegistry {
    /// Create a registry over `catalog` with no instances yet
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            instances: Vec::new(),
            adjacency: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Fully wired registry for `Catalog::standard`
    ///
    /// Builds every maze rotation, adds the decorative room and the empty
    /// sentinel as specials, installs the room's back-references through the
    /// graph builder and checks that no archetype was left out.
    ///
    /// # Errors
    ///
    /// Returns a configuration or lookup error if the standard catalog is
    /// inconsistent.
    pub fn standard() -> Result<Self> {
        let mut registry = Self::new(Catalog::standard());
        let plain = registry.build_plain_templates();

        let room_neighbors = DirectionMap::from_fn(|direction| {
            let mut allowed: Vec<(ArchetypeId, usize)> = plain
                .iter()
                .filter_map(|&id| registry.instance(id))
                .filter(|instance| !instance.connections.is_open(direction.opposite()))
                .map(|instance| (instance.archetype, instance.rotation))
                .collect();
            allowed.push((standard::ROOM, 0));
            allowed
        });
        let room = registry.add_special_archetype(
            standard::ROOM,
            &room_neighbors,
            ConnectionMask::OPEN,
        )?;

        let every_pair: Vec<(ArchetypeId, usize)> = registry
            .instances
            .iter()
            .map(|instance| (instance.archetype, instance.rotation))
            .chain(std::iter::once((standard::EMPTY, 0)))
            .collect();
        let empty_neighbors = DirectionMap::from_fn(|_| every_pair.clone());
        registry.add_special_archetype(standard::EMPTY, &empty_neighbors, ConnectionMask::OPEN)?;

        let mut builder = MazeGraphBuilder::new();
        for id in room {
            builder.register_special(id);
        }
        builder.construct(&mut registry)?;

        registry.check_all_archetypes_defined()?;
        log::debug!(
            "Standard registry ready: {} archetypes, {} templates",
            registry.catalog.len(),
            registry.len()
        );
        Ok(registry)
    }

    /// Archetype catalog backing this registry
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Register every rotation of every maze archetype
    ///
    /// Masks are a pure function of the canonical masks and the rotation
    /// index. Pairs that are already registered are skipped. Returns the ids
    /// of all plain instances in registration order.
    pub fn build_plain_templates(&mut self) -> Vec<TemplateId> {
        let plain: Vec<(ArchetypeId, Archetype)> = self
            .catalog
            .iter()
            .filter(|(_, archetype)| archetype.is_maze())
            .map(|(id, archetype)| (id, archetype.clone()))
            .collect();

        let mut ids = Vec::new();
        for (archetype_id, archetype) in plain {
            for rotation in 0..archetype.rotations {
                let id = match self.index.get(&(archetype_id, rotation)) {
                    Some(&existing) => existing,
                    None => self.insert_instance(TemplateInstance {
                        archetype: archetype_id,
                        rotation,
                        connections: archetype.connections_at(rotation),
                        allowed_border: archetype.border_at(rotation),
                    }),
                };
                ids.push(id);
            }
        }
        ids
    }

    /// Register every rotation of a special archetype
    ///
    /// `adjacency` lists, for rotation 0, the `(archetype, rotation)` pairs
    /// allowed in each direction. Rotation `r` is derived independently from
    /// that source: the entry keyed by direction `d` moves to `d` turned `r`
    /// steps clockwise, and every referenced rotation is bumped by `r` modulo
    /// the referenced archetype's own rotation count. The border mask is
    /// rotated the same way as connection masks.
    ///
    /// Referenced pairs must already be registered, except for the archetype
    /// being added, which may reference its own rotations. On error the
    /// registry is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the archetype is a maze archetype, is
    /// already registered, its border mask is not closed under its rotation
    /// count, or the authored table references a rotation out of range;
    /// returns a lookup error if a referenced pair is not registered.
    pub fn add_special_archetype(
        &mut self,
        archetype_id: ArchetypeId,
        adjacency: &AuthoredAdjacency,
        border: ConnectionMask,
    ) -> Result<Vec<TemplateId>> {
        let archetype = self.catalog.get(archetype_id)?.clone();
        if archetype.is_maze() {
            return Err(configuration_error(&format!(
                "'{}' is a maze archetype; its adjacency is derived, not authored",
                archetype.name
            )));
        }
        if (0..archetype.rotations).any(|rotation| self.index.contains_key(&(archetype_id, rotation)))
        {
            return Err(configuration_error(&format!(
                "special archetype '{}' is already registered",
                archetype.name
            )));
        }

        if border.rotated(archetype.rotations) != border {
            return Err(configuration_error(&format!(
                "border mask {border} of '{}' is not closed under {} rotations",
                archetype.name, archetype.rotations
            )));
        }

        // Nothing is inserted until every rotated table is known to resolve
        let base = self.instances.len();
        let tables = (0..archetype.rotations)
            .map(|rotation| self.rotate_authored(adjacency, rotation, (archetype_id, base)))
            .collect::<Result<Vec<_>>>()?;

        let mut ids = Vec::with_capacity(tables.len());
        for (rotation, table) in tables.into_iter().enumerate() {
            let id = self.insert_instance(TemplateInstance {
                archetype: archetype_id,
                rotation,
                connections: archetype.connections_at(rotation),
                allowed_border: border.rotated(rotation),
            });
            if let Some(slot) = self.adjacency.get_mut(id.0) {
                *slot = table;
            }
            ids.push(id);
        }

        log::debug!(
            "Registered special archetype '{}' with {} rotations",
            archetype.name,
            ids.len()
        );
        Ok(ids)
    }

    // `pending` is the archetype being added and the id its rotation 0 will get
    fn rotate_authored(
        &self,
        adjacency: &AuthoredAdjacency,
        rotation: usize,
        pending: (ArchetypeId, usize),
    ) -> Result<AdjacencyTable> {
        let mut table = AdjacencyTable::default();
        for (direction, pairs) in adjacency.iter() {
            let target = direction.rotated(rotation);
            for &(referenced, referenced_rotation) in pairs {
                let rotations = self.catalog.get(referenced)?.rotations;
                if referenced_rotation >= rotations {
                    return Err(configuration_error(&format!(
                        "rotation {referenced_rotation} of archetype {referenced} is out of range (0..{rotations})"
                    )));
                }
                let shifted = (referenced_rotation + rotation) % rotations;
                let id = if referenced == pending.0 {
                    TemplateId(pending.1 + shifted)
                } else {
                    self.lookup(referenced, shifted)?
                };
                table[target].push(id);
            }
        }
        Ok(table)
    }

    fn insert_instance(&mut self, instance: TemplateInstance) -> TemplateId {
        let id = TemplateId(self.instances.len());
        self.index.insert((instance.archetype, instance.rotation), id);
        self.instances.push(instance);
        self.adjacency.push(AdjacencyTable::default());
        id
    }

    /// Ensure every catalog archetype has at least one registered instance
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first missing archetype.
    pub fn check_all_archetypes_defined(&self) -> Result<()> {
        for (id, archetype) in self.catalog.iter() {
            if !self.instances.iter().any(|instance| instance.archetype == id) {
                return Err(configuration_error(&format!(
                    "archetype '{}' was not defined",
                    archetype.name
                )));
            }
        }
        Ok(())
    }

    /// Template id for an `(archetype, rotation)` pair
    ///
    /// # Errors
    ///
    /// Returns a lookup error if the pair was never registered.
    pub fn lookup(&self, archetype: ArchetypeId, rotation: usize) -> Result<TemplateId> {
        self.index
            .get(&(archetype, rotation))
            .copied()
            .ok_or_else(|| MazeError::Lookup {
                archetype: self
                    .catalog
                    .get(archetype)
                    .map_or_else(|_| archetype.to_string(), |a| a.name.to_string()),
                rotation,
            })
    }

    /// Number of registered instances
    pub const fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether nothing has been registered yet
    pub const fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Instance for `id`
    pub fn instance(&self, id: TemplateId) -> Option<&TemplateInstance> {
        self.instances.get(id.0)
    }

    /// Iterate `(id, instance)` pairs in registration order
    pub fn instances(&self) -> impl Iterator<Item = (TemplateId, &TemplateInstance)> {
        self.instances
            .iter()
            .enumerate()
            .map(|(index, instance)| (TemplateId(index), instance))
    }

    /// Archetype definition behind `id`
    pub fn archetype_of(&self, id: TemplateId) -> Option<&Archetype> {
        self.instance(id)
            .and_then(|instance| self.catalog.get(instance.archetype).ok())
    }

    /// Selection weight of `id`, 0 for unknown ids
    pub fn weight(&self, id: TemplateId) -> u8 {
        self.archetype_of(id).map_or(0, |archetype| archetype.weight)
    }

    /// Whether `id` is a navigable passage instance
    pub fn is_maze(&self, id: TemplateId) -> bool {
        self.archetype_of(id).is_some_and(Archetype::is_maze)
    }

    /// Ids of every plain (maze) instance in registration order
    pub fn plain_ids(&self) -> Vec<TemplateId> {
        self.instances()
            .filter(|&(id, _)| self.is_maze(id))
            .map(|(id, _)| id)
            .collect()
    }

    /// Adjacency table of `id`
    pub fn adjacency(&self, id: TemplateId) -> Option<&AdjacencyTable> {
        self.adjacency.get(id.0)
    }

    pub(crate) fn adjacency_mut(&mut self, id: TemplateId) -> Option<&mut AdjacencyTable> {
        self.adjacency.get_mut(id.0)
    }

    /// Whether `other` may sit one step from `origin` in `direction`
    pub fn compatible(&self, origin: TemplateId, other: TemplateId, direction: Direction) -> bool {
        self.adjacency(origin)
            .is_some_and(|table| table[direction].contains(&other))
    }

    /// Every template allowed one step from `origin` in `direction`
    pub fn compatible_set(&self, origin: TemplateId, direction: Direction) -> DomainBitset {
        let mut allowed = DomainBitset::new(self.len());
        if let Some(table) = self.adjacency(origin) {
            for &id in &table[direction] {
                allowed.insert(id);
            }
        }
        allowed
    }

    /// Starting domain for a cell touching the given grid edges
    ///
    /// Holds every instance except the unresolved sentinel, minus instances
    /// whose allowed-border mask forbids a side that touches an edge.
    pub fn initial_domain(&self, edges: &DirectionMap<bool>) -> DomainBitset {
        let mut domain = DomainBitset::new(self.len());
        for (id, instance) in self.instances() {
            let sentinel = self
                .archetype_of(id)
                .is_none_or(|archetype| archetype.category == Category::Unresolved);
            let fits_border = edges
                .iter()
                .all(|(direction, &touches)| !touches || instance.allowed_border.is_open(direction));
            if !sentinel && fits_border {
                domain.insert(id);
            }
        }
        domain
    }

    /// Maze instance whose connections equal `mask`
    ///
    /// # Errors
    ///
    /// Returns a lookup error if no maze archetype produces the mask.
    pub fn template_for_mask(&self, mask: ConnectionMask) -> Result<TemplateId> {
        let (archetype, rotation) =
            self.catalog
                .match_shape(mask)
                .ok_or_else(|| MazeError::Lookup {
                    archetype: format!("shape {mask}"),
                    rotation: 0,
                })?;
        self.lookup(archetype, rotation)
    }
}
