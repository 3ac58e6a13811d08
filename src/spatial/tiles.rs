//! Tile archetypes, connection masks and the archetype catalog
//!
//! An archetype is a tile shape in its canonical orientation: which sides are
//! open, how many distinct quarter-turn rotations it has, how strongly it is
//! favoured during collapse and which sides may face the grid edge. Rotated
//! variants are derived on demand and never stored here.

use std::fmt;

use crate::io::error::{MazeError, Result, configuration_error};
use crate::spatial::direction::Direction;

/// Four open/closed flags, one bit per `Direction`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ConnectionMask(u8);

impl ConnectionMask {
    /// Every side closed
    pub const CLOSED: Self = Self(0);
    /// Every side open
    pub const OPEN: Self = Self(0b1111);

    /// Build a mask from per-side flags in clockwise order
    pub const fn from_sides(up: bool, right: bool, down: bool, left: bool) -> Self {
        let mut bits = 0;
        if up {
            bits |= Direction::Up.bit();
        }
        if right {
            bits |= Direction::Right.bit();
        }
        if down {
            bits |= Direction::Down.bit();
        }
        if left {
            bits |= Direction::Left.bit();
        }
        Self(bits)
    }

    /// Raw bits, `Up` in the lowest position
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether the side facing `direction` is open
    pub const fn is_open(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Copy of the mask with the side facing `direction` opened
    #[must_use]
    pub const fn with_open(self, direction: Direction) -> Self {
        Self(self.0 | direction.bit())
    }

    /// Rotate clockwise by `steps` quarter turns
    ///
    /// One step moves the `Up` flag to `Right`, `Right` to `Down`, `Down` to
    /// `Left` and `Left` to `Up`. Four steps are the identity.
    #[must_use]
    pub const fn rotated(self, steps: usize) -> Self {
        let k = (steps % 4) as u32;
        if k == 0 {
            return self;
        }
        Self(((self.0 << k) | (self.0 >> (4 - k))) & Self::OPEN.0)
    }

    /// Flip every side
    #[must_use]
    pub const fn complement(self) -> Self {
        Self(!self.0 & Self::OPEN.0)
    }

    /// Number of open sides
    pub const fn open_count(self) -> u32 {
        self.0.count_ones()
    }

    /// Adjacency law: the facing sides must be both open or both closed
    ///
    /// `self` is the tile at the origin, `other` the tile one step in `direction`.
    pub const fn compatible_with(self, other: Self, direction: Direction) -> bool {
        self.is_open(direction) == other.is_open(direction.opposite())
    }
}

impl fmt::Display for ConnectionMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyphs = ['U', 'R', 'D', 'L'];
        for (direction, glyph) in Direction::ALL.into_iter().zip(glyphs) {
            let shown = if self.is_open(direction) { glyph } else { '.' };
            write!(f, "{shown}")?;
        }
        Ok(())
    }
}

/// Index of an archetype inside its `Catalog`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArchetypeId(usize);

impl ArchetypeId {
    /// Wrap a catalog position
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Catalog position
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ArchetypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Role an archetype plays in the generated maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Passage tile; adjacency derived from the connection mask
    Maze,
    /// Non-navigable tile with hand-authored adjacency
    Decorative,
    /// Marker for a cell that has not been resolved yet
    Unresolved,
}

/// Immutable tile shape definition in canonical orientation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archetype {
    /// Human readable name, unique within a catalog
    pub name: &'static str,
    /// Maze, decorative or sentinel
    pub category: Category,
    /// Number of distinct rotations, one of 1, 2 or 4
    pub rotations: usize,
    /// Selection weight in `0..=100`
    pub weight: u8,
    /// Open sides at rotation 0
    pub connections: ConnectionMask,
    /// Sides allowed to touch the grid edge at rotation 0
    pub allowed_border: ConnectionMask,
}

impl Archetype {
    /// Passage archetype; only its closed sides may face the grid edge
    pub const fn maze(
        name: &'static str,
        rotations: usize,
        weight: u8,
        connections: ConnectionMask,
    ) -> Self {
        Self {
            name,
            category: Category::Maze,
            rotations,
            weight,
            connections,
            allowed_border: connections.complement(),
        }
    }

    /// Archetype whose adjacency is authored by hand
    pub const fn special(
        name: &'static str,
        category: Category,
        rotations: usize,
        weight: u8,
        connections: ConnectionMask,
        allowed_border: ConnectionMask,
    ) -> Self {
        Self {
            name,
            category,
            rotations,
            weight,
            connections,
            allowed_border,
        }
    }

    /// Whether the archetype is a navigable passage
    pub const fn is_maze(&self) -> bool {
        matches!(self.category, Category::Maze)
    }

    /// Connection mask after `rotation` clockwise quarter turns
    pub const fn connections_at(&self, rotation: usize) -> ConnectionMask {
        self.connections.rotated(rotation)
    }

    /// Allowed-border mask after `rotation` clockwise quarter turns
    pub const fn border_at(&self, rotation: usize) -> ConnectionMask {
        self.allowed_border.rotated(rotation)
    }

    /// Check rotation count, weight and rotation closure
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the rotation count is not 1, 2 or 4,
    /// the weight exceeds 100, or rotating `rotations` times does not return
    /// the canonical mask.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.rotations, 1 | 2 | 4) {
            return Err(configuration_error(&format!(
                "archetype '{}' has {} rotations, expected 1, 2 or 4",
                self.name, self.rotations
            )));
        }
        if self.weight > 100 {
            return Err(configuration_error(&format!(
                "archetype '{}' has weight {}, expected at most 100",
                self.name, self.weight
            )));
        }
        if self.connections.rotated(self.rotations) != self.connections
            || self.allowed_border.rotated(self.rotations) != self.allowed_border
        {
            return Err(configuration_error(&format!(
                "archetype '{}' is not closed under {} rotations",
                self.name, self.rotations
            )));
        }
        Ok(())
    }
}

/// Identifiers of the archetypes in `Catalog::standard`
pub mod standard {
    use super::ArchetypeId;

    /// Straight passage, open left and right
    pub const LINE: ArchetypeId = ArchetypeId(0);
    /// Bend, open right and down
    pub const CORNER: ArchetypeId = ArchetypeId(1);
    /// T junction, closed on the left
    pub const FORK: ArchetypeId = ArchetypeId(2);
    /// Four-way junction
    pub const CROSS: ArchetypeId = ArchetypeId(3);
    /// Single opening downwards
    pub const DEAD_END: ArchetypeId = ArchetypeId(4);
    /// Closed decorative room
    pub const ROOM: ArchetypeId = ArchetypeId(5);
    /// Unresolved sentinel
    pub const EMPTY: ArchetypeId = ArchetypeId(6);
}

const STANDARD_ARCHETYPES: [Archetype; 7] = [
    Archetype::maze(
        "line",
        2,
        50,
        ConnectionMask::from_sides(false, true, false, true),
    ),
    Archetype::maze(
        "corner",
        4,
        50,
        ConnectionMask::from_sides(false, true, true, false),
    ),
    Archetype::maze(
        "fork",
        4,
        50,
        ConnectionMask::from_sides(true, true, true, false),
    ),
    Archetype::maze("cross", 1, 50, ConnectionMask::OPEN),
    Archetype::maze(
        "dead_end",
        4,
        50,
        ConnectionMask::from_sides(false, false, true, false),
    ),
    Archetype::special(
        "room",
        Category::Decorative,
        1,
        35,
        ConnectionMask::CLOSED,
        ConnectionMask::OPEN,
    ),
    Archetype::special(
        "empty",
        Category::Unresolved,
        1,
        50,
        ConnectionMask::CLOSED,
        ConnectionMask::OPEN,
    ),
];

/// Ordered, append-only set of archetypes
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    archetypes: Vec<Archetype>,
}

impl Catalog {
    /// Create an empty catalog
    pub const fn new() -> Self {
        Self {
            archetypes: Vec::new(),
        }
    }

    /// Line, corner, fork, cross, dead end, room and the empty sentinel
    ///
    /// Identifiers match the constants in [`standard`].
    pub fn standard() -> Self {
        Self {
            archetypes: STANDARD_ARCHETYPES.to_vec(),
        }
    }

    /// Append an archetype after validating it
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the archetype fails validation or its
    /// name is already taken.
    pub fn push(&mut self, archetype: Archetype) -> Result<ArchetypeId> {
        archetype.validate()?;
        if self.by_name(archetype.name).is_some() {
            return Err(configuration_error(&format!(
                "archetype '{}' is defined twice",
                archetype.name
            )));
        }
        self.archetypes.push(archetype);
        Ok(ArchetypeId(self.archetypes.len() - 1))
    }

    /// Look up an archetype by id
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the id does not belong to this catalog.
    pub fn get(&self, id: ArchetypeId) -> Result<&Archetype> {
        self.archetypes
            .get(id.0)
            .ok_or_else(|| MazeError::Configuration {
                reason: format!("archetype {id} is not part of the catalog"),
            })
    }

    /// Find an archetype id by name
    pub fn by_name(&self, name: &str) -> Option<ArchetypeId> {
        self.archetypes
            .iter()
            .position(|archetype| archetype.name == name)
            .map(ArchetypeId)
    }

    /// Iterate `(id, archetype)` pairs in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (ArchetypeId, &Archetype)> {
        self.archetypes
            .iter()
            .enumerate()
            .map(|(index, archetype)| (ArchetypeId(index), archetype))
    }

    /// Number of archetypes
    pub const fn len(&self) -> usize {
        self.archetypes.len()
    }

    /// Whether the catalog has no archetypes
    pub const fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    /// Recover the maze archetype and rotation that produce `mask`
    ///
    /// Maze archetypes are tried in catalog order and, for each, rotations
    /// 0 through 3; the first hit wins and its rotation is reduced modulo the
    /// archetype's rotation count. The standard passage shapes are distinct up
    /// to rotation, so at most one archetype can match.
    pub fn match_shape(&self, mask: ConnectionMask) -> Option<(ArchetypeId, usize)> {
        self.iter()
            .filter(|(_, archetype)| archetype.is_maze())
            .find_map(|(id, archetype)| {
                (0..4)
                    .find(|&rotation| archetype.connections_at(rotation) == mask)
                    .map(|rotation| (id, rotation % archetype.rotations))
            })
    }
}
