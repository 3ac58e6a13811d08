//! Tests for connection masks, archetype validation and the catalog

#[cfg(test)]
mod tests {
    use mazewave::MazeError;
    use mazewave::spatial::direction::Direction;
    use mazewave::spatial::tiles::{
        Archetype, Catalog, Category, ConnectionMask, standard,
    };

    // Tests one clockwise turn of the corner shape
    // Verified by rotating counter-clockwise instead
    #[test]
    fn test_corner_rotation() {
        let corner = ConnectionMask::from_sides(false, true, true, false);
        let once = corner.rotated(1);

        assert_eq!(once, ConnectionMask::from_sides(false, false, true, true));
        assert_eq!(corner.rotated(4), corner);
        assert_eq!(corner.rotated(5), once);
    }

    // Tests every standard archetype is closed under its rotation count
    // Verified by declaring the line with 4 rotations
    #[test]
    fn test_rotation_closure() {
        let catalog = Catalog::standard();
        for (_, archetype) in catalog.iter() {
            assert!(archetype.validate().is_ok(), "{} invalid", archetype.name);
            assert_eq!(
                archetype.connections_at(archetype.rotations),
                archetype.connections
            );
            assert_eq!(
                archetype.border_at(archetype.rotations),
                archetype.allowed_border
            );
        }
    }

    // Tests the equality adjacency law on facing sides
    // Verified by comparing the same side instead of facing sides
    #[test]
    fn test_compatible_with() {
        let line = ConnectionMask::from_sides(false, true, false, true);
        let dead_end_left = ConnectionMask::from_sides(false, false, false, true);
        let dead_end_down = ConnectionMask::from_sides(false, false, true, false);

        assert!(line.compatible_with(dead_end_left, Direction::Right));
        assert!(!line.compatible_with(dead_end_down, Direction::Right));
        // Closed facing closed is compatible too
        assert!(dead_end_down.compatible_with(dead_end_left, Direction::Up));
    }

    // Tests opening a side, counting and the compact display
    // Verified by clearing instead of setting the bit
    #[test]
    fn test_mask_helpers() {
        let mask = ConnectionMask::CLOSED
            .with_open(Direction::Up)
            .with_open(Direction::Left);

        assert!(mask.is_open(Direction::Up));
        assert!(!mask.is_open(Direction::Right));
        assert_eq!(mask.open_count(), 2);
        assert_eq!(mask.complement().open_count(), 2);
        assert_eq!(mask.to_string(), "U..L");
        assert_eq!(ConnectionMask::OPEN.bits(), 0b1111);
    }

    // Tests validation rejects bad rotation counts, weights and closure
    // Verified by skipping the closure check
    #[test]
    fn test_archetype_validation() {
        let three = Archetype::maze("three", 3, 50, ConnectionMask::OPEN);
        assert!(matches!(three.validate(), Err(MazeError::Configuration { .. })));

        let heavy = Archetype::maze("heavy", 1, 101, ConnectionMask::OPEN);
        assert!(heavy.validate().is_err());

        // A dead end repeats only after four turns
        let open_down = ConnectionMask::from_sides(false, false, true, false);
        let unclosed = Archetype::maze("unclosed", 2, 50, open_down);
        assert!(unclosed.validate().is_err());

        let fine = Archetype::special(
            "pillar",
            Category::Decorative,
            1,
            10,
            ConnectionMask::CLOSED,
            ConnectionMask::OPEN,
        );
        assert!(fine.validate().is_ok());
        assert!(!fine.is_maze());
    }

    // Tests standard catalog order and maze border masks
    // Verified by reordering the catalog
    #[test]
    fn test_standard_catalog() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), 7);
        assert_eq!(catalog.by_name("line"), Some(standard::LINE));
        assert_eq!(catalog.by_name("dead_end"), Some(standard::DEAD_END));
        assert_eq!(catalog.by_name("room"), Some(standard::ROOM));
        assert_eq!(catalog.by_name("missing"), None);

        let empty = catalog.get(standard::EMPTY).expect("sentinel present");
        assert_eq!(empty.category, Category::Unresolved);

        for (_, archetype) in catalog.iter().filter(|(_, a)| a.is_maze()) {
            assert_eq!(archetype.allowed_border, archetype.connections.complement());
            assert_eq!(archetype.weight, 50);
        }
    }

    // Tests push rejects duplicate names and returns sequential ids
    // Verified by allowing duplicate names
    #[test]
    fn test_catalog_push() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());

        let cross = catalog
            .push(Archetype::maze("cross", 1, 50, ConnectionMask::OPEN))
            .expect("valid archetype");
        assert_eq!(cross.index(), 0);

        let duplicate = catalog.push(Archetype::maze("cross", 1, 20, ConnectionMask::OPEN));
        assert!(duplicate.is_err());
        assert_eq!(catalog.len(), 1);
    }

    // Tests shape matching recovers archetype and reduced rotation
    // Verified by returning the unreduced rotation
    #[test]
    fn test_match_shape() {
        let catalog = Catalog::standard();

        let vertical = ConnectionMask::from_sides(true, false, true, false);
        assert_eq!(catalog.match_shape(vertical), Some((standard::LINE, 1)));

        let down_left = ConnectionMask::from_sides(false, false, true, true);
        assert_eq!(catalog.match_shape(down_left), Some((standard::CORNER, 1)));

        assert_eq!(
            catalog.match_shape(ConnectionMask::OPEN),
            Some((standard::CROSS, 0))
        );

        let up_only = ConnectionMask::from_sides(true, false, false, false);
        assert_eq!(catalog.match_shape(up_only), Some((standard::DEAD_END, 2)));

        // Closed shapes are never maze shapes
        assert_eq!(catalog.match_shape(ConnectionMask::CLOSED), None);
    }

    // Tests every non-empty mask maps back to a shape with that mask
    // Verified by matching decorative archetypes too
    #[test]
    fn test_match_shape_covers_all_open_masks() {
        let catalog = Catalog::standard();
        for up in [false, true] {
            for right in [false, true] {
                for down in [false, true] {
                    for left in [false, true] {
                        let mask = ConnectionMask::from_sides(up, right, down, left);
                        if mask == ConnectionMask::CLOSED {
                            continue;
                        }
                        let (id, rotation) =
                            catalog.match_shape(mask).expect("every open mask has a shape");
                        let archetype = catalog.get(id).expect("matched id exists");
                        assert_eq!(archetype.connections_at(rotation), mask);
                    }
                }
            }
        }
    }
}
