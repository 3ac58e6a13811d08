//! Tests for cardinal directions and per-direction maps

#[cfg(test)]
mod tests {
    use mazewave::spatial::direction::{Direction, DirectionMap};

    // Tests opposite pairs Up/Down and Right/Left
    // Verified by mapping Right to Right
    #[test]
    fn test_opposite_pairs() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_eq!(Direction::Left.opposite(), Direction::Right);

        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    // Tests clockwise rotation order and wrap-around
    // Verified by rotating counter-clockwise
    #[test]
    fn test_rotated_clockwise() {
        assert_eq!(Direction::Up.rotated(1), Direction::Right);
        assert_eq!(Direction::Right.rotated(1), Direction::Down);
        assert_eq!(Direction::Down.rotated(1), Direction::Left);
        assert_eq!(Direction::Left.rotated(1), Direction::Up);
        assert_eq!(Direction::Left.rotated(2), Direction::Right);

        for direction in Direction::ALL {
            assert_eq!(direction.rotated(4), direction);
            assert_eq!(direction.rotated(2), direction.opposite());
        }
    }

    // Tests index and from_index agree and wrap modulo 4
    // Verified by swapping Down and Left indices
    #[test]
    fn test_index_round_trip() {
        for (expected, direction) in Direction::ALL.into_iter().enumerate() {
            assert_eq!(direction.index(), expected);
            assert_eq!(Direction::from_index(expected), direction);
            assert_eq!(Direction::from_index(expected + 4), direction);
        }
    }

    // Tests grid offsets point up towards row 0
    // Verified by flipping the Up offset sign
    #[test]
    fn test_offsets() {
        assert_eq!(Direction::Up.offset(), (0, -1));
        assert_eq!(Direction::Right.offset(), (1, 0));
        assert_eq!(Direction::Down.offset(), (0, 1));
        assert_eq!(Direction::Left.offset(), (-1, 0));

        for direction in Direction::ALL {
            let (dx, dy) = direction.offset();
            let (ox, oy) = direction.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    // Tests each direction owns a distinct mask bit
    // Verified by giving Left the Up bit
    #[test]
    fn test_bits_are_distinct() {
        let combined = Direction::ALL
            .into_iter()
            .fold(0u8, |bits, direction| bits | direction.bit());
        assert_eq!(combined, 0b1111);
        assert_eq!(Direction::Up.bit(), 1);
    }

    // Tests map access by direction through get, index and iteration
    // Verified by returning the right value for left lookups
    #[test]
    fn test_direction_map_access() {
        let mut map = DirectionMap::new(1, 2, 3, 4);
        assert_eq!(*map.get(Direction::Up), 1);
        assert_eq!(map[Direction::Right], 2);
        assert_eq!(map[Direction::Down], 3);
        assert_eq!(map[Direction::Left], 4);

        map[Direction::Left] = 40;
        *map.get_mut(Direction::Up) += 10;

        let collected: Vec<(Direction, i32)> = map.iter().map(|(d, &v)| (d, v)).collect();
        assert_eq!(
            collected,
            vec![
                (Direction::Up, 11),
                (Direction::Right, 2),
                (Direction::Down, 3),
                (Direction::Left, 40),
            ]
        );
    }

    // Tests from_fn evaluates the closure once per direction
    // Verified by filling every slot from Up
    #[test]
    fn test_direction_map_from_fn() {
        let map = DirectionMap::from_fn(Direction::index);
        for direction in Direction::ALL {
            assert_eq!(map[direction], direction.index());
        }
        assert_eq!(Direction::Left.to_string(), "left");
    }
}
