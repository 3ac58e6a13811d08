//! Tests for domain bitset membership and set operations

#[cfg(test)]
mod tests {
    use mazewave::algorithm::bitset::DomainBitset;
    use mazewave::algorithm::registry::TemplateId;

    fn ids(indices: &[usize]) -> Vec<TemplateId> {
        indices.iter().copied().map(TemplateId::new).collect()
    }

    // Tests insertion, removal and ascending iteration
    // Verified by iterating in insertion order
    #[test]
    fn test_membership() {
        let mut bitset = DomainBitset::new(8);
        assert!(bitset.is_empty());

        bitset.insert(TemplateId::new(5));
        bitset.insert(TemplateId::new(1));
        bitset.insert(TemplateId::new(3));
        bitset.remove(TemplateId::new(3));

        assert!(bitset.contains(TemplateId::new(5)));
        assert!(!bitset.contains(TemplateId::new(3)));
        assert_eq!(bitset.count(), 2);
        assert_eq!(bitset.to_vec(), ids(&[1, 5]));
    }

    // Tests ids beyond the capacity are ignored
    // Verified by growing the bitset on insert
    #[test]
    fn test_out_of_range_ids() {
        let mut bitset = DomainBitset::new(4);
        bitset.insert(TemplateId::new(4));
        bitset.insert(TemplateId::new(100));

        assert!(bitset.is_empty());
        assert!(!bitset.contains(TemplateId::new(100)));
        assert_eq!(bitset.capacity(), 4);
    }

    // Tests intersection never adds members
    // Verified by implementing intersection as union
    #[test]
    fn test_intersection_shrinks() {
        let all = DomainBitset::all(6);
        let mut allowed = DomainBitset::new(6);
        allowed.insert(TemplateId::new(0));
        allowed.insert(TemplateId::new(4));

        let narrowed = all.intersection(&allowed);
        assert_eq!(narrowed.to_vec(), ids(&[0, 4]));
        assert!(narrowed.is_subset(&all));
        assert!(!all.is_subset(&narrowed));

        let mut domain = narrowed.clone();
        domain.intersect_with(&DomainBitset::singleton(6, TemplateId::new(2)));
        assert!(domain.is_empty());
    }

    // Tests display lists members and their count
    // Verified by printing raw bit positions
    #[test]
    fn test_display() {
        let bitset = DomainBitset::singleton(3, TemplateId::new(2));
        assert_eq!(bitset.to_string(), "DomainBitset(1 templates: [2])");
    }
}
