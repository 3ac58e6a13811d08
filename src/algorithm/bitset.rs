use crate::algorithm::registry::TemplateId;
use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset holding the template ids still possible for a cell
///
/// Bit `i` stands for `TemplateId` `i`. Iteration is always in ascending id
/// order so selections driven by a seeded generator are reproducible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainBitset {
    bits: BitVec,
}

impl DomainBitset {
    /// Create a bitset with no templates present
    pub fn new(template_count: usize) -> Self {
        Self {
            bits: bitvec![0; template_count],
        }
    }

    /// Create a bitset containing every template
    pub fn all(template_count: usize) -> Self {
        Self {
            bits: bitvec![1; template_count],
        }
    }

    /// Create a bitset holding exactly one template
    pub fn singleton(template_count: usize, template: TemplateId) -> Self {
        let mut bitset = Self::new(template_count);
        bitset.insert(template);
        bitset
    }

    /// Number of templates the bitset can address
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a template; ids beyond the capacity are ignored
    pub fn insert(&mut self, template: TemplateId) {
        if template.index() < self.bits.len() {
            self.bits.set(template.index(), true);
        }
    }

    /// Remove a template
    pub fn remove(&mut self, template: TemplateId) {
        if template.index() < self.bits.len() {
            self.bits.set(template.index(), false);
        }
    }

    /// Test template membership
    pub fn contains(&self, template: TemplateId) -> bool {
        self.bits.get(template.index()).as_deref() == Some(&true)
    }

    /// Intersect this bitset with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Create a new bitset containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Whether every member of `self` is also in `other`
    pub fn is_subset(&self, other: &Self) -> bool {
        self.iter().all(|template| other.contains(template))
    }

    /// Test if no templates are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count templates in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate members in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = TemplateId> + '_ {
        self.bits.iter_ones().map(TemplateId::new)
    }

    /// Collect members in ascending id order
    pub fn to_vec(&self) -> Vec<TemplateId> {
        self.iter().collect()
    }
}

impl fmt::Display for DomainBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<usize> = self.iter().map(TemplateId::index).collect();
        write!(f, "DomainBitset({} templates: {members:?})", self.count())
    }
}
