/// Bitset over template ids for cell domains
pub mod bitset;
/// Grid cells with collapse and one-hop propagation
pub mod cell;
/// Adjacency construction between plain and special templates
pub mod graph;
/// Template instances and their adjacency tables
pub mod registry;
/// Depth-first connectivity repair walk
pub mod repair;
/// Seeded randomness and weighted acceptance
pub mod selection;
/// Minimum-entropy solver
pub mod solver;
