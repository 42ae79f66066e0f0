//! Data models for lattice folding: the monomer sequence, the lattice, the
//! binary variables linking the two, and decoded conformations.

pub mod conformation;
pub mod lattice;
pub mod sequence;
pub mod variables;
