//! # HP-Fold Core Library
//!
//! Lattice protein folding in the hydrophobic-polar (HP) model, expressed as a
//! Quadratic Unconstrained Binary Optimization (QUBO) problem and solved by
//! annealing-style samplers.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`HpSequence`, `Lattice`,
//!   `VariableIndex`), the binary quadratic model (`Qubo`) with the HP folding
//!   encoding, and output I/O (PNG/SVG rendering, CSV export).
//!
//! - **[`engine`]: The Logic Core.** Samplers behind the `Sampler` trait, sample
//!   aggregation (`SampleSet`), decoding of samples into lattice conformations,
//!   configuration and progress reporting.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that tie `core` and
//!   `engine` together, such as folding a sequence or checking a sampler against
//!   the exact ground state of a small problem.

pub mod core;
pub mod engine;
pub mod workflows;
