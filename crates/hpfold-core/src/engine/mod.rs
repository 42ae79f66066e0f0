//! # Engine Module
//!
//! The stateful layer that turns a folding QUBO into a conformation.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Sequence, lattice, penalty and sampler settings
//! - **Sampling** ([`sampler`]) - The `Sampler` trait with simulated annealing and
//!   exhaustive implementations
//! - **Results** ([`sampleset`]) - Aggregated, energy-sorted samples
//! - **Decoding** ([`decode`]) - Mapping a sample back to bead coordinates
//! - **Progress Monitoring** ([`progress`]) - Progress reporting callbacks
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod config;
pub mod decode;
pub mod error;
pub mod progress;
pub mod sampler;
pub mod sampleset;
