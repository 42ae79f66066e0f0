//! # Workflows Module
//!
//! Top-level entry points of HP-Fold. Each workflow runs a complete procedure,
//! reports progress by phase, and returns a structured result.
//!
//! - **Folding Workflow** ([`fold`]) - Build the folding QUBO for a sequence, sample
//!   it, and decode the lowest-energy sample into a conformation.
//! - **Sampler Check** ([`check`]) - Compare a sampler against the exact ground state
//!   of a small reference problem.

pub mod check;
pub mod fold;
