//! # Core Module
//!
//! Fundamental building blocks for lattice protein folding.
//!
//! ## Architecture
//!
//! - **Models** ([`models`]) - HP sequences, square lattice geometry and the binary
//!   variables that place beads on lattice sites
//! - **QUBO** ([`qubo`]) - The binary quadratic model and the HP folding encoding
//! - **I/O** ([`io`]) - Rendering conformations to PNG/SVG and exporting samples to CSV
//!
//! ## Scientific Foundation
//!
//! Each bead of the chain is placed on a 2D square lattice. A binary variable
//! `x[i, s]` is 1 when bead `i` sits at site `s`. Beads only occupy sites whose
//! parity matches their own index (checkerboard placement), which halves the
//! variable count and makes consecutive beads land on opposite-parity sites, as
//! lattice adjacency requires. Constraints (one site per bead, self-avoidance,
//! chain connectivity) and the hydrophobic contact energy all become quadratic
//! penalty terms.

pub mod io;
pub mod models;
pub mod qubo;
