//! The binary quadratic model and the HP folding encoding built on top of it.

pub mod builder;

use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum QuboError {
    #[error("Variable index {index} is out of range for a model with {num_variables} variables")]
    VariableOutOfRange { index: usize, num_variables: usize },
    #[error("Bias {bias} on ({u}, {v}) is not a finite number")]
    NonFiniteBias { u: usize, v: usize, bias: f64 },
    #[error("Sample has {found} entries but the model has {expected} variables")]
    SampleLength { expected: usize, found: usize },
    #[error("Penalty weight '{name}' must be positive, got {value}")]
    InvalidPenalty { name: &'static str, value: f64 },
    #[error("Penalty weight '{name}' must be a finite number, got {value}")]
    NonFinitePenalty { name: &'static str, value: f64 },
}

/// A QUBO over `num_variables` binary variables:
/// `E(x) = offset + Σ a_i x_i + Σ_{i<j} b_ij x_i x_j`.
///
/// Quadratic biases are stored once per unordered pair under `(min, max)`.
/// Adding a bias on `(u, u)` contributes to the linear term since `x² = x`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Qubo {
    linear: Vec<f64>,
    quadratic: BTreeMap<(usize, usize), f64>,
    offset: f64,
}

impl Qubo {
    pub fn new(num_variables: usize) -> Self {
        Self {
            linear: vec![0.0; num_variables],
            quadratic: BTreeMap::new(),
            offset: 0.0,
        }
    }

    pub fn num_variables(&self) -> usize {
        self.linear.len()
    }

    pub fn num_interactions(&self) -> usize {
        self.quadratic.len()
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    pub fn linear(&self, u: usize) -> f64 {
        self.linear.get(u).copied().unwrap_or(0.0)
    }

    pub fn linear_biases(&self) -> &[f64] {
        &self.linear
    }

    pub fn quadratic(&self, u: usize, v: usize) -> f64 {
        if u == v {
            return 0.0;
        }
        self.quadratic
            .get(&ordered(u, v))
            .copied()
            .unwrap_or(0.0)
    }

    /// Iterates `((u, v), bias)` with `u < v` in ascending pair order.
    pub fn interactions(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.quadratic.iter().map(|(&k, &b)| (k, b))
    }

    pub fn add_linear(&mut self, u: usize, bias: f64) -> Result<(), QuboError> {
        self.check_index(u)?;
        self.check_bias(u, u, bias)?;
        self.linear[u] += bias;
        Ok(())
    }

    pub fn add_quadratic(&mut self, u: usize, v: usize, bias: f64) -> Result<(), QuboError> {
        self.check_index(u)?;
        self.check_index(v)?;
        self.check_bias(u, v, bias)?;
        if u == v {
            self.linear[u] += bias;
        } else {
            *self.quadratic.entry(ordered(u, v)).or_insert(0.0) += bias;
        }
        Ok(())
    }

    /// Energy of `sample`, which must have one 0/1 entry per variable.
    /// Callers outside the crate go through [`Qubo::checked_energy`].
    pub(crate) fn energy(&self, sample: &[u8]) -> f64 {
        debug_assert_eq!(sample.len(), self.num_variables());
        let linear: f64 = self
            .linear
            .iter()
            .zip(sample)
            .filter(|&(_, &x)| x != 0)
            .map(|(a, _)| a)
            .sum();
        let quadratic: f64 = self
            .quadratic
            .iter()
            .filter(|&(&(u, v), _)| sample[u] != 0 && sample[v] != 0)
            .map(|(_, b)| b)
            .sum();
        self.offset + linear + quadratic
    }

    pub fn checked_energy(&self, sample: &[u8]) -> Result<f64, QuboError> {
        if sample.len() != self.num_variables() {
            return Err(QuboError::SampleLength {
                expected: self.num_variables(),
                found: sample.len(),
            });
        }
        Ok(self.energy(sample))
    }

    /// Per-variable neighbor lists for fast single-flip updates.
    pub fn to_graph(&self) -> QuboGraph {
        let mut neighbors = vec![Vec::new(); self.num_variables()];
        for (&(u, v), &b) in &self.quadratic {
            if b != 0.0 {
                neighbors[u].push((v, b));
                neighbors[v].push((u, b));
            }
        }
        QuboGraph {
            linear: self.linear.clone(),
            neighbors,
            offset: self.offset,
        }
    }

    fn check_index(&self, index: usize) -> Result<(), QuboError> {
        if index >= self.num_variables() {
            return Err(QuboError::VariableOutOfRange {
                index,
                num_variables: self.num_variables(),
            });
        }
        Ok(())
    }

    fn check_bias(&self, u: usize, v: usize, bias: f64) -> Result<(), QuboError> {
        if !bias.is_finite() {
            return Err(QuboError::NonFiniteBias { u, v, bias });
        }
        Ok(())
    }
}

#[inline]
fn ordered(u: usize, v: usize) -> (usize, usize) {
    if u < v { (u, v) } else { (v, u) }
}

/// Adjacency-list view of a [`Qubo`], used by samplers.
#[derive(Debug, Clone)]
pub struct QuboGraph {
    linear: Vec<f64>,
    neighbors: Vec<Vec<(usize, f64)>>,
    offset: f64,
}

impl QuboGraph {
    pub fn num_variables(&self) -> usize {
        self.linear.len()
    }

    pub fn neighbors(&self, u: usize) -> &[(usize, f64)] {
        &self.neighbors[u]
    }

    /// Local field `a_k + Σ_j b_kj x_j` acting on variable `k`.
    #[inline]
    pub fn local_field(&self, sample: &[u8], k: usize) -> f64 {
        self.linear[k]
            + self.neighbors[k]
                .iter()
                .filter(|&&(j, _)| sample[j] != 0)
                .map(|&(_, b)| b)
                .sum::<f64>()
    }

    /// Energy change caused by flipping variable `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k` is out of range, and may panic if `sample` does not
    /// hold one entry per variable.
    #[inline]
    pub fn delta_energy(&self, sample: &[u8], k: usize) -> f64 {
        let field = self.local_field(sample, k);
        if sample[k] == 0 { field } else { -field }
    }

    /// Total energy of `sample`.
    ///
    /// # Panics
    ///
    /// May panic if `sample` does not hold one entry per variable.
    pub fn energy(&self, sample: &[u8]) -> f64 {
        let mut energy = self.offset;
        for (u, &x) in sample.iter().enumerate() {
            if x == 0 {
                continue;
            }
            energy += self.linear[u];
            energy += self.neighbors[u]
                .iter()
                .filter(|&&(v, _)| v > u && sample[v] != 0)
                .map(|&(_, b)| b)
                .sum::<f64>();
        }
        energy
    }

    /// Largest and smallest nonzero magnitude of the field any single flip can see.
    pub fn field_range(&self) -> Option<(f64, f64)> {
        let mut max_field: f64 = 0.0;
        let mut min_field = f64::INFINITY;
        for (u, neighbors) in self.neighbors.iter().enumerate() {
            let mut total = self.linear[u].abs();
            for &(_, b) in neighbors {
                total += b.abs();
                if b != 0.0 {
                    min_field = min_field.min(b.abs());
                }
            }
            if self.linear[u] != 0.0 {
                min_field = min_field.min(self.linear[u].abs());
            }
            max_field = max_field.max(total);
        }
        if max_field == 0.0 || !min_field.is_finite() {
            return None;
        }
        Some((max_field, min_field))
    }
}
