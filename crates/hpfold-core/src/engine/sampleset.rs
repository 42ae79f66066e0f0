use crate::core::io::samples::SampleRow;
use crate::core::models::variables::VariableIndex;
use crate::core::qubo::{Qubo, QuboError};
use std::collections::HashMap;
use std::fmt;

/// A distinct sample, its energy and how many reads produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    pub sample: Vec<u8>,
    pub energy: f64,
    pub num_occurrences: usize,
}

impl SampleRecord {
    pub fn active_variables(&self) -> impl Iterator<Item = usize> + '_ {
        self.sample
            .iter()
            .enumerate()
            .filter(|&(_, &x)| x != 0)
            .map(|(i, _)| i)
    }
}

/// Aggregated sampler output, sorted by ascending energy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleSet {
    records: Vec<SampleRecord>,
}

impl SampleSet {
    /// Aggregates duplicate samples and evaluates each distinct one on `qubo`.
    pub fn from_samples(
        qubo: &Qubo,
        samples: impl IntoIterator<Item = Vec<u8>>,
    ) -> Result<Self, QuboError> {
        let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();
        for sample in samples {
            *counts.entry(sample).or_insert(0) += 1;
        }

        let mut records = counts
            .into_iter()
            .map(|(sample, num_occurrences)| {
                let energy = qubo.checked_energy(&sample)?;
                Ok(SampleRecord {
                    sample,
                    energy,
                    num_occurrences,
                })
            })
            .collect::<Result<Vec<_>, QuboError>>()?;

        records.sort_by(|a, b| {
            a.energy
                .partial_cmp(&b.energy)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.sample.cmp(&b.sample))
        });

        Ok(Self { records })
    }

    /// The lowest-energy record.
    pub fn first(&self) -> Option<&SampleRecord> {
        self.records.first()
    }

    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total number of reads across all records.
    pub fn num_reads(&self) -> usize {
        self.records.iter().map(|r| r.num_occurrences).sum()
    }

    pub fn truncate(&mut self, len: usize) {
        self.records.truncate(len);
    }

    pub fn rows<'a>(&'a self, index: &'a VariableIndex) -> impl Iterator<Item = SampleRow> + 'a {
        self.records
            .iter()
            .enumerate()
            .map(move |(rank, record)| SampleRow {
                rank: rank + 1,
                energy: record.energy,
                num_occurrences: record.num_occurrences,
                active: active_labels(record, index).join(" "),
            })
    }

    /// A printable table of the first `limit` records.
    pub fn table<'a>(&'a self, index: &'a VariableIndex, limit: usize) -> SampleTable<'a> {
        SampleTable {
            set: self,
            index,
            limit,
        }
    }
}

fn active_labels(record: &SampleRecord, index: &VariableIndex) -> Vec<String> {
    record
        .active_variables()
        .map(|i| index.label(i).unwrap_or_else(|| format!("#{}", i)))
        .collect()
}

pub struct SampleTable<'a> {
    set: &'a SampleSet,
    index: &'a VariableIndex,
    limit: usize,
}

impl fmt::Display for SampleTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>5} {:>12} {:>8}  active", "rank", "energy", "num_oc.")?;
        for (rank, record) in self.set.records.iter().take(self.limit).enumerate() {
            writeln!(
                f,
                "{:>5} {:>12.4} {:>8}  {}",
                rank + 1,
                record.energy,
                record.num_occurrences,
                active_labels(record, self.index).join(" ")
            )?;
        }
        let hidden = self.set.len().saturating_sub(self.limit);
        if hidden > 0 {
            writeln!(f, "  ... {} more distinct sample(s)", hidden)?;
        }
        write!(
            f,
            "[{} distinct sample(s), {} read(s), {} variable(s)]",
            self.set.len(),
            self.set.num_reads(),
            self.index.len()
        )
    }
}
