use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Hydrophobicity classes of the 20 standard amino acids (one-letter codes).
static AMINO_ACID_CLASSES: Map<char, Monomer> = phf_map! {
    'A' => Monomer::Hydrophobic, 'C' => Monomer::Hydrophobic, 'F' => Monomer::Hydrophobic,
    'G' => Monomer::Hydrophobic, 'I' => Monomer::Hydrophobic, 'L' => Monomer::Hydrophobic,
    'M' => Monomer::Hydrophobic, 'P' => Monomer::Hydrophobic, 'V' => Monomer::Hydrophobic,
    'W' => Monomer::Hydrophobic, 'Y' => Monomer::Hydrophobic,
    'D' => Monomer::Polar, 'E' => Monomer::Polar, 'H' => Monomer::Polar, 'K' => Monomer::Polar,
    'N' => Monomer::Polar, 'Q' => Monomer::Polar, 'R' => Monomer::Polar, 'S' => Monomer::Polar,
    'T' => Monomer::Polar,
};

pub const MIN_SEQUENCE_LENGTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Monomer {
    Hydrophobic, // H
    Polar,       // P
}

impl Monomer {
    pub fn from_hp_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'H' => Some(Self::Hydrophobic),
            'P' => Some(Self::Polar),
            _ => None,
        }
    }

    pub fn from_amino_acid(c: char) -> Option<Self> {
        AMINO_ACID_CLASSES.get(&c.to_ascii_uppercase()).copied()
    }

    pub fn to_char(self) -> char {
        match self {
            Self::Hydrophobic => 'H',
            Self::Polar => 'P',
        }
    }

    pub fn is_hydrophobic(self) -> bool {
        self == Self::Hydrophobic
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SequenceError {
    #[error("Sequence is empty")]
    Empty,
    #[error("Sequence '{sequence}' is too short: at least 2 monomers are required")]
    TooShort { sequence: String },
    #[error("Invalid HP monomer '{symbol}' at position {position}; expected 'H' or 'P'")]
    InvalidMonomer { symbol: char, position: usize },
    #[error("Unknown amino acid '{symbol}' at position {position}")]
    UnknownAminoAcid { symbol: char, position: usize },
}

/// An ordered chain of H/P monomers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HpSequence {
    monomers: Vec<Monomer>,
}

impl HpSequence {
    pub fn new(monomers: Vec<Monomer>) -> Result<Self, SequenceError> {
        if monomers.is_empty() {
            return Err(SequenceError::Empty);
        }
        if monomers.len() < MIN_SEQUENCE_LENGTH {
            return Err(SequenceError::TooShort {
                sequence: monomers.iter().map(|m| m.to_char()).collect(),
            });
        }
        Ok(Self { monomers })
    }

    /// Parses a string of `H`/`P` symbols (case-insensitive, whitespace ignored).
    pub fn from_hp_str(s: &str) -> Result<Self, SequenceError> {
        let monomers = clean_symbols(s)
            .enumerate()
            .map(|(position, symbol)| {
                Monomer::from_hp_char(symbol)
                    .ok_or(SequenceError::InvalidMonomer { symbol, position })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(monomers)
    }

    /// Maps a one-letter amino-acid string onto the HP alphabet.
    pub fn from_amino_acids(s: &str) -> Result<Self, SequenceError> {
        let monomers = clean_symbols(s)
            .enumerate()
            .map(|(position, symbol)| {
                Monomer::from_amino_acid(symbol)
                    .ok_or(SequenceError::UnknownAminoAcid { symbol, position })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(monomers)
    }

    /// Reads `s` as an HP string when it only contains `H`/`P`, otherwise as
    /// an amino-acid string.
    pub fn parse(s: &str) -> Result<Self, SequenceError> {
        if clean_symbols(s).all(|c| Monomer::from_hp_char(c).is_some()) {
            Self::from_hp_str(s)
        } else {
            Self::from_amino_acids(s)
        }
    }

    pub fn len(&self) -> usize {
        self.monomers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monomers.is_empty()
    }

    pub fn monomer(&self, index: usize) -> Option<Monomer> {
        self.monomers.get(index).copied()
    }

    pub fn monomers(&self) -> &[Monomer] {
        &self.monomers
    }

    pub fn hydrophobic_count(&self) -> usize {
        self.monomers.iter().filter(|m| m.is_hydrophobic()).count()
    }
}

impl FromStr for HpSequence {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HpSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for monomer in &self.monomers {
            write!(f, "{}", monomer.to_char())?;
        }
        Ok(())
    }
}

fn clean_symbols(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().filter(|c| !c.is_whitespace())
}
