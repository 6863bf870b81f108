use std::str::FromStr;

use crate::Complex64;
use crate::eigen::{EigenDecomposition, Eigenpair};

/// How eigenvalues are ordered when picking the dominant one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RankBy {
    /// Largest real part; imaginary parts do not take part in the comparison.
    #[default]
    RealPart,
    /// Largest modulus `|lambda|`.
    Modulus,
}

impl RankBy {
    pub fn key(self, value: Complex64) -> f64 {
        match self {
            RankBy::RealPart => value.re,
            RankBy::Modulus => value.norm(),
        }
    }
}

impl FromStr for RankBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "real" | "real-part" => Ok(Self::RealPart),
            "modulus" | "magnitude" | "abs" => Ok(Self::Modulus),
            _ => Err(()),
        }
    }
}

// A non-negative matrix always has a real eigenvalue >= 0, so this never survives a scan.
const SENTINEL: f64 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DominantEigenpair<'a> {
    /// Position of the pair in the decomposition.
    pub index: usize,
    pub pair: &'a Eigenpair,
}

/// Scans the pairs in order and keeps the first one whose key is strictly greater than
/// everything before it (and than the `-1` sentinel).
pub fn select_dominant(
    decomposition: &EigenDecomposition,
    rank_by: RankBy,
) -> Option<DominantEigenpair<'_>> {
    let (_, best) = decomposition.pairs().iter().enumerate().fold(
        (SENTINEL, None),
        |(best_key, best), (index, pair)| {
            let key = rank_by.key(pair.value);
            if key > best_key {
                (key, Some(DominantEigenpair { index, pair }))
            } else {
                (best_key, best)
            }
        },
    );
    best
}
