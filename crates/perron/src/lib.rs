#![forbid(unsafe_code)]

//! Dominant eigenpair of a directed graph's adjacency matrix.
//!
//! The pipeline is: parse an adjacency list literal, build the dense 0/1 matrix, run a
//! general eigendecomposition, pick the eigenvalue with the largest real part, and narrow the
//! pair to real numbers for printing.

pub mod adjacency;
pub mod eigen;
pub mod error;
pub mod matrix;
pub mod narrow;
pub mod select;

pub use adjacency::AdjacencyList;
pub use eigen::{EigenDecomposition, Eigenpair, decompose};
pub use error::{Error, Result};
pub use matrix::AdjacencyMatrix;
pub use narrow::{IMAGINARY_TOLERANCE, Narrowing, RealEigenpair, narrow};
pub use select::{DominantEigenpair, RankBy, select_dominant};

pub type Complex64 = nalgebra::Complex<f64>;

#[derive(Debug, Clone, Copy, Default)]
pub struct SolveOptions {
    pub rank_by: RankBy,
    pub narrowing: Narrowing,
}

#[derive(Debug, Clone)]
pub struct Solution {
    pub decomposition: EigenDecomposition,
    /// Index of the selected pair in `decomposition`.
    pub dominant_index: usize,
    pub dominant: RealEigenpair,
}

impl Solution {
    pub fn dominant_pair(&self) -> &Eigenpair {
        &self.decomposition.pairs()[self.dominant_index]
    }
}

/// Headless entry point: matrix construction, decomposition, selection and narrowing.
///
/// A graph with no vertices has no eigenvalues and is reported as [`Error::EmptyGraph`].
pub fn solve(size: usize, list: &AdjacencyList, options: &SolveOptions) -> Result<Solution> {
    let matrix = AdjacencyMatrix::from_adjacency(size, list)?;
    tracing::debug!(size, edges = matrix.edge_count(), "built adjacency matrix");

    let decomposition = decompose(&matrix)?;
    let selected = select_dominant(&decomposition, options.rank_by).ok_or(Error::EmptyGraph)?;
    tracing::debug!(
        index = selected.index,
        eigenvalue = %selected.pair.value,
        rank_by = ?options.rank_by,
        "selected dominant eigenvalue"
    );

    let dominant = narrow(&selected, options.narrowing)?;
    let dominant_index = selected.index;
    Ok(Solution {
        decomposition,
        dominant_index,
        dominant,
    })
}

/// Parses the literal and solves in one step.
pub fn solve_literal(size: usize, literal: &str, options: &SolveOptions) -> Result<Solution> {
    let list = AdjacencyList::parse(literal)?;
    solve(size, &list, options)
}
