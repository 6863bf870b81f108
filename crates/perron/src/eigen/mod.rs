//! General (non-symmetric) eigendecomposition of a real square matrix.
//!
//! Eigenvalues come from the real Schur form (Francis double-shift QR). `nalgebra` does not
//! expose eigenvectors for non-symmetric matrices, so each one is recovered by shifted
//! inverse iteration in complex arithmetic (see [`inverse`]).

mod inverse;
mod rng;

use nalgebra::DMatrix;
use nalgebra::DVector;
use nalgebra::linalg::Schur;

use crate::Complex64;
use crate::error::{Error, Result};
use crate::matrix::AdjacencyMatrix;

use rng::XorShift64Star;

// Relative deflation thresholds, tightest first. Machine epsilon alone is never met on
// matrices with a highly repeated eigenvalue (K_n has -1 with multiplicity n - 1).
const SCHUR_TOLERANCES: [f64; 2] = [64.0 * f64::EPSILON, 1e-12];
// LAPACK's budget: 30 Francis sweeps per row, at least 10 rows' worth.
const MAX_SCHUR_SWEEPS_PER_ROW: usize = 30;
const MAX_SIMILARITY_RETRIES: usize = 3;

// Fixed so that repeated runs print identical results.
const START_VECTOR_SEED: u64 = 0x9E37_79B9_7F4A_7C15;
const SIMILARITY_SEED: u64 = 0x2545_F491_4F6C_DD1D;

#[derive(Debug, Clone, PartialEq)]
pub struct Eigenpair {
    pub value: Complex64,
    /// Unit 2-norm; the largest-modulus component is real and positive.
    pub vector: DVector<Complex64>,
    /// `||A v - value * v||` for the returned vector.
    pub residual: f64,
}

/// Eigenpairs in Schur-diagonal order. `pairs()[i].vector` belongs to `pairs()[i].value`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EigenDecomposition {
    pairs: Vec<Eigenpair>,
}

impl EigenDecomposition {
    pub fn pairs(&self) -> &[Eigenpair] {
        &self.pairs
    }

    pub fn values(&self) -> impl Iterator<Item = Complex64> + '_ {
        self.pairs.iter().map(|p| p.value)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

pub fn decompose(matrix: &AdjacencyMatrix) -> Result<EigenDecomposition> {
    decompose_matrix(matrix.as_matrix())
}

/// Decomposes any real square matrix. An empty matrix yields an empty decomposition.
pub fn decompose_matrix(a: &DMatrix<f64>) -> Result<EigenDecomposition> {
    let n = a.nrows();
    debug_assert_eq!(n, a.ncols(), "eigendecomposition needs a square matrix");
    if n == 0 {
        return Ok(EigenDecomposition::default());
    }

    let values = schur_eigenvalues(a)?;
    tracing::debug!(size = n, "schur decomposition converged");

    let a_complex = a.map(|x| Complex64::new(x, 0.0));
    let scale = a.norm().max(1.0);
    let mut rng = XorShift64Star::new(START_VECTOR_SEED);

    let mut pairs = Vec::with_capacity(n);
    for &value in values.iter() {
        let (vector, residual) = inverse::eigenvector(&a_complex, value, scale, &mut rng)?;
        tracing::trace!(%value, residual, "recovered eigenvector");
        pairs.push(Eigenpair {
            value,
            vector,
            residual,
        });
    }

    Ok(EigenDecomposition { pairs })
}

/// Eigenvalues read off the real Schur form, in diagonal order.
///
/// Each attempt walks [`SCHUR_TOLERANCES`] from tightest to loosest. Francis double shifts
/// also stall on some orthogonal matrices; the cyclic permutation matrix of a directed cycle
/// is one of them. When every tolerance runs out of sweeps, the Schur form of `Q^T A Q` is
/// computed instead for a pseudo-random orthogonal `Q`. The spectrum is unchanged up to
/// rounding.
fn schur_eigenvalues(a: &DMatrix<f64>) -> Result<DVector<Complex64>> {
    let n = a.nrows();
    let max_iterations = MAX_SCHUR_SWEEPS_PER_ROW * n.max(10);
    if let Some(values) = try_schur(a, max_iterations) {
        return Ok(values);
    }

    let mut rng = XorShift64Star::new(SIMILARITY_SEED);
    for retry in 0..MAX_SIMILARITY_RETRIES {
        tracing::debug!(size = n, retry, "schur iteration stalled; retrying on a rotated matrix");
        let q = DMatrix::<f64>::from_fn(n, n, |_, _| rng.next_f64_signed())
            .qr()
            .q();
        let rotated = q.transpose() * a * &q;
        if let Some(values) = try_schur(&rotated, max_iterations) {
            return Ok(values);
        }
    }

    Err(Error::SchurNotConverged {
        size: n,
        max_iterations,
    })
}

fn try_schur(m: &DMatrix<f64>, max_iterations: usize) -> Option<DVector<Complex64>> {
    SCHUR_TOLERANCES.iter().find_map(|&eps| {
        let schur = Schur::try_new(m.clone(), eps, max_iterations);
        if schur.is_none() {
            tracing::debug!(size = m.nrows(), eps, "schur iteration did not meet tolerance");
        }
        schur.map(|s| s.complex_eigenvalues())
    })
}
