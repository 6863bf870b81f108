use nalgebra::{DMatrix, DVector};

use super::rng::XorShift64Star;
use crate::Complex64;
use crate::error::{Error, Result};

const MAX_ATTEMPTS: usize = 6;
const MAX_INVERSE_ITERATIONS: usize = 16;

// Relative to `max(1, ||A||_F)`.
const SHIFT_PERTURBATION: f64 = 1e-10;
const RESIDUAL_TOLERANCE: f64 = 1e-6;
const STEP_TOLERANCE: f64 = 1e-13;

/// Recovers a unit eigenvector for `value` by inverse iteration on `A - sigma I`, where sigma
/// sits just off `value` so the shifted matrix stays invertible.
///
/// Each attempt starts from a fresh pseudo-random vector. A singular shift pushes sigma
/// further away; a poor residual just retries. The best vector seen is returned.
pub(super) fn eigenvector(
    a: &DMatrix<Complex64>,
    value: Complex64,
    scale: f64,
    rng: &mut XorShift64Star,
) -> Result<(DVector<Complex64>, f64)> {
    let n = a.nrows();
    let tolerance = RESIDUAL_TOLERANCE * scale;
    let mut perturbation = SHIFT_PERTURBATION * scale;
    let mut best: Option<(DVector<Complex64>, f64)> = None;

    for attempt in 0..MAX_ATTEMPTS {
        let lu = shifted(a, value + perturbation).lu();
        if !lu.is_invertible() {
            tracing::debug!(%value, attempt, perturbation, "shifted matrix is singular");
            perturbation *= 10.0;
            continue;
        }

        let start = random_unit_vector(n, rng);
        let Some(v) = iterate(|x| lu.solve(x), start) else {
            perturbation *= 10.0;
            continue;
        };

        let r = residual(a, value, &v);
        if r <= tolerance {
            return Ok((v, r));
        }
        tracing::debug!(
            %value,
            attempt,
            residual = r,
            "inverse iteration residual above tolerance"
        );
        if best.as_ref().is_none_or(|(_, best_r)| r < *best_r) {
            best = Some((v, r));
        }
    }

    let (v, r) = best.ok_or(Error::SingularShift { eigenvalue: value })?;
    tracing::warn!(
        %value,
        residual = r,
        tolerance,
        "no eigenvector met the residual tolerance; using the closest one"
    );
    Ok((v, r))
}

fn shifted(a: &DMatrix<Complex64>, sigma: Complex64) -> DMatrix<Complex64> {
    let mut m = a.clone();
    for i in 0..m.nrows() {
        m[(i, i)] -= sigma;
    }
    m
}

fn iterate<F>(solve: F, mut v: DVector<Complex64>) -> Option<DVector<Complex64>>
where
    F: Fn(&DVector<Complex64>) -> Option<DVector<Complex64>>,
{
    for _ in 0..MAX_INVERSE_ITERATIONS {
        let mut next = solve(&v)?;
        if !normalize_in_place(&mut next) {
            return None;
        }
        fix_phase(&mut next);

        let step = (&next - &v).norm();
        v = next;
        if step <= STEP_TOLERANCE {
            break;
        }
    }
    Some(v)
}

fn residual(a: &DMatrix<Complex64>, value: Complex64, v: &DVector<Complex64>) -> f64 {
    let av = a * v;
    let lv = v.map(|c| c * value);
    (av - lv).norm()
}

fn random_unit_vector(n: usize, rng: &mut XorShift64Star) -> DVector<Complex64> {
    let mut v =
        DVector::<Complex64>::from_fn(n, |_, _| Complex64::new(rng.next_f64_signed(), 0.0));
    if !normalize_in_place(&mut v) {
        v = DVector::<Complex64>::from_element(n, Complex64::new(1.0, 0.0));
        normalize_in_place(&mut v);
    }
    v
}

fn normalize_in_place(v: &mut DVector<Complex64>) -> bool {
    let norm = v.norm();
    if !(norm.is_finite() && norm > 0.0) {
        return false;
    }
    for c in v.iter_mut() {
        *c /= norm;
    }
    true
}

/// Rotates `v` so that its first largest-modulus component is real and positive.
fn fix_phase(v: &mut DVector<Complex64>) {
    let mut pivot = Complex64::new(0.0, 0.0);
    for c in v.iter() {
        if c.norm() > pivot.norm() {
            pivot = *c;
        }
    }
    let modulus = pivot.norm();
    if modulus == 0.0 {
        return;
    }
    let rotation = pivot.conj() / modulus;
    for c in v.iter_mut() {
        *c *= rotation;
    }
}
