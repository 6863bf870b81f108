use std::fmt;

use serde::Serialize;

use crate::Complex64;
use crate::error::{Error, Result};
use crate::select::DominantEigenpair;

/// Imaginary parts at or below this magnitude count as rounding noise.
pub const IMAGINARY_TOLERANCE: f64 = 1e-9;

/// Policy for turning complex results into `f64`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Narrowing {
    /// Keep the real part. Non-negligible imaginary parts are logged and dropped.
    #[default]
    TakeReal,
    /// Fail when an imaginary part exceeds [`IMAGINARY_TOLERANCE`].
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealEigenpair {
    pub eigenvalue: f64,
    pub eigenvector: Vec<f64>,
}

/// Two lines: the eigenvalue, then the eigenvector as `[a, b, ...]`. Floats use their
/// shortest round-trip form, so whole numbers print as `1.0`.
impl fmt::Display for RealEigenpair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}", self.eigenvalue)?;
        write!(f, "[")?;
        for (i, v) in self.eigenvector.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v:?}")?;
        }
        writeln!(f, "]")
    }
}

pub fn narrow(selected: &DominantEigenpair<'_>, policy: Narrowing) -> Result<RealEigenpair> {
    let eigenvalue = narrow_component(selected.pair.value, "eigenvalue", 0, policy)?;
    let eigenvector = selected
        .pair
        .vector
        .iter()
        .enumerate()
        .map(|(index, &c)| narrow_component(c, "eigenvector", index, policy))
        .collect::<Result<Vec<_>>>()?;
    Ok(RealEigenpair {
        eigenvalue,
        eigenvector,
    })
}

fn narrow_component(
    c: Complex64,
    what: &'static str,
    index: usize,
    policy: Narrowing,
) -> Result<f64> {
    if c.im.abs() <= IMAGINARY_TOLERANCE {
        return Ok(c.re);
    }
    match policy {
        Narrowing::TakeReal => {
            tracing::warn!(what, index, imaginary = c.im, "discarding imaginary part");
            Ok(c.re)
        }
        Narrowing::Strict => Err(Error::ComplexComponent {
            what,
            index,
            imaginary: c.im,
        }),
    }
}
