//! Cauchy-Schwarz screening of shell quartets.
//!
//! For kernels that are positive definite (Coulomb, geminals with positive
//! coefficients) the inequality
//!
//! ```text
//! |(ij|kl)| <= sqrt(|(ij|ij)|) · sqrt(|(kl|kl)|)
//! ```
//!
//! bounds every quartet by two shell-pair quantities computed once per basis.
//! Quartets whose bound falls below the threshold can be skipped.

use tracing::debug;

use crate::error::Result;
use crate::int2e::{TwoBodyEngine, TwoBodyKernel};
use crate::shell::Shell;

/// Default screening threshold.
pub const SCHWARZ_THRESH: f64 = 1e-12;

/// Pre-computed shell-pair bounds for one basis.
#[derive(Debug, Clone, PartialEq)]
pub struct SchwarzScreen {
    nshell: usize,
    /// `sqrt(max_{a∈i, b∈j} |(ia jb|ia jb)|)`, symmetric, row-major.
    sqrt_schwarz: Vec<f64>,
    threshold: f64,
}

impl SchwarzScreen {
    /// Evaluate the diagonal quartets `(ij|ij)` of `shells` with `engine`.
    pub fn build<K: TwoBodyKernel>(engine: &mut TwoBodyEngine<K>, shells: &[Shell]) -> Result<Self> {
        let nb = shells.len();
        let mut sqrt_schwarz = vec![0.0_f64; nb * nb];

        for i in 0..nb {
            for j in 0..=i {
                let (si, sj) = (&shells[i], &shells[j]);
                let (ni, nj) = (si.size(), sj.size());
                let block = engine.compute(si, sj, si, sj)?;

                let mut max_val = 0.0_f64;
                for a in 0..ni {
                    for b in 0..nj {
                        let v = block[((a * nj + b) * ni + a) * nj + b].abs();
                        max_val = max_val.max(v);
                    }
                }
                let sq = max_val.sqrt();
                sqrt_schwarz[i * nb + j] = sq;
                sqrt_schwarz[j * nb + i] = sq;
            }
        }
        debug!(nshell = nb, "Schwarz screening table built");

        Ok(SchwarzScreen { nshell: nb, sqrt_schwarz, threshold: SCHWARZ_THRESH })
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[inline] pub fn threshold(&self) -> f64 { self.threshold }
    #[inline] pub fn nshell(&self) -> usize { self.nshell }

    /// `sqrt(max |(ij|ij)|)` of shell pair `(i, j)`.
    #[inline]
    pub fn bound(&self, i: usize, j: usize) -> f64 {
        self.sqrt_schwarz[i * self.nshell + j]
    }

    /// `true` if quartet `(ij|kl)` may exceed the threshold and must be computed.
    #[inline]
    pub fn passes(&self, i: usize, j: usize, k: usize, l: usize) -> bool {
        self.bound(i, j) * self.bound(k, l) >= self.threshold
    }
}
