//! Core functions of Gaussian-geminal kernels.
//!
//! For a contracted geminal `g(r12) = Σ_i c_i exp(-γ_i r12²)` the two-body
//! recurrences need `G_m(ρ, T)` in the same normalization as the Boys
//! function carries for `1/r12`: the quartet prefactor `2π^{5/2}/(ζη√(ζ+η))`
//! is applied by the caller, so each kernel below is divided by `2√(ρ/π)`.
//!
//! With `r = ρ/(ρ+γ)` and `g = γ/(ρ+γ)`:
//!
//! | kernel                   | `G_m`                                                     |
//! |--------------------------|-----------------------------------------------------------|
//! | `exp(-γ r²)`             | `(√π/2) ρ^{-1/2} r^{3/2} e^{-gT} g^m`                      |
//! | `exp(-γ r²) / r`         | `r e^{-gT} Σ_k C(m,k) g^{m-k} r^k F_k(rT)`                 |
//! | `r² exp(-γ r²)`          | `(√π/2) ρ^{-1/2} r^{3/2} e^{-gT} [g^m(3/2+rT) − m g^{m-1} r]/(ρ+γ)` |

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::debug;

use super::BoysEval;
use crate::types::SQRT_PI;

/// Contracted Gaussian geminal: `(exponent, coefficient)` pairs.
pub type ContractedGeminal = Vec<(f64, f64)>;

/// Largest order any geminal evaluation may request.
pub const MAX_GM_ORDER: usize = 48;

/// Evaluator of the geminal core functions up to a fixed order.
#[derive(Debug)]
pub struct GaussianGmEval {
    mmax: usize,
    precision: f64,
    boys: Arc<BoysEval>,
}

static GM_CACHE: OnceLock<Mutex<Option<Arc<GaussianGmEval>>>> = OnceLock::new();

impl GaussianGmEval {
    /// Shared evaluator covering at least `mmax` at `precision` or better.
    pub fn instance(mmax: usize, precision: f64) -> Arc<GaussianGmEval> {
        let cache = GM_CACHE.get_or_init(|| Mutex::new(None));
        let mut guard = cache.lock().unwrap_or_else(PoisonError::into_inner);
        let (mmax, precision) = match guard.as_ref() {
            Some(e) if e.mmax >= mmax && e.precision <= precision => return Arc::clone(e),
            Some(e) => (e.mmax.max(mmax), e.precision.min(precision)),
            None => (mmax, precision),
        };
        let e = Arc::new(GaussianGmEval::new(mmax, precision));
        *guard = Some(Arc::clone(&e));
        e
    }

    pub fn new(mmax: usize, precision: f64) -> Self {
        assert!(mmax <= MAX_GM_ORDER, "GaussianGmEval: order {} above {}", mmax, MAX_GM_ORDER);
        debug!(mmax, precision, "built geminal core-function evaluator");
        GaussianGmEval { mmax, precision, boys: BoysEval::instance(mmax, precision) }
    }

    #[inline] pub fn max_m(&self) -> usize { self.mmax }

    /// `G_m` for the plain geminal kernel `exp(-γ r12²)`.
    pub fn eval_geminal(&self, out: &mut [f64], rho: f64, t: f64, mmax: usize, geminal: &[(f64, f64)]) {
        self.check(mmax);
        out[..=mmax].fill(0.0);
        let sqrt_rho = rho.sqrt();
        for &(gamma, coeff) in geminal {
            let oorhog = 1.0 / (rho + gamma);
            let rorg = rho * oorhog;
            let gorg = gamma * oorhog;
            let mut pfac = coeff * 0.5 * SQRT_PI / sqrt_rho * rorg * rorg.sqrt() * (-gorg * t).exp();
            for g in out.iter_mut().take(mmax + 1) {
                *g += pfac;
                pfac *= gorg;
            }
        }
    }

    /// `G_m` for the geminal-times-Coulomb kernel `exp(-γ r12²)/r12`.
    pub fn eval_geminal_coulomb(&self, out: &mut [f64], rho: f64, t: f64, mmax: usize, geminal: &[(f64, f64)]) {
        self.check(mmax);
        out[..=mmax].fill(0.0);
        let mut fm = [0.0_f64; MAX_GM_ORDER + 1];
        let mut gpow = [0.0_f64; MAX_GM_ORDER + 1];
        let mut rpow = [0.0_f64; MAX_GM_ORDER + 1];
        for &(gamma, coeff) in geminal {
            let oorhog = 1.0 / (rho + gamma);
            let rorg = rho * oorhog;
            let gorg = gamma * oorhog;
            self.boys.eval(&mut fm, rorg * t, mmax);
            gpow[0] = 1.0;
            rpow[0] = 1.0;
            for k in 1..=mmax {
                gpow[k] = gpow[k - 1] * gorg;
                rpow[k] = rpow[k - 1] * rorg;
            }
            let pfac = coeff * rorg * (-gorg * t).exp();
            for (m, g) in out.iter_mut().enumerate().take(mmax + 1) {
                // binomial coefficients built along the row
                let mut binom = 1.0;
                let mut sum = 0.0;
                for k in 0..=m {
                    sum += binom * gpow[m - k] * rpow[k] * fm[k];
                    binom = binom * (m - k) as f64 / (k + 1) as f64;
                }
                *g += pfac * sum;
            }
        }
    }

    /// `G_m` for `r12² exp(-γ r12²)`, the kernel of `[∇g, [∇g]]`-type terms.
    pub fn eval_geminal_r2(&self, out: &mut [f64], rho: f64, t: f64, mmax: usize, geminal: &[(f64, f64)]) {
        self.check(mmax);
        out[..=mmax].fill(0.0);
        let sqrt_rho = rho.sqrt();
        for &(gamma, coeff) in geminal {
            let oorhog = 1.0 / (rho + gamma);
            let rorg = rho * oorhog;
            let gorg = gamma * oorhog;
            let pfac = coeff * 0.5 * SQRT_PI / sqrt_rho * rorg * rorg.sqrt() * (-gorg * t).exp() * oorhog;
            let lead = 1.5 + rorg * t;
            let mut gm = 1.0; // gorg^m
            let mut gm1 = 0.0; // m·gorg^{m-1}
            for (m, g) in out.iter_mut().enumerate().take(mmax + 1) {
                *g += pfac * (gm * lead - gm1 * rorg);
                gm1 = (m + 1) as f64 * gm;
                gm *= gorg;
            }
        }
    }

    fn check(&self, mmax: usize) {
        assert!(mmax <= self.mmax, "GaussianGmEval: order {} above evaluator maximum {}", mmax, self.mmax);
    }
}

/// Geminal whose single-geminal integrals reproduce `∇g · ∇g`:
/// every unordered pair of terms `(a, c_a)`, `(b, c_b)` becomes
/// `(a + b, 4ab·c_a·c_b)`, doubled for `a ≠ b` pairs.
pub fn gradient_squared_geminal(geminal: &[(f64, f64)]) -> ContractedGeminal {
    let mut out = Vec::with_capacity(geminal.len() * (geminal.len() + 1) / 2);
    for b in 0..geminal.len() {
        for k in 0..=b {
            let (eb, cb) = geminal[b];
            let (ek, ck) = geminal[k];
            let dup = if b == k { 1.0 } else { 2.0 };
            out.push((eb + ek, cb * ck * dup * 4.0 * eb * ek));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn gm() -> GaussianGmEval { GaussianGmEval::new(8, 1e-15) }

    #[test]
    fn plain_geminal_derivatives_in_t() {
        // G_{m+1} = -dG_m/dT
        let e = gm();
        let g = vec![(0.7, 0.4), (2.5, -0.3)];
        let (rho, t, h) = (1.3, 0.9, 1e-5);
        let mut gp = [0.0; 9];
        let mut gmn = [0.0; 9];
        let mut g0 = [0.0; 9];
        e.eval_geminal(&mut g0, rho, t, 8, &g);
        e.eval_geminal(&mut gp, rho, t + h, 8, &g);
        e.eval_geminal(&mut gmn, rho, t - h, 8, &g);
        for m in 0..8 {
            let fd = -(gp[m] - gmn[m]) / (2.0 * h);
            assert_relative_eq!(g0[m + 1], fd, max_relative = 1e-7);
        }
    }

    #[test]
    fn geminal_coulomb_reduces_to_boys() {
        // γ → 0 leaves the bare Coulomb kernel
        let e = gm();
        let (rho, t) = (0.8, 2.2);
        let mut g = [0.0; 9];
        let mut f = [0.0; 9];
        e.eval_geminal_coulomb(&mut g, rho, t, 8, &[(1e-12, 1.0)]);
        BoysEval::new(8, 1e-15).eval(&mut f, t, 8);
        for m in 0..=8 {
            assert_relative_eq!(g[m], f[m], max_relative = 1e-9);
        }
    }

    #[test]
    fn geminal_coulomb_derivatives_in_t() {
        let e = gm();
        let g = vec![(1.1, 1.0), (0.2, 0.5)];
        let (rho, t, h) = (2.0, 1.7, 1e-5);
        let mut g0 = [0.0; 9];
        let mut gp = [0.0; 9];
        let mut gmn = [0.0; 9];
        e.eval_geminal_coulomb(&mut g0, rho, t, 8, &g);
        e.eval_geminal_coulomb(&mut gp, rho, t + h, 8, &g);
        e.eval_geminal_coulomb(&mut gmn, rho, t - h, 8, &g);
        for m in 0..8 {
            let fd = -(gp[m] - gmn[m]) / (2.0 * h);
            assert_relative_eq!(g0[m + 1], fd, max_relative = 1e-6);
        }
    }

    #[test]
    fn r2_kernel_is_minus_exponent_derivative() {
        let e = gm();
        let (rho, t, gamma, h) = (0.9, 1.4, 1.7, 1e-5);
        let mut g2 = [0.0; 9];
        let mut gp = [0.0; 9];
        let mut gmn = [0.0; 9];
        e.eval_geminal_r2(&mut g2, rho, t, 8, &[(gamma, 1.0)]);
        e.eval_geminal(&mut gp, rho, t, 8, &[(gamma + h, 1.0)]);
        e.eval_geminal(&mut gmn, rho, t, 8, &[(gamma - h, 1.0)]);
        for m in 0..=8 {
            let fd = -(gp[m] - gmn[m]) / (2.0 * h);
            assert_relative_eq!(g2[m], fd, max_relative = 1e-7);
        }
    }

    #[test]
    fn gradient_squared_parameters() {
        let g = vec![(1.0, 0.5), (3.0, -2.0)];
        let t = gradient_squared_geminal(&g);
        assert_eq!(t.len(), 3);
        assert_relative_eq!(t[0].0, 2.0);
        assert_relative_eq!(t[0].1, 0.25 * 4.0);
        assert_relative_eq!(t[1].0, 4.0);
        assert_relative_eq!(t[1].1, -2.0 * 0.5 * 2.0 * 4.0 * 3.0);
        assert_relative_eq!(t[2].0, 6.0);
        assert_relative_eq!(t[2].1, 4.0 * 4.0 * 9.0);
    }
}
