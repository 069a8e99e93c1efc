//! Core functions that seed the recurrences.
//!
//! Boys function:  F_m(t) = ∫₀¹ s^{2m} e^{-t·s²} ds
//!
//! [`BoysEval`] interpolates a precomputed table with a short Taylor series
//! around the nearest grid point, which is what the engines call per
//! primitive combination. [`boys_reference`] is the direct series / erf
//! evaluation used to build the table and to check it.

pub mod geminal;

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use statrs::function::erf::erf;
use tracing::debug;

pub use geminal::{gradient_squared_geminal, ContractedGeminal, GaussianGmEval};

pub const SQRTPIE4: f64 = 0.886_226_925_452_758_013_649_083_741_671;

/// Grid spacing of the interpolation table.
const DELTA: f64 = 0.1;
/// Beyond this argument F_0 is taken from the closed form with upward recursion.
const T_MAX: f64 = 40.0;
const NGRID: usize = 401;

/// Boys function: fills f[0..=mmax] with F_0(t)..F_mmax(t).
///
/// Up to `T_MAX` the series is summed directly; above it `erf(√t)` is within
/// rounding of 1 and the closed form with upward recursion is exact enough.
pub fn boys_reference(f: &mut [f64], t: f64, mmax: usize) {
    if t < 1e-15 {
        let mut b = 1.0_f64;
        for fm in f.iter_mut().take(mmax + 1) { *fm = 1.0 / b; b += 2.0; }
        return;
    }
    if t <= T_MAX {
        series_downward(f, t, mmax);
    } else {
        upward(f, t, mmax);
    }
}

/// Series for F_mmax, then downward recursion. Valid for any t, slow for large t.
fn series_downward(f: &mut [f64], t: f64, mmax: usize) {
    const EPS: f64 = 1e-17;
    let e = 0.5 * (-t).exp();
    let mut b = mmax as f64 + 0.5;
    let mut x = e;
    let mut sum = e;
    loop {
        b += 1.0;
        x *= t / b;
        sum += x;
        if x <= EPS * sum { break; }
    }
    f[mmax] = sum / (mmax as f64 + 0.5);
    let mut bi = mmax as f64 + 0.5;
    for i in (0..mmax).rev() {
        bi -= 1.0;
        f[i] = (e + t * f[i + 1]) / bi;
    }
}

/// Closed-form F_0 with upward recursion; only used above `T_MAX`.
fn upward(f: &mut [f64], t: f64, mmax: usize) {
    let sr = t.sqrt();
    f[0] = SQRTPIE4 / sr * erf(sr);
    let e = (-t).exp();
    let b = 0.5 / t;
    for i in 1..=mmax {
        f[i] = b * ((2 * i - 1) as f64 * f[i - 1] - e);
    }
}

// ─────────────────────────────────────────────────────────────────
// Tabulated evaluator
// ─────────────────────────────────────────────────────────────────

/// Boys function evaluator for orders `0..=max_m()`.
#[derive(Debug)]
pub struct BoysEval {
    mmax: usize,
    precision: f64,
    /// Number of Taylor terms used per evaluation.
    order: usize,
    /// Row-major `[NGRID][mmax + order]`.
    table: Vec<f64>,
}

static BOYS_CACHE: OnceLock<Mutex<Option<Arc<BoysEval>>>> = OnceLock::new();

impl BoysEval {
    /// Shared evaluator covering at least `mmax` at `precision` or better.
    ///
    /// The process keeps one instance; a request it cannot serve replaces it
    /// with a larger one. Callers holding the old `Arc` keep using it.
    pub fn instance(mmax: usize, precision: f64) -> Arc<BoysEval> {
        let cache = BOYS_CACHE.get_or_init(|| Mutex::new(None));
        let mut guard = cache.lock().unwrap_or_else(PoisonError::into_inner);
        let (mmax, precision) = match guard.as_ref() {
            Some(e) if e.mmax >= mmax && e.precision <= precision => return Arc::clone(e),
            Some(e) => (e.mmax.max(mmax), e.precision.min(precision)),
            None => (mmax, precision),
        };
        let e = Arc::new(BoysEval::new(mmax, precision));
        *guard = Some(Arc::clone(&e));
        e
    }

    pub fn new(mmax: usize, precision: f64) -> Self {
        let order = taylor_order(precision);
        let width = mmax + order;
        let mut table = vec![0.0; NGRID * width];
        for (i, row) in table.chunks_exact_mut(width).enumerate() {
            let t = i as f64 * DELTA;
            if t < 1e-15 {
                boys_reference(row, t, width - 1);
            } else {
                series_downward(row, t, width - 1);
            }
        }
        debug!(mmax, precision, order, "built Boys function table");
        BoysEval { mmax, precision, order, table }
    }

    #[inline] pub fn max_m(&self) -> usize { self.mmax }
    #[inline] pub fn precision(&self) -> f64 { self.precision }

    /// Fill `out[0..=mmax]` with F_0(t)..F_mmax(t).
    pub fn eval(&self, out: &mut [f64], t: f64, mmax: usize) {
        assert!(mmax <= self.mmax, "BoysEval: order {} above tabulated maximum {}", mmax, self.mmax);
        if t > T_MAX {
            upward(out, t, mmax);
            return;
        }
        let width = self.mmax + self.order;
        let i = (t / DELTA).round() as usize;
        let row = &self.table[i * width..(i + 1) * width];
        let dt = i as f64 * DELTA - t;

        // dF_m/dt = -F_{m+1}
        let mut s = row[mmax + self.order - 1];
        for k in (0..self.order - 1).rev() {
            s = row[mmax + k] + s * dt / (k + 1) as f64;
        }
        out[mmax] = s;
        if mmax > 0 {
            let e = (-t).exp();
            for m in (0..mmax).rev() {
                out[m] = (2.0 * t * out[m + 1] + e) / (2 * m + 1) as f64;
            }
        }
    }
}

/// Smallest number of Taylor terms whose truncation error at half a grid
/// step stays below `precision`.
fn taylor_order(precision: f64) -> usize {
    let h = 0.5 * DELTA;
    let mut term = 1.0;
    let mut k = 0;
    while term > precision && k < 30 {
        k += 1;
        term *= h / k as f64;
    }
    k.max(1)
}
