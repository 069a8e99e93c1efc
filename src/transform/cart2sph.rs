//! Cartesian → real solid harmonic coefficients.
//!
//! Rows are ordered m = -l, ..., l; columns follow the standard Cartesian
//! order (x descending, then y descending). The coefficients assume each
//! Cartesian component carries the normalization of the `x^l` function, so
//! that a normalized Cartesian shell transforms into normalized solid
//! harmonics. For l ≤ 1 the matrix is a permutation: p_{-1}=y, p_0=z, p_1=x.
//!
//! d-shell matrix (Cartesian: xx, xy, xz, yy, yz, zz):
//!   d_{-2} = √3 · xy
//!   d_{-1} = √3 · yz
//!   d_{0}  = zz - xx/2 - yy/2
//!   d_{1}  = √3 · xz
//!   d_{2}  = √3/2 · (xx - yy)

use std::sync::OnceLock;

use crate::types::{cart_components, double_factorial_minus1, ncart, nsph};

/// Largest angular momentum with tabulated coefficients.
pub const MAX_SHG_L: usize = 6;

/// Sparse (CSR) coefficient matrix of one angular momentum.
#[derive(Debug, Clone)]
pub struct SolidHarmonicCoefs {
    l: usize,
    row_offset: Vec<usize>,
    col: Vec<usize>,
    values: Vec<f64>,
}

static COEFS: OnceLock<Vec<SolidHarmonicCoefs>> = OnceLock::new();

impl SolidHarmonicCoefs {
    /// Shared coefficients of angular momentum `l`.
    pub fn instance(l: usize) -> &'static SolidHarmonicCoefs {
        assert!(l <= MAX_SHG_L, "solid harmonics tabulated up to l={}, requested {}", MAX_SHG_L, l);
        &COEFS.get_or_init(|| (0..=MAX_SHG_L).map(SolidHarmonicCoefs::new).collect())[l]
    }

    pub fn new(l: usize) -> Self {
        let mut row_offset = Vec::with_capacity(nsph(l) + 1);
        let mut col = Vec::new();
        let mut values = Vec::new();
        row_offset.push(0);
        for m in -(l as i64)..=(l as i64) {
            for (c, e) in cart_components(l).enumerate() {
                let v = coeff(l, m, e[0], e[1], e[2]);
                if v != 0.0 {
                    col.push(c);
                    values.push(v);
                }
            }
            row_offset.push(col.len());
        }
        SolidHarmonicCoefs { l, row_offset, col, values }
    }

    #[inline] pub fn l(&self) -> usize { self.l }
    #[inline] pub fn nrows(&self) -> usize { nsph(self.l) }
    #[inline] pub fn ncols(&self) -> usize { ncart(self.l) }

    /// Nonzero (Cartesian index, coefficient) pairs of solid harmonic `row`.
    #[inline]
    pub fn row(&self, row: usize) -> (&[usize], &[f64]) {
        let r = self.row_offset[row]..self.row_offset[row + 1];
        (&self.col[r.clone()], &self.values[r])
    }

    /// Dense row-major `[nsph × ncart]` copy.
    pub fn dense(&self) -> Vec<f64> {
        let nc = self.ncols();
        let mut d = vec![0.0; self.nrows() * nc];
        for r in 0..self.nrows() {
            let (cols, vals) = self.row(r);
            for (c, v) in cols.iter().zip(vals) {
                d[r * nc + c] = *v;
            }
        }
        d
    }
}

#[inline]
fn parity(i: i64) -> f64 { if i % 2 != 0 { -1.0 } else { 1.0 } }

fn fac(n: i64) -> f64 { (2..=n).map(|k| k as f64).product() }

fn binom(n: i64, k: i64) -> f64 { fac(n) / (fac(k) * fac(n - k)) }

/// Coefficient of Cartesian `x^lx y^ly z^lz` in the real solid harmonic (l, m).
pub fn coeff(l: usize, m: i64, lx: usize, ly: usize, lz: usize) -> f64 {
    let (l, lx, ly, lz) = (l as i64, lx as i64, ly as i64, lz as i64);
    let abs_m = m.abs();
    if (lx + ly - abs_m) % 2 != 0 {
        return 0.0;
    }
    let j = (lx + ly - abs_m) / 2;
    if j < 0 {
        return 0.0;
    }
    let comp = if m >= 0 { 1.0 } else { -1.0 };
    let i = abs_m - lx;
    if comp != parity(i.abs()) {
        return 0.0;
    }

    let mut pfac = (fac(2 * lx) * fac(2 * ly) * fac(2 * lz) / fac(2 * l)
        * (fac(l - abs_m) / fac(l))
        * (1.0 / fac(l + abs_m))
        * (1.0 / (fac(lx) * fac(ly) * fac(lz))))
        .sqrt();
    pfac /= (1_i64 << l) as f64;
    pfac *= if m < 0 { parity((i - 1) / 2) } else { parity(i / 2) };

    let mut sum = 0.0;
    for ii in j..=(l - abs_m) / 2 {
        let pfac1 = binom(l, ii) * binom(ii, j) * parity(ii) * fac(2 * (l - ii)) / fac(l - abs_m - 2 * ii);
        let mut sum1 = 0.0;
        for k in ((lx - abs_m) / 2).max(0)..=j.min(lx / 2) {
            if lx - 2 * k <= abs_m {
                sum1 += binom(j, k) * binom(abs_m, lx - 2 * k) * parity(k);
            }
        }
        sum += pfac1 * sum1;
    }
    let df = |n: i64| double_factorial_minus1(n as usize);
    sum *= (df(2 * l) / (df(2 * lx) * df(2 * ly) * df(2 * lz))).sqrt();

    if m == 0 { pfac * sum } else { std::f64::consts::SQRT_2 * pfac * sum }
}
