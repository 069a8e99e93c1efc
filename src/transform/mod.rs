//! Cartesian → solid-harmonic transforms of integral blocks.
//!
//! All buffers are row-major. A shell axis of angular momentum `l` shrinks
//! from `ncart(l)` to `nsph(l)` entries; the other axes are untouched.

pub mod cart2sph;

pub use cart2sph::{SolidHarmonicCoefs, MAX_SHG_L};

use crate::types::{ncart, nsph};

/// Transform the middle axis of a `[n1][ncart(l)][n2]` block into `[n1][nsph(l)][n2]`.
pub fn transform_inner(n1: usize, l: usize, n2: usize, src: &[f64], dst: &mut [f64]) {
    let coefs = SolidHarmonicCoefs::instance(l);
    let (nc, ns) = (ncart(l), nsph(l));
    dst[..n1 * ns * n2].fill(0.0);
    for i1 in 0..n1 {
        let src_blk = &src[i1 * nc * n2..(i1 + 1) * nc * n2];
        let dst_blk = &mut dst[i1 * ns * n2..(i1 + 1) * ns * n2];
        for s in 0..ns {
            let (cols, vals) = coefs.row(s);
            let out = &mut dst_blk[s * n2..(s + 1) * n2];
            for (&c, &v) in cols.iter().zip(vals) {
                let row = &src_blk[c * n2..(c + 1) * n2];
                for (o, x) in out.iter_mut().zip(row) {
                    *o += v * x;
                }
            }
        }
    }
}

/// Transform the leading axis: `[ncart(l)][n2]` → `[nsph(l)][n2]`.
#[inline]
pub fn transform_first(l: usize, n2: usize, src: &[f64], dst: &mut [f64]) {
    transform_inner(1, l, n2, src, dst)
}

/// Transform the trailing axis: `[n1][ncart(l)]` → `[n1][nsph(l)]`.
#[inline]
pub fn transform_last(n1: usize, l: usize, src: &[f64], dst: &mut [f64]) {
    transform_inner(n1, l, 1, src, dst)
}

/// Rows of a one-body block: `[ncart(l1)][n2]` → `[nsph(l1)][n2]`.
#[inline]
pub fn tform_rows(l1: usize, n2: usize, src: &[f64], dst: &mut [f64]) {
    transform_first(l1, n2, src, dst)
}

/// Columns of a one-body block: `[n1][ncart(l2)]` → `[n1][nsph(l2)]`.
#[inline]
pub fn tform_cols(n1: usize, l2: usize, src: &[f64], dst: &mut [f64]) {
    transform_last(n1, l2, src, dst)
}

/// Both axes of a one-body block: `[ncart(l1)][ncart(l2)]` → `[nsph(l1)][nsph(l2)]`.
pub fn tform(l1: usize, l2: usize, src: &[f64], dst: &mut [f64]) {
    let c1 = SolidHarmonicCoefs::instance(l1);
    let c2 = SolidHarmonicCoefs::instance(l2);
    let nc2 = ncart(l2);
    let ns2 = nsph(l2);
    for s1 in 0..nsph(l1) {
        let (cols1, vals1) = c1.row(s1);
        for s2 in 0..ns2 {
            let (cols2, vals2) = c2.row(s2);
            let mut v = 0.0;
            for (&a, &va) in cols1.iter().zip(vals1) {
                let row = &src[a * nc2..(a + 1) * nc2];
                for (&b, &vb) in cols2.iter().zip(vals2) {
                    v += va * vb * row[b];
                }
            }
            dst[s1 * ns2 + s2] = v;
        }
    }
}
