//! Two-body kernel: (ab|cd) from the seeds `erep_ss[m]`.
//!
//! The VRR builds `(e0|f0)^(m)` for `|e| <= la+lb`, `|f| <= lc+ld`:
//!
//! ```text
//! (e+1_i 0|00)^m = PA_i (e0|00)^m + WP_i (e0|00)^{m+1}
//!                + e_i/(2ζ) [ (e-1_i 0|00)^m - ρ/ζ (e-1_i 0|00)^{m+1} ]
//! (e0|f+1_i 0)^m = QC_i (e0|f0)^m + WQ_i (e0|f0)^{m+1}
//!                + f_i/(2η) [ (e0|f-1_i 0)^m - ρ/η (e0|f-1_i 0)^{m+1} ]
//!                + e_i/(2(ζ+η)) (e-1_i 0|f0)^{m+1}
//! ```
//!
//! The recurrence only depends on the kernel through the seeds, so Coulomb
//! and Gaussian-geminal integrals share it.

use super::{hrr, parts};
use crate::primdata::PrimDataBlock;
use crate::types::{build_direction, cart_components, cart_offset, global_index, lower, ncart, ncart_range, ncart_upto};

#[inline]
fn gidx(e: [usize; 3]) -> usize { global_index(e[0], e[1], e[2]) }

pub(crate) fn eri(la: usize, lb: usize, lc: usize, ld: usize, block: &mut PrimDataBlock) {
    let (records, stack, target, w) = parts(block);
    let le = la + lb;
    let lf = lc + ld;
    let ltot = le + lf;
    let nm = ltot + 1;
    let ne = ncart_upto(le);
    let nf = ncart_upto(lf);
    let (e_lo, f_lo) = (cart_offset(la), cart_offset(lc));
    let (ne_keep, nf_keep) = (ncart_range(la, le), ncart_range(lc, lf));

    w.vrr.clear();
    w.vrr.resize(ne * nf * nm, 0.0);
    w.accum.clear();
    w.accum.resize(ne_keep * nf_keep, 0.0);

    let at = |e: usize, f: usize| (e * nf + f) * nm;

    for rec in records {
        let v = &mut w.vrr;
        v[..nm].copy_from_slice(&rec.erep_ss[..nm]);

        for l in 1..=le {
            for e in cart_components(l) {
                let i = build_direction(e);
                let e1 = lower(e, i);
                let (ie, ie1) = (at(gidx(e), 0), at(gidx(e1), 0));
                let ie2 = if e1[i] > 0 { Some(at(gidx(lower(e1, i)), 0)) } else { None };
                let c = e1[i] as f64 * rec.oo2z;
                for m in 0..=(ltot - l) {
                    let mut val = rec.pa[i] * v[ie1 + m] + rec.wp[i] * v[ie1 + m + 1];
                    if let Some(ie2) = ie2 {
                        val += c * (v[ie2 + m] - rec.roz * v[ie2 + m + 1]);
                    }
                    v[ie + m] = val;
                }
            }
        }

        for l in 1..=lf {
            for f in cart_components(l) {
                let i = build_direction(f);
                let f1 = lower(f, i);
                let (jf, jf1) = (gidx(f), gidx(f1));
                let jf2 = if f1[i] > 0 { Some(gidx(lower(f1, i))) } else { None };
                let cf = f1[i] as f64 * rec.oo2e;
                for l_e in 0..=le {
                    for e in cart_components(l_e) {
                        let ge = gidx(e);
                        let (dst, src1) = (at(ge, jf), at(ge, jf1));
                        let src2 = jf2.map(|j| at(ge, j));
                        let src3 = if e[i] > 0 { Some(at(gidx(lower(e, i)), jf1)) } else { None };
                        let ce = e[i] as f64 * rec.oo2ze;
                        for m in 0..=(ltot - l_e - l) {
                            let mut val = rec.qc[i] * v[src1 + m] + rec.wq[i] * v[src1 + m + 1];
                            if let Some(s2) = src2 {
                                val += cf * (v[s2 + m] - rec.roe * v[s2 + m + 1]);
                            }
                            if let Some(s3) = src3 {
                                val += ce * v[s3 + m + 1];
                            }
                            v[dst + m] = val;
                        }
                    }
                }
            }
        }

        for ke in 0..ne_keep {
            for kf in 0..nf_keep {
                w.accum[ke * nf_keep + kf] += v[at(e_lo + ke, f_lo + kf)];
            }
        }
    }

    // (e0|f0) -> (ab|f0) -> (ab|cd)
    let nab = ncart(la) * ncart(lb);
    let n = nab * ncart(lc) * ncart(ld);
    let mut bra = std::mem::take(&mut w.vrr2);
    bra.clear();
    bra.resize(nab * nf_keep, 0.0);
    hrr(&w.accum, &mut bra, &mut w.hrr, 1, nf_keep, la, lb, records[0].ab);
    hrr(&bra, &mut stack[..n], &mut w.hrr, nab, 1, lc, ld, records[0].cd);
    w.vrr2 = bra;
    *target = 0..n;
}
