//! One-body kernels: overlap, kinetic energy, electrostatic potential.

use super::{hrr, parts};
use crate::primdata::PrimDataBlock;
use crate::types::{build_direction, cart_components, cart_offset, global_index, lower, ncart, ncart_upto};

#[inline]
fn gidx(e: [usize; 3]) -> usize { global_index(e[0], e[1], e[2]) }

/// (a|b) by VRR on the bra, contraction, then HRR.
pub(crate) fn overlap(la: usize, lb: usize, block: &mut PrimDataBlock) {
    let (records, stack, target, w) = parts(block);
    let le = la + lb;
    let nall = ncart_upto(le);
    let lo = cart_offset(la);
    w.vrr.clear();
    w.vrr.resize(nall, 0.0);
    w.accum.clear();
    w.accum.resize(nall - lo, 0.0);

    for rec in records {
        let v = &mut w.vrr;
        v[0] = rec.overlap_ss;
        for l in 1..=le {
            for e in cart_components(l) {
                let i = build_direction(e);
                let e1 = lower(e, i);
                let mut val = rec.pa[i] * v[gidx(e1)];
                if e1[i] > 0 {
                    val += e1[i] as f64 * rec.oo2z * v[gidx(lower(e1, i))];
                }
                v[gidx(e)] = val;
            }
        }
        for (a, x) in w.accum.iter_mut().zip(&v[lo..nall]) {
            *a += x;
        }
    }

    let n = ncart(la) * ncart(lb);
    hrr(&w.accum, &mut stack[..n], &mut w.hrr, 1, 1, la, lb, records[0].ab);
    *target = 0..n;
}

/// (a|V_C|b) by VRR with auxiliary index m, contraction, then HRR.
pub(crate) fn elecpot(la: usize, lb: usize, block: &mut PrimDataBlock) {
    let (records, stack, target, w) = parts(block);
    let le = la + lb;
    let nm = le + 1;
    let nall = ncart_upto(le);
    let lo = cart_offset(la);
    w.vrr.clear();
    w.vrr.resize(nall * nm, 0.0);
    w.accum.clear();
    w.accum.resize(nall - lo, 0.0);

    for rec in records {
        let v = &mut w.vrr;
        v[..nm].copy_from_slice(&rec.elecpot_ss[..nm]);
        for l in 1..=le {
            for e in cart_components(l) {
                let i = build_direction(e);
                let e1 = lower(e, i);
                let (ie, ie1) = (gidx(e) * nm, gidx(e1) * nm);
                let ie2 = if e1[i] > 0 { Some(gidx(lower(e1, i)) * nm) } else { None };
                let f = e1[i] as f64 * rec.oo2z;
                for m in 0..=(le - l) {
                    let mut val = rec.pa[i] * v[ie1 + m] - rec.pc[i] * v[ie1 + m + 1];
                    if let Some(ie2) = ie2 {
                        val += f * (v[ie2 + m] - v[ie2 + m + 1]);
                    }
                    v[ie + m] = val;
                }
            }
        }
        for (k, a) in w.accum.iter_mut().enumerate() {
            *a += v[(lo + k) * nm];
        }
    }

    let n = ncart(la) * ncart(lb);
    hrr(&w.accum, &mut stack[..n], &mut w.hrr, 1, 1, la, lb, records[0].ab);
    *target = 0..n;
}

/// (a|-∇²/2|b) by simultaneous overlap/kinetic VRR on both centers.
pub(crate) fn kinetic(la: usize, lb: usize, block: &mut PrimDataBlock) {
    let (records, stack, target, w) = parts(block);
    let na = ncart_upto(la);
    let nb = ncart_upto(lb);
    w.vrr.clear();
    w.vrr.resize(na * nb, 0.0);
    w.vrr2.clear();
    w.vrr2.resize(na * nb, 0.0);
    let n = ncart(la) * ncart(lb);
    stack[..n].fill(0.0);

    for rec in records {
        let s = &mut w.vrr;
        let t = &mut w.vrr2;
        s[0] = rec.overlap_ss;
        t[0] = rec.kinetic_ss;

        // raise the bra with b = 0
        for l in 1..=la {
            for a in cart_components(l) {
                let i = build_direction(a);
                let a1 = lower(a, i);
                let (ia, ia1) = (gidx(a) * nb, gidx(a1) * nb);
                let mut sv = rec.pa[i] * s[ia1];
                let mut tv = rec.pa[i] * t[ia1];
                if a1[i] > 0 {
                    let ia2 = gidx(lower(a1, i)) * nb;
                    let f = a1[i] as f64;
                    sv += f * rec.oo2z * s[ia2];
                    tv += f * rec.oo2z * t[ia2] - f * rec.rho12_over_alpha1 * s[ia2];
                }
                s[ia] = sv;
                t[ia] = tv + rec.two_rho12 * sv;
            }
        }

        // raise the ket for every bra component
        for l in 1..=lb {
            for b in cart_components(l) {
                let i = build_direction(b);
                let b1 = lower(b, i);
                let (ib, ib1) = (gidx(b), gidx(b1));
                let ib2 = if b1[i] > 0 { Some(gidx(lower(b1, i))) } else { None };
                for la_ in 0..=la {
                    for a in cart_components(la_) {
                        let ia = gidx(a);
                        let mut sv = rec.pb[i] * s[ia * nb + ib1];
                        let mut tv = rec.pb[i] * t[ia * nb + ib1];
                        if a[i] > 0 {
                            let ia1 = gidx(lower(a, i));
                            let f = a[i] as f64 * rec.oo2z;
                            sv += f * s[ia1 * nb + ib1];
                            tv += f * t[ia1 * nb + ib1];
                        }
                        if let Some(ib2) = ib2 {
                            let f = b1[i] as f64;
                            sv += f * rec.oo2z * s[ia * nb + ib2];
                            tv += f * rec.oo2z * t[ia * nb + ib2] - f * rec.rho12_over_alpha2 * s[ia * nb + ib2];
                        }
                        s[ia * nb + ib] = sv;
                        t[ia * nb + ib] = tv + rec.two_rho12 * sv;
                    }
                }
            }
        }

        let (oa, ob) = (cart_offset(la), cart_offset(lb));
        for (ka, a) in cart_components(la).enumerate() {
            debug_assert_eq!(gidx(a), oa + ka);
            for kb in 0..ncart(lb) {
                stack[ka * ncart(lb) + kb] += t[(oa + ka) * nb + ob + kb];
            }
        }
    }
    *target = 0..n;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::int1e::Operator;
    use crate::primdata::PrimData;
    use crate::recur::{build_onebody, init_onebody};

    /// Unit-coefficient s-type seeds of one primitive pair with exponents a, b.
    fn pair(a: f64, b: f64, ra: [f64; 3], rb: [f64; 3]) -> PrimData {
        let g = a + b;
        let rho = a * b / g;
        let mut rec = PrimData::default();
        let mut ab2 = 0.0;
        for k in 0..3 {
            let p = (a * ra[k] + b * rb[k]) / g;
            rec.pa[k] = p - ra[k];
            rec.pb[k] = p - rb[k];
            rec.ab[k] = ra[k] - rb[k];
            ab2 += rec.ab[k] * rec.ab[k];
        }
        rec.oo2z = 0.5 / g;
        rec.rho12_over_alpha1 = b / g;
        rec.rho12_over_alpha2 = a / g;
        rec.two_rho12 = 2.0 * rho;
        rec.overlap_ss = (std::f64::consts::PI / g).powf(1.5) * (-rho * ab2).exp();
        rec.kinetic_ss = rho * (3.0 - 2.0 * rho * ab2) * rec.overlap_ss;
        rec
    }

    fn run(op: Operator, la: usize, lb: usize, rec: PrimData) -> Vec<f64> {
        let mut block = PrimDataBlock::new(1, 0, 0);
        init_onebody(&mut block, op, la.max(lb), 0);
        block.records[0] = rec;
        block.contrdepth = 1;
        build_onebody(op, la, lb, &mut block);
        block.result().to_vec()
    }

    #[test]
    fn overlap_p_s_is_center_derivative() {
        // d/dA_x (s_A|s_B) = 2a (p_x|s)
        let (a, b) = (0.9, 1.4);
        let ra = [0.1, -0.3, 0.2];
        let rb = [0.5, 0.4, -0.6];
        let h = 1e-5;
        let sp = run(Operator::Overlap, 0, 0, pair(a, b, [ra[0] + h, ra[1], ra[2]], rb))[0];
        let sm = run(Operator::Overlap, 0, 0, pair(a, b, [ra[0] - h, ra[1], ra[2]], rb))[0];
        let px = run(Operator::Overlap, 1, 0, pair(a, b, ra, rb))[0];
        assert!(((sp - sm) / (2.0 * h) - 2.0 * a * px).abs() < 1e-8);
    }

    #[test]
    fn kinetic_matches_overlap_laplacian_identity() {
        // same-exponent, same-center s: T = 3/2 a S for each of a = b
        let a = 1.3;
        let rec = pair(a, a, [0.0; 3], [0.0; 3]);
        let s = rec.overlap_ss;
        let t = run(Operator::Kinetic, 0, 0, rec)[0];
        assert!((t / s - 1.5 * a).abs() < 1e-12);
    }

    #[test]
    fn kinetic_pp_diagonal() {
        let zeta = 1.5_f64;
        let rec = pair(zeta, zeta, [0.0; 3], [0.0; 3]);
        let t = run(Operator::Kinetic, 1, 1, rec.clone());
        let s = run(Operator::Overlap, 1, 1, rec);
        // T_pp / S_pp = 5ζ/2 on the diagonal, zero off it
        for i in 0..3 {
            for j in 0..3 {
                if i == j {
                    assert!((t[i * 3 + j] / s[i * 3 + j] - 2.5 * zeta).abs() < 1e-10);
                } else {
                    assert!(t[i * 3 + j].abs() < 1e-14);
                }
            }
        }
    }
}
