//! Primitive-pair prefactors for the one-body kernels.

use super::Operator;
use crate::boys::BoysEval;
use crate::primdata::{FieldSet, PrimData};
use crate::shell::Shell;
use crate::types::{PI_POW_3_2, TWO_OVER_SQRT_PI};

/// Fill `rec` for primitive `p1` of `s1` and primitive `p2` of `s2`.
///
/// `charge` is the point charge of the current operator component (nuclear
/// attraction only); `boys` must cover order `l1 + l2` in that case.
#[allow(clippy::too_many_arguments)]
pub fn compute_primdata(
    rec: &mut PrimData,
    s1: &Shell,
    p1: usize,
    s2: &Shell,
    p2: usize,
    op: Operator,
    charge: Option<(f64, [f64; 3])>,
    fields: FieldSet,
    deriv_order: usize,
    boys: Option<&BoysEval>,
) {
    let alpha1 = s1.alpha[p1];
    let alpha2 = s2.alpha[p2];
    let c1 = s1.contr[0].coeff[p1];
    let c2 = s2.contr[0].coeff[p2];

    let gammap = alpha1 + alpha2;
    let oogammap = 1.0 / gammap;
    let rhop = alpha1 * alpha2 * oogammap;

    let a = s1.origin;
    let b = s2.origin;
    let mut p = [0.0; 3];
    let mut ab2 = 0.0;
    for k in 0..3 {
        p[k] = (alpha1 * a[k] + alpha2 * b[k]) * oogammap;
        let d = a[k] - b[k];
        ab2 += d * d;
        if fields.contains(FieldSet::PA) {
            rec.pa[k] = p[k] - a[k];
        }
        if fields.contains(FieldSet::PB) {
            rec.pb[k] = p[k] - b[k];
        }
        if fields.contains(FieldSet::AB) {
            rec.ab[k] = d;
        }
        if fields.contains(FieldSet::BA) {
            rec.ba[k] = -d;
        }
    }
    if fields.contains(FieldSet::OO2Z) {
        rec.oo2z = 0.5 * oogammap;
    }

    if op == Operator::Kinetic {
        if fields.contains(FieldSet::RHO12_OVER_ALPHA1) {
            rec.rho12_over_alpha1 = alpha2 * oogammap;
        }
        if fields.contains(FieldSet::RHO12_OVER_ALPHA2) {
            rec.rho12_over_alpha2 = alpha1 * oogammap;
        }
        if fields.contains(FieldSet::TWO_RHO12) {
            rec.two_rho12 = 2.0 * rhop;
        }
    }

    if deriv_order > 0 {
        unimplemented!("one-body derivative integrals");
    }

    let ovlp_ss = PI_POW_3_2 * oogammap * oogammap.sqrt() * (-rhop * ab2).exp() * c1 * c2;
    rec.overlap_ss = ovlp_ss;

    match op {
        Operator::Overlap => {}
        Operator::Kinetic => {
            rec.kinetic_ss = rhop * (3.0 - 2.0 * rhop * ab2) * ovlp_ss;
        }
        Operator::Nuclear => {
            let Some((q, c)) = charge else {
                panic!("nuclear attraction record assembled without a charge");
            };
            let Some(boys) = boys else {
                panic!("nuclear attraction record assembled without a Boys evaluator");
            };
            let mut pc2 = 0.0;
            for k in 0..3 {
                let d = p[k] - c[k];
                pc2 += d * d;
                if fields.contains(FieldSet::PC) {
                    rec.pc[k] = d;
                }
            }
            let mmax = s1.l() + s2.l();
            let u = gammap * pc2;
            boys.eval(&mut rec.elecpot_ss, u, mmax);
            let pfac = -q * gammap.sqrt() * TWO_OVER_SQRT_PI * ovlp_ss;
            for v in &mut rec.elecpot_ss[..=mmax] {
                *v *= pfac;
            }
        }
    }
}
