//! Primitive-quartet prefactors for the two-body kernels.

use super::kernel::TwoBodyKernel;
use crate::primdata::{FieldSet, PrimData};
use crate::shell::Shell;
use crate::types::TWO_PI_POW_5_2;

/// Fill `rec` for primitives `p[i]` of the canonical shells `sh[i]`
/// (`bra1, bra2, ket1, ket2`).
pub fn compute_primdata<K: TwoBodyKernel>(
    rec: &mut PrimData,
    sh: [&Shell; 4],
    p: [usize; 4],
    fields: FieldSet,
    deriv_order: usize,
    kernel: &K,
) {
    let [alpha0, alpha1, alpha2, alpha3] = [0, 1, 2, 3].map(|i| sh[i].alpha[p[i]]);
    let c0123: f64 = (0..4).map(|i| sh[i].contr[0].coeff[p[i]]).product();
    let [a, b, c, d] = sh.map(|s| s.origin);

    let gammap = alpha0 + alpha1;
    let oogammap = 1.0 / gammap;
    let rhop = alpha0 * alpha1 * oogammap;
    let gammaq = alpha2 + alpha3;
    let oogammaq = 1.0 / gammaq;
    let rhoq = alpha2 * alpha3 * oogammaq;

    let mut pv = [0.0; 3];
    let mut qv = [0.0; 3];
    let (mut ab2, mut cd2, mut pq2) = (0.0, 0.0, 0.0);
    for k in 0..3 {
        pv[k] = (alpha0 * a[k] + alpha1 * b[k]) * oogammap;
        qv[k] = (alpha2 * c[k] + alpha3 * d[k]) * oogammaq;
        ab2 += (a[k] - b[k]) * (a[k] - b[k]);
        cd2 += (c[k] - d[k]) * (c[k] - d[k]);
        pq2 += (pv[k] - qv[k]) * (pv[k] - qv[k]);
    }

    let gammapq = gammap + gammaq;
    let oogammapq = 1.0 / gammapq;
    let rho = gammap * gammaq * oogammapq;
    let t = pq2 * rho;

    let k1 = (-rhop * ab2).exp() * oogammap;
    let k2 = (-rhoq * cd2).exp() * oogammaq;
    let pfac = TWO_PI_POW_5_2 * k1 * k2 * oogammapq.sqrt() * c0123;

    let amtot: usize = sh.iter().map(|s| s.l()).sum();
    let mmax = amtot + deriv_order;
    let seeds = &mut rec.erep_ss[..=mmax];
    kernel.core_eval(seeds, mmax, t, rho);
    seeds.iter_mut().for_each(|v| *v *= pfac);

    if mmax == 0 {
        return;
    }

    for k in 0..3 {
        let w = (gammap * pv[k] + gammaq * qv[k]) * oogammapq;
        if fields.contains(FieldSet::PA) {
            rec.pa[k] = pv[k] - a[k];
        }
        if fields.contains(FieldSet::PB) {
            rec.pb[k] = pv[k] - b[k];
        }
        if fields.contains(FieldSet::QC) {
            rec.qc[k] = qv[k] - c[k];
        }
        if fields.contains(FieldSet::QD) {
            rec.qd[k] = qv[k] - d[k];
        }
        if fields.contains(FieldSet::AB) {
            rec.ab[k] = a[k] - b[k];
        }
        if fields.contains(FieldSet::BA) {
            rec.ba[k] = b[k] - a[k];
        }
        if fields.contains(FieldSet::CD) {
            rec.cd[k] = c[k] - d[k];
        }
        if fields.contains(FieldSet::DC) {
            rec.dc[k] = d[k] - c[k];
        }
        if fields.contains(FieldSet::WP) {
            rec.wp[k] = w - pv[k];
        }
        if fields.contains(FieldSet::WQ) {
            rec.wq[k] = w - qv[k];
        }
    }
    if fields.contains(FieldSet::OO2Z) {
        rec.oo2z = 0.5 * oogammap;
    }
    if fields.contains(FieldSet::OO2E) {
        rec.oo2e = 0.5 * oogammaq;
    }
    if fields.contains(FieldSet::OO2ZE) {
        rec.oo2ze = 0.5 * oogammapq;
    }
    if fields.contains(FieldSet::ROZ) {
        rec.roz = rho * oogammap;
    }
    if fields.contains(FieldSet::ROE) {
        rec.roe = rho * oogammaq;
    }

    if deriv_order > 0 {
        let zeta_share = oogammapq * gammap;
        let eta_share = oogammapq * gammaq;
        let dp = &mut rec.deriv;
        dp.alpha1_rho_over_zeta2 = alpha0 * oogammap * eta_share;
        dp.alpha2_rho_over_zeta2 = alpha1 * oogammap * eta_share;
        dp.alpha3_rho_over_eta2 = alpha2 * oogammaq * zeta_share;
        dp.alpha4_rho_over_eta2 = alpha3 * oogammaq * zeta_share;
        dp.alpha1_over_zetapluseta = alpha0 * oogammapq;
        dp.alpha2_over_zetapluseta = alpha1 * oogammapq;
        dp.alpha3_over_zetapluseta = alpha2 * oogammapq;
        dp.alpha4_over_zetapluseta = alpha3 * oogammapq;
        dp.rho34_over_alpha3 = alpha3 * oogammaq;
        dp.rho34_over_alpha4 = alpha2 * oogammaq;
        dp.two_alpha0_bra = 2.0 * alpha0;
        dp.two_alpha0_ket = 2.0 * alpha1;
        dp.two_alpha1_bra = 2.0 * alpha2;
        dp.two_alpha1_ket = 2.0 * alpha3;
        rec.rho12_over_alpha1 = alpha1 * oogammap;
        rec.rho12_over_alpha2 = alpha0 * oogammap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::int2e::kernel::Coulomb;
    use approx::assert_relative_eq;

    fn s(alpha: f64, origin: [f64; 3]) -> Shell {
        Shell::single(0, false, vec![alpha], vec![1.0], origin).unwrap()
    }

    #[test]
    fn concentric_ssss_seed() {
        let sh = s(1.0, [0.0; 3]);
        let kernel = Coulomb::new(&(), 0, 1e-15);
        let mut rec = PrimData { erep_ss: vec![0.0; 1], ..PrimData::default() };
        compute_primdata(&mut rec, [&sh; 4], [0; 4], FieldSet::all(), 0, &kernel);
        assert_relative_eq!(rec.erep_ss[0], std::f64::consts::PI.powf(2.5) / 4.0, max_relative = 1e-14);
        // all-s quartets stop after the seeds
        assert_eq!(rec.pa, [0.0; 3]);
        assert_eq!(rec.oo2z, 0.0);
    }

    #[test]
    fn weighted_center_offsets() {
        let a = s(1.0, [0.0, 0.0, 0.0]);
        let b = s(3.0, [1.0, 0.0, 0.0]);
        let c = s(2.0, [0.0, 2.0, 0.0]);
        let p = Shell::single(1, false, vec![2.0], vec![1.0], [0.0, 0.0, 2.0]).unwrap();
        let kernel = Coulomb::new(&(), 1, 1e-15);
        let mut rec = PrimData { erep_ss: vec![0.0; 2], ..PrimData::default() };
        compute_primdata(&mut rec, [&a, &b, &c, &p], [0; 4], FieldSet::all(), 0, &kernel);
        // P = (0.75, 0, 0), Q = (0, 1, 1), ζ = η = 4, W = (P + Q)/2
        assert_relative_eq!(rec.pa[0], 0.75);
        assert_relative_eq!(rec.pb[0], -0.25);
        assert_relative_eq!(rec.qd[2], -1.0);
        assert_relative_eq!(rec.wp[0], -0.375);
        assert_relative_eq!(rec.wq[1], -0.5);
        assert_relative_eq!(rec.dc[1], -2.0);
        assert_relative_eq!(rec.roz, 0.5);
        assert_relative_eq!(rec.oo2ze, 1.0 / 16.0);
    }
}
