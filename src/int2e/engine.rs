//! Reusable evaluator of two-body integrals over shell quartets.

use tracing::{debug, trace};

use super::kernel::TwoBodyKernel;
use super::permute::{unpermute, Swaps};
use super::prim::compute_primdata;
use super::TwoBodyConfig;
use crate::error::{Error, Result};
use crate::primdata::{split_buffers, Buffer, FieldSet, PrimDataBlock};
use crate::recur::{self, build_eri, init_eri, required_fields_eri};
use crate::shell::Shell;
use crate::transform::{transform_first, transform_inner, transform_last};
use crate::types::{ncart, DEFAULT_PRECISION, DERIV_ERI_ORDER, MAX_AM_ERI};

/// Evaluates `(ab|K|cd)` in chemists' notation for kernel `K`.
///
/// [`TwoBodyEngine::compute`] returns a row-major
/// `size(a) × size(b) × size(c) × size(d)` block borrowed from the engine,
/// valid until the next call.
#[derive(Debug)]
pub struct TwoBodyEngine<K: TwoBodyKernel> {
    nprim: usize,
    lmax: usize,
    deriv_order: usize,
    params: K::Params,
    kernel: Option<K>,
    primdata: PrimDataBlock,
    scratch: Vec<f64>,
    /// Required record fields per canonical `(la, lb, lc, ld)`.
    fields: Vec<FieldSet>,
    ss_shortcut: bool,
}

impl<K: TwoBodyKernel> TwoBodyEngine<K> {
    pub fn new(max_nprim: usize, max_l: usize, deriv_order: usize, params: K::Params) -> Result<Self> {
        let integral = K::KIND.name();
        if max_l > MAX_AM_ERI {
            return Err(Error::AngularMomentumTooHigh { integral, requested: max_l, supported: MAX_AM_ERI });
        }
        if deriv_order > DERIV_ERI_ORDER {
            return Err(Error::DerivativeOrderTooHigh { integral, requested: deriv_order, supported: DERIV_ERI_ORDER });
        }
        let engine = TwoBodyEngine::build(max_nprim, max_l, deriv_order, params);
        debug!(
            kernel = integral,
            max_nprim,
            max_l,
            deriv_order,
            records = engine.primdata.capacity(),
            scratch = engine.scratch.len(),
            "two-body engine constructed"
        );
        Ok(engine)
    }

    pub fn from_config(cfg: &TwoBodyConfig<K::Params>) -> Result<Self> {
        TwoBodyEngine::new(cfg.max_nprim, cfg.max_l, cfg.deriv_order, cfg.params.clone())
    }

    fn build(nprim: usize, lmax: usize, deriv_order: usize, params: K::Params) -> Self {
        let mmax = 4 * lmax + deriv_order;
        let kernel = K::new(&params, mmax, DEFAULT_PRECISION);
        let mut primdata = PrimDataBlock::new(nprim.pow(4), 0, mmax + 1);
        init_eri(&mut primdata, lmax, deriv_order);

        let nl = lmax + 1;
        let mut fields = Vec::with_capacity(nl.pow(4));
        for la in 0..nl {
            for lb in 0..nl {
                for lc in 0..nl {
                    for ld in 0..nl {
                        fields.push(required_fields_eri(la, lb, lc, ld));
                    }
                }
            }
        }

        TwoBodyEngine {
            nprim,
            lmax,
            deriv_order,
            params,
            kernel: Some(kernel),
            primdata,
            scratch: vec![0.0; ncart(lmax).pow(4)],
            fields,
            ss_shortcut: true,
        }
    }

    pub fn max_nprim(&self) -> usize { self.nprim }
    pub fn max_l(&self) -> usize { self.lmax }
    pub fn deriv_order(&self) -> usize { self.deriv_order }
    pub fn params(&self) -> &K::Params { &self.params }
    pub fn is_usable(&self) -> bool { self.kernel.is_some() && self.primdata.is_initialized() }

    #[cfg(test)]
    pub(crate) fn set_ss_shortcut(&mut self, on: bool) { self.ss_shortcut = on; }

    /// Compute `(s1 s2|s3 s4)`.
    ///
    /// # Panics
    /// On a placeholder engine, on shells with more than one contraction, and
    /// on shells exceeding the primitive or angular-momentum capacity.
    pub fn compute(&mut self, s1: &Shell, s2: &Shell, s3: &Shell, s4: &Shell) -> Result<&[f64]> {
        assert!(self.is_usable(), "compute() called on a default-constructed TwoBodyEngine");
        let shells = [s1, s2, s3, s4];
        assert!(shells.iter().all(|s| s.ncontr() == 1), "shells with multiple contractions are not supported");
        assert_eq!(self.deriv_order, 0, "two-body derivative integrals are not available");

        let ls = shells.map(|s| s.l());
        let lmax = ls.iter().copied().max().unwrap_or(0);
        assert!(lmax <= self.lmax, "shell angular momentum {} above engine maximum {}", lmax, self.lmax);
        let nprim: usize = shells.iter().map(|s| s.nprim()).product();
        assert!(
            nprim <= self.primdata.capacity(),
            "{} primitive quartets exceed engine capacity {}",
            nprim,
            self.primdata.capacity()
        );

        let swaps = Swaps::for_quartet(ls);
        let canon = swaps.canonical_order().map(|i| shells[i]);
        let cl = canon.map(|s| s.l());
        let nl = self.lmax + 1;
        let fields = self.fields[((cl[0] * nl + cl[1]) * nl + cl[2]) * nl + cl[3]];
        let use_scratch = swaps.any() || shells.iter().any(|s| s.pure());
        let shortcut = lmax == 0 && self.ss_shortcut;
        trace!(kernel = K::KIND.name(), ?ls, ?swaps, nprim, "two-body compute");

        let Some(kernel) = self.kernel.as_ref() else {
            panic!("two-body engine without a kernel");
        };
        let mut p = 0;
        for p0 in 0..canon[0].nprim() {
            for p1 in 0..canon[1].nprim() {
                for p2 in 0..canon[2].nprim() {
                    for p3 in 0..canon[3].nprim() {
                        compute_primdata(
                            &mut self.primdata.records[p],
                            canon,
                            [p0, p1, p2, p3],
                            fields,
                            self.deriv_order,
                            kernel,
                        );
                        p += 1;
                    }
                }
            }
        }
        self.primdata.contrdepth = p;

        if shortcut {
            let sum: f64 = self.primdata.records[..p].iter().map(|r| r.erep_ss[0]).sum();
            self.primdata.stack[0] = sum;
            return Ok(&self.primdata.stack[..1]);
        }

        build_eri(cl[0], cl[1], cl[2], cl[3], &mut self.primdata);
        if !use_scratch {
            return Ok(self.primdata.result());
        }

        // solid harmonics one axis at a time, in canonical order
        let mut dims = canon.map(|s| s.cartesian_size());
        let mut src = Buffer::Stack;
        for axis in 0..4 {
            if !canon[axis].pure() {
                continue;
            }
            let n1: usize = dims[..axis].iter().product();
            let n2: usize = dims[axis + 1..].iter().product();
            let (from, to) = split_buffers(&mut self.primdata.stack, &mut self.scratch, src);
            match axis {
                0 => transform_first(cl[0], n2, from, to),
                3 => transform_last(n1, cl[3], from, to),
                _ => transform_inner(n1, cl[axis], n2, from, to),
            }
            dims[axis] = canon[axis].size();
            src = src.other();
        }

        {
            let (from, to) = split_buffers(&mut self.primdata.stack, &mut self.scratch, src);
            unpermute(from, to, dims, swaps)?;
        }
        let n: usize = dims.iter().product();
        Ok(match src.other() {
            Buffer::Scratch => &self.scratch[..n],
            Buffer::Stack => &self.primdata.stack[..n],
        })
    }
}

impl<K: TwoBodyKernel> Clone for TwoBodyEngine<K> {
    /// Deep copy with its own kernel workspace.
    fn clone(&self) -> Self {
        if !self.is_usable() {
            return TwoBodyEngine::default();
        }
        let mut engine = TwoBodyEngine::build(self.nprim, self.lmax, self.deriv_order, self.params.clone());
        engine.ss_shortcut = self.ss_shortcut;
        engine
    }
}

impl<K: TwoBodyKernel> Default for TwoBodyEngine<K> {
    /// Unusable placeholder.
    fn default() -> Self {
        TwoBodyEngine {
            nprim: 0,
            lmax: 0,
            deriv_order: 0,
            params: K::Params::default(),
            kernel: None,
            primdata: PrimDataBlock::default(),
            scratch: Vec::new(),
            fields: Vec::new(),
            ss_shortcut: true,
        }
    }
}

impl<K: TwoBodyKernel> Drop for TwoBodyEngine<K> {
    fn drop(&mut self) {
        recur::cleanup(&mut self.primdata);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boys::ContractedGeminal;
    use crate::int2e::kernel::{Cgtg, CgtgTimesCoulomb, Coulomb, DelCgtgSquare};
    use crate::types::{build_direction, cart_components, cart_index, lower};
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    fn shell(l: usize, pure: bool, alpha: &[f64], coeff: &[f64], origin: [f64; 3]) -> Shell {
        let mut sh = Shell::single(l, pure, alpha.to_vec(), coeff.to_vec(), origin).unwrap();
        sh.renorm();
        sh
    }

    fn basis() -> Vec<Shell> {
        vec![
            shell(0, false, &[2.1, 0.45], &[0.4, 0.6], [0.0, 0.1, -0.2]),
            shell(1, false, &[1.3, 0.3], &[0.5, 0.5], [0.7, -0.2, 0.3]),
            shell(2, false, &[0.9], &[1.0], [-0.4, 0.5, 0.2]),
            shell(2, true, &[1.1, 0.5], &[0.3, 0.7], [0.2, -0.6, -0.5]),
        ]
    }

    fn idx(n: [usize; 4], i: [usize; 4]) -> usize {
        ((i[0] * n[1] + i[1]) * n[2] + i[2]) * n[3] + i[3]
    }

    fn unit_s(alpha: f64, origin: [f64; 3]) -> Shell {
        Shell::single(0, false, vec![alpha], vec![1.0], origin).unwrap()
    }

    /// Check (ab|cd) against (ba|cd), (ab|dc) and (cd|ab).
    fn check_symmetry<K: TwoBodyKernel>(engine: &mut TwoBodyEngine<K>, sh: [&Shell; 4]) {
        let [a, b, c, d] = sh;
        let n = sh.map(|s| s.size());
        let abcd = engine.compute(a, b, c, d).unwrap().to_vec();
        let bacd = engine.compute(b, a, c, d).unwrap().to_vec();
        let abdc = engine.compute(a, b, d, c).unwrap().to_vec();
        let cdab = engine.compute(c, d, a, b).unwrap().to_vec();
        assert_eq!(abcd.len(), n.iter().product::<usize>());
        for i0 in 0..n[0] {
            for i1 in 0..n[1] {
                for i2 in 0..n[2] {
                    for i3 in 0..n[3] {
                        let v = abcd[idx(n, [i0, i1, i2, i3])];
                        let tol = 1e-12 + 1e-10 * v.abs();
                        assert!((v - bacd[idx([n[1], n[0], n[2], n[3]], [i1, i0, i2, i3])]).abs() < tol);
                        assert!((v - abdc[idx([n[0], n[1], n[3], n[2]], [i0, i1, i3, i2])]).abs() < tol);
                        assert!((v - cdab[idx([n[2], n[3], n[0], n[1]], [i2, i3, i0, i1])]).abs() < tol);
                    }
                }
            }
        }
    }

    #[test]
    fn concentric_ssss() {
        let mut engine = TwoBodyEngine::<Coulomb>::new(1, 0, 0, ()).unwrap();
        let s = unit_s(1.0, [0.0; 3]);
        let v = engine.compute(&s, &s, &s, &s).unwrap();
        assert_eq!(v.len(), 1);
        assert_relative_eq!(v[0], PI.powf(2.5) / 4.0, max_relative = 1e-14);
    }

    #[test]
    fn coulomb_permutational_symmetry() {
        let shells = basis();
        let mut engine = TwoBodyEngine::<Coulomb>::new(2, 2, 0, ()).unwrap();
        for a in &shells {
            for b in &shells {
                for c in &shells {
                    for d in [&shells[0], &shells[3]] {
                        check_symmetry(&mut engine, [a, b, c, d]);
                    }
                }
            }
        }
    }

    #[test]
    fn geminal_kernels_share_the_symmetry() {
        let shells = basis();
        let geminal: ContractedGeminal = vec![(0.8, 0.6), (2.5, 0.3)];
        let quartets = [[0, 1, 2, 3], [3, 0, 1, 1], [2, 2, 0, 1]];
        let mut g = TwoBodyEngine::<Cgtg>::new(2, 2, 0, geminal.clone()).unwrap();
        let mut gc = TwoBodyEngine::<CgtgTimesCoulomb>::new(2, 2, 0, geminal.clone()).unwrap();
        let mut dg = TwoBodyEngine::<DelCgtgSquare>::new(2, 2, 0, geminal).unwrap();
        for q in quartets {
            let sh = q.map(|i| &shells[i]);
            check_symmetry(&mut g, sh);
            check_symmetry(&mut gc, sh);
            check_symmetry(&mut dg, sh);
        }
    }

    #[test]
    fn ssss_shortcut_matches_general_path() {
        let a = shell(0, false, &[3.0, 0.8], &[0.3, 0.7], [0.0, 0.0, 0.0]);
        let b = shell(0, false, &[1.2], &[1.0], [0.0, 0.9, 0.0]);
        let mut fast = TwoBodyEngine::<Coulomb>::new(2, 1, 0, ()).unwrap();
        let mut slow = fast.clone();
        slow.set_ss_shortcut(false);
        let x = fast.compute(&a, &b, &b, &a).unwrap()[0];
        let y = slow.compute(&a, &b, &b, &a).unwrap()[0];
        assert_relative_eq!(x, y, max_relative = 1e-13);

        let gem = vec![(1.5, 1.0)];
        let mut fast = TwoBodyEngine::<Cgtg>::new(2, 0, 0, gem).unwrap();
        let mut slow = fast.clone();
        slow.set_ss_shortcut(false);
        let x = fast.compute(&a, &a, &b, &b).unwrap()[0];
        let y = slow.compute(&a, &a, &b, &b).unwrap()[0];
        assert_relative_eq!(x, y, max_relative = 1e-13);
    }

    #[test]
    fn pure_shell_equals_transformed_cartesian() {
        let shells = basis();
        let (s, p) = (&shells[0], &shells[1]);
        let mut dc = shells[3].clone();
        dc.contr[0].pure = false;
        let dp = &shells[3];
        let mut engine = TwoBodyEngine::<Coulomb>::new(2, 2, 0, ()).unwrap();

        // d on the first center
        let cart = engine.compute(&dc, s, p, s).unwrap().to_vec();
        let pure = engine.compute(dp, s, p, s).unwrap().to_vec();
        let mut expect = vec![0.0; 15];
        transform_first(2, 3, &cart, &mut expect);
        for (x, y) in pure.iter().zip(&expect) {
            assert_relative_eq!(*x, *y, epsilon = 1e-13, max_relative = 1e-11);
        }

        // d on the third center
        let cart = engine.compute(s, p, &dc, s).unwrap().to_vec();
        let pure = engine.compute(s, p, dp, s).unwrap().to_vec();
        let mut expect = vec![0.0; 15];
        transform_inner(3, 2, 1, &cart, &mut expect);
        for (x, y) in pure.iter().zip(&expect) {
            assert_relative_eq!(*x, *y, epsilon = 1e-13, max_relative = 1e-11);
        }
    }

    #[test]
    fn concentric_geminal_ssss() {
        // ∫∫ e^{-2r1²} e^{-γ r12²} e^{-2r2²} = π³/(8(1+γ)^{3/2})
        let gamma = 0.7;
        let mut engine = TwoBodyEngine::<Cgtg>::new(1, 0, 0, vec![(gamma, 1.0)]).unwrap();
        let s = unit_s(1.0, [0.0; 3]);
        let v = engine.compute(&s, &s, &s, &s).unwrap()[0];
        assert_relative_eq!(v, PI.powi(3) / (8.0 * (1.0 + gamma).powf(1.5)), max_relative = 1e-13);
    }

    #[test]
    fn gradient_squared_is_exponent_derivative_of_geminal() {
        // (∇e^{-γr²})² = 4γ² r² e^{-2γr²} = -4γ² d/dβ e^{-βr²} at β = 2γ
        let shells = basis();
        let sh = [&shells[1], &shells[0], &shells[0], &shells[1]];
        let gamma = 0.6;
        let h = 1e-4;
        let geminal_at = |beta: f64| -> Vec<f64> {
            let mut e = TwoBodyEngine::<Cgtg>::new(2, 1, 0, vec![(beta, 1.0)]).unwrap();
            e.compute(sh[0], sh[1], sh[2], sh[3]).unwrap().to_vec()
        };
        let plus = geminal_at(2.0 * gamma + h);
        let minus = geminal_at(2.0 * gamma - h);
        let mut dg = TwoBodyEngine::<DelCgtgSquare>::new(2, 1, 0, vec![(gamma, 1.0)]).unwrap();
        let got = dg.compute(sh[0], sh[1], sh[2], sh[3]).unwrap().to_vec();
        for k in 0..got.len() {
            let expect = -4.0 * gamma * gamma * (plus[k] - minus[k]) / (2.0 * h);
            assert!((got[k] - expect).abs() < 1e-7 * (1.0 + expect.abs()), "{}: {} vs {}", k, got[k], expect);
        }
    }

    fn split(n: [usize; 4], mut flat: usize) -> [usize; 4] {
        let mut i = [0; 4];
        for axis in (0..4).rev() {
            i[axis] = flat % n[axis];
            flat /= n[axis];
        }
        i
    }

    /// Raise bare primitive `which` by one quantum and compare against the
    /// center derivative of the lower shell:
    /// `(n+1_k| = [∂/∂A_k (n| + n_k (n-1_k|] / 2α`.
    fn check_center_derivative<K: TwoBodyKernel>(
        engine: &mut TwoBodyEngine<K>,
        ls: [usize; 4],
        alphas: [f64; 4],
        origins: [[f64; 3]; 4],
        which: usize,
    ) {
        let h = 1e-4;
        let run = |engine: &mut TwoBodyEngine<K>, l: [usize; 4], o: [[f64; 3]; 4]| -> Vec<f64> {
            let sh = [0, 1, 2, 3].map(|i: usize| Shell::single(l[i], false, vec![alphas[i]], vec![1.0], o[i]).unwrap());
            engine.compute(&sh[0], &sh[1], &sh[2], &sh[3]).unwrap().to_vec()
        };
        let hi = run(engine, ls, origins);
        let mut lo = ls;
        lo[which] -= 1;
        let mut shifted = Vec::new();
        for k in 0..3 {
            let (mut plus, mut minus) = (origins, origins);
            plus[which][k] += h;
            minus[which][k] -= h;
            shifted.push((run(engine, lo, plus), run(engine, lo, minus)));
        }
        let mut lo2 = lo;
        let lower2 = if lo[which] > 0 {
            lo2[which] -= 1;
            Some(run(engine, lo2, origins))
        } else {
            None
        };

        let comps = ls.map(|l| cart_components(l).collect::<Vec<_>>());
        let n = ls.map(ncart);
        let (nlo, nlo2) = (lo.map(ncart), lo2.map(ncart));
        for (flat, &got) in hi.iter().enumerate() {
            let mut ix = split(n, flat);
            let e = comps[which][ix[which]];
            let k = build_direction(e);
            let m = lower(e, k);
            ix[which] = cart_index(m[0], m[1], m[2]);
            let mut expect = (shifted[k].0[idx(nlo, ix)] - shifted[k].1[idx(nlo, ix)]) / (2.0 * h);
            if let (Some(v), true) = (&lower2, m[k] > 0) {
                let mm = lower(m, k);
                ix[which] = cart_index(mm[0], mm[1], mm[2]);
                expect += m[k] as f64 * v[idx(nlo2, ix)];
            }
            expect /= 2.0 * alphas[which];
            assert!((got - expect).abs() < 1e-6 * (1.0 + expect.abs()), "{:?} center {}: {} vs {}", ls, which, got, expect);
        }
    }

    const ALPHAS: [f64; 4] = [0.9, 0.7, 1.1, 0.8];
    const ORIGINS: [[f64; 3]; 4] = [[0.0, 0.0, 0.0], [0.0, 0.9, 0.3], [-0.5, 0.2, 0.8], [0.6, -0.4, -0.1]];

    #[test]
    fn g_and_f_shells_follow_center_derivatives() {
        let mut engine = TwoBodyEngine::<Coulomb>::new(1, MAX_AM_ERI, 0, ()).unwrap();
        check_center_derivative(&mut engine, [4, 3, 1, 4], ALPHAS, ORIGINS, 0);
        check_center_derivative(&mut engine, [4, 3, 1, 4], ALPHAS, ORIGINS, 1);
        check_center_derivative(&mut engine, [4, 3, 1, 4], ALPHAS, ORIGINS, 3);
        check_center_derivative(&mut engine, [2, 1, 3, 0], ALPHAS, ORIGINS, 2);
    }

    #[test]
    fn g_and_f_shells_share_the_symmetry() {
        let g = shell(4, false, &[0.9], &[1.0], ORIGINS[0]);
        let f = shell(3, true, &[0.7], &[1.0], ORIGINS[1]);
        let p = shell(1, false, &[1.1], &[1.0], ORIGINS[2]);
        let g2 = shell(4, true, &[0.8], &[1.0], ORIGINS[3]);
        let mut engine = TwoBodyEngine::<Coulomb>::new(1, MAX_AM_ERI, 0, ()).unwrap();
        check_symmetry(&mut engine, [&g, &f, &p, &g2]);
    }

    #[test]
    fn geminal_p_shells_follow_center_derivatives() {
        let params = vec![(0.8, 0.6), (2.1, 0.3)];
        let mut plain = TwoBodyEngine::<Cgtg>::new(1, 1, 0, params.clone()).unwrap();
        let mut coulomb = TwoBodyEngine::<CgtgTimesCoulomb>::new(1, 1, 0, params).unwrap();
        for which in 0..4 {
            check_center_derivative(&mut plain, [1, 1, 1, 1], ALPHAS, ORIGINS, which);
            check_center_derivative(&mut coulomb, [1, 1, 1, 1], ALPHAS, ORIGINS, which);
        }
    }

    #[test]
    fn capacity_boundary_is_inclusive() {
        // max_nprim⁴ primitive quartets, summed against one-primitive calls
        let exps = [1.2, 0.35];
        let coef = [0.4, 0.6];
        let ls = [1, 0, 1, 0];
        let contracted = [0, 1, 2, 3].map(|i: usize| Shell::single(ls[i], false, exps.to_vec(), coef.to_vec(), ORIGINS[i]).unwrap());
        let mut engine = TwoBodyEngine::<Coulomb>::new(2, 1, 0, ()).unwrap();
        let got = engine.compute(&contracted[0], &contracted[1], &contracted[2], &contracted[3]).unwrap().to_vec();

        let mut expect = vec![0.0; got.len()];
        for p in 0..16_usize {
            let q = [(p >> 3) & 1, (p >> 2) & 1, (p >> 1) & 1, p & 1];
            let prim = [0, 1, 2, 3].map(|i: usize| Shell::single(ls[i], false, vec![exps[q[i]]], vec![coef[q[i]]], ORIGINS[i]).unwrap());
            let v = engine.compute(&prim[0], &prim[1], &prim[2], &prim[3]).unwrap();
            for (e, x) in expect.iter_mut().zip(v) {
                *e += x;
            }
        }
        for (g, e) in got.iter().zip(&expect) {
            assert_relative_eq!(*g, *e, epsilon = 1e-14, max_relative = 1e-12);
        }
    }

    #[test]
    fn construction_checks_capability() {
        let err = TwoBodyEngine::<Coulomb>::new(1, MAX_AM_ERI + 1, 0, ()).unwrap_err();
        assert!(matches!(err, Error::AngularMomentumTooHigh { integral: "Coulomb", .. }));
        let err = TwoBodyEngine::<Cgtg>::new(1, 1, 1, vec![(1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, Error::DerivativeOrderTooHigh { .. }));
    }

    #[test]
    #[should_panic(expected = "exceed engine capacity")]
    fn capacity_exceeded_panics() {
        let mut engine = TwoBodyEngine::<Coulomb>::new(1, 0, 0, ()).unwrap();
        let two = shell(0, false, &[1.0, 0.3], &[0.5, 0.5], [0.0; 3]);
        let one = unit_s(1.0, [0.0; 3]);
        let _ = engine.compute(&two, &one, &one, &one);
    }

    #[test]
    #[should_panic(expected = "default-constructed")]
    fn placeholder_panics() {
        let mut engine = TwoBodyEngine::<Coulomb>::new(1, 0, 0, ()).unwrap();
        let moved = std::mem::take(&mut engine);
        assert!(moved.is_usable());
        let s = unit_s(1.0, [0.0; 3]);
        let _ = engine.compute(&s, &s, &s, &s);
    }

    #[test]
    fn config_from_json() {
        let cfg: TwoBodyConfig<ContractedGeminal> =
            serde_json::from_str(r#"{"max_nprim":2,"max_l":1,"params":[[1.0,0.5],[3.0,0.25]]}"#).unwrap();
        let engine = TwoBodyEngine::<CgtgTimesCoulomb>::from_config(&cfg).unwrap();
        assert_eq!(engine.max_l(), 1);
        assert_eq!(engine.params(), &vec![(1.0, 0.5), (3.0, 0.25)]);
        let coulomb: TwoBodyConfig = serde_json::from_str(r#"{"max_l":3}"#).unwrap();
        assert_eq!(coulomb.max_nprim, 6);
        assert!(TwoBodyEngine::<Coulomb>::from_config(&coulomb).is_ok());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(12))]
        #[test]
        fn symmetry_holds_for_random_geometry(
            xs in proptest::collection::vec(-1.5f64..1.5, 12),
            alphas in proptest::collection::vec(0.2f64..3.0, 4),
        ) {
            let origin = |i: usize| [xs[3 * i], xs[3 * i + 1], xs[3 * i + 2]];
            let a = shell(1, false, &[alphas[0]], &[1.0], origin(0));
            let b = shell(0, false, &[alphas[1]], &[1.0], origin(1));
            let c = shell(2, true, &[alphas[2]], &[1.0], origin(2));
            let d = shell(1, false, &[alphas[3]], &[1.0], origin(3));
            let mut engine = TwoBodyEngine::<Coulomb>::new(1, 2, 0, ()).unwrap();
            check_symmetry(&mut engine, [&a, &b, &c, &d]);
        }
    }
}
