//! Reusable evaluator of one-body integrals over pairs of shells.

use std::sync::Arc;

use ndarray::{ArrayView2, ArrayViewMut2};
use tracing::{debug, trace};

use super::prim::compute_primdata;
use super::{OneBodyConfig, Operator};
use crate::boys::BoysEval;
use crate::error::{Error, Result};
use crate::primdata::{split_buffers, Buffer, FieldSet, PrimDataBlock};
use crate::recur::{self, build_onebody, init_onebody, max_am_onebody, required_fields_onebody};
use crate::shell::Shell;
use crate::transform::{tform, tform_cols, tform_rows};
use crate::types::{ncart, DEFAULT_PRECISION, DERIV_ONEBODY_ORDER};

/// Evaluates `(a|O|b)` for one operator over contracted shells up to fixed
/// primitive and angular-momentum bounds.
///
/// The result of [`OneBodyEngine::compute`] is a row-major `size(a) × size(b)`
/// block borrowed from the engine's own buffers; it stays valid until the next
/// call. One engine serves one thread; clone it for more.
#[derive(Debug)]
pub struct OneBodyEngine {
    op: Operator,
    nprim: usize,
    lmax: usize,
    deriv_order: usize,
    charges: Vec<(f64, [f64; 3])>,
    primdata: PrimDataBlock,
    scratch: Vec<f64>,
    /// Required record fields per `(l_bra, l_ket)`, row-major over `0..=lmax`.
    fields: Vec<FieldSet>,
    boys: Option<Arc<BoysEval>>,
    ss_shortcut: bool,
}

impl OneBodyEngine {
    /// Engine for `op` over shells with at most `max_nprim` primitives and
    /// angular momentum `max_l`.
    pub fn new(op: Operator, max_nprim: usize, max_l: usize, deriv_order: usize) -> Result<Self> {
        let supported = max_am_onebody(op);
        if max_l > supported {
            return Err(Error::AngularMomentumTooHigh { integral: op.name(), requested: max_l, supported });
        }
        if deriv_order > DERIV_ONEBODY_ORDER {
            return Err(Error::DerivativeOrderTooHigh {
                integral: op.name(),
                requested: deriv_order,
                supported: DERIV_ONEBODY_ORDER,
            });
        }
        let engine = OneBodyEngine::build(op, max_nprim, max_l, deriv_order, Vec::new());
        debug!(
            ?op,
            max_nprim,
            max_l,
            deriv_order,
            scratch = engine.scratch.len(),
            "one-body engine constructed"
        );
        Ok(engine)
    }

    pub fn from_config(cfg: &OneBodyConfig) -> Result<Self> {
        let mut engine = OneBodyEngine::new(cfg.operator, cfg.max_nprim, cfg.max_l, cfg.deriv_order)?;
        engine.set_charges(&cfg.charges);
        Ok(engine)
    }

    /// Allocate records, scratch and kernel workspace; bounds are already checked.
    fn build(op: Operator, nprim: usize, lmax: usize, deriv_order: usize, charges: Vec<(f64, [f64; 3])>) -> Self {
        let nelecpot = if op == Operator::Nuclear { 2 * lmax + deriv_order + 1 } else { 0 };
        let mut primdata = PrimDataBlock::new(nprim * nprim, nelecpot, 0);
        init_onebody(&mut primdata, op, lmax, deriv_order);

        let mut fields = Vec::with_capacity((lmax + 1) * (lmax + 1));
        for la in 0..=lmax {
            for lb in 0..=lmax {
                fields.push(required_fields_onebody(op, la, lb));
            }
        }
        let boys = (op == Operator::Nuclear)
            .then(|| BoysEval::instance(2 * lmax + deriv_order, DEFAULT_PRECISION));

        OneBodyEngine {
            op,
            nprim,
            lmax,
            deriv_order,
            charges,
            primdata,
            scratch: vec![0.0; ncart(lmax) * ncart(lmax)],
            fields,
            boys,
            ss_shortcut: true,
        }
    }

    /// Replace the point charges `(q, position)` of the nuclear-attraction operator.
    pub fn set_charges(&mut self, charges: &[(f64, [f64; 3])]) {
        self.charges = charges.to_vec();
    }

    pub fn charges(&self) -> &[(f64, [f64; 3])] { &self.charges }
    pub fn operator(&self) -> Operator { self.op }
    pub fn max_nprim(&self) -> usize { self.nprim }
    pub fn max_l(&self) -> usize { self.lmax }
    pub fn deriv_order(&self) -> usize { self.deriv_order }

    /// Whether this engine can compute (not a `Default` placeholder).
    pub fn is_usable(&self) -> bool { self.primdata.is_initialized() }

    #[cfg(test)]
    pub(crate) fn set_ss_shortcut(&mut self, on: bool) { self.ss_shortcut = on; }

    /// Compute `(s1|O|s2)`.
    ///
    /// # Panics
    /// On a placeholder engine, on shells with more than one contraction, and
    /// on shells exceeding the primitive or angular-momentum capacity.
    pub fn compute(&mut self, s1: &Shell, s2: &Shell) -> Result<&[f64]> {
        assert!(self.is_usable(), "compute() called on a default-constructed OneBodyEngine");
        assert!(s1.ncontr() == 1 && s2.ncontr() == 1, "shells with multiple contractions are not supported");
        assert_eq!(self.deriv_order, 0, "one-body derivative integrals are not available");

        let (l1, l2) = (s1.l(), s2.l());
        let lmax = l1.max(l2);
        assert!(lmax <= self.lmax, "shell angular momentum {} above engine maximum {}", lmax, self.lmax);
        let nprim12 = s1.nprim() * s2.nprim();
        assert!(
            nprim12 <= self.primdata.capacity(),
            "{} primitive pairs exceed engine capacity {}",
            nprim12,
            self.primdata.capacity()
        );

        let nuclear = self.op == Operator::Nuclear;
        if nuclear && self.charges.is_empty() {
            return Err(Error::NoNuclei);
        }

        let swap = l1 < l2;
        let (bra, ket) = if swap { (s2, s1) } else { (s1, s2) };
        let (lbra, lket) = (bra.l(), ket.l());
        let fields = self.fields[lbra * (self.lmax + 1) + lket];
        let tform_needed = s1.pure() || s2.pure();
        let use_scratch = swap || nuclear;
        let shortcut = lmax == 0 && self.ss_shortcut;

        let (ncart1, ncart2) = (s1.cartesian_size(), s2.cartesian_size());
        let ncart12 = ncart1 * ncart2;
        if use_scratch {
            self.scratch[..ncart12].fill(0.0);
        }
        if shortcut {
            self.primdata.stack[0] = 0.0;
        }
        trace!(op = ?self.op, l1, l2, swap, nprim12, "one-body compute");

        let ncomponents = if nuclear { self.charges.len() } else { 1 };
        for oset in 0..ncomponents {
            let charge = nuclear.then(|| self.charges[oset]);
            let mut p12 = 0;
            for p1 in 0..bra.nprim() {
                for p2 in 0..ket.nprim() {
                    compute_primdata(
                        &mut self.primdata.records[p12],
                        bra,
                        p1,
                        ket,
                        p2,
                        self.op,
                        charge,
                        fields,
                        self.deriv_order,
                        self.boys.as_deref(),
                    );
                    p12 += 1;
                }
            }
            self.primdata.contrdepth = p12;

            if shortcut {
                let records = &self.primdata.records[..p12];
                let sum: f64 = match self.op {
                    Operator::Overlap => records.iter().map(|r| r.overlap_ss).sum(),
                    Operator::Kinetic => records.iter().map(|r| r.kinetic_ss).sum(),
                    Operator::Nuclear => records.iter().map(|r| r.elecpot_ss[0]).sum(),
                };
                self.primdata.stack[0] += sum;
                continue;
            }

            build_onebody(self.op, lbra, lket, &mut self.primdata);
            if use_scratch {
                let braket = ArrayView2::from_shape((ncart(lbra), ncart(lket)), self.primdata.result())?;
                let mut set12 = ArrayViewMut2::from_shape((ncart1, ncart2), &mut self.scratch[..ncart12])?;
                if swap {
                    set12 += &braket.t();
                } else {
                    set12 += &braket;
                }
            }
        }

        if shortcut {
            return Ok(&self.primdata.stack[..1]);
        }

        let src = if use_scratch { Buffer::Scratch } else { Buffer::Stack };
        if !tform_needed {
            return Ok(match src {
                Buffer::Scratch => &self.scratch[..ncart12],
                Buffer::Stack => self.primdata.result(),
            });
        }

        {
            let (from, to) = split_buffers(&mut self.primdata.stack, &mut self.scratch, src);
            match (s1.pure(), s2.pure()) {
                (true, true) => tform(l1, l2, from, to),
                (true, false) => tform_rows(l1, ncart2, from, to),
                _ => tform_cols(ncart1, l2, from, to),
            }
        }
        let n = s1.size() * s2.size();
        Ok(match src.other() {
            Buffer::Scratch => &self.scratch[..n],
            Buffer::Stack => &self.primdata.stack[..n],
        })
    }
}

impl Clone for OneBodyEngine {
    /// Deep copy with its own kernel workspace.
    fn clone(&self) -> Self {
        if !self.is_usable() {
            return OneBodyEngine::default();
        }
        let mut engine = OneBodyEngine::build(self.op, self.nprim, self.lmax, self.deriv_order, self.charges.clone());
        engine.ss_shortcut = self.ss_shortcut;
        engine
    }
}

impl Default for OneBodyEngine {
    /// Unusable placeholder.
    fn default() -> Self {
        OneBodyEngine {
            op: Operator::Overlap,
            nprim: 0,
            lmax: 0,
            deriv_order: 0,
            charges: Vec::new(),
            primdata: PrimDataBlock::default(),
            scratch: Vec::new(),
            fields: Vec::new(),
            boys: None,
            ss_shortcut: true,
        }
    }
}

impl Drop for OneBodyEngine {
    fn drop(&mut self) {
        recur::cleanup(&mut self.primdata);
    }
}
