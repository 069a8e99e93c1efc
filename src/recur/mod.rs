//! Obara–Saika / Head-Gordon–Pople recurrence kernels.
//!
//! Every kernel reads the first `contrdepth` records of a
//! [`PrimDataBlock`], builds the needed intermediates by vertical recurrence
//! (VRR) on the first center of each pair, contracts over primitives and
//! moves angular momentum onto the second center by horizontal recurrence
//! (HRR). The contracted Cartesian block lands in `stack[target]`, row-major
//! over the shells in the order the kernel was called with.
//!
//! Kernels expect the canonical shell order of the engines: `la >= lb` for
//! one-body and `la >= lb`, `lc >= ld`, `la + lb <= lc + ld` for two-body.
//! The recurrences themselves are valid for any order.

pub mod eri;
mod hrr;
pub mod onebody;

use tracing::trace;

use crate::int1e::Operator;
use crate::primdata::{FieldSet, PrimDataBlock};
use crate::types::{ncart, ncart_upto, MAX_AM_ELECPOT, MAX_AM_ERI, MAX_AM_KINETIC, MAX_AM_OVERLAP};

pub(crate) use hrr::hrr;

/// Kernel-private scratch owned by a [`PrimDataBlock`].
#[derive(Debug, Default)]
pub struct Workspace {
    lmax: usize,
    vrr: Vec<f64>,
    vrr2: Vec<f64>,
    accum: Vec<f64>,
    hrr: [Vec<f64>; 2],
}

impl Workspace {
    fn with_capacity(lmax: usize, vrr: usize, vrr2: usize, accum: usize, hrr: usize) -> Self {
        Workspace {
            lmax,
            vrr: Vec::with_capacity(vrr),
            vrr2: Vec::with_capacity(vrr2),
            accum: Vec::with_capacity(accum),
            hrr: [Vec::with_capacity(hrr), Vec::with_capacity(hrr)],
        }
    }

    #[inline] pub fn lmax(&self) -> usize { self.lmax }
}

/// Largest angular momentum the one-body kernel of `op` supports.
pub fn max_am_onebody(op: Operator) -> usize {
    match op {
        Operator::Overlap => MAX_AM_OVERLAP,
        Operator::Kinetic => MAX_AM_KINETIC,
        Operator::Nuclear => MAX_AM_ELECPOT,
    }
}

/// Size the workspace and output stack of `block` for one-body integrals up to `lmax`.
pub fn init_onebody(block: &mut PrimDataBlock, op: Operator, lmax: usize, deriv_order: usize) {
    assert!(lmax <= max_am_onebody(op), "{:?} kernels support l <= {}", op, max_am_onebody(op));
    assert_eq!(deriv_order, 0, "one-body derivative kernels are not available");
    let nall = ncart_upto(2 * lmax);
    let (vrr, vrr2) = match op {
        Operator::Overlap => (nall, 0),
        Operator::Nuclear => (nall * (2 * lmax + 1), 0),
        Operator::Kinetic => {
            let n = ncart_upto(lmax) * ncart_upto(lmax);
            (n, n)
        }
    };
    block.work = Some(Workspace::with_capacity(lmax, vrr, vrr2, nall, nall * ncart(lmax)));
    block.stack = vec![0.0; ncart(lmax) * ncart(lmax)];
    block.target = 0..0;
    trace!(?op, lmax, vrr, "one-body kernel workspace initialized");
}

/// Size the workspace and output stack of `block` for electron-repulsion-type
/// integrals up to `lmax`.
pub fn init_eri(block: &mut PrimDataBlock, lmax: usize, deriv_order: usize) {
    assert!(lmax <= MAX_AM_ERI, "two-body kernels support l <= {}", MAX_AM_ERI);
    assert_eq!(deriv_order, 0, "two-body derivative kernels are not available");
    let nall = ncart_upto(2 * lmax);
    let nc = ncart(lmax);
    let vrr = nall * nall * (4 * lmax + 1);
    let hrr = (nall * nall * nc).max(nc * nc * nc * nall);
    block.work = Some(Workspace::with_capacity(lmax, vrr, nc * nc * nall, nall * nall, hrr));
    block.stack = vec![0.0; nc * nc * nc * nc];
    block.target = 0..0;
    trace!(lmax, vrr, hrr, "two-body kernel workspace initialized");
}

/// Release the kernel workspace of `block`.
pub fn cleanup(block: &mut PrimDataBlock) {
    block.work = None;
    block.stack = Vec::new();
    block.target = 0..0;
}

/// Record fields the one-body kernel of `op` reads for signature `(la, lb)`.
pub fn required_fields_onebody(op: Operator, la: usize, lb: usize) -> FieldSet {
    let le = la + lb;
    let mut f = FieldSet::empty();
    match op {
        Operator::Overlap | Operator::Nuclear => {
            if le >= 1 {
                f |= FieldSet::PA;
                if op == Operator::Nuclear {
                    f |= FieldSet::PC;
                }
            }
            if le >= 2 {
                f |= FieldSet::OO2Z;
            }
            if lb >= 1 {
                f |= FieldSet::AB;
            }
        }
        Operator::Kinetic => {
            if la >= 1 {
                f |= FieldSet::PA | FieldSet::TWO_RHO12;
            }
            if la >= 2 {
                f |= FieldSet::OO2Z | FieldSet::RHO12_OVER_ALPHA1;
            }
            if lb >= 1 {
                f |= FieldSet::PB | FieldSet::TWO_RHO12;
                if la >= 1 || lb >= 2 {
                    f |= FieldSet::OO2Z;
                }
            }
            if lb >= 2 {
                f |= FieldSet::RHO12_OVER_ALPHA2;
            }
        }
    }
    f
}

/// Record fields the two-body kernel reads for signature `(la, lb | lc, ld)`.
pub fn required_fields_eri(la: usize, lb: usize, lc: usize, ld: usize) -> FieldSet {
    let le = la + lb;
    let lf = lc + ld;
    let mut f = FieldSet::empty();
    if le >= 1 {
        f |= FieldSet::PA | FieldSet::WP;
    }
    if le >= 2 {
        f |= FieldSet::OO2Z | FieldSet::ROZ;
    }
    if lb >= 1 {
        f |= FieldSet::AB;
    }
    if lf >= 1 {
        f |= FieldSet::QC | FieldSet::WQ;
    }
    if lf >= 2 {
        f |= FieldSet::OO2E | FieldSet::ROE;
    }
    if le >= 1 && lf >= 1 {
        f |= FieldSet::OO2ZE;
    }
    if ld >= 1 {
        f |= FieldSet::CD;
    }
    f
}

/// Run the one-body kernel of `op` for `(la, lb)`.
pub fn build_onebody(op: Operator, la: usize, lb: usize, block: &mut PrimDataBlock) {
    match op {
        Operator::Overlap => onebody::overlap(la, lb, block),
        Operator::Kinetic => onebody::kinetic(la, lb, block),
        Operator::Nuclear => onebody::elecpot(la, lb, block),
    }
}

/// Run the two-body kernel for `(la, lb | lc, ld)`.
#[inline]
pub fn build_eri(la: usize, lb: usize, lc: usize, ld: usize, block: &mut PrimDataBlock) {
    eri::eri(la, lb, lc, ld, block)
}

/// Split a block into its records, output stack and workspace.
fn parts(block: &mut PrimDataBlock) -> (&[crate::primdata::PrimData], &mut Vec<f64>, &mut std::ops::Range<usize>, &mut Workspace) {
    let PrimDataBlock { records, contrdepth, stack, target, work } = block;
    let Some(work) = work.as_mut() else {
        panic!("recurrence kernel called on an uninitialized PrimDataBlock");
    };
    assert!(*contrdepth >= 1 && *contrdepth <= records.len(), "invalid contraction depth {}", contrdepth);
    (&records[..*contrdepth], stack, target, work)
}
