//! Per-primitive data consumed by the recurrence kernels.
//!
//! One [`PrimData`] record is filled for every primitive pair (one-body) or
//! primitive quartet (two-body) of a shell set. The kernels contract over the
//! first `contrdepth` records of a [`PrimDataBlock`] and leave the contracted
//! Cartesian result in `stack[target]`.

use std::ops::Range;

use bitflags::bitflags;

use crate::recur::Workspace;

bitflags! {
    /// Geometric record fields a kernel reads for one angular-momentum signature.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldSet: u32 {
        const PA                = 1 << 0;
        const PB                = 1 << 1;
        const AB                = 1 << 2;
        const BA                = 1 << 3;
        const PC                = 1 << 4;
        const OO2Z              = 1 << 5;
        const RHO12_OVER_ALPHA1 = 1 << 6;
        const RHO12_OVER_ALPHA2 = 1 << 7;
        const TWO_RHO12         = 1 << 8;
        const QC                = 1 << 9;
        const QD                = 1 << 10;
        const CD                = 1 << 11;
        const DC                = 1 << 12;
        const WP                = 1 << 13;
        const WQ                = 1 << 14;
        const OO2E              = 1 << 15;
        const OO2ZE             = 1 << 16;
        const ROZ               = 1 << 17;
        const ROE               = 1 << 18;
    }
}

/// Exponent ratios needed by derivative recurrences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivPrefactors {
    pub alpha1_rho_over_zeta2: f64,
    pub alpha2_rho_over_zeta2: f64,
    pub alpha3_rho_over_eta2: f64,
    pub alpha4_rho_over_eta2: f64,
    pub alpha1_over_zetapluseta: f64,
    pub alpha2_over_zetapluseta: f64,
    pub alpha3_over_zetapluseta: f64,
    pub alpha4_over_zetapluseta: f64,
    pub rho34_over_alpha3: f64,
    pub rho34_over_alpha4: f64,
    pub two_alpha0_bra: f64,
    pub two_alpha0_ket: f64,
    pub two_alpha1_bra: f64,
    pub two_alpha1_ket: f64,
}

/// Prefactors of one primitive combination.
///
/// Naming: P/Q are the bra/ket Gaussian product centers, W their weighted
/// center, C a point charge; `zeta`/`eta` the bra/ket exponent sums and
/// `rho` the reduced exponent of the combination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimData {
    pub pa: [f64; 3],
    pub pb: [f64; 3],
    pub ab: [f64; 3],
    pub ba: [f64; 3],
    pub pc: [f64; 3],
    /// 1/(2ζ)
    pub oo2z: f64,
    pub rho12_over_alpha1: f64,
    pub rho12_over_alpha2: f64,
    pub two_rho12: f64,

    pub qc: [f64; 3],
    pub qd: [f64; 3],
    pub cd: [f64; 3],
    pub dc: [f64; 3],
    pub wp: [f64; 3],
    pub wq: [f64; 3],
    /// 1/(2η)
    pub oo2e: f64,
    /// 1/(2(ζ+η))
    pub oo2ze: f64,
    /// ρ/ζ
    pub roz: f64,
    /// ρ/η
    pub roe: f64,

    pub deriv: DerivPrefactors,

    pub overlap_ss: f64,
    pub kinetic_ss: f64,
    /// Nuclear attraction seeds, one per auxiliary order m.
    pub elecpot_ss: Vec<f64>,
    /// Two-body seeds, one per auxiliary order m.
    pub erep_ss: Vec<f64>,
}

impl PrimData {
    fn with_orders(nelecpot: usize, nerep: usize) -> Self {
        PrimData {
            elecpot_ss: vec![0.0; nelecpot],
            erep_ss: vec![0.0; nerep],
            ..PrimData::default()
        }
    }
}

/// Record array plus the kernel workspace bound to it.
#[derive(Debug, Default)]
pub struct PrimDataBlock {
    pub records: Vec<PrimData>,
    /// Number of records the next kernel call contracts over.
    pub contrdepth: usize,
    /// Kernel output area.
    pub stack: Vec<f64>,
    /// Where the last kernel call left its contracted result.
    pub target: Range<usize>,
    pub(crate) work: Option<Workspace>,
}

impl PrimDataBlock {
    /// `nrecords` records, each able to hold `nelecpot` / `nerep` seed orders.
    pub fn new(nrecords: usize, nelecpot: usize, nerep: usize) -> Self {
        PrimDataBlock {
            records: vec![PrimData::with_orders(nelecpot, nerep); nrecords],
            contrdepth: 0,
            stack: Vec::new(),
            target: 0..0,
            work: None,
        }
    }

    #[inline] pub fn capacity(&self) -> usize { self.records.len() }

    /// Whether the kernel library has been initialized on this block.
    #[inline] pub fn is_initialized(&self) -> bool { self.work.is_some() }

    /// The contracted result of the last kernel call.
    #[inline] pub fn result(&self) -> &[f64] { &self.stack[self.target.clone()] }
}

/// The two output areas an engine alternates between: the block stack and
/// the engine scratch buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Buffer {
    Stack,
    Scratch,
}

impl Buffer {
    #[inline]
    pub(crate) fn other(self) -> Buffer {
        match self {
            Buffer::Stack => Buffer::Scratch,
            Buffer::Scratch => Buffer::Stack,
        }
    }
}

/// Borrow `src` for reading and the other buffer for writing.
pub(crate) fn split_buffers<'a>(stack: &'a mut [f64], scratch: &'a mut [f64], src: Buffer) -> (&'a [f64], &'a mut [f64]) {
    match src {
        Buffer::Stack => (stack, scratch),
        Buffer::Scratch => (scratch, stack),
    }
}
