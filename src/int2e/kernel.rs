//! Two-body interaction kernels.
//!
//! A kernel only supplies the core functions `G_m(T, ρ)` that seed the
//! recurrences; geometry and angular momentum are handled generically.

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::boys::{gradient_squared_geminal, BoysEval, ContractedGeminal, GaussianGmEval};

/// Tag of a two-body kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelKind {
    /// `1/r12`
    Coulomb,
    /// `Σ c exp(-γ r12²)`
    Cgtg,
    /// `Σ c exp(-γ r12²) / r12`
    CgtgTimesCoulomb,
    /// `(∇ Σ c exp(-γ r12²))²`
    DelCgtgSquare,
}

impl KernelKind {
    pub fn name(self) -> &'static str {
        match self {
            KernelKind::Coulomb => "Coulomb",
            KernelKind::Cgtg => "geminal",
            KernelKind::CgtgTimesCoulomb => "geminal-Coulomb",
            KernelKind::DelCgtgSquare => "geminal gradient-squared",
        }
    }
}

/// Core-function provider of a two-body engine.
pub trait TwoBodyKernel: Clone + Debug + Send + Sync + 'static {
    /// Operator parameters given at engine construction.
    type Params: Clone + Debug + Default + Send + Sync;

    const KIND: KernelKind;

    /// Kernel able to evaluate orders `0..=mmax`.
    fn new(params: &Self::Params, mmax: usize, precision: f64) -> Self;

    /// Write `G_m(T, ρ)` for `m = 0..=mmax` into `out`.
    fn core_eval(&self, out: &mut [f64], mmax: usize, t: f64, rho: f64);
}

#[derive(Debug, Clone)]
pub struct Coulomb {
    boys: Arc<BoysEval>,
}

impl TwoBodyKernel for Coulomb {
    type Params = ();
    const KIND: KernelKind = KernelKind::Coulomb;

    fn new(_: &(), mmax: usize, precision: f64) -> Self {
        Coulomb { boys: BoysEval::instance(mmax, precision) }
    }

    #[inline]
    fn core_eval(&self, out: &mut [f64], mmax: usize, t: f64, _rho: f64) {
        self.boys.eval(out, t, mmax);
    }
}

#[derive(Debug, Clone)]
pub struct Cgtg {
    gm: Arc<GaussianGmEval>,
    geminal: ContractedGeminal,
}

impl TwoBodyKernel for Cgtg {
    type Params = ContractedGeminal;
    const KIND: KernelKind = KernelKind::Cgtg;

    fn new(geminal: &ContractedGeminal, mmax: usize, precision: f64) -> Self {
        Cgtg { gm: GaussianGmEval::instance(mmax, precision), geminal: geminal.clone() }
    }

    #[inline]
    fn core_eval(&self, out: &mut [f64], mmax: usize, t: f64, rho: f64) {
        self.gm.eval_geminal(out, rho, t, mmax, &self.geminal);
    }
}

#[derive(Debug, Clone)]
pub struct CgtgTimesCoulomb {
    gm: Arc<GaussianGmEval>,
    geminal: ContractedGeminal,
}

impl TwoBodyKernel for CgtgTimesCoulomb {
    type Params = ContractedGeminal;
    const KIND: KernelKind = KernelKind::CgtgTimesCoulomb;

    fn new(geminal: &ContractedGeminal, mmax: usize, precision: f64) -> Self {
        CgtgTimesCoulomb { gm: GaussianGmEval::instance(mmax, precision), geminal: geminal.clone() }
    }

    #[inline]
    fn core_eval(&self, out: &mut [f64], mmax: usize, t: f64, rho: f64) {
        self.gm.eval_geminal_coulomb(out, rho, t, mmax, &self.geminal);
    }
}

/// `(∇g)²` of a geminal `g`, stored as the equivalent `r12² exp(-γ r12²)`
/// expansion.
#[derive(Debug, Clone)]
pub struct DelCgtgSquare {
    gm: Arc<GaussianGmEval>,
    expanded: ContractedGeminal,
}

impl TwoBodyKernel for DelCgtgSquare {
    type Params = ContractedGeminal;
    const KIND: KernelKind = KernelKind::DelCgtgSquare;

    fn new(geminal: &ContractedGeminal, mmax: usize, precision: f64) -> Self {
        DelCgtgSquare {
            gm: GaussianGmEval::instance(mmax, precision),
            expanded: gradient_squared_geminal(geminal),
        }
    }

    #[inline]
    fn core_eval(&self, out: &mut [f64], mmax: usize, t: f64, rho: f64) {
        self.gm.eval_geminal_r2(out, rho, t, mmax, &self.expanded);
    }
}
