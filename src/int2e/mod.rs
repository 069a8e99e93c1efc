//! Two-body integrals `(ab|g(r12)|cd)` for Coulomb and Gaussian-geminal kernels.

pub mod driver;
pub mod engine;
pub mod kernel;
pub mod permute;
pub mod prim;

use serde::{Deserialize, Serialize};

pub use driver::two_body_tensor;
pub use engine::TwoBodyEngine;
pub use kernel::{Cgtg, CgtgTimesCoulomb, Coulomb, DelCgtgSquare, KernelKind, TwoBodyKernel};

/// Construction parameters of a [`TwoBodyEngine`]; `params` are the kernel
/// parameters (`()` for Coulomb, a contracted geminal otherwise).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "P: Deserialize<'de> + Default"))]
pub struct TwoBodyConfig<P = ()> {
    pub max_nprim: usize,
    pub max_l: usize,
    pub deriv_order: usize,
    pub params: P,
}

impl<P: Default> Default for TwoBodyConfig<P> {
    fn default() -> Self {
        TwoBodyConfig { max_nprim: 6, max_l: 2, deriv_order: 0, params: P::default() }
    }
}
