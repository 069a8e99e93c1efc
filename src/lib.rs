//! shellint: one- and two-body molecular integrals over contracted Gaussian shells.
//!
//! Engines are built once for fixed capacity bounds (primitives per shell,
//! maximum angular momentum) and then evaluate shell pairs or quartets
//! repeatedly:
//!
//! * [`OneBodyEngine`]: overlap, kinetic energy and nuclear attraction;
//! * [`TwoBodyEngine`]: Coulomb repulsion and Gaussian-geminal kernels
//!   ([`Coulomb`], [`Cgtg`], [`CgtgTimesCoulomb`], [`DelCgtgSquare`]).
//!
//! Integrals come from Obara–Saika / Head-Gordon–Pople recurrences over
//! Cartesian Gaussians; solid-harmonic shells are transformed afterwards.
//! Results are row-major blocks in the order the shells were passed.
//!
//! ```no_run
//! use shellint::{Coulomb, Shell, TwoBodyEngine};
//!
//! let s = Shell::normalized(
//!     vec![3.42525091, 0.62391373, 0.16885540],
//!     vec![shellint::Contraction { l: 0, pure: false, coeff: vec![0.15432897, 0.53532814, 0.44463454] }],
//!     [0.0, 0.0, 0.0],
//! )?;
//! let mut engine = TwoBodyEngine::<Coulomb>::new(3, 0, 0, ())?;
//! let eri = engine.compute(&s, &s, &s, &s)?;
//! println!("(ss|ss) = {}", eri[0]);
//! # Ok::<(), shellint::Error>(())
//! ```

pub mod boys;
pub mod error;
pub mod int1e;
pub mod int2e;
pub mod optimizer;
pub mod primdata;
pub mod recur;
pub mod shell;
pub mod transform;
pub mod types;

pub use boys::ContractedGeminal;
pub use error::{Error, Result};
pub use int1e::{one_body_matrix, OneBodyConfig, OneBodyEngine, Operator as OneBodyOperator};
pub use int2e::{
    two_body_tensor, Cgtg, CgtgTimesCoulomb, Coulomb, DelCgtgSquare, KernelKind, TwoBodyConfig, TwoBodyEngine,
    TwoBodyKernel,
};
pub use optimizer::SchwarzScreen;
pub use shell::{basis_offsets, Contraction, Shell};
