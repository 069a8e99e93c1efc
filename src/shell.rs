//! Contracted Gaussian shells.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{double_factorial_minus1, ncart, nfunctions, PI_POW_3_2};

/// One contraction of a shell: angular momentum, purity flag and one
/// coefficient per primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contraction {
    pub l: usize,
    /// Solid-harmonic (`true`) or Cartesian (`false`) functions.
    pub pure: bool,
    pub coeff: Vec<f64>,
}

impl Contraction {
    pub fn size(&self) -> usize { nfunctions(self.l, self.pure) }
    pub fn cartesian_size(&self) -> usize { ncart(self.l) }
}

/// A shell of contracted Gaussians sharing one origin and one exponent set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shell {
    pub alpha: Vec<f64>,
    pub contr: Vec<Contraction>,
    pub origin: [f64; 3],
}

impl Shell {
    /// Build a shell from raw (unnormalized) coefficients.
    pub fn new(alpha: Vec<f64>, contr: Vec<Contraction>, origin: [f64; 3]) -> Result<Self> {
        if alpha.is_empty() {
            return Err(Error::InvalidShell("no primitives".into()));
        }
        if contr.is_empty() {
            return Err(Error::InvalidShell("no contractions".into()));
        }
        if let Some(a) = alpha.iter().find(|a| !a.is_finite() || **a <= 0.0) {
            return Err(Error::InvalidShell(format!("exponent {a} is not positive")));
        }
        for c in &contr {
            if c.coeff.len() != alpha.len() {
                return Err(Error::InvalidShell(format!(
                    "l={} contraction has {} coefficients for {} primitives",
                    c.l, c.coeff.len(), alpha.len()
                )));
            }
        }
        Ok(Shell { alpha, contr, origin })
    }

    /// Build a shell and normalize it with [`Shell::renorm`].
    pub fn normalized(alpha: Vec<f64>, contr: Vec<Contraction>, origin: [f64; 3]) -> Result<Self> {
        let mut sh = Shell::new(alpha, contr, origin)?;
        sh.renorm();
        Ok(sh)
    }

    /// Single-contraction shortcut for [`Shell::new`].
    pub fn single(l: usize, pure: bool, alpha: Vec<f64>, coeff: Vec<f64>, origin: [f64; 3]) -> Result<Self> {
        Shell::new(alpha, vec![Contraction { l, pure, coeff }], origin)
    }

    /// Fold primitive normalization into the coefficients, then rescale each
    /// contraction so that its `x^l` component has unit self-overlap.
    pub fn renorm(&mut self) {
        let np = self.alpha.len();
        for c in &mut self.contr {
            let l = c.l as i32;
            let df = double_factorial_minus1(2 * c.l);
            for p in 0..np {
                let two_alpha = 2.0 * self.alpha[p];
                let two_alpha_to_am32 = two_alpha.powi(l + 1) * two_alpha.sqrt();
                c.coeff[p] *= (2f64.powi(l) * two_alpha_to_am32 / (PI_POW_3_2 * df)).sqrt();
            }

            let mut norm = 0.0;
            for p in 0..np {
                for q in 0..=p {
                    let gamma = self.alpha[p] + self.alpha[q];
                    let w = if p == q { 1.0 } else { 2.0 };
                    norm += w * df * PI_POW_3_2 * c.coeff[p] * c.coeff[q]
                        / (2f64.powi(l) * gamma.powi(l + 1) * gamma.sqrt());
                }
            }
            let fac = 1.0 / norm.sqrt();
            c.coeff.iter_mut().for_each(|x| *x *= fac);
        }
    }

    #[inline] pub fn nprim(&self) -> usize { self.alpha.len() }
    #[inline] pub fn ncontr(&self) -> usize { self.contr.len() }

    /// Number of basis functions, solid-harmonic or Cartesian per contraction.
    pub fn size(&self) -> usize { self.contr.iter().map(Contraction::size).sum() }

    pub fn cartesian_size(&self) -> usize { self.contr.iter().map(Contraction::cartesian_size).sum() }

    pub fn max_l(&self) -> usize { self.contr.iter().map(|c| c.l).max().unwrap_or(0) }

    /// Angular momentum of the first contraction.
    #[inline] pub fn l(&self) -> usize { self.contr[0].l }
    #[inline] pub fn pure(&self) -> bool { self.contr[0].pure }
}

/// First basis-function index of every shell, followed by the total count.
pub fn basis_offsets(shells: &[Shell]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(shells.len() + 1);
    let mut n = 0;
    offsets.push(n);
    for sh in shells {
        n += sh.size();
        offsets.push(n);
    }
    offsets
}
