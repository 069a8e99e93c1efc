//! One-body integrals: overlap, kinetic energy and nuclear attraction.

pub mod driver;
pub mod engine;
pub mod prim;

use serde::{Deserialize, Serialize};

pub use driver::one_body_matrix;
pub use engine::OneBodyEngine;

/// One-body operator an engine evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// `<a|b>`
    Overlap,
    /// `<a|-∇²/2|b>`
    Kinetic,
    /// `<a|-Σ_C q_C/|r-C||b>`
    Nuclear,
}

impl Operator {
    pub fn name(self) -> &'static str {
        match self {
            Operator::Overlap => "overlap",
            Operator::Kinetic => "kinetic",
            Operator::Nuclear => "nuclear attraction",
        }
    }
}

/// Construction parameters of a [`OneBodyEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OneBodyConfig {
    pub operator: Operator,
    /// Largest number of primitives in any shell passed to `compute`.
    pub max_nprim: usize,
    /// Largest angular momentum of any shell passed to `compute`.
    pub max_l: usize,
    pub deriv_order: usize,
    /// Point charges `(q, position)`; only read by [`Operator::Nuclear`].
    pub charges: Vec<(f64, [f64; 3])>,
}

impl Default for OneBodyConfig {
    fn default() -> Self {
        OneBodyConfig {
            operator: Operator::Overlap,
            max_nprim: 6,
            max_l: 2,
            deriv_order: 0,
            charges: Vec::new(),
        }
    }
}
