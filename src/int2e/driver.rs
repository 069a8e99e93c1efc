//! Parallel assembly of the full two-body tensor.
//!
//! Only symmetry-unique shell quartets `(ij|kl)` with `i >= j`, `k >= l` and
//! `ij >= kl` are evaluated. They are distributed over rayon workers, each
//! owning a clone of the engine; every block is then scattered to all eight
//! index permutations, valid because the kernels depend on `r12` only.
//! Quartets failing the optional Schwarz screen keep zero blocks.

use ndarray::{s, Array4, ArrayView4};
use rayon::prelude::*;
use tracing::debug;

use super::{TwoBodyEngine, TwoBodyKernel};
use crate::error::Result;
use crate::optimizer::SchwarzScreen;
use crate::shell::{basis_offsets, Shell};

/// The eight index orders equivalent to `(ij|kl)`; each is also the axis
/// permutation taking a `(ij|kl)` block to that order.
const PERMUTATIONS: [[usize; 4]; 8] = [
    [0, 1, 2, 3],
    [1, 0, 2, 3],
    [0, 1, 3, 2],
    [1, 0, 3, 2],
    [2, 3, 0, 1],
    [3, 2, 0, 1],
    [2, 3, 1, 0],
    [3, 2, 1, 0],
];

/// Row-major `nbf⁴` tensor `(μν|λσ)` of the engine's kernel over `shells`.
pub fn two_body_tensor<K: TwoBodyKernel>(
    engine: &TwoBodyEngine<K>,
    shells: &[Shell],
    screen: Option<&SchwarzScreen>,
) -> Result<Array4<f64>> {
    let offsets = basis_offsets(shells);
    let nbf = offsets[shells.len()];
    let ns = shells.len();

    let mut quartets = Vec::new();
    for i in 0..ns {
        for j in 0..=i {
            let ij = i * (i + 1) / 2 + j;
            for k in 0..ns {
                for l in 0..=k {
                    if k * (k + 1) / 2 + l > ij {
                        continue;
                    }
                    quartets.push([i, j, k, l]);
                }
            }
        }
    }
    let total = quartets.len();
    if let Some(screen) = screen {
        quartets.retain(|&[i, j, k, l]| screen.passes(i, j, k, l));
    }
    debug!(kernel = K::KIND.name(), nshell = ns, nbf, unique = total, screened = total - quartets.len(), "two-body tensor start");

    let blocks = quartets
        .par_iter()
        .map_init(
            || engine.clone(),
            |eng, &q| {
                let [i, j, k, l] = q;
                eng.compute(&shells[i], &shells[j], &shells[k], &shells[l]).map(|b| (q, b.to_vec()))
            },
        )
        .collect::<Result<Vec<_>>>()?;

    let mut out = Array4::zeros((nbf, nbf, nbf, nbf));
    for (q, block) in blocks {
        let n = q.map(|x| shells[x].size());
        let view = ArrayView4::from_shape((n[0], n[1], n[2], n[3]), &block)?;
        for order in PERMUTATIONS {
            let r = order.map(|x| offsets[q[x]]..offsets[q[x] + 1]);
            out.slice_mut(s![r[0].clone(), r[1].clone(), r[2].clone(), r[3].clone()])
                .assign(&view.view().permuted_axes(order));
        }
    }
    debug!(nbf, "two-body tensor done");
    Ok(out)
}
