//! Parallel assembly of full one-body matrices.
//!
//! Shell pairs `(i, j)` with `j <= i` are distributed over rayon workers,
//! each owning a clone of the engine; the blocks are scattered into the
//! matrix together with their transposes.

use ndarray::{s, Array2, ArrayView2};
use rayon::prelude::*;
use tracing::debug;

use super::OneBodyEngine;
use crate::error::Result;
use crate::shell::{basis_offsets, Shell};

/// The `nbf × nbf` matrix of the engine's operator over `shells`.
pub fn one_body_matrix(engine: &OneBodyEngine, shells: &[Shell]) -> Result<Array2<f64>> {
    let offsets = basis_offsets(shells);
    let nbf = offsets[shells.len()];
    let pairs: Vec<(usize, usize)> = (0..shells.len()).flat_map(|i| (0..=i).map(move |j| (i, j))).collect();
    debug!(op = ?engine.operator(), nshell = shells.len(), nbf, npairs = pairs.len(), "one-body matrix start");

    let blocks = pairs
        .par_iter()
        .map_init(
            || engine.clone(),
            |eng, &(i, j)| eng.compute(&shells[i], &shells[j]).map(|b| (i, j, b.to_vec())),
        )
        .collect::<Result<Vec<_>>>()?;

    let mut out = Array2::zeros((nbf, nbf));
    for (i, j, block) in blocks {
        let (oi, oj) = (offsets[i], offsets[j]);
        let (ni, nj) = (shells[i].size(), shells[j].size());
        let view = ArrayView2::from_shape((ni, nj), &block)?;
        out.slice_mut(s![oi..oi + ni, oj..oj + nj]).assign(&view);
        if i != j {
            out.slice_mut(s![oj..oj + nj, oi..oi + ni]).assign(&view.t());
        }
    }
    debug!(nbf, "one-body matrix done");
    Ok(out)
}
