//! Horizontal recurrence: (a|b+1_i) = (a+1_i|b) + AB_i (a|b)

use crate::types::{build_direction, cart_components, cart_index, cart_offset, global_index, lower, ncart, ncart_range, raise};

/// Transfer angular momentum from the first to the second center of a pair.
///
/// `src` is laid out `[outer][e][inner]` with `e` running over all Cartesian
/// components of shells `la..=la+lb`; the result `[outer][a][b][inner]`
/// (shells `la` and `lb`) is written to `dst`. `bufs` hold the intermediate
/// levels and grow on demand.
#[allow(clippy::too_many_arguments)]
pub(crate) fn hrr(
    src: &[f64],
    dst: &mut [f64],
    bufs: &mut [Vec<f64>; 2],
    outer: usize,
    inner: usize,
    la: usize,
    lb: usize,
    ab: [f64; 3],
) {
    if lb == 0 {
        let n = outer * ncart(la) * inner;
        dst[..n].copy_from_slice(&src[..n]);
        return;
    }
    let lab = la + lb;
    for k in 0..lb {
        let n_next = outer * ncart_range(la, lab - k - 1) * ncart(k + 1) * inner;
        let (b0, b1) = bufs.split_at_mut(1);
        let (prev, next) = if k % 2 == 0 { (&b1[0], &mut b0[0]) } else { (&b0[0], &mut b1[0]) };
        let cur: &[f64] = if k == 0 { src } else { prev.as_slice() };
        if k + 1 == lb {
            step(cur, &mut dst[..n_next], outer, inner, la, lab - k, k, ab);
        } else {
            next.clear();
            next.resize(n_next, 0.0);
            step(cur, next, outer, inner, la, lab - k, k, ab);
        }
    }
}

/// One HRR level: `[outer][la..=ltop][shell kb][inner]` → `[outer][la..=ltop-1][shell kb+1][inner]`.
#[allow(clippy::too_many_arguments)]
fn step(cur: &[f64], next: &mut [f64], outer: usize, inner: usize, la: usize, ltop: usize, kb: usize, ab: [f64; 3]) {
    let ne_cur = ncart_range(la, ltop);
    let nb_cur = ncart(kb);
    let ne_next = ncart_range(la, ltop - 1);
    let nb_next = ncart(kb + 1);
    let base = cart_offset(la);
    for o in 0..outer {
        for l in la..ltop {
            for a in cart_components(l) {
                let ea = global_index(a[0], a[1], a[2]) - base;
                for (ib, b) in cart_components(kb + 1).enumerate() {
                    let i = build_direction(b);
                    let b1 = lower(b, i);
                    let a1 = raise(a, i);
                    let eb1 = cart_index(b1[0], b1[1], b1[2]);
                    let ea1 = global_index(a1[0], a1[1], a1[2]) - base;
                    let hi = ((o * ne_cur + ea1) * nb_cur + eb1) * inner;
                    let lo = ((o * ne_cur + ea) * nb_cur + eb1) * inner;
                    let out = ((o * ne_next + ea) * nb_next + ib) * inner;
                    for t in 0..inner {
                        next[out + t] = cur[hi + t] + ab[i] * cur[lo + t];
                    }
                }
            }
        }
    }
}
