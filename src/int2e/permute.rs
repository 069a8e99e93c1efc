//! Restore the caller's shell order of a canonical `(ab|cd)` block.

use ndarray::{s, ArrayView4, ArrayViewMut4};

use crate::error::Result;

/// Which of the three canonicalizing swaps were applied to a quartet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Swaps {
    /// `b1 <-> b2`
    pub bra: bool,
    /// `k1 <-> k2`
    pub ket: bool,
    /// `(b1 b2) <-> (k1 k2)`
    pub braket: bool,
}

impl Swaps {
    /// Swaps that bring `(l1 l2|l3 l4)` to `l_bra1 >= l_bra2`, `l_ket1 >= l_ket2`,
    /// `l_bra1 + l_bra2 <= l_ket1 + l_ket2`.
    pub fn for_quartet(l: [usize; 4]) -> Self {
        Swaps {
            bra: l[0] < l[1],
            ket: l[2] < l[3],
            braket: l[0] + l[1] > l[2] + l[3],
        }
    }

    pub fn any(self) -> bool { self.bra || self.ket || self.braket }

    /// Position in the caller's quartet of each canonical shell.
    pub fn canonical_order(self) -> [usize; 4] {
        let bra = if self.bra { [1, 0] } else { [0, 1] };
        let ket = if self.ket { [3, 2] } else { [2, 3] };
        if self.braket {
            [ket[0], ket[1], bra[0], bra[1]]
        } else {
            [bra[0], bra[1], ket[0], ket[1]]
        }
    }
}

/// Copy the canonical block `src` (dimensions `dims`) into `dst` in the
/// caller's order.
pub fn unpermute(src: &[f64], dst: &mut [f64], dims: [usize; 4], swaps: Swaps) -> Result<()> {
    let [nr1, nr2, nc1, nc2] = dims;
    let n = nr1 * nr2 * nc1 * nc2;
    let src = ArrayView4::from_shape((nr1, nr2, nc1, nc2), &src[..n])?;

    // caller's dimensions
    let (t1, t2, t3, t4) = if swaps.braket {
        let (b1, b2) = if swaps.bra { (nc2, nc1) } else { (nc1, nc2) };
        let (k1, k2) = if swaps.ket { (nr2, nr1) } else { (nr1, nr2) };
        (b1, b2, k1, k2)
    } else {
        let (b1, b2) = if swaps.bra { (nr2, nr1) } else { (nr1, nr2) };
        let (k1, k2) = if swaps.ket { (nc2, nc1) } else { (nc1, nc2) };
        (b1, b2, k1, k2)
    };
    let mut tgt = ArrayViewMut4::from_shape((t1, t2, t3, t4), &mut dst[..n])?;

    for r1 in 0..nr1 {
        for r2 in 0..nr2 {
            let block = src.slice(s![r1, r2, .., ..]);
            if swaps.braket {
                let (i3, i4) = if swaps.ket { (r2, r1) } else { (r1, r2) };
                let mut col = tgt.slice_mut(s![.., .., i3, i4]);
                if swaps.bra {
                    col.assign(&block.t());
                } else {
                    col.assign(&block);
                }
            } else {
                let (i1, i2) = if swaps.bra { (r2, r1) } else { (r1, r2) };
                let mut row = tgt.slice_mut(s![i1, i2, .., ..]);
                if swaps.ket {
                    row.assign(&block.t());
                } else {
                    row.assign(&block);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tag every element with its four indices so misplacement is visible.
    fn tagged(dims: [usize; 4]) -> Vec<f64> {
        let mut v = Vec::new();
        for a in 0..dims[0] {
            for b in 0..dims[1] {
                for c in 0..dims[2] {
                    for d in 0..dims[3] {
                        v.push((1000 * a + 100 * b + 10 * c + d) as f64);
                    }
                }
            }
        }
        v
    }

    #[test]
    fn every_swap_combination_restores_caller_order() {
        let caller = [2usize, 3, 4, 5];
        for bits in 0..8 {
            let swaps = Swaps { bra: bits & 1 != 0, ket: bits & 2 != 0, braket: bits & 4 != 0 };
            let order = swaps.canonical_order();
            let dims = order.map(|i| caller[i]);
            // canonical element (r1 r2|c1 c2) holds the caller's index tuple
            let mut src = Vec::new();
            for r1 in 0..dims[0] {
                for r2 in 0..dims[1] {
                    for c1 in 0..dims[2] {
                        for c2 in 0..dims[3] {
                            let mut idx = [0usize; 4];
                            for (pos, val) in order.iter().zip([r1, r2, c1, c2]) {
                                idx[*pos] = val;
                            }
                            src.push((1000 * idx[0] + 100 * idx[1] + 10 * idx[2] + idx[3]) as f64);
                        }
                    }
                }
            }
            let mut dst = vec![0.0; src.len()];
            unpermute(&src, &mut dst, dims, swaps).unwrap();
            assert_eq!(dst, tagged(caller), "swaps {:?}", swaps);
        }
    }

    #[test]
    fn canonical_swaps() {
        assert_eq!(Swaps::for_quartet([0, 1, 2, 2]), Swaps { bra: true, ket: false, braket: false });
        assert_eq!(Swaps::for_quartet([2, 1, 0, 0]), Swaps { bra: false, ket: false, braket: true });
        assert!(!Swaps::for_quartet([1, 0, 1, 1]).any());
        assert_eq!(Swaps { bra: true, ket: true, braket: true }.canonical_order(), [3, 2, 1, 0]);
    }
}
