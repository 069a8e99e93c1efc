//! Constants, compiled capabilities and Cartesian index arithmetic.
//!
//! Cartesian components of a shell with angular momentum `l` are ordered with
//! the x exponent descending, then the y exponent descending:
//!   d: xx, xy, xz, yy, yz, zz
//! Intermediate tables used by the recurrences stack all shells `0..=L` one
//! after another ("global" index), so the component (x, y, z) of total
//! `l = x + y + z` lives at `cart_offset(l) + cart_index(x, y, z)`.

// ─── Numerical constants ─────────────────────────────────────────────────────
pub const SQRT_PI: f64 = 1.772_453_850_905_516_027_298_167_483_341_145_2;
/// π^{3/2}
pub const PI_POW_3_2: f64 = 5.568_327_996_831_707_845_284_817_982_118_8;
/// 2/√π
pub const TWO_OVER_SQRT_PI: f64 = 1.128_379_167_095_512_573_896_158_903_121_5;
/// 2·π^{5/2}, the Coulomb quartet prefactor.
pub const TWO_PI_POW_5_2: f64 = 34.986_836_655_249_725_693_105_145_71;

// ─── Compiled kernel capabilities ────────────────────────────────────────────
pub const MAX_AM_OVERLAP: usize = 6;
pub const MAX_AM_KINETIC: usize = 6;
pub const MAX_AM_ELECPOT: usize = 6;
pub const MAX_AM_ERI: usize = 4;
pub const DERIV_ONEBODY_ORDER: usize = 0;
pub const DERIV_ERI_ORDER: usize = 0;

/// Default precision requested from the core-function evaluators.
pub const DEFAULT_PRECISION: f64 = 1e-15;

// ─── Shell sizes ─────────────────────────────────────────────────────────────

/// Number of Cartesian GTOs for angular momentum l: (l+1)(l+2)/2
#[inline]
pub fn ncart(l: usize) -> usize { (l + 1) * (l + 2) / 2 }

/// Number of real solid harmonics for angular momentum l: 2l+1
#[inline]
pub fn nsph(l: usize) -> usize { 2 * l + 1 }

/// Number of functions in a shell of angular momentum `l`.
#[inline]
pub fn nfunctions(l: usize, pure: bool) -> usize {
    if pure { nsph(l) } else { ncart(l) }
}

/// Number of Cartesian components over all shells `0..l` (exclusive).
#[inline]
pub fn cart_offset(l: usize) -> usize { l * (l + 1) * (l + 2) / 6 }

/// Number of Cartesian components over all shells `0..=l`.
#[inline]
pub fn ncart_upto(l: usize) -> usize { cart_offset(l + 1) }

/// Number of Cartesian components over shells `lo..=hi`.
#[inline]
pub fn ncart_range(lo: usize, hi: usize) -> usize { cart_offset(hi + 1) - cart_offset(lo) }

/// Position of (x, y, z) within its own shell.
#[inline]
pub fn cart_index(x: usize, y: usize, z: usize) -> usize {
    let l = x + y + z;
    (l - x) * (l - x + 1) / 2 + z
}

/// Position of (x, y, z) in a table stacking shells `0..=L`.
#[inline]
pub fn global_index(x: usize, y: usize, z: usize) -> usize {
    cart_offset(x + y + z) + cart_index(x, y, z)
}

/// Direction used to build component `e` from a lower one: the first
/// Cartesian direction carrying a nonzero exponent (x, then y, then z).
#[inline]
pub fn build_direction(e: [usize; 3]) -> usize {
    if e[0] > 0 { 0 } else if e[1] > 0 { 1 } else { 2 }
}

/// `e` with one quantum removed along `dir`.
#[inline]
pub fn lower(mut e: [usize; 3], dir: usize) -> [usize; 3] {
    e[dir] -= 1;
    e
}

/// `e` with one quantum added along `dir`.
#[inline]
pub fn raise(mut e: [usize; 3], dir: usize) -> [usize; 3] {
    e[dir] += 1;
    e
}

/// Iterate the (x, y, z) exponent triples of shell `l` in standard order.
pub fn cart_components(l: usize) -> impl Iterator<Item = [usize; 3]> {
    let (nx, ny, nz) = cart_comp_l(l);
    (0..nx.len()).map(move |i| [nx[i], ny[i], nz[i]])
}

/// (n-1)!! for odd-or-even n, with (−1)!! = 0!! = 1.
pub fn double_factorial_minus1(n: usize) -> f64 {
    let mut r = 1.0;
    let mut k = n as i64 - 1;
    while k > 1 {
        r *= k as f64;
        k -= 2;
    }
    r
}

// Static Cartesian component tables, generated by build.rs.
// Provides `cart_comp_l(l)` and `CART_TABLE_L`.
include!(concat!(env!("OUT_DIR"), "/cart_tables.rs"));
