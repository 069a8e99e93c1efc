/// build.rs: generate static Cartesian component tables.
///
/// Emits `$OUT_DIR/cart_tables.rs` which contains:
///   - `CART_NX_L`, `CART_NY_L`, `CART_NZ_L` for L = 0..=CART_TABLE_L
///   - `cart_comp_l(l) -> (&'static [usize], &'static [usize], &'static [usize])`
///
/// The recurrences walk intermediate shells up to twice the largest
/// supported angular momentum, hence the table reaches l = 12.

use std::io::Write;

const CART_TABLE_L: usize = 12;

fn main() -> std::io::Result<()> {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = std::env::var("OUT_DIR").map_err(std::io::Error::other)?;
    let dest = std::path::Path::new(&out_dir).join("cart_tables.rs");
    let mut f = std::io::BufWriter::new(std::fs::File::create(dest)?);

    // Standard order: x exponent descending, then y descending within each block.
    for l in 0..=CART_TABLE_L {
        let mut nx = Vec::new();
        let mut ny = Vec::new();
        let mut nz = Vec::new();
        for ix in (0..=l).rev() {
            for iy in (0..=(l - ix)).rev() {
                nx.push(ix);
                ny.push(iy);
                nz.push(l - ix - iy);
            }
        }
        let n = nx.len();
        let fmt = |v: &[usize]| -> String {
            v.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(", ")
        };
        writeln!(f, "const CART_NX_{l}: [usize; {n}] = [{}];", fmt(&nx))?;
        writeln!(f, "const CART_NY_{l}: [usize; {n}] = [{}];", fmt(&ny))?;
        writeln!(f, "const CART_NZ_{l}: [usize; {n}] = [{}];\n", fmt(&nz))?;
    }

    writeln!(f, "/// Largest angular momentum covered by the generated tables.")?;
    writeln!(f, "pub const CART_TABLE_L: usize = {CART_TABLE_L};\n")?;
    writeln!(f, "/// Static (nx, ny, nz) exponent tables of shell `l`, in standard order.")?;
    writeln!(f, "#[inline]")?;
    writeln!(f, "pub fn cart_comp_l(l: usize) -> (&'static [usize], &'static [usize], &'static [usize]) {{")?;
    writeln!(f, "    match l {{")?;
    for l in 0..=CART_TABLE_L {
        writeln!(f, "        {l} => (&CART_NX_{l}, &CART_NY_{l}, &CART_NZ_{l}),")?;
    }
    writeln!(f, "        _ => panic!(\"cart_comp_l: l={{l}} exceeds the generated tables (l <= {CART_TABLE_L})\"),")?;
    writeln!(f, "    }}")?;
    writeln!(f, "}}")?;
    Ok(())
}
