//! Integer-lattice hash feeding the value-noise field.
//!
//! All arithmetic is 32-bit two's-complement with explicit wraparound so the
//! output is bit-identical on every platform.

/// Odd multiplier folding the y coordinate into the x coordinate.
const ROW_STRIDE: i32 = 57;
const POSITIVE_MASK: i32 = 0x7fff_ffff;

/// Raw lattice hash in `[0, 0x7fffffff]`.
pub fn lattice_hash(x: i32, y: i32) -> i32 {
    let n = x.wrapping_add(y.wrapping_mul(ROW_STRIDE));
    let n = n.wrapping_shl(13) ^ n;
    let poly = n
        .wrapping_mul(n)
        .wrapping_mul(60493)
        .wrapping_add(19_990_303);
    n.wrapping_mul(poly).wrapping_add(1_376_312_589) & POSITIVE_MASK
}

/// Lattice hash rescaled to `[-1, 1]`.
pub fn lattice_value(x: i32, y: i32) -> f32 {
    (lattice_hash(x, y) as f32 / POSITIVE_MASK as f32) * 2.0 - 1.0
}
