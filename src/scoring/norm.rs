//! Single-byte float encoding for field norms.
//!
//! Three mantissa bits and five exponent bits, with the exponent zero point at
//! 15. Covers roughly `[5.8e-10, 7.5e9]` with about one significant decimal
//! digit, which is plenty for length normalization.

const MANTISSA_BITS: i32 = 3;
const ZERO_EXP: i32 = 15;
const BIAS: i32 = (63 - ZERO_EXP) << MANTISSA_BITS;

/// Encode `f` into a byte. Values below the smallest representable positive
/// number become 1 (or 0 if `f <= 0`); values above the range saturate at 255.
pub fn float_to_byte315(f: f32) -> u8 {
    let bits = f.to_bits() as i32;
    let small = bits >> (24 - MANTISSA_BITS);
    if small <= BIAS {
        return if bits <= 0 { 0 } else { 1 };
    }
    if small >= BIAS + 0x100 {
        return u8::MAX;
    }
    (small - BIAS) as u8
}

/// Decode a byte produced by [`float_to_byte315`].
pub fn byte315_to_float(b: u8) -> f32 {
    if b == 0 {
        return 0.0;
    }
    let mut bits = i32::from(b) << (24 - MANTISSA_BITS);
    bits += (63 - ZERO_EXP) << 24;
    f32::from_bits(bits as u32)
}
