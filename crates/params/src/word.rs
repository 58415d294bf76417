//! Machine word geometry

/// Width of the native machine word (`usize`) in bits
pub const BITS_PER_LONG: u32 = usize::BITS;

/// Shift that moves the sign bit of a word into every bit position
/// when applied as an arithmetic right shift
pub const SIGN_SHIFT: u32 = BITS_PER_LONG - 1;
