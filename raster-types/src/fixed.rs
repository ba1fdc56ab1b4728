//! 2.14 fixed point numbers, as used for composite glyph transforms.

use std::fmt;

/// 16-bit signed fixed point number with 14 bits of fraction.
///
/// Component transforms in the `glyf` table store their 2x2 matrix in this
/// format, which covers the range [-2.0, 2.0).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct F2Dot14(i16);

impl F2Dot14 {
    /// Minimum value.
    pub const MIN: Self = Self(i16::MIN);

    /// Maximum value.
    pub const MAX: Self = Self(i16::MAX);

    /// Zero.
    pub const ZERO: Self = Self(0);

    /// One.
    pub const ONE: Self = Self(1 << Self::FRACT_BITS);

    const FRACT_BITS: u32 = 14;
    const SCALE: f32 = (1 << Self::FRACT_BITS) as f32;

    /// Creates a value from its raw bit representation.
    pub const fn from_bits(bits: i16) -> Self {
        Self(bits)
    }

    /// Returns the raw bit representation.
    pub const fn to_bits(self) -> i16 {
        self.0
    }

    /// Creates a fixed point value from an `f32`.
    ///
    /// This operation is lossy; the float is rounded to the nearest
    /// representable value and saturates at the ends of the range.
    pub fn from_f32(x: f32) -> Self {
        Self((x * Self::SCALE).round().clamp(i16::MIN as f32, i16::MAX as f32) as i16)
    }

    /// Returns the value as an `f32`.
    ///
    /// This operation is lossless: all representable values can be
    /// round-tripped.
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / Self::SCALE
    }
}

impl fmt::Display for F2Dot14 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.to_f32().fmt(f)
    }
}

impl fmt::Debug for F2Dot14 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.to_f32().fmt(f)
    }
}
