//! Gamma correction lookup table.

use crate::RasterError;

/// Maps linear coverage to gamma corrected alpha.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GammaTable {
    gamma_bits: u32,
    table: [u8; 256],
}

impl GammaTable {
    /// Table for gamma 1.0, mapping every value to itself.
    pub const IDENTITY: Self = Self {
        gamma_bits: 1.0f32.to_bits(),
        table: identity_table(),
    };

    /// Builds the table `255 * (i / 255) ^ (1 / gamma)`, rounded.
    pub fn new(gamma: f32) -> Result<Self, RasterError> {
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(RasterError::InvalidGamma(gamma));
        }
        if gamma == 1.0 {
            return Ok(Self::IDENTITY);
        }
        let exponent = 1.0 / gamma as f64;
        let mut table = [0u8; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            let linear = i as f64 / 255.0;
            *entry = (255.0 * linear.powf(exponent)).round().clamp(0.0, 255.0) as u8;
        }
        Ok(Self {
            gamma_bits: gamma.to_bits(),
            table,
        })
    }

    pub fn gamma(&self) -> f32 {
        f32::from_bits(self.gamma_bits)
    }

    /// Returns the corrected value for `alpha`.
    #[inline(always)]
    pub fn apply(&self, alpha: u8) -> u8 {
        self.table[alpha as usize]
    }

    pub fn as_bytes(&self) -> &[u8; 256] {
        &self.table
    }
}

impl Default for GammaTable {
    fn default() -> Self {
        Self::IDENTITY
    }
}

const fn identity_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = i as u8;
        i += 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_is_identity() {
        let table = GammaTable::new(1.0).unwrap();
        assert_eq!(table, GammaTable::IDENTITY);
        assert!((0..=255u8).all(|i| table.apply(i) == i));
    }

    #[test]
    fn brightens_midtones() {
        let table = GammaTable::new(1.2).unwrap();
        assert_eq!(table.gamma(), 1.2);
        assert_eq!(table.apply(0), 0);
        assert_eq!(table.apply(255), 255);
        // 255 * (128 / 255) ^ (1 / 1.2) = 143.58
        assert_eq!(table.apply(128), 144);
        assert!(table.as_bytes().windows(2).all(|w| w[0] <= w[1]));
        assert!((1..255u8).all(|i| table.apply(i) >= i));
    }

    #[test]
    fn invalid_gamma() {
        for gamma in [0.0, -1.2, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                GammaTable::new(gamma),
                Err(RasterError::InvalidGamma(_))
            ));
        }
    }
}
