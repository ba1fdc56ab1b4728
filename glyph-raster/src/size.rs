//! Font size in typographic points.

/// Font size in points, converted to pixels at 96 DPI.
///
/// One point is 1/72 of an inch, so a 12pt font is 16 pixels per em.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointSize(f32);

impl PointSize {
    /// Pixels per inch of the target display.
    pub const DPI: f32 = 96.0;

    const POINTS_PER_INCH: f32 = 72.0;

    pub fn new(points: f32) -> Self {
        Self(points)
    }

    pub fn points(self) -> f32 {
        self.0
    }

    /// Returns the size in pixels per em.
    pub fn ppem(self) -> f32 {
        self.0 * Self::DPI / Self::POINTS_PER_INCH
    }

    /// Returns the factor that converts font design units to pixels.
    ///
    /// Returns 1.0 when `units_per_em` is 0.
    pub fn linear_scale(self, units_per_em: u16) -> f32 {
        if units_per_em == 0 {
            return 1.0;
        }
        self.0 * Self::DPI / (Self::POINTS_PER_INCH * units_per_em as f32)
    }
}

impl Default for PointSize {
    fn default() -> Self {
        Self(12.0)
    }
}
