//! Error types associated with rasterization.

use crate::contour::COMPOSITE_RECURSION_LIMIT;
use raster_types::GlyphId;

/// Errors that may occur when turning an outline into a bitmap.
///
/// None of these are transient: they describe either invalid parameters
/// or outline data this crate does not support.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RasterError {
    /// Bezier flattening tolerance was zero, negative or not finite.
    #[error("Bezier tolerance must be finite and greater than zero, got {0}")]
    InvalidTolerance(f32),
    /// Gamma value was zero, negative or not finite.
    #[error("Gamma must be finite and greater than zero, got {0}")]
    InvalidGamma(f32),
    /// A supersample factor of zero was requested.
    #[error("Supersample factor must be at least 1")]
    InvalidSupersamples,
    /// Contour end point at this index was less than its preceding end
    /// point or out of range for the point list.
    #[error("Contour end point at index {0} was less than preceding end point or out of range")]
    ContourOrder(usize),
    /// The contour at this index contains only off-curve points.
    #[error("Contour {0} does not contain an on-curve point")]
    NoOnCurvePoint(usize),
    /// A component is positioned by matching points, which is not
    /// supported.
    #[error("Component glyph {0} is positioned by point matching, which is not supported")]
    UnsupportedAnchor(GlyphId),
    /// The outline source had no outline for a component glyph.
    #[error("Glyph {0} was not found in the outline source")]
    GlyphNotFound(GlyphId),
    /// Composite nesting was too deep or cyclic.
    #[error("Recursion limit ({limit}) exceeded when loading composite component {0}", limit = COMPOSITE_RECURSION_LIMIT)]
    RecursionLimitExceeded(GlyphId),
    /// The supersampled coverage grid would be unreasonably large.
    #[error("Bitmap of {width}x{height} pixels exceeds the coverage memory limit")]
    BitmapTooLarge { width: u32, height: u32 },
}
