//! Adaptive subdivision of quadratic Bézier curves into line segments.

use raster_types::Point;

use crate::RasterError;

/// Subdivision stops at this depth even if the curve is not yet flat.
///
/// 2^16 segments is far beyond anything a glyph needs; the cap only
/// matters for NaN or absurdly large coordinates, which never test flat.
const MAX_DEPTH: u32 = 16;

/// Returns `tolerance` if it can be used for flattening.
pub(crate) fn check_tolerance(tolerance: f32) -> Result<f32, RasterError> {
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(tolerance)
    } else {
        Err(RasterError::InvalidTolerance(tolerance))
    }
}

/// Flattens the quadratic curve `p0, p1, p2` into a polyline.
///
/// The curve is split in half until the control point lies within
/// `tolerance` of the chord. The result starts at `p0` and ends at `p2`.
pub fn flatten_quad(
    p0: Point<f32>,
    p1: Point<f32>,
    p2: Point<f32>,
    tolerance: f32,
) -> Result<Vec<Point<f32>>, RasterError> {
    let mut output = Vec::new();
    flatten_quad_into(p0, p1, p2, tolerance, &mut output)?;
    Ok(output)
}

/// Flattens the quadratic curve `p0, p1, p2`, appending to `output`.
///
/// `p0` is only pushed when `output` is empty: when appending to an
/// existing polyline its last point is assumed to already be `p0`.
pub fn flatten_quad_into(
    p0: Point<f32>,
    p1: Point<f32>,
    p2: Point<f32>,
    tolerance: f32,
    output: &mut Vec<Point<f32>>,
) -> Result<(), RasterError> {
    let tolerance = check_tolerance(tolerance)?;
    subdivide(p0, p1, p2, tolerance, output, 0);
    Ok(())
}

/// Tolerance must have been validated.
pub(crate) fn subdivide(
    p0: Point<f32>,
    p1: Point<f32>,
    p2: Point<f32>,
    tolerance: f32,
    output: &mut Vec<Point<f32>>,
    depth: u32,
) {
    if depth >= MAX_DEPTH || distance_to_segment(p1, p0, p2) < tolerance {
        if output.is_empty() {
            output.push(p0);
        }
        output.push(p2);
        return;
    }
    // de Casteljau at t = 0.5
    let p01 = p0.midpoint(p1);
    let p12 = p1.midpoint(p2);
    let mid = p01.midpoint(p12);
    subdivide(p0, p01, mid, tolerance, output, depth + 1);
    subdivide(mid, p12, p2, tolerance, output, depth + 1);
}

/// Distance from `point` to the closest point on the segment `a, b`.
fn distance_to_segment(point: Point<f32>, a: Point<f32>, b: Point<f32>) -> f32 {
    let chord = b - a;
    let length_squared = chord.length_squared();
    if length_squared == 0.0 {
        return point.distance(a);
    }
    let t = ((point - a).dot(chord) / length_squared).clamp(0.0, 1.0);
    point.distance(a + chord * t)
}
