//! Conversion of glyph outlines into closed polylines.
//!
//! Simple outlines are walked point by point, expanding runs of off-curve
//! points into chains of quadratic curves, and handed to a [`SegmentPen`].
//! [`PolylinePen`] flattens those segments into [`Contour`]s. Compound
//! outlines are resolved recursively through an [`OutlineSource`].

use std::ops::Range;

use raster_types::{GlyphId, Point};

use crate::{
    decycler::{Decycler, DecyclerError},
    flatten::{check_tolerance, subdivide},
    outline::{CompoundOutline, GlyphOutline, OutlineSource, SimpleOutline},
    pen::SegmentPen,
    RasterError,
};

/// Maximum nesting depth of compound glyphs.
pub const COMPOSITE_RECURSION_LIMIT: usize = 32;

type ComponentDecycler = Decycler<GlyphId, COMPOSITE_RECURSION_LIMIT>;

/// Closed polyline in scaled pixel space.
///
/// The last point connects back to the first.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Contour {
    points: Vec<Point<f32>>,
}

impl Contour {
    pub fn new(points: Vec<Point<f32>>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point<f32>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns an iterator over the edges of the contour, including the
    /// closing edge from the last point back to the first.
    pub fn edges(&self) -> impl Iterator<Item = (Point<f32>, Point<f32>)> + '_ {
        let next = self.points.iter().cycle().skip(1);
        self.points.iter().copied().zip(next.copied())
    }

    /// Returns true if the contour winds clockwise in the y-up coordinate
    /// system of the outline.
    ///
    /// This is the sign of the shoelace sum `(x2 - x1) * (y2 + y1)` over
    /// all edges.
    pub fn is_clockwise(&self) -> bool {
        self.edges()
            .map(|(p1, p2)| (p2.x - p1.x) * (p2.y + p1.y))
            .sum::<f32>()
            > 0.0
    }

    /// Moves every point by `offset`.
    pub fn translate(&mut self, offset: Point<f32>) {
        for point in &mut self.points {
            *point += offset;
        }
    }
}

/// Pen that flattens segments into a list of contours.
///
/// A contour does not repeat its start point: the first point recorded is
/// the end of the first segment and the last point is the start point
/// again, reached by the final segment.
pub struct PolylinePen {
    contours: Vec<Contour>,
    current: Vec<Point<f32>>,
    last: Point<f32>,
    tolerance: f32,
    scratch: Vec<Point<f32>>,
}

impl PolylinePen {
    /// Creates a new pen that flattens curves with the given tolerance.
    pub fn new(tolerance: f32) -> Result<Self, RasterError> {
        Ok(Self {
            contours: Vec::new(),
            current: Vec::new(),
            last: Point::ZERO,
            tolerance: check_tolerance(tolerance)?,
            scratch: Vec::new(),
        })
    }

    /// Returns the contours collected so far, finishing any that was not
    /// explicitly closed.
    pub fn into_contours(mut self) -> Vec<Contour> {
        self.finish_contour();
        self.contours
    }

    fn finish_contour(&mut self) {
        if !self.current.is_empty() {
            let points = std::mem::take(&mut self.current);
            self.contours.push(Contour::new(points));
        }
    }
}

impl SegmentPen for PolylinePen {
    fn move_to(&mut self, p: Point<f32>) {
        self.finish_contour();
        self.last = p;
    }

    fn line_to(&mut self, p: Point<f32>) {
        self.current.push(p);
        self.last = p;
    }

    fn quad_to(&mut self, control: Point<f32>, p: Point<f32>) {
        self.scratch.clear();
        subdivide(self.last, control, p, self.tolerance, &mut self.scratch, 0);
        self.current.extend(self.scratch.iter().skip(1));
        self.last = p;
    }

    fn close(&mut self) {
        self.finish_contour();
    }
}

/// Generates the flattened contours of `outline` at the given scale.
///
/// Component glyphs of compound outlines are looked up in `source`.
pub fn generate_contours(
    outline: &GlyphOutline,
    source: &(impl OutlineSource + ?Sized),
    scale: f32,
    tolerance: f32,
) -> Result<Vec<Contour>, RasterError> {
    let mut pen = PolylinePen::new(tolerance)?;
    draw_outline(outline, source, scale, &mut pen)?;
    Ok(pen.into_contours())
}

/// Walks `outline` at the given scale, emitting segments to `pen`.
///
/// Component offsets and transforms are applied to the emitted points, so
/// the pen sees the fully assembled glyph.
pub fn draw_outline(
    outline: &GlyphOutline,
    source: &(impl OutlineSource + ?Sized),
    scale: f32,
    pen: &mut impl SegmentPen,
) -> Result<(), RasterError> {
    let mut decycler = ComponentDecycler::new();
    draw_impl(outline, source, scale, &Placement::IDENTITY, &mut decycler, pen)
}

fn draw_impl(
    outline: &GlyphOutline,
    source: &(impl OutlineSource + ?Sized),
    scale: f32,
    placement: &Placement,
    decycler: &mut ComponentDecycler,
    pen: &mut impl SegmentPen,
) -> Result<(), RasterError> {
    match outline {
        GlyphOutline::Simple(simple) => draw_simple(simple, scale, placement, pen),
        GlyphOutline::Compound(compound) => {
            draw_compound(compound, source, scale, placement, decycler, pen)
        }
    }
}

fn draw_compound(
    compound: &CompoundOutline,
    source: &(impl OutlineSource + ?Sized),
    scale: f32,
    placement: &Placement,
    decycler: &mut ComponentDecycler,
    pen: &mut impl SegmentPen,
) -> Result<(), RasterError> {
    for component in &compound.components {
        let glyph_id = component.glyph_id;
        if !component.args_are_xy_values {
            return Err(RasterError::UnsupportedAnchor(glyph_id));
        }
        let depth = decycler.depth();
        let mut guard = decycler.enter(glyph_id).map_err(|e| {
            let reason = match e {
                DecyclerError::CycleDetected => "cycle",
                DecyclerError::DepthLimitExceeded => "depth limit",
            };
            log::debug!("composite {reason} at depth {depth} while loading component {glyph_id}");
            RasterError::RecursionLimitExceeded(glyph_id)
        })?;
        let child = source
            .outline(glyph_id)
            .ok_or(RasterError::GlyphNotFound(glyph_id))?;
        // The child's points are transformed first, then offset, then
        // placed by every enclosing component.
        let local = Placement {
            matrix: component.transform.to_matrix(),
            offset: Point::new(component.arg1 as f32, component.arg2 as f32) * scale,
        };
        let combined = placement.then_apply(&local);
        draw_impl(child, source, scale, &combined, &mut guard, pen)?;
    }
    Ok(())
}

fn draw_simple(
    simple: &SimpleOutline,
    scale: f32,
    placement: &Placement,
    pen: &mut impl SegmentPen,
) -> Result<(), RasterError> {
    let points = &simple.points;
    for (contour_ix, range) in contour_ranges(simple).enumerate() {
        let range = range?;
        let contour = &points[range];
        let start = contour
            .iter()
            .position(|p| p.on_curve)
            .ok_or(RasterError::NoOnCurvePoint(contour_ix))?;
        let len = contour.len();
        let at = |ix: usize| placement.map(contour[ix % len].scaled(scale));
        pen.move_to(at(start));
        // Visit the remaining points and finish on the start point.
        let mut i = 1;
        while i <= len {
            let ix = start + i;
            if contour[ix % len].on_curve {
                pen.line_to(at(ix));
                i += 1;
            } else if contour[(ix + 1) % len].on_curve {
                pen.quad_to(at(ix), at(ix + 1));
                i += 2;
            } else {
                let control = at(ix);
                pen.quad_to(control, control.midpoint(at(ix + 1)));
                i += 1;
            }
        }
        pen.close();
    }
    Ok(())
}

/// Yields the point index range of each contour of `simple`.
fn contour_ranges(
    simple: &SimpleOutline,
) -> impl Iterator<Item = Result<Range<usize>, RasterError>> + '_ {
    let num_points = simple.points.len();
    let mut start = 0;
    simple
        .contour_ends
        .iter()
        .enumerate()
        .map(move |(contour_ix, end)| {
            let end = *end as usize;
            if end < start || end >= num_points {
                return Err(RasterError::ContourOrder(contour_ix));
            }
            let range = start..end + 1;
            start = end + 1;
            Ok(range)
        })
}

/// Affine mapping accumulated over nested components.
///
/// The matrix is stored as `[xx, yx, xy, yy]` and maps
/// `(x, y)` to `(xx * x + xy * y + dx, yx * x + yy * y + dy)`.
#[derive(Copy, Clone, PartialEq, Debug)]
struct Placement {
    matrix: [f32; 4],
    offset: Point<f32>,
}

impl Placement {
    const IDENTITY: Self = Self {
        matrix: [1.0, 0.0, 0.0, 1.0],
        offset: Point::ZERO,
    };

    fn map(&self, p: Point<f32>) -> Point<f32> {
        let [xx, yx, xy, yy] = self.matrix;
        Point::new(
            xx * p.x + xy * p.y + self.offset.x,
            yx * p.x + yy * p.y + self.offset.y,
        )
    }

    /// Returns the placement that applies `inner` first and then `self`.
    fn then_apply(&self, inner: &Placement) -> Placement {
        let [a, b, c, d] = self.matrix;
        let [e, f, g, h] = inner.matrix;
        Placement {
            matrix: [a * e + c * f, b * e + d * f, a * g + c * h, b * g + d * h],
            offset: self.map(inner.offset),
        }
    }
}
