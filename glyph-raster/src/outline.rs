//! Glyph outlines as they come out of a TrueType `glyf` table.

use std::collections::HashMap;

use raster_types::{BoundingBox, F2Dot14, GlyphId, Point};

/// A single point of a simple glyph in font design units.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutlinePoint {
    pub x: i16,
    pub y: i16,
    /// False for quadratic control points.
    pub on_curve: bool,
}

impl OutlinePoint {
    /// Creates a new point that lies on the curve.
    pub const fn on(x: i16, y: i16) -> Self {
        Self {
            x,
            y,
            on_curve: true,
        }
    }

    /// Creates a new off-curve control point.
    pub const fn off(x: i16, y: i16) -> Self {
        Self {
            x,
            y,
            on_curve: false,
        }
    }

    /// Returns the position multiplied by `scale`.
    pub fn scaled(self, scale: f32) -> Point<f32> {
        Point::from(Point::new(self.x, self.y)) * scale
    }
}

/// Outline made of one or more closed contours of on and off-curve points.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleOutline {
    pub bounds: BoundingBox<i16>,
    pub points: Vec<OutlinePoint>,
    /// Index of the last point of each contour, in increasing order.
    pub contour_ends: Vec<u16>,
}

impl SimpleOutline {
    pub fn new(
        bounds: BoundingBox<i16>,
        points: impl Into<Vec<OutlinePoint>>,
        contour_ends: impl Into<Vec<u16>>,
    ) -> Self {
        Self {
            bounds,
            points: points.into(),
            contour_ends: contour_ends.into(),
        }
    }

    /// Creates an outline with bounds computed from the given points.
    pub fn from_points(
        points: impl Into<Vec<OutlinePoint>>,
        contour_ends: impl Into<Vec<u16>>,
    ) -> Self {
        let points = points.into();
        let bounds = points
            .iter()
            .fold(None, |bounds: Option<BoundingBox<i16>>, p| {
                Some(match bounds {
                    None => BoundingBox::new(p.x, p.y, p.x, p.y),
                    Some(b) => BoundingBox::new(
                        b.x_min.min(p.x),
                        b.y_min.min(p.y),
                        b.x_max.max(p.x),
                        b.y_max.max(p.y),
                    ),
                })
            })
            .unwrap_or_default();
        Self::new(bounds, points, contour_ends)
    }
}

/// 2x2 transform applied to a component before it is offset.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub xx: F2Dot14,
    pub yx: F2Dot14,
    pub xy: F2Dot14,
    pub yy: F2Dot14,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        xx: F2Dot14::ONE,
        yx: F2Dot14::ZERO,
        xy: F2Dot14::ZERO,
        yy: F2Dot14::ONE,
    };

    /// Returns the matrix as `[xx, yx, xy, yy]` floats, which maps
    /// `(x, y)` to `(xx * x + xy * y, yx * x + yy * y)`.
    pub fn to_matrix(&self) -> [f32; 4] {
        [self.xx, self.yx, self.xy, self.yy].map(F2Dot14::to_f32)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Reference to another glyph from a compound outline.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Component {
    pub glyph_id: GlyphId,
    /// Horizontal offset in design units when `args_are_xy_values` is set,
    /// otherwise a point index in the parent.
    pub arg1: i32,
    /// Vertical offset in design units when `args_are_xy_values` is set,
    /// otherwise a point index in the component.
    pub arg2: i32,
    pub args_are_xy_values: bool,
    pub transform: Transform,
}

impl Component {
    /// Creates a component placed at the offset `(dx, dy)`.
    pub fn offset(glyph_id: GlyphId, dx: i32, dy: i32) -> Self {
        Self {
            glyph_id,
            arg1: dx,
            arg2: dy,
            args_are_xy_values: true,
            transform: Transform::IDENTITY,
        }
    }

    pub fn with_transform(self, transform: Transform) -> Self {
        Self { transform, ..self }
    }
}

/// Outline assembled from other glyphs.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompoundOutline {
    pub bounds: BoundingBox<i16>,
    pub components: Vec<Component>,
}

impl CompoundOutline {
    pub fn new(bounds: BoundingBox<i16>, components: impl Into<Vec<Component>>) -> Self {
        Self {
            bounds,
            components: components.into(),
        }
    }
}

/// Either kind of TrueType glyph outline.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GlyphOutline {
    Simple(SimpleOutline),
    Compound(CompoundOutline),
}

impl GlyphOutline {
    /// Bounding box in font design units.
    pub fn bounds(&self) -> BoundingBox<i16> {
        match self {
            Self::Simple(simple) => simple.bounds,
            Self::Compound(compound) => compound.bounds,
        }
    }

    /// Bounding box multiplied by `scale` with the width and height rounded
    /// up to whole pixels.
    pub fn scaled_bounds(&self, scale: f32) -> BoundingBox<f32> {
        let bounds = self.bounds();
        let scaled = bounds.scale(scale);
        let width = scaled_extent(bounds.width(), scale, 0.0);
        let height = scaled_extent(bounds.height(), scale, 0.0);
        BoundingBox::new(
            scaled.x_min,
            scaled.y_min,
            scaled.x_min + width,
            scaled.y_min + height,
        )
    }

    /// Returns true if this outline has no contours or components.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Simple(simple) => simple.contour_ends.is_empty(),
            Self::Compound(compound) => compound.components.is_empty(),
        }
    }
}

impl From<SimpleOutline> for GlyphOutline {
    fn from(value: SimpleOutline) -> Self {
        Self::Simple(value)
    }
}

impl From<CompoundOutline> for GlyphOutline {
    fn from(value: CompoundOutline) -> Self {
        Self::Compound(value)
    }
}

/// Size in design units multiplied by `scale`, shifted by `offset` and
/// rounded up to whole pixels.
pub(crate) fn scaled_extent(size: i32, scale: f32, offset: f32) -> f32 {
    (size as f32 * scale + offset).ceil()
}

/// Lookup of glyph outlines by id, used to resolve compound components.
pub trait OutlineSource {
    /// Returns the outline for the given glyph, or `None` if the glyph does
    /// not exist or has no outline.
    fn outline(&self, glyph_id: GlyphId) -> Option<&GlyphOutline>;
}

impl<T: OutlineSource + ?Sized> OutlineSource for &T {
    fn outline(&self, glyph_id: GlyphId) -> Option<&GlyphOutline> {
        (**self).outline(glyph_id)
    }
}

/// Source with no glyphs, for rendering outlines that have no components.
impl OutlineSource for () {
    fn outline(&self, _glyph_id: GlyphId) -> Option<&GlyphOutline> {
        None
    }
}

/// Indexed by glyph id.
impl OutlineSource for [Option<GlyphOutline>] {
    fn outline(&self, glyph_id: GlyphId) -> Option<&GlyphOutline> {
        self.get(glyph_id.to_u16() as usize)?.as_ref()
    }
}

impl OutlineSource for Vec<Option<GlyphOutline>> {
    fn outline(&self, glyph_id: GlyphId) -> Option<&GlyphOutline> {
        self.as_slice().outline(glyph_id)
    }
}

impl<S: std::hash::BuildHasher> OutlineSource for HashMap<GlyphId, GlyphOutline, S> {
    fn outline(&self, glyph_id: GlyphId) -> Option<&GlyphOutline> {
        self.get(&glyph_id)
    }
}
