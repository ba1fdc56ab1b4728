//! Quantizing fractional glyph positions.
//!
//! Rendering a glyph at every fractional pixel position would defeat the
//! cache, so positions are snapped to a small number of buckets per pixel
//! and each bucket is rendered once.

use raster_types::{BoundingBox, Point};

/// Number of subpixel positions per pixel along each axis.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct SubpixelBuckets(u8);

impl SubpixelBuckets {
    /// A single bucket: glyphs always render at whole pixel positions.
    pub const NONE: Self = Self(1);

    /// Creates a bucket count, treating zero as one.
    pub const fn new(count: u8) -> Self {
        if count == 0 {
            Self::NONE
        } else {
            Self(count)
        }
    }

    /// Picks the bucket count for a size in pixels per em.
    ///
    /// Tiny sizes gain nothing from subpixel positioning and very large
    /// ones would fill the atlas with near identical copies.
    pub fn for_ppem(ppem: f32) -> Self {
        if ppem <= 6.0 {
            Self(1)
        } else if ppem < 16.0 {
            Self(4)
        } else if ppem <= 100.0 {
            Self(10)
        } else {
            Self(1)
        }
    }

    pub const fn count(self) -> u8 {
        self.0
    }

    /// Splits a position in pixels into a whole pixel and a bucket.
    ///
    /// The fractional part is always taken in `[0, 1)`, so `-0.25` lands in
    /// pixel `-1`.
    pub fn quantize(self, precise: f32) -> (i32, u8) {
        let mut pixel = precise.trunc() as i32;
        let mut fraction = precise - pixel as f32;
        if fraction < 0.0 {
            fraction += 1.0;
            pixel -= 1;
        }
        let count = self.0 as f32;
        let bucket = (fraction * count).floor().clamp(0.0, count - 1.0) as u8;
        (pixel, bucket)
    }

    /// Returns the render offset for a bucket, in pixels.
    pub fn offset(self, bucket: u8) -> f32 {
        bucket.min(self.0 - 1) as f32 / self.0 as f32
    }
}

impl Default for SubpixelBuckets {
    fn default() -> Self {
        Self::NONE
    }
}

/// Subpixel bucket pair; part of the cache key.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug)]
pub struct SubpixelKey {
    pub x: u8,
    pub y: u8,
}

impl SubpixelKey {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Returns the subpixel offset to render with.
    pub fn offset(self, buckets: SubpixelBuckets) -> Point<f32> {
        Point::new(buckets.offset(self.x), buckets.offset(self.y))
    }

    /// Limits both buckets to the last one in `buckets`.
    pub fn clamped(self, buckets: SubpixelBuckets) -> Self {
        let last = buckets.count() - 1;
        Self::new(self.x.min(last), self.y.min(last))
    }
}

/// Where a glyph lands on screen for a given pen position.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct GlyphPlacement {
    /// Whole pixel x of the bitmap's left edge.
    pub x: i32,
    /// Whole pixel y of the bitmap's bottom edge, y up.
    pub y: i32,
    pub subpixel: SubpixelKey,
}

impl GlyphPlacement {
    /// Computes the placement of a glyph with the given outline bounds
    /// drawn at a pen position in design units.
    pub fn new(
        pen_x: i32,
        pen_y: i32,
        bounds: &BoundingBox<i16>,
        scale: f32,
        buckets: SubpixelBuckets,
    ) -> Self {
        let precise_x = (pen_x as f32 + bounds.x_min as f32) * scale;
        let precise_y = (pen_y as f32 + bounds.y_min as f32) * scale;
        let (x, sub_x) = buckets.quantize(precise_x);
        let (y, sub_y) = buckets.quantize(precise_y);
        Self {
            x,
            y,
            subpixel: SubpixelKey::new(sub_x, sub_y),
        }
    }

    /// Top left corner of a bitmap `height` pixels tall in a y down
    /// coordinate system.
    pub fn top_left(&self, height: u32) -> (i32, i32) {
        (self.x, -self.y - height as i32)
    }
}
