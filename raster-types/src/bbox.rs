/// Minimum and maximum extents of a rectangular region.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox<T> {
    /// Minimum extent in the x direction-- the left side of a region.
    pub x_min: T,
    /// Minimum extent in the y direction. In a Y-up coordinate system,
    /// which is used by fonts, this represents the bottom of a region.
    pub y_min: T,
    /// Maximum extent in the x direction-- the right side of a region.
    pub x_max: T,
    /// Maximum extent in the y direction. In a Y-up coordinate system,
    /// which is used by fonts, this represents the top of the region.
    pub y_max: T,
}

impl<T> BoundingBox<T> {
    pub const fn new(x_min: T, y_min: T, x_max: T, y_max: T) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }
}

impl BoundingBox<i16> {
    /// Width in font units. Inverted boxes have zero width.
    pub fn width(&self) -> i32 {
        (self.x_max as i32 - self.x_min as i32).max(0)
    }

    /// Height in font units. Inverted boxes have zero height.
    pub fn height(&self) -> i32 {
        (self.y_max as i32 - self.y_min as i32).max(0)
    }

    /// Returns true if the box encloses no area.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Returns the bounds converted to floating point and multiplied by
    /// `scale`.
    pub fn scale(&self, scale: f32) -> BoundingBox<f32> {
        BoundingBox {
            x_min: self.x_min as f32 * scale,
            y_min: self.y_min as f32 * scale,
            x_max: self.x_max as f32 * scale,
            y_max: self.y_max as f32 * scale,
        }
    }
}

impl BoundingBox<f32> {
    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }
}
