//! Rendered glyph bitmaps.

/// Single channel alpha bitmap of a rendered glyph.
///
/// Rows are stored bottom to top, so row 0 is the bottom of the glyph.
/// Use [`rows_top_down`](Self::rows_top_down) when writing to a top-down
/// texture.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct GlyphBitmap {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl GlyphBitmap {
    /// Creates a bitmap from raw alpha values.
    ///
    /// Returns `None` if the length of `data` doesn't match the size.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Option<Self> {
        (data.len() == width as usize * height as usize).then_some(Self {
            data,
            width,
            height,
        })
    }

    /// Wraps data whose length is known to be `width * height`.
    pub(crate) fn from_parts(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            data,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns true if the bitmap has no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the alpha value at `(x, y)` with y measured from the bottom.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Returns row `y`, counting from the bottom.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        self.data.get(start..start + self.width as usize)
    }

    /// Returns an iterator over the rows from the top of the glyph down.
    pub fn rows_top_down(&self) -> impl DoubleEndedIterator<Item = &[u8]> + '_ {
        // chunks_exact panics on zero
        let width = (self.width as usize).max(1);
        self.data.chunks_exact(width).rev()
    }

    /// Returns true if every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|alpha| *alpha == 0)
    }
}

impl std::fmt::Debug for GlyphBitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphBitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("inked", &self.data.iter().filter(|a| **a != 0).count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows() {
        let bitmap = GlyphBitmap::new(vec![1, 2, 3, 4, 5, 6], 3, 2).unwrap();
        assert_eq!(bitmap.row(0), Some([1, 2, 3].as_slice()));
        assert_eq!(bitmap.row(2), None);
        assert_eq!(bitmap.get(2, 1), Some(6));
        assert_eq!(bitmap.get(3, 0), None);
        let top_down: Vec<_> = bitmap.rows_top_down().collect();
        assert_eq!(top_down, [[4, 5, 6].as_slice(), [1, 2, 3].as_slice()]);
    }

    #[test]
    fn size_mismatch() {
        assert!(GlyphBitmap::new(vec![0; 5], 3, 2).is_none());
        let empty = GlyphBitmap::new(vec![], 0, 0).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.rows_top_down().count(), 0);
    }
}
