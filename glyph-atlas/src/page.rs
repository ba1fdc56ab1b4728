//! Single channel atlas textures.

use glyph_raster::GlyphBitmap;
use raster_types::Rect;

use crate::allocator::AtlasAllocator;

/// One atlas texture: an allocator plus its alpha pixels.
///
/// Pixels are stored top-down, the usual layout for texture uploads, so
/// glyph bitmaps are flipped as they are copied in.
#[derive(Clone, Debug)]
pub struct AtlasPage {
    allocator: AtlasAllocator,
    pixels: Vec<u8>,
    dirty: Option<Rect>,
}

impl AtlasPage {
    /// Creates a transparent page of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            allocator: AtlasAllocator::new(width, height),
            pixels: vec![0; width as usize * height as usize],
            dirty: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.allocator.width()
    }

    pub fn height(&self) -> u32 {
        self.allocator.height()
    }

    /// Alpha values, row by row from the top.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn allocator(&self) -> &AtlasAllocator {
        &self.allocator
    }

    /// Reserves a region of the given size. See [`AtlasAllocator::allocate`].
    pub fn allocate(&mut self, width: u32, height: u32) -> Option<Rect> {
        self.allocator.allocate(width, height)
    }

    /// Copies `bitmap` into `region`, flipping it so that the top row of
    /// the glyph lands on the top row of the region.
    ///
    /// Anything outside of the region or the page is clipped.
    pub fn blit(&mut self, region: Rect, bitmap: &GlyphBitmap) {
        let page_width = self.width() as usize;
        let width = region
            .width
            .min(bitmap.width())
            .min(self.width().saturating_sub(region.x)) as usize;
        let rows = region
            .height
            .min(bitmap.height())
            .min(self.height().saturating_sub(region.y));
        if width == 0 || rows == 0 {
            return;
        }
        for (i, src) in bitmap.rows_top_down().take(rows as usize).enumerate() {
            let start = (region.y as usize + i) * page_width + region.x as usize;
            self.pixels[start..start + width].copy_from_slice(&src[..width]);
        }
        let written = Rect::new(region.x, region.y, width as u32, rows);
        self.dirty = Some(match self.dirty {
            Some(dirty) => dirty.union(&written),
            None => written,
        });
    }

    /// Bounds of everything written since the last call to
    /// [`take_dirty`](Self::take_dirty).
    pub fn dirty(&self) -> Option<Rect> {
        self.dirty
    }

    /// Returns and clears the dirty bounds.
    pub fn take_dirty(&mut self) -> Option<Rect> {
        self.dirty.take()
    }

    /// Returns the pixels of `region` row by row, for uploading a dirty
    /// area.
    pub fn region_rows(&self, region: Rect) -> impl Iterator<Item = &[u8]> + '_ {
        let page_width = self.width() as usize;
        let x = (region.x as usize).min(page_width);
        let end = (region.right() as usize).min(page_width);
        let rows = region.y..region.bottom().min(self.height());
        rows.map(move |y| {
            let start = y as usize * page_width;
            &self.pixels[start + x..start + end]
        })
    }

    /// Frees every region and clears the pixels.
    pub fn clear(&mut self) {
        self.allocator.reset();
        self.pixels.fill(0);
        self.dirty = Some(Rect::from_size(self.width(), self.height()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// 2x3 bitmap, bottom row first.
    fn bitmap() -> GlyphBitmap {
        GlyphBitmap::new(vec![1, 2, 3, 4, 5, 6], 2, 3).unwrap()
    }

    #[test]
    fn blit_flips_rows() {
        let mut page = AtlasPage::new(4, 4);
        let region = page.allocate(2, 3).unwrap();
        page.blit(region, &bitmap());
        #[rustfmt::skip]
        assert_eq!(
            page.pixels(),
            [
                5, 6, 0, 0,
                3, 4, 0, 0,
                1, 2, 0, 0,
                0, 0, 0, 0,
            ]
        );
        let rows: Vec<_> = page.region_rows(region).collect();
        assert_eq!(rows, [[5, 6], [3, 4], [1, 2]]);
    }

    #[test]
    fn dirty_tracking() {
        let mut page = AtlasPage::new(8, 8);
        assert_eq!(page.dirty(), None);
        page.blit(Rect::new(1, 1, 2, 3), &bitmap());
        page.blit(Rect::new(5, 4, 2, 3), &bitmap());
        assert_eq!(page.take_dirty(), Some(Rect::new(1, 1, 6, 6)));
        assert_eq!(page.take_dirty(), None);
        page.clear();
        assert_eq!(page.take_dirty(), Some(Rect::new(0, 0, 8, 8)));
        assert!(page.pixels().iter().all(|a| *a == 0));
        assert_eq!(page.allocator().free_area(), 64);
    }

    #[test]
    fn rows_of_a_far_away_region() {
        let page = AtlasPage::new(4, 4);
        let rows = page
            .region_rows(Rect::new(u32::MAX - 1, 0, 10, 10))
            .collect::<Vec<_>>();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|row| row.is_empty()));
        assert_eq!(page.region_rows(Rect::new(0, u32::MAX, 4, 4)).count(), 0);
    }

    #[test]
    fn blit_clips_to_page() {
        let mut page = AtlasPage::new(3, 2);
        page.blit(Rect::new(2, 0, 2, 3), &bitmap());
        // only the first column of the top two glyph rows fits
        assert_eq!(page.pixels(), [0, 0, 5, 0, 0, 3]);
        assert_eq!(page.dirty(), Some(Rect::new(2, 0, 1, 2)));
    }
}
