//! Free rectangle allocation within a fixed size atlas.

use raster_types::Rect;

/// Packs rectangles into a fixed area using a list of free rectangles.
///
/// Each request takes the smallest free rectangle that can hold it. The
/// allocation goes in that rectangle's top left corner and the leftover
/// space is split into at most two new free rectangles along the axis with
/// the larger remainder. Freed space is never merged back; call
/// [`reset`](Self::reset) to start over.
#[derive(Clone, Debug)]
pub struct AtlasAllocator {
    width: u32,
    height: u32,
    free: Vec<Rect>,
}

impl AtlasAllocator {
    /// Creates an allocator for an empty atlas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        let mut allocator = Self {
            width,
            height,
            free: Vec::new(),
        };
        allocator.reset();
        allocator
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reserves a `width × height` region.
    ///
    /// Returns `None` when no free rectangle is large enough. Empty requests
    /// always succeed with an empty rectangle at the origin and consume no
    /// space.
    pub fn allocate(&mut self, width: u32, height: u32) -> Option<Rect> {
        if width == 0 || height == 0 {
            return Some(Rect::new(0, 0, width, height));
        }
        let (best_ix, best) = self
            .free
            .iter()
            .enumerate()
            .filter(|(_, free)| free.width >= width && free.height >= height)
            // ties go to the earliest rectangle
            .min_by_key(|(ix, free)| (free.area(), *ix))
            .map(|(ix, free)| (ix, *free))?;
        self.free.remove(best_ix);
        let remaining_right = best.width - width;
        let remaining_bottom = best.height - height;
        let (right, bottom) = if remaining_right < remaining_bottom {
            (
                Rect::new(best.x + width, best.y, remaining_right, height),
                Rect::new(best.x, best.y + height, best.width, remaining_bottom),
            )
        } else {
            (
                Rect::new(best.x + width, best.y, remaining_right, best.height),
                Rect::new(best.x, best.y + height, width, remaining_bottom),
            )
        };
        self.free
            .extend([right, bottom].into_iter().filter(|rect| !rect.is_empty()));
        Some(Rect::new(best.x, best.y, width, height))
    }

    /// Currently free rectangles. They never overlap each other.
    pub fn free_rects(&self) -> &[Rect] {
        &self.free
    }

    /// Total free area.
    pub fn free_area(&self) -> u64 {
        self.free.iter().map(Rect::area).sum()
    }

    /// Frees every allocation.
    pub fn reset(&mut self) {
        self.free.clear();
        let full = Rect::from_size(self.width, self.height);
        if !full.is_empty() {
            self.free.push(full);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_disjoint(rects: &[Rect]) {
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn split_narrow_right_remainder() {
        let mut allocator = AtlasAllocator::new(100, 100);
        // 10 left on the right, 60 below
        let region = allocator.allocate(90, 40).unwrap();
        assert_eq!(region, Rect::new(0, 0, 90, 40));
        assert_eq!(
            allocator.free_rects(),
            [Rect::new(90, 0, 10, 40), Rect::new(0, 40, 100, 60)]
        );
    }

    #[test]
    fn split_wide_right_remainder() {
        let mut allocator = AtlasAllocator::new(100, 100);
        // 70 left on the right, 20 below
        allocator.allocate(30, 80).unwrap();
        assert_eq!(
            allocator.free_rects(),
            [Rect::new(30, 0, 70, 100), Rect::new(0, 80, 30, 20)]
        );
    }

    #[test]
    fn exact_fit_leaves_nothing() {
        let mut allocator = AtlasAllocator::new(16, 16);
        assert_eq!(allocator.allocate(16, 16), Some(Rect::new(0, 0, 16, 16)));
        assert!(allocator.free_rects().is_empty());
        assert_eq!(allocator.allocate(1, 1), None);
        allocator.reset();
        assert_eq!(allocator.free_area(), 256);
    }

    #[test]
    fn best_fit_prefers_smallest() {
        let mut allocator = AtlasAllocator::new(100, 100);
        allocator.allocate(30, 80).unwrap();
        // free: (30, 0, 70x100) and (0, 80, 30x20); a 10x10 fits both and
        // goes to the smaller one
        let region = allocator.allocate(10, 10).unwrap();
        assert_eq!(region, Rect::new(0, 80, 10, 10));
    }

    #[test]
    fn too_large() {
        let mut allocator = AtlasAllocator::new(64, 32);
        assert_eq!(allocator.allocate(65, 1), None);
        assert_eq!(allocator.allocate(1, 33), None);
        assert_eq!(allocator.free_area(), 64 * 32);
    }

    #[test]
    fn many_allocations_stay_disjoint_and_in_bounds() {
        let mut allocator = AtlasAllocator::new(256, 256);
        let bounds = Rect::from_size(256, 256);
        let mut used = Vec::new();
        let mut used_area = 0;
        // deterministic spread of sizes
        for i in 0..400u32 {
            let (w, h) = (1 + (i * 7) % 23, 1 + (i * 13) % 19);
            let Some(region) = allocator.allocate(w, h) else {
                continue;
            };
            assert_eq!((region.width, region.height), (w, h));
            assert!(bounds.contains_rect(&region));
            used_area += region.area();
            used.push(region);
        }
        assert!(used.len() > 100);
        assert_disjoint(&used);
        let mut everything = used.clone();
        everything.extend_from_slice(allocator.free_rects());
        assert_disjoint(&everything);
        assert_eq!(used_area + allocator.free_area(), bounds.area());
    }

    #[test]
    fn empty_request() {
        let mut allocator = AtlasAllocator::new(8, 8);
        assert_eq!(allocator.allocate(0, 5), Some(Rect::new(0, 0, 0, 5)));
        assert_eq!(allocator.free_area(), 64);
    }
}
