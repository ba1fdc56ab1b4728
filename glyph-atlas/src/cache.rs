//! Shared cache of rendered glyphs.

use std::sync::{Mutex, MutexGuard, PoisonError};

use fnv::FnvHashMap;
use glyph_raster::{GlyphRenderer, OutlineSource, RenderSettings};
use raster_types::{BoundingBox, GlyphId, Rect};

use crate::{
    config::GlyphCacheConfig,
    page::AtlasPage,
    subpixel::{GlyphPlacement, SubpixelBuckets, SubpixelKey},
    AtlasError,
};

/// Location of a cached glyph bitmap.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct CachedGlyph {
    /// Index of the atlas page holding the bitmap.
    pub page: usize,
    /// Region of the page covered by the bitmap, top-down.
    pub region: Rect,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
struct GlyphKey {
    glyph_id: GlyphId,
    subpixel: SubpixelKey,
}

#[derive(Default)]
struct CacheState {
    renderer: GlyphRenderer,
    pages: Vec<AtlasPage>,
    glyphs: FnvHashMap<GlyphKey, CachedGlyph>,
}

/// Renders glyphs of one font on demand and packs them into atlas pages.
///
/// The cache owns its [`OutlineSource`], so a glyph id always refers to
/// the same outline. Use one cache per font and size.
///
/// All state lives behind a single lock, so a cache can be shared between
/// threads when the source can. Rendering happens while the lock is held.
pub struct GlyphCache<S> {
    source: S,
    config: GlyphCacheConfig,
    settings: RenderSettings,
    buckets: SubpixelBuckets,
    state: Mutex<CacheState>,
}

impl<S: OutlineSource> GlyphCache<S> {
    pub fn new(source: S, config: GlyphCacheConfig) -> Self {
        Self {
            source,
            settings: config.render_settings(),
            buckets: SubpixelBuckets::for_ppem(config.ppem()),
            config,
            state: Mutex::default(),
        }
    }

    /// Outlines this cache renders from.
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &GlyphCacheConfig {
        &self.config
    }

    /// Subpixel positions used for this size.
    pub fn buckets(&self) -> SubpixelBuckets {
        self.buckets
    }

    /// Computes where to draw a glyph with the given outline bounds at a
    /// pen position in design units.
    pub fn placement(&self, pen_x: i32, pen_y: i32, bounds: &BoundingBox<i16>) -> GlyphPlacement {
        GlyphPlacement::new(pen_x, pen_y, bounds, self.settings.scale(), self.buckets)
    }

    /// Returns the cached bitmap location for a glyph, rendering and
    /// packing it first if needed.
    ///
    /// Subpixel buckets past the last one are treated as the last one.
    ///
    /// Returns `Ok(None)` for glyphs without an outline. Those are not
    /// cached.
    pub fn get_or_render(
        &self,
        glyph_id: GlyphId,
        subpixel: SubpixelKey,
    ) -> Result<Option<CachedGlyph>, AtlasError> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let key = self.key(glyph_id, subpixel);
        let subpixel = key.subpixel;
        if let Some(cached) = state.glyphs.get(&key) {
            log::trace!("cache hit for {glyph_id} at {subpixel:?}");
            return Ok(Some(*cached));
        }
        let Some(outline) = self.source.outline(glyph_id) else {
            return Ok(None);
        };
        log::trace!("cache miss for {glyph_id} at {subpixel:?}");
        let offset = subpixel.offset(self.buckets);
        let settings = self.settings.subpixel_offset(offset.x, offset.y);
        let bitmap = state.renderer.render(outline, &self.source, &settings)?;
        let (page, region) = self.allocate(&mut state.pages, bitmap.width(), bitmap.height())?;
        state.pages[page].blit(region, &bitmap);
        let cached = CachedGlyph { page, region };
        state.glyphs.insert(key, cached);
        Ok(Some(cached))
    }

    /// Returns the location of a glyph if it has already been rendered.
    pub fn get(
        &self,
        glyph_id: GlyphId,
        subpixel: SubpixelKey,
    ) -> Result<Option<CachedGlyph>, AtlasError> {
        let state = self.lock()?;
        Ok(state.glyphs.get(&self.key(glyph_id, subpixel)).copied())
    }

    fn key(&self, glyph_id: GlyphId, subpixel: SubpixelKey) -> GlyphKey {
        GlyphKey {
            glyph_id,
            subpixel: subpixel.clamped(self.buckets),
        }
    }

    fn allocate(
        &self,
        pages: &mut Vec<AtlasPage>,
        width: u32,
        height: u32,
    ) -> Result<(usize, Rect), AtlasError> {
        for (index, page) in pages.iter_mut().enumerate() {
            if let Some(region) = page.allocate(width, height) {
                return Ok((index, region));
            }
        }
        let max = self.config.max_atlas_size;
        let too_large = AtlasError::GlyphTooLarge { width, height, max };
        let Some(size) = self.config.page_size(width, height) else {
            log::warn!("{width}x{height} glyph is larger than the maximum page size {max}");
            return Err(too_large);
        };
        if pages.len() >= self.config.max_pages {
            log::warn!("no room for a {width}x{height} glyph in {} pages", pages.len());
            return Err(AtlasError::OutOfPages(pages.len()));
        }
        log::debug!("creating atlas page {} of {size}x{size}", pages.len());
        let mut page = AtlasPage::new(size, size);
        let region = page.allocate(width, height).ok_or(too_large)?;
        pages.push(page);
        Ok((pages.len() - 1, region))
    }

    /// Number of atlas pages created so far.
    pub fn page_count(&self) -> usize {
        self.lock_unchecked().pages.len()
    }

    /// Number of cached glyphs.
    pub fn len(&self) -> usize {
        self.lock_unchecked().glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs `f` with the page at `index`, or returns `None` if there is no
    /// such page.
    pub fn with_page<R>(
        &self,
        index: usize,
        f: impl FnOnce(&AtlasPage) -> R,
    ) -> Result<Option<R>, AtlasError> {
        let state = self.lock()?;
        Ok(state.pages.get(index).map(f))
    }

    /// Drains the dirty bounds of every page that changed since the last
    /// call, for uploading to the GPU.
    pub fn take_dirty_regions(&self) -> Result<Vec<(usize, Rect)>, AtlasError> {
        let mut state = self.lock()?;
        let regions = state
            .pages
            .iter_mut()
            .enumerate()
            .filter_map(|(index, page)| Some((index, page.take_dirty()?)))
            .collect();
        Ok(regions)
    }

    /// Forgets every cached glyph and drops all pages.
    pub fn clear(&self) -> Result<(), AtlasError> {
        let mut state = self.lock()?;
        state.glyphs.clear();
        state.pages.clear();
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, CacheState>, AtlasError> {
        self.state.lock().map_err(|_| AtlasError::Poisoned)
    }

    // counts stay meaningful after a panic elsewhere
    fn lock_unchecked(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S> std::fmt::Debug for GlyphCache<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphCache")
            .field("config", &self.config)
            .field("buckets", &self.buckets)
            .finish_non_exhaustive()
    }
}
