//! Glyph cache configuration.

use glyph_raster::{PointSize, RenderOptions, RenderSettings};

/// Settings shared by every glyph in a [`GlyphCache`](crate::GlyphCache).
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GlyphCacheConfig {
    pub point_size: PointSize,
    pub units_per_em: u16,
    pub render_options: RenderOptions,
    pub supersamples: u32,
    pub bezier_tolerance: f32,
    /// Smallest edge length of a new atlas page, in pixels.
    pub min_atlas_size: u32,
    /// Largest edge length of an atlas page. Glyphs that don't fit are
    /// rejected.
    pub max_atlas_size: u32,
    /// Number of pages after which the cache reports that it is full.
    pub max_pages: usize,
}

impl GlyphCacheConfig {
    pub fn new(point_size: PointSize, units_per_em: u16) -> Self {
        Self {
            point_size,
            units_per_em,
            ..Default::default()
        }
    }

    pub fn render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    pub fn supersamples(mut self, supersamples: u32) -> Self {
        self.supersamples = supersamples;
        self
    }

    pub fn bezier_tolerance(mut self, tolerance: f32) -> Self {
        self.bezier_tolerance = tolerance;
        self
    }

    /// Sets the bounds for the edge length of atlas pages.
    pub fn atlas_size(mut self, min: u32, max: u32) -> Self {
        self.min_atlas_size = min;
        self.max_atlas_size = max;
        self
    }

    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn ppem(&self) -> f32 {
        self.point_size.ppem()
    }

    /// Render settings for glyphs at whole pixel positions.
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings::new(self.point_size, self.units_per_em)
            .options(self.render_options)
            .supersamples(self.supersamples)
            .bezier_tolerance(self.bezier_tolerance)
    }

    /// Edge length of a new page that must hold a glyph of the given size.
    ///
    /// Room for sixteen glyphs per row at the current size, rounded up to a
    /// power of two and kept within the configured bounds. Returns `None`
    /// if the glyph is larger than the biggest allowed page.
    pub fn page_size(&self, glyph_width: u32, glyph_height: u32) -> Option<u32> {
        let needed = glyph_width.max(glyph_height);
        if needed > self.max_atlas_size {
            return None;
        }
        let preferred = (self.ppem() * 16.0).ceil().max(1.0) as u32;
        let size = preferred
            .checked_next_power_of_two()
            .unwrap_or(u32::MAX)
            .max(self.min_atlas_size)
            .min(self.max_atlas_size);
        Some(size.max(needed))
    }
}

impl Default for GlyphCacheConfig {
    fn default() -> Self {
        Self {
            point_size: PointSize::default(),
            units_per_em: 1000,
            render_options: RenderOptions::default(),
            supersamples: RenderSettings::DEFAULT_SUPERSAMPLES,
            bezier_tolerance: RenderSettings::DEFAULT_BEZIER_TOLERANCE,
            min_atlas_size: 256,
            max_atlas_size: 4096,
            max_pages: 16,
        }
    }
}
