//! Outline to bitmap rendering.

use raster_types::{BoundingBox, Point};

use crate::{
    bitmap::GlyphBitmap,
    contour::generate_contours,
    coverage::ScratchPool,
    downsample::downsample,
    flatten::check_tolerance,
    gamma::GammaTable,
    outline::{scaled_extent, GlyphOutline, OutlineSource},
    scan::{rasterize, stem_darkening_amount},
    size::PointSize,
    RasterError,
};

/// Upper bound on the number of coverage samples for a single glyph.
///
/// This is a 16384x16384 supersampled grid, about 256MiB of coverage.
const MAX_COVERAGE_SAMPLES: u64 = 1 << 28;

/// Optional rendering adjustments.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// Thicken thin stems at small sizes.
    pub stem_darkening: bool,
    /// Apply a gamma of 1.2 to the alpha values.
    pub gamma_correction: bool,
}

impl RenderOptions {
    /// Gamma used when correction is enabled.
    pub const CORRECTED_GAMMA: f32 = 1.2;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn stem_darkening(mut self, enabled: bool) -> Self {
        self.stem_darkening = enabled;
        self
    }

    pub fn gamma_correction(mut self, enabled: bool) -> Self {
        self.gamma_correction = enabled;
        self
    }

    /// Returns the gamma value implied by these options.
    pub fn gamma(&self) -> f32 {
        if self.gamma_correction {
            Self::CORRECTED_GAMMA
        } else {
            1.0
        }
    }
}

/// Everything needed to turn an outline into a bitmap.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderSettings {
    scale: f32,
    ppem: f32,
    options: RenderOptions,
    supersamples: u32,
    bezier_tolerance: f32,
    subpixel_offset: Point<f32>,
}

impl RenderSettings {
    pub const DEFAULT_SUPERSAMPLES: u32 = 4;
    pub const DEFAULT_BEZIER_TOLERANCE: f32 = 0.01;

    /// Creates settings for rendering at the given point size from a font
    /// with the given units per em.
    pub fn new(size: PointSize, units_per_em: u16) -> Self {
        Self::from_scale(size.linear_scale(units_per_em), size.ppem())
    }

    /// Creates settings with an explicit design unit to pixel scale.
    ///
    /// `ppem` only drives stem darkening.
    pub fn from_scale(scale: f32, ppem: f32) -> Self {
        Self {
            scale,
            ppem,
            options: RenderOptions::default(),
            supersamples: Self::DEFAULT_SUPERSAMPLES,
            bezier_tolerance: Self::DEFAULT_BEZIER_TOLERANCE,
            subpixel_offset: Point::ZERO,
        }
    }

    pub fn options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the number of samples per pixel along each axis.
    pub fn supersamples(mut self, supersamples: u32) -> Self {
        self.supersamples = supersamples;
        self
    }

    /// Sets the maximum distance, in supersampled pixels, between a curve
    /// and its flattened polyline.
    pub fn bezier_tolerance(mut self, tolerance: f32) -> Self {
        self.bezier_tolerance = tolerance;
        self
    }

    /// Sets the fractional pixel position of the glyph origin. Both values
    /// are expected to be in `[0, 1)`.
    pub fn subpixel_offset(mut self, x: f32, y: f32) -> Self {
        self.subpixel_offset = Point::new(x, y);
        self
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn ppem(&self) -> f32 {
        self.ppem
    }

    pub fn render_options(&self) -> RenderOptions {
        self.options
    }

    pub fn supersample_factor(&self) -> u32 {
        self.supersamples
    }

    pub fn tolerance(&self) -> f32 {
        self.bezier_tolerance
    }

    pub fn offset(&self) -> Point<f32> {
        self.subpixel_offset
    }

    /// Stem darkening in output pixels, or zero when disabled.
    pub fn stem_darkening_amount(&self) -> f32 {
        if self.options.stem_darkening {
            stem_darkening_amount(self.ppem)
        } else {
            0.0
        }
    }

    /// Returns the size in pixels of the bitmap for an outline with the
    /// given bounds.
    ///
    /// One extra pixel in each direction leaves room for the subpixel
    /// offset and partial coverage at the far edge.
    pub fn bitmap_size(&self, bounds: &BoundingBox<i16>) -> (u32, u32) {
        let extent = |size: i32, offset: f32| {
            (scaled_extent(size, self.scale, offset).max(0.0) as u32).saturating_add(1)
        };
        (
            extent(bounds.width(), self.subpixel_offset.x),
            extent(bounds.height(), self.subpixel_offset.y),
        )
    }
}

/// Renders `outline` to an alpha bitmap.
///
/// Components of compound outlines are resolved through `source`. Use a
/// [`GlyphRenderer`] to reuse scratch memory across many glyphs.
pub fn render_glyph(
    outline: &GlyphOutline,
    source: &(impl OutlineSource + ?Sized),
    settings: &RenderSettings,
) -> Result<GlyphBitmap, RasterError> {
    GlyphRenderer::new().render(outline, source, settings)
}

/// Renderer that keeps scratch buffers and the gamma table between calls.
#[derive(Default, Debug)]
pub struct GlyphRenderer {
    pool: ScratchPool,
    gamma: Option<GammaTable>,
}

impl GlyphRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `outline` to an alpha bitmap.
    pub fn render(
        &mut self,
        outline: &GlyphOutline,
        source: &(impl OutlineSource + ?Sized),
        settings: &RenderSettings,
    ) -> Result<GlyphBitmap, RasterError> {
        let supersamples = settings.supersamples;
        if supersamples == 0 {
            return Err(RasterError::InvalidSupersamples);
        }
        let tolerance = check_tolerance(settings.bezier_tolerance)?;
        self.update_gamma(settings.options.gamma())?;
        let (width, height) = settings.bitmap_size(&outline.bounds());
        let samples = (width as u64 * height as u64)
            .saturating_mul((supersamples as u64).saturating_mul(supersamples as u64));
        if samples > MAX_COVERAGE_SAMPLES {
            return Err(RasterError::BitmapTooLarge { width, height });
        }
        let grid_scale = settings.scale * supersamples as f32;
        let contours = generate_contours(outline, source, grid_scale, tolerance)?;
        let scaled = outline.scaled_bounds(grid_scale);
        let origin = Point::new(scaled.x_min, scaled.y_min);
        let offset = settings.subpixel_offset * supersamples as f32;
        let darkening = settings.stem_darkening_amount() * supersamples as f32;
        let (grid_width, grid_height) = (width * supersamples, height * supersamples);
        log::trace!(
            "rendering {} contours at {width}x{height} ({grid_width}x{grid_height} samples)",
            contours.len()
        );
        let mut grid = self.pool.acquire(grid_width, grid_height);
        rasterize(&contours, origin, offset, darkening, &mut grid);
        let gamma = self.gamma.as_ref().unwrap_or(&GammaTable::IDENTITY);
        Ok(downsample(&grid, supersamples, gamma))
    }

    fn update_gamma(&mut self, gamma: f32) -> Result<(), RasterError> {
        if self
            .gamma
            .as_ref()
            .is_some_and(|table| table.gamma().to_bits() == gamma.to_bits())
        {
            return Ok(());
        }
        self.gamma = Some(GammaTable::new(gamma)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{OutlinePoint, SimpleOutline};

    fn square() -> GlyphOutline {
        SimpleOutline::from_points(
            [
                OutlinePoint::on(0, 0),
                OutlinePoint::on(0, 48),
                OutlinePoint::on(48, 48),
                OutlinePoint::on(48, 0),
            ],
            [3],
        )
        .into()
    }

    #[test]
    fn settings_from_point_size() {
        let settings = RenderSettings::new(PointSize::new(12.0), 1000);
        assert_eq!(settings.scale(), 0.016);
        assert_eq!(settings.ppem(), 16.0);
        assert_eq!(settings.supersample_factor(), 4);
        assert_eq!(settings.tolerance(), 0.01);
        assert_eq!(settings.offset(), Point::ZERO);
        assert_eq!(settings.render_options(), RenderOptions::default());
        assert_eq!(settings.stem_darkening_amount(), 0.0);
    }

    #[test]
    fn darkening_follows_option() {
        let settings = RenderSettings::from_scale(1.0, 8.0);
        assert_eq!(settings.stem_darkening_amount(), 0.0);
        let settings = settings.options(RenderOptions::new().stem_darkening(true));
        assert_eq!(settings.stem_darkening_amount(), 0.10);
    }

    #[test]
    fn bitmap_size_adds_one() {
        let settings = RenderSettings::from_scale(0.5, 10.0);
        let bounds = BoundingBox::new(-3, 0, 50, 21);
        // 26.5 -> 27 + 1 and 10.5 -> 11 + 1
        assert_eq!(settings.bitmap_size(&bounds), (28, 12));
        // one more than the scaled bounds of a matching outline
        let outline = GlyphOutline::Simple(SimpleOutline::new(
            bounds,
            Vec::<OutlinePoint>::new(),
            Vec::<u16>::new(),
        ));
        let scaled = outline.scaled_bounds(0.5);
        assert_eq!((scaled.width(), scaled.height()), (27.0, 11.0));
        let settings = settings.subpixel_offset(0.75, 0.0);
        // 27.25 -> 28 + 1
        assert_eq!(settings.bitmap_size(&bounds).0, 29);
    }

    #[test]
    fn invalid_settings() {
        let outline = square();
        let settings = RenderSettings::from_scale(1.0, 48.0);
        assert_eq!(
            render_glyph(&outline, &(), &settings.supersamples(0)),
            Err(RasterError::InvalidSupersamples)
        );
        assert_eq!(
            render_glyph(&outline, &(), &settings.bezier_tolerance(-1.0)),
            Err(RasterError::InvalidTolerance(-1.0))
        );
        assert!(matches!(
            render_glyph(&outline, &(), &RenderSettings::from_scale(400.0, 48.0)),
            Err(RasterError::BitmapTooLarge { .. })
        ));
    }

    #[test]
    fn renderer_caches_gamma() {
        let outline = square();
        let corrected = RenderSettings::from_scale(1.0, 48.0)
            .options(RenderOptions::new().gamma_correction(true));
        let mut renderer = GlyphRenderer::new();
        renderer.render(&outline, &(), &corrected).unwrap();
        assert_eq!(renderer.gamma.as_ref().map(|g| g.gamma()), Some(1.2));
        renderer
            .render(&outline, &(), &RenderSettings::from_scale(1.0, 48.0))
            .unwrap();
        assert_eq!(renderer.gamma, Some(GammaTable::IDENTITY));
        // the coverage buffer went back to the pool
        assert_eq!(renderer.pool.available(), 1);
    }

    #[test]
    fn empty_outline_is_blank() {
        let outline: GlyphOutline = SimpleOutline::default().into();
        let bitmap = render_glyph(&outline, &(), &RenderSettings::from_scale(1.0, 16.0)).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (1, 1));
        assert!(bitmap.is_blank());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn settings_serde() {
        let settings = RenderSettings::new(PointSize::new(9.0), 2048)
            .options(RenderOptions::new().gamma_correction(true))
            .subpixel_offset(0.25, 0.5);
        let json = serde_json::to_string(&settings).unwrap();
        let loaded: RenderSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, settings);
        // missing option fields fall back to their defaults
        let options: RenderOptions = serde_json::from_str(r#"{"stem_darkening":true}"#).unwrap();
        assert_eq!(options, RenderOptions::new().stem_darkening(true));
    }
}
