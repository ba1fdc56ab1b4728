//! Rendering the shared fixtures through the glyph cache.

use glyph_atlas::{AtlasError, CachedGlyph, GlyphCache, GlyphCacheConfig, SubpixelKey};
use glyph_raster::{testing, GlyphOutline, PointSize, RasterError};

type FixtureCache = GlyphCache<Vec<Option<GlyphOutline>>>;
use pretty_assertions::assert_eq;
use raster_test_data as data;
use raster_types::{GlyphId, Rect};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One design unit per pixel.
fn config() -> GlyphCacheConfig {
    GlyphCacheConfig::new(PointSize::new(72.0), 96)
}

fn gid(raw: u16) -> GlyphId {
    GlyphId::new(raw)
}

fn fixture_cache(config: GlyphCacheConfig) -> FixtureCache {
    GlyphCache::new(testing::glyphs(), config)
}

fn render(cache: &FixtureCache, raw_gid: u16) -> CachedGlyph {
    cache
        .get_or_render(gid(raw_gid), SubpixelKey::ZERO)
        .unwrap()
        .unwrap()
}

/// Pixels of a cached glyph, top row first.
fn pixels(cache: &FixtureCache, glyph: CachedGlyph) -> Vec<Vec<u8>> {
    cache
        .with_page(glyph.page, |page| {
            page.region_rows(glyph.region).map(<[u8]>::to_vec).collect()
        })
        .unwrap()
        .unwrap()
}

#[test]
fn every_fixture() {
    init_logging();
    let cache = fixture_cache(config());
    let results = (0..data::GLYPHS.len() as u16)
        .map(|raw| {
            cache
                .get_or_render(gid(raw), SubpixelKey::ZERO)
                .map(|cached| cached.map(|cached| cached.region))
        })
        .collect::<Vec<_>>();
    let square = Rect::new(0, 0, 49, 49);
    assert_eq!(results[data::EMPTY_GID as usize], Ok(None));
    assert_eq!(results[data::SQUARE_GID as usize], Ok(Some(square)));
    for raw in [
        data::RING_GID,
        data::ROUND_GID,
        data::OFF_CURVE_RUN_GID,
        data::SHIFTED_SQUARE_GID,
        data::NESTED_COMPOUND_GID,
    ] {
        assert!(matches!(results[raw as usize], Ok(Some(_))), "glyph {raw}");
    }
    assert_eq!(
        results[data::POINT_MATCHED_GID as usize],
        Err(AtlasError::Raster(RasterError::UnsupportedAnchor(gid(
            data::SQUARE_GID
        ))))
    );
    assert_eq!(
        results[data::CYCLIC_COMPOUND_GID as usize],
        Err(AtlasError::Raster(RasterError::RecursionLimitExceeded(gid(
            data::CYCLIC_COMPOUND_GID
        ))))
    );
    assert_eq!(
        results[data::MISSING_COMPONENT_GID as usize],
        Err(AtlasError::Raster(RasterError::GlyphNotFound(gid(99))))
    );
    // failed glyphs leave nothing behind
    assert_eq!(cache.len(), 6);
    assert_eq!(cache.page_count(), 1);
}

#[test]
fn page_pixels_are_top_down() {
    let cache = fixture_cache(config());
    let square = pixels(&cache, render(&cache, data::SQUARE_GID));
    assert_eq!(square.len(), 49);
    // the top edge of the glyph comes first
    assert_eq!(square[0][10], 64);
    assert_eq!(square[24][24], 255);
    assert_eq!(square[48][10], 191);
    assert!(square.iter().all(|row| row[48] == 0));

    let ring = pixels(&cache, render(&cache, data::RING_GID));
    assert_eq!(ring[24][24], 0);
    assert_eq!(ring[24][4], 255);
}

#[test]
fn compound_matches_its_component() {
    let cache = fixture_cache(config());
    let square = render(&cache, data::SQUARE_GID);
    let shifted = render(&cache, data::SHIFTED_SQUARE_GID);
    assert_ne!(square.region, shifted.region);
    assert_eq!(pixels(&cache, square), pixels(&cache, shifted));
}

#[test]
fn full_page_creates_another() {
    init_logging();
    let cache = fixture_cache(config().atlas_size(64, 64));
    let square = render(&cache, data::SQUARE_GID);
    // a second 49x49 glyph does not fit in the 64x64 page
    let ring = render(&cache, data::RING_GID);
    assert_eq!(square, CachedGlyph { page: 0, region: Rect::new(0, 0, 49, 49) });
    assert_eq!(ring, CachedGlyph { page: 1, region: Rect::new(0, 0, 49, 49) });
    assert_eq!(cache.page_count(), 2);
    assert_eq!(cache.with_page(1, |page| page.width()), Ok(Some(64)));
    assert_eq!(
        cache.take_dirty_regions(),
        Ok(vec![(0, Rect::new(0, 0, 49, 49)), (1, Rect::new(0, 0, 49, 49))])
    );
    assert_eq!(cache.take_dirty_regions(), Ok(vec![]));
    // hits don't dirty anything
    render(&cache, data::SQUARE_GID);
    assert_eq!(cache.take_dirty_regions(), Ok(vec![]));
}

#[test]
fn out_of_pages() {
    let cache = fixture_cache(config().atlas_size(64, 64).max_pages(1));
    render(&cache, data::SQUARE_GID);
    assert_eq!(
        cache.get_or_render(gid(data::RING_GID), SubpixelKey::ZERO),
        Err(AtlasError::OutOfPages(1))
    );
    assert_eq!(cache.len(), 1);
    // the cached glyph is still served
    assert!(cache.get(gid(data::SQUARE_GID), SubpixelKey::ZERO).unwrap().is_some());
}

#[test]
fn glyph_larger_than_max_page() {
    let cache = fixture_cache(config().atlas_size(16, 32));
    assert_eq!(
        cache.get_or_render(gid(data::SQUARE_GID), SubpixelKey::ZERO),
        Err(AtlasError::GlyphTooLarge {
            width: 49,
            height: 49,
            max: 32
        })
    );
    assert_eq!(cache.page_count(), 0);
}

#[test]
fn placement_picks_bucket() {
    let cache = fixture_cache(config());
    let bounds = cache.source()[data::SHIFTED_SQUARE_GID as usize]
        .as_ref()
        .unwrap()
        .bounds();
    // 96 ppem: ten buckets, one unit per pixel, so whole unit pens land
    // on whole pixels
    let placement = cache.placement(100, 20, &bounds);
    assert_eq!((placement.x, placement.y), (110, 15));
    assert_eq!(placement.subpixel, SubpixelKey::ZERO);
    assert_eq!(placement.top_left(49), (110, -64));
}

#[test]
fn shared_between_threads() {
    init_logging();
    let cache = fixture_cache(config());
    let keys = (0..10u8)
        .flat_map(|x| {
            [data::SQUARE_GID, data::RING_GID].map(|raw| (gid(raw), SubpixelKey::new(x, 0)))
        })
        .collect::<Vec<_>>();
    let per_thread = std::thread::scope(|scope| {
        let mut handles = Vec::new();
        for _ in 0..4 {
            handles.push(scope.spawn(|| {
                keys.iter()
                    .map(|(glyph_id, subpixel)| {
                        cache
                            .get_or_render(*glyph_id, *subpixel)
                            .unwrap()
                            .unwrap()
                    })
                    .collect::<Vec<_>>()
            }));
        }
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>()
    });
    assert_eq!(cache.len(), keys.len());
    for placed in &per_thread[1..] {
        assert_eq!(placed, &per_thread[0]);
    }
    let placed = &per_thread[0];
    for (i, a) in placed.iter().enumerate() {
        for b in &placed[i + 1..] {
            assert!(a.page != b.page || !a.region.intersects(&b.region));
        }
    }
}

#[test]
fn poisoned_lock_is_reported() {
    let cache = fixture_cache(config());
    render(&cache, data::SQUARE_GID);
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        cache.with_page(0, |_| panic!("panic while holding the cache lock"))
    }));
    assert!(result.is_err());
    assert_eq!(
        cache.get_or_render(gid(data::RING_GID), SubpixelKey::ZERO),
        Err(AtlasError::Poisoned)
    );
    assert_eq!(cache.take_dirty_regions(), Err(AtlasError::Poisoned));
    // counts are still readable
    assert_eq!(cache.len(), 1);
}

#[cfg(feature = "bytemuck")]
#[test]
fn dirty_regions_as_words() {
    let cache = fixture_cache(config());
    render(&cache, data::SQUARE_GID);
    let regions = cache
        .take_dirty_regions()
        .unwrap()
        .into_iter()
        .map(|(_, region)| region)
        .collect::<Vec<_>>();
    let words: &[u32] = bytemuck::cast_slice(&regions);
    assert_eq!(words, [0, 0, 49, 49]);
}

#[cfg(feature = "serde")]
#[test]
fn config_serde() {
    let config = GlyphCacheConfig::new(PointSize::new(9.0), 2048)
        .atlas_size(128, 1024)
        .max_pages(3);
    let json = serde_json::to_string(&config).unwrap();
    let loaded: GlyphCacheConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, config);
    let partial: GlyphCacheConfig = serde_json::from_str(r#"{"max_pages":2}"#).unwrap();
    assert_eq!(partial, GlyphCacheConfig::default().max_pages(2));
}
