//! Glyphs as coverage masks, scaled by any factor
//!
//! The block rasterizer only knows whole-number scales. For everything else
//! a glyph becomes an 8-bit alpha mask that is resampled like a texture:
//! nearest-neighbour when the scale is integral (identical to block
//! replication), bilinear otherwise.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use psfont_core::{Color, Glyph, PixelSink};

/// How a mask is resampled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    /// Replicate source texels; hard edges
    #[default]
    Nearest,
    /// Interpolate between the four nearest texels; soft edges
    Bilinear,
}

impl FilterMode {
    /// Nearest for whole-number scales, bilinear for fractional ones
    pub fn for_scale(scale: f32) -> Self {
        if scale.fract() == 0.0 {
            Self::Nearest
        } else {
            Self::Bilinear
        }
    }
}

/// Largest scaled mask, in pixels, that will be built (a 4096x4096 glyph)
pub const MAX_MASK_PIXELS: u64 = 1 << 24;

/// Size of a `width x height` mask after scaling by `scale`
///
/// Non-finite or non-positive scales give an empty size.
pub fn scaled_size(width: u32, height: u32, scale: f32) -> (u32, u32) {
    if !scale.is_finite() || scale <= 0.0 {
        return (0, 0);
    }
    let scale_dim = |dim: u32| (dim as f32 * scale).round().min(u32::MAX as f32) as u32;
    (scale_dim(width), scale_dim(height))
}

/// [`scaled_size`] for scales that can actually be rendered
///
/// `None` for non-finite or non-positive scales, and when the scaled mask
/// would cover more than [`MAX_MASK_PIXELS`].
pub fn checked_scaled_size(width: u32, height: u32, scale: f32) -> Option<(u32, u32)> {
    if !scale.is_finite() || scale <= 0.0 {
        return None;
    }
    let (width, height) = scaled_size(width, height, scale);
    (width as u64 * height as u64 <= MAX_MASK_PIXELS).then_some((width, height))
}

/// Row-major 8-bit coverage: 0 is background, 255 is full ink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl AlphaMask {
    /// Wrap coverage values; `None` if `data` does not hold `width * height` bytes
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        (data.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            data,
        })
    }

    /// Full coverage where the glyph has ink, none elsewhere
    pub fn from_glyph(glyph: &Glyph<'_>) -> Self {
        let (width, height) = (glyph.width(), glyph.height());
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(if glyph.is_set(x, y) { 255 } else { 0 });
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Coverage at `(x, y)`, 0 outside the mask
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Resample by `scale`; see [`scaled_size`] for the result size
    pub fn scaled(&self, scale: f32, filter: FilterMode) -> Self {
        let (width, height) = scaled_size(self.width, self.height, scale);
        self.resized(width, height, filter)
    }

    /// Resample to exactly `width x height`
    ///
    /// Targets larger than [`MAX_MASK_PIXELS`] give an empty 0x0 mask.
    pub fn resized(&self, width: u32, height: u32, filter: FilterMode) -> Self {
        if width as u64 * height as u64 > MAX_MASK_PIXELS {
            log::debug!("Refusing to resample a glyph mask to {width}x{height}");
            return Self {
                width: 0,
                height: 0,
                data: Vec::new(),
            };
        }
        if width == 0 || height == 0 || self.width == 0 || self.height == 0 {
            return Self {
                width,
                height,
                data: vec![0; width as usize * height as usize],
            };
        }
        match filter {
            FilterMode::Nearest => self.resize_nearest(width, height),
            FilterMode::Bilinear => self.resize_bilinear(width, height),
        }
    }

    fn resize_nearest(&self, width: u32, height: u32) -> Self {
        let src_w = self.width as u64;
        let src_h = self.height as u64;
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for dst_y in 0..height as u64 {
            // Integer mapping keeps integral scales exact
            let src_y = (dst_y * src_h / height as u64).min(src_h - 1);
            for dst_x in 0..width as u64 {
                let src_x = (dst_x * src_w / width as u64).min(src_w - 1);
                data.push(self.data[(src_y * src_w + src_x) as usize]);
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    fn resize_bilinear(&self, width: u32, height: u32) -> Self {
        let src_w = self.width as usize;
        let src_h = self.height as usize;
        let dst_w = width as usize;
        let dst_h = height as usize;
        let mut data = vec![0u8; dst_w * dst_h];

        for dst_y in 0..dst_h {
            let src_y = (dst_y as f32 + 0.5) * (src_h as f32 / dst_h as f32) - 0.5;
            let y0 = (src_y.floor() as isize).clamp(0, src_h as isize - 1) as usize;
            let y1 = (y0 + 1).min(src_h - 1);
            let wy = (src_y - src_y.floor()).clamp(0.0, 1.0);

            for dst_x in 0..dst_w {
                let src_x = (dst_x as f32 + 0.5) * (src_w as f32 / dst_w as f32) - 0.5;
                let x0 = (src_x.floor() as isize).clamp(0, src_w as isize - 1) as usize;
                let x1 = (x0 + 1).min(src_w - 1);
                let wx = (src_x - src_x.floor()).clamp(0.0, 1.0);

                let p00 = self.data[y0 * src_w + x0] as f32;
                let p10 = self.data[y0 * src_w + x1] as f32;
                let p01 = self.data[y1 * src_w + x0] as f32;
                let p11 = self.data[y1 * src_w + x1] as f32;

                let value = p00 * (1.0 - wx) * (1.0 - wy)
                    + p10 * wx * (1.0 - wy)
                    + p01 * (1.0 - wx) * wy
                    + p11 * wx * wy;

                data[dst_y * dst_w + dst_x] = value.round().clamp(0.0, 255.0) as u8;
            }
        }

        Self {
            width,
            height,
            data,
        }
    }
}

/// Composite `mask` in `color` with its top-left corner at `(x, y)`
///
/// Full coverage plots, partial coverage goes through
/// [`PixelSink::blend_pixel`], zero coverage is skipped.
pub fn draw_mask<S: PixelSink + ?Sized>(
    mask: &AlphaMask,
    x: i32,
    y: i32,
    color: Color,
    sink: &mut S,
) {
    let width = mask.width as usize;
    if width == 0 {
        return;
    }
    for (row, coverage) in mask.data.chunks_exact(width).enumerate() {
        let py = y.saturating_add(row as i32);
        for (col, &alpha) in coverage.iter().enumerate() {
            let px = x.saturating_add(col as i32);
            match alpha {
                0 => {},
                255 => sink.plot_pixel(px, py, color),
                _ => sink.blend_pixel(px, py, color, alpha),
            }
        }
    }
}

/// Cache key: which glyph, at what scale, through which filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaskKey {
    pub glyph: u32,
    scale_bits: u32,
    pub filter: FilterMode,
}

impl MaskKey {
    pub fn new(glyph: u32, scale: f32, filter: FilterMode) -> Self {
        Self {
            glyph,
            scale_bits: scale.to_bits(),
            filter,
        }
    }

    pub fn scale(&self) -> f32 {
        f32::from_bits(self.scale_bits)
    }
}

/// Hit/miss counters for a [`GlyphMaskCache`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaskCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
    pub capacity: usize,
    /// Coverage bytes held across all cached masks
    pub bytes: usize,
    pub max_bytes: usize,
}

impl MaskCacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct CacheInner {
    masks: LruCache<MaskKey, Arc<AlphaMask>>,
    bytes: usize,
    max_bytes: usize,
    hits: u64,
    misses: u64,
}

impl CacheInner {
    fn forget(&mut self, key: MaskKey, mask: &AlphaMask) {
        self.bytes = self.bytes.saturating_sub(mask.data.len());
        log::trace!("Evicted mask for glyph {} at scale {}", key.glyph, key.scale());
    }
}

/// LRU of scaled glyph masks, bounded by entry count and by total bytes
///
/// Keys carry glyph indices only, so keep one cache per font. The most
/// recent mask always stays, even when it alone is over the byte budget.
pub struct GlyphMaskCache {
    inner: Mutex<CacheInner>,
}

impl GlyphMaskCache {
    pub const DEFAULT_CAPACITY: usize = 512;
    /// 16 MiB of coverage, over 5000 8x16 glyphs at scale 5
    pub const DEFAULT_MAX_BYTES: usize = 16 << 20;

    /// A cache holding at most `capacity` masks (at least one) within
    /// [`DEFAULT_MAX_BYTES`](Self::DEFAULT_MAX_BYTES)
    pub fn new(capacity: usize) -> Self {
        Self::with_limits(capacity, Self::DEFAULT_MAX_BYTES)
    }

    /// A cache holding at most `capacity` masks and `max_bytes` of coverage
    pub fn with_limits(capacity: usize, max_bytes: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(CacheInner {
                masks: LruCache::new(capacity),
                bytes: 0,
                max_bytes,
                hits: 0,
                misses: 0,
            }),
        }
    }

    /// Fetch the mask for `key`, rendering and storing it on a miss
    pub fn get_or_insert_with(&self, key: MaskKey, render: impl FnOnce() -> AlphaMask) -> Arc<AlphaMask> {
        let mut inner = self.inner.lock();
        if let Some(mask) = inner.masks.get(&key) {
            let mask = Arc::clone(mask);
            inner.hits += 1;
            return mask;
        }
        inner.misses += 1;
        let mask = Arc::new(render());
        inner.bytes = inner.bytes.saturating_add(mask.data.len());
        if let Some((evicted, old)) = inner.masks.push(key, Arc::clone(&mask)) {
            inner.forget(evicted, &old);
        }
        while inner.bytes > inner.max_bytes && inner.masks.len() > 1 {
            match inner.masks.pop_lru() {
                Some((evicted, old)) => inner.forget(evicted, &old),
                None => break,
            }
        }
        mask
    }

    /// Mask of glyph `index` scaled by `scale` through `filter`
    pub fn get_or_render(
        &self,
        index: u32,
        glyph: &Glyph<'_>,
        scale: f32,
        filter: FilterMode,
    ) -> Arc<AlphaMask> {
        self.get_or_insert_with(MaskKey::new(index, scale, filter), || {
            AlphaMask::from_glyph(glyph).scaled(scale, filter)
        })
    }

    pub fn len(&self) -> usize {
        self.inner.lock().masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.masks.clear();
        inner.bytes = 0;
        inner.hits = 0;
        inner.misses = 0;
    }

    pub fn stats(&self) -> MaskCacheStats {
        let inner = self.inner.lock();
        MaskCacheStats {
            hits: inner.hits,
            misses: inner.misses,
            len: inner.masks.len(),
            capacity: inner.masks.cap().get(),
            bytes: inner.bytes,
            max_bytes: inner.max_bytes,
        }
    }
}

impl Default for GlyphMaskCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for GlyphMaskCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphMaskCache")
            .field("stats", &self.stats())
            .finish()
    }
}
