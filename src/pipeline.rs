//! End-to-end run: resample, reduce to gray, dither.
//!
//! Each call is a pure function of the source buffer and [`Settings`]
//! (plus the random source, for [`DitherMethod::Random`]). Nothing is kept
//! between calls.

use crate::{DitherMethod, PixelBuffer, Threshold, grayscale};
use rand::Rng;

/// Per-run parameters.
///
/// Out-of-range values are clamped when a run starts rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Settings {
    /// Working resolution as a percentage of the source, `1..=100`.
    pub scale: u8,
    /// Cutoff for [`DitherMethod::FlatThreshold`] and
    /// [`DitherMethod::Stretch`].
    pub threshold: Threshold,
    pub method: DitherMethod,
    /// Composite the source over white before reducing to gray.
    pub flatten: bool,
}

impl Settings {
    pub const MIN_SCALE: u8 = 1;
    pub const MAX_SCALE: u8 = 100;

    pub fn new(scale: u8, threshold: Threshold, method: DitherMethod) -> Self {
        Self {
            scale: scale.clamp(Self::MIN_SCALE, Self::MAX_SCALE),
            threshold,
            method,
            flatten: false,
        }
    }

    /// Sets the working scale, clamped to `1..=100`.
    pub fn with_scale(mut self, scale: u8) -> Self {
        self.scale = scale.clamp(Self::MIN_SCALE, Self::MAX_SCALE);
        self
    }

    pub fn with_flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    /// The scale actually used, clamped to `1..=100`.
    #[inline]
    pub fn effective_scale(&self) -> u8 {
        self.scale.clamp(Self::MIN_SCALE, Self::MAX_SCALE)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(46, Threshold::from_level(46), DitherMethod::FlatThreshold)
    }
}

/// Working resolution for a `width x height` source at `scale` percent.
///
/// Each side is `floor(side * scale / 100)`, never less than one pixel. The
/// scale is clamped to `1..=100`.
pub fn working_size(width: u32, height: u32, scale: u8) -> (u32, u32) {
    let factor = f64::from(scale.clamp(Settings::MIN_SCALE, Settings::MAX_SCALE)) / 100.0;
    let side = |n: u32| ((f64::from(n) * factor).floor() as u32).max(1);
    (side(width), side(height))
}

/// Dithers `source` using the thread-local random source.
///
/// Returns a monochrome buffer at working resolution. See
/// [`dither_with_rng`] for reproducible [`DitherMethod::Random`] output.
pub fn dither(source: &PixelBuffer, settings: &Settings) -> PixelBuffer {
    dither_with_rng(source, settings, &mut rand::rng())
}

/// Dithers `source`, drawing any randomness from `rng`.
///
/// The source is resampled to [`working_size`] with nearest-neighbour
/// sampling, optionally flattened onto white, reduced to gray and handed to
/// the selected method.
pub fn dither_with_rng<R: Rng>(
    source: &PixelBuffer,
    settings: &Settings,
    rng: &mut R,
) -> PixelBuffer {
    let (width, height) =
        working_size(source.width(), source.height(), settings.effective_scale());

    tracing::debug!(
        source_width = source.width(),
        source_height = source.height(),
        width,
        height,
        method = %settings.method,
        cutoff = settings.threshold.cutoff(),
        "dithering"
    );

    let mut buffer = source.resample(width, height);
    if settings.flatten {
        buffer.flatten_onto_white();
    }
    grayscale(&mut buffer);

    let algorithm = settings.method.algorithm(settings.threshold);
    let _span = tracing::debug_span!("dither_pass", method = %settings.method).entered();
    algorithm.apply(&mut buffer, rng);

    buffer
}

/// The grayscale "before" image for side-by-side comparison.
///
/// Full source resolution, flattened onto white.
pub fn preview(source: &PixelBuffer) -> PixelBuffer {
    let mut buffer = source.clone();
    buffer.flatten_onto_white();
    grayscale(&mut buffer);
    buffer
}
