//! Single-cutoff binarization, with an optional contrast stretch.

use crate::{CHANNELS, PixelBuffer, buffer::store_sample};

/// A binarization cutoff on the `0.0..=255.0` gray scale.
///
/// A pixel becomes white when its gray value is strictly greater than the
/// cutoff.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "f64", into = "f64")
)]
pub struct Threshold(f64);

impl Threshold {
    /// Bounds of the user-facing threshold level.
    pub const MIN_LEVEL: u8 = 1;
    pub const MAX_LEVEL: u8 = 100;

    /// Maps a `1..=100` level onto the gray scale (`level * 2.55`).
    ///
    /// Levels outside that range are clamped, so level 0 acts as level 1.
    pub fn from_level(level: u8) -> Self {
        Self(f64::from(level.clamp(Self::MIN_LEVEL, Self::MAX_LEVEL)) * 2.55)
    }

    /// Uses `cutoff` directly, clamped to `0.0..=255.0`.
    pub fn from_cutoff(cutoff: f64) -> Self {
        if cutoff.is_nan() {
            return Self(0.0);
        }
        Self(cutoff.clamp(0.0, 255.0))
    }

    #[inline]
    pub fn cutoff(self) -> f64 {
        self.0
    }

    /// Whether a gray value lands on the white side of this cutoff.
    #[inline]
    pub fn is_white(self, gray: u8) -> bool {
        f64::from(gray) > self.0
    }

    /// Two-segment linear contrast stretch pivoted at the cutoff.
    ///
    /// Values below the pivot are spread over `0..pivot`, values at or
    /// above it over `pivot..=255`, each relative to its own segment.
    #[inline]
    pub fn stretch(self, gray: u8) -> u8 {
        let y = f64::from(gray);
        let mid = self.0;
        let v = if y < mid {
            y * 255.0 / mid.max(1.0)
        } else {
            255.0 - (255.0 - y) * 255.0 / (255.0 - mid).max(1.0)
        };
        store_sample(v)
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::from_level(46)
    }
}

impl From<f64> for Threshold {
    fn from(cutoff: f64) -> Self {
        Self::from_cutoff(cutoff)
    }
}

impl From<Threshold> for f64 {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

/// Sets every pixel to black or white against `cutoff`. Alpha is kept.
///
/// Expects a grayscale buffer: only the red channel is read.
pub fn threshold(buffer: &mut PixelBuffer, cutoff: Threshold) {
    buffer.for_each_row(|_, row| {
        for px in row.chunks_exact_mut(CHANNELS) {
            let v = if cutoff.is_white(px[0]) { 255 } else { 0 };
            px[..3].fill(v);
        }
    });
}

/// Contrast-stretches around `cutoff`, then thresholds at the same cutoff.
pub fn stretch(buffer: &mut PixelBuffer, cutoff: Threshold) {
    buffer.for_each_row(|_, row| {
        for px in row.chunks_exact_mut(CHANNELS) {
            let v = cutoff.stretch(px[0]);
            px[..3].fill(v);
        }
    });
    threshold(buffer, cutoff);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_mapping() {
        assert_eq!(Threshold::from_level(0), Threshold::from_level(1));
        assert!((Threshold::from_level(1).cutoff() - 2.55).abs() < 1e-9);
        // 100 * 2.55 lands just below 255, so pure white stays white.
        assert!((Threshold::from_level(100).cutoff() - 255.0).abs() < 1e-9);
        assert!(Threshold::from_level(100).is_white(255));
        assert_eq!(Threshold::from_level(200), Threshold::from_level(100));
        assert!((Threshold::from_level(46).cutoff() - 117.3).abs() < 1e-9);
    }

    #[test]
    fn level_zero_thresholds_like_level_one() {
        let mut zero = PixelBuffer::from_luma(3, 1, &[1, 2, 3]).unwrap();
        let mut one = zero.clone();
        threshold(&mut zero, Threshold::from_level(0));
        threshold(&mut one, Threshold::from_level(1));
        assert_eq!(one.luma(), vec![0, 0, 255]);
        assert_eq!(zero, one);
    }

    #[test]
    fn cutoff_is_clamped() {
        assert_eq!(Threshold::from_cutoff(-4.0).cutoff(), 0.0);
        assert_eq!(Threshold::from_cutoff(900.0).cutoff(), 255.0);
        assert_eq!(Threshold::from_cutoff(f64::NAN).cutoff(), 0.0);
    }

    #[test]
    fn comparison_is_strict() {
        let t = Threshold::from_cutoff(128.0);
        assert!(!t.is_white(128));
        assert!(t.is_white(129));
    }

    #[test]
    fn stretch_segments() {
        let t = Threshold::from_cutoff(100.0);
        assert_eq!(t.stretch(0), 0);
        assert_eq!(t.stretch(50), 128); // 127.5 rounds to even
        assert_eq!(t.stretch(100), 0); // 255 - 155 * 255 / 155
        assert_eq!(t.stretch(255), 255);
    }

    #[test]
    fn stretch_guards_degenerate_pivots() {
        // mid 0: every value is in the upper segment over a 255-wide span.
        let low = Threshold::from_cutoff(0.0);
        assert_eq!(low.stretch(0), 0);
        assert_eq!(low.stretch(200), 200);

        // mid 255: the upper segment is divided by max(1, 0) = 1.
        let high = Threshold::from_cutoff(255.0);
        assert_eq!(high.stretch(255), 255);
        assert_eq!(high.stretch(200), 200);
    }

    #[test]
    fn threshold_keeps_alpha() {
        let mut buffer = PixelBuffer::from_raw(
            2,
            1,
            vec![10, 10, 10, 3, 200, 200, 200, 77],
        )
        .unwrap();
        threshold(&mut buffer, Threshold::from_cutoff(127.0));
        assert_eq!(buffer.as_raw(), &[0, 0, 0, 3, 255, 255, 255, 77]);
    }
}
