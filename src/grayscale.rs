//! Luminance reduction (ITU-R BT.601).

use crate::{CHANNELS, PixelBuffer, buffer::store_sample};

/// BT.601 luma of an RGB triple, unrounded.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)
}

/// Replaces the color channels of every pixel with its luma.
///
/// Alpha is left untouched. Applying this twice gives the same result as
/// applying it once.
pub fn grayscale(buffer: &mut PixelBuffer) {
    buffer.for_each_row(|_, row| {
        for px in row.chunks_exact_mut(CHANNELS) {
            let y = store_sample(luminance(px[0], px[1], px[2]));
            px[..3].fill(y);
        }
    });
}
