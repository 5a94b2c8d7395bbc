//! Random-threshold dithering.

use crate::{CHANNELS, PixelBuffer};
use rand::Rng;

/// Binarizes each pixel against a fresh uniform cutoff in `[0, 255)`.
///
/// Unlike every other method this forces alpha to 255. Pixels are drawn in
/// row-major order, one sample each, so a seeded `rng` gives reproducible
/// output.
///
/// ## Examples
///
/// ```
/// use monodither::{PixelBuffer, random_dither};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut buffer = PixelBuffer::from_luma(8, 8, &[128; 64]).unwrap();
/// random_dither(&mut buffer, &mut SmallRng::seed_from_u64(42));
///
/// assert!(buffer.as_raw().chunks(4).all(|px| px[3] == 255));
/// ```
pub fn random_dither<R: Rng>(buffer: &mut PixelBuffer, rng: &mut R) {
    for px in buffer.as_raw_mut().chunks_exact_mut(CHANNELS) {
        let noise: f64 = rng.random_range(0.0..255.0);
        let v = if f64::from(px[0]) > noise { 255 } else { 0 };
        px[..3].fill(v);
        px[3] = 255;
    }
}
