//! Ordered dithering against a tiled threshold matrix.

use crate::{CHANNELS, PixelBuffer, ThresholdMatrix};

/// Binarizes a grayscale buffer against `matrix` tiled from the top-left.
///
/// Pixel `(x, y)` turns white when its gray value exceeds
/// `(rank + 0.5) * 255 / n²`, where `rank` is the matrix cell at
/// `(x mod n, y mod n)`. Alpha is kept. There is no dependency between
/// pixels, so rows run in parallel with the `rayon` feature.
pub fn ordered_dither(buffer: &mut PixelBuffer, matrix: &ThresholdMatrix) {
    let size = matrix.size();
    let cutoffs: Vec<f64> = matrix
        .rows()
        .flatten()
        .map(|&rank| matrix.cutoff(rank))
        .collect();

    buffer.for_each_row(|y, row| {
        let phase = &cutoffs[(y % size) * size..][..size];
        for (px, &cutoff) in row.chunks_exact_mut(CHANNELS).zip(phase.iter().cycle()) {
            let v = if f64::from(px[0]) > cutoff { 255 } else { 0 };
            px[..3].fill(v);
        }
    });
}
