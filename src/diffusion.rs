//! Error diffusion.
//!
//! Pixels are visited in row-major order. Each one is snapped to black or
//! white at a fixed midpoint of 128 and its quantization error is pushed to
//! neighbours that have not been visited yet, as described by a [`Kernel`].

use crate::{CHANNELS, Error, PixelBuffer, Result, buffer::store_sample};

/// Gray values strictly above this become white during diffusion.
///
/// This midpoint is fixed; the user-facing [`Threshold`](crate::Threshold)
/// does not apply to error diffusion.
pub const DIFFUSION_MIDPOINT: u8 = 128;

/// An error diffusion kernel.
///
/// Each tap `(dx, dy, weight)` sends `error * weight / divisor` to the pixel
/// at `(x + dx, y + dy)`. Every tap points forward in scan order (`dy > 0`,
/// or `dy == 0` and `dx > 0`), which is what makes a single pass correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Kernel<'a> {
    taps: &'a [(i32, i32, i32)],
    divisor: i32,
}

impl<'a> Kernel<'a> {
    /// Builds a custom kernel.
    ///
    /// Fails if `divisor` is not positive or if a tap points at the current
    /// pixel or one already visited.
    pub fn new(taps: &'a [(i32, i32, i32)], divisor: i32) -> Result<Self> {
        if divisor <= 0 {
            return Err(Error::Kernel(format!(
                "divisor must be positive, got {divisor}"
            )));
        }
        if let Some(&(dx, dy, _)) =
            taps.iter().find(|&&(dx, dy, _)| !(dy > 0 || (dy == 0 && dx > 0)))
        {
            return Err(Error::Kernel(format!(
                "tap ({dx}, {dy}) does not point to an unvisited pixel"
            )));
        }
        Ok(Self { taps, divisor })
    }

    #[inline]
    pub fn taps(&self) -> &'a [(i32, i32, i32)] {
        self.taps
    }

    #[inline]
    pub fn divisor(&self) -> i32 {
        self.divisor
    }
}

/// Floyd-Steinberg.
///
/// ```text
///        X   7
///    3   5   1     / 16
/// ```
pub const FLOYD_STEINBERG: Kernel<'static> = Kernel {
    taps: &[(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)],
    divisor: 16,
};

/// Atkinson. Only 6/8 of the error is propagated.
///
/// ```text
///        X   1   1
///    1   1   1
///        1         / 8
/// ```
pub const ATKINSON: Kernel<'static> = Kernel {
    taps: &[
        (1, 0, 1),
        (2, 0, 1),
        (-1, 1, 1),
        (0, 1, 1),
        (1, 1, 1),
        (0, 2, 1),
    ],
    divisor: 8,
};

/// Jarvis-Judice-Ninke.
///
/// ```text
///            X   7   5
///    3   5   7   5   3
///    1   3   5   3   1     / 48
/// ```
pub const JARVIS_JUDICE_NINKE: Kernel<'static> = Kernel {
    taps: &[
        (1, 0, 7),
        (2, 0, 5),
        (-2, 1, 3),
        (-1, 1, 5),
        (0, 1, 7),
        (1, 1, 5),
        (2, 1, 3),
        (-2, 2, 1),
        (-1, 2, 3),
        (0, 2, 5),
        (1, 2, 3),
        (2, 2, 1),
    ],
    divisor: 48,
};

/// Stucki.
///
/// ```text
///            X   8   4
///    2   4   8   4   2
///    1   2   4   2   1     / 42
/// ```
pub const STUCKI: Kernel<'static> = Kernel {
    taps: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
        (-2, 2, 1),
        (-1, 2, 2),
        (0, 2, 4),
        (1, 2, 2),
        (2, 2, 1),
    ],
    divisor: 42,
};

/// Dithers a grayscale buffer in place with `kernel`.
///
/// The neighbour update is a clamped store of `current + error * weight /
/// divisor` into all three color channels, so results depend on the exact
/// scan order. Taps that fall outside the buffer are dropped. Alpha is kept.
pub fn diffuse(buffer: &mut PixelBuffer, kernel: &Kernel<'_>) {
    let width = i64::from(buffer.width());
    let height = i64::from(buffer.height());
    let divisor = f64::from(kernel.divisor);
    let data = buffer.as_raw_mut();

    for y in 0..height {
        for x in 0..width {
            let i = (y * width + x) as usize * CHANNELS;
            let old = data[i];
            let new = if old > DIFFUSION_MIDPOINT { 255 } else { 0 };
            let error = i32::from(old) - i32::from(new);
            data[i..i + 3].fill(new);

            for &(dx, dy, weight) in kernel.taps {
                let nx = x + i64::from(dx);
                let ny = y + i64::from(dy);
                if !(0..width).contains(&nx) || !(0..height).contains(&ny) {
                    continue;
                }
                let ni = (ny * width + nx) as usize * CHANNELS;
                let value = f64::from(data[ni]) + f64::from(error) * f64::from(weight) / divisor;
                data[ni..ni + 3].fill(store_sample(value));
            }
        }
    }
}
