//! Owned RGBA8 raster that every pass operates on.
//!
//! A [`PixelBuffer`] is row-major with the origin at the top-left and four
//! interleaved 8-bit channels per pixel. Its length always equals
//! `width * height * 4` and both sides are at least one pixel; the
//! constructors reject anything else.

use crate::{Error, Result};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Number of interleaved channels per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Store a computed value into an 8-bit sample.
///
/// Clamps to `0..=255` and rounds half to even, which is how a clamped
/// byte array stores fractional values. Diffused error, luminance and
/// stretched values all go through here so that results stay bit-identical.
#[inline]
pub fn store_sample(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0).round_ties_even() as u8
}

/// An RGBA8 pixel buffer owned by a single dithering run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a buffer filled with a single RGBA color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        check_dimensions(width, height)?;
        let data = rgba.repeat(width as usize * height as usize);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wraps raw interleaved RGBA samples.
    ///
    /// Fails if a side is zero or if `data.len() != width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(Error::BufferLength {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds an opaque buffer from 8-bit gray values, one per pixel.
    pub fn from_luma(width: u32, height: u32, luma: &[u8]) -> Result<Self> {
        check_dimensions(width, height)?;
        let pixels = width as usize * height as usize;
        if luma.len() != pixels {
            return Err(Error::BufferLength {
                width,
                height,
                expected: pixels * CHANNELS,
                actual: luma.len() * CHANNELS,
            });
        }
        let data = luma.iter().flat_map(|&v| [v, v, v, 255]).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The interleaved samples.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the interleaved samples. The length cannot change.
    #[inline]
    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// The RGBA value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the buffer.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// The red channel of every pixel, row-major. After a grayscale or
    /// dithering pass this is the gray level of each pixel.
    pub fn luma(&self) -> Vec<u8> {
        self.data.chunks_exact(CHANNELS).map(|px| px[0]).collect()
    }

    /// Byte offset of pixel `(x, y)`.
    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} buffer",
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Resamples to `width x height` with nearest-neighbour sampling.
    ///
    /// No smoothing is applied: each destination pixel copies the source
    /// pixel whose area contains the destination pixel's centre. Used both
    /// to shrink a source to working resolution and to blow a dithered
    /// result back up for display or export.
    pub fn resize_nearest(&self, width: u32, height: u32) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(self.resample(width, height))
    }

    /// [`Self::resize_nearest`] for dimensions already known to be non-zero.
    pub(crate) fn resample(&self, width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0);
        if width == self.width && height == self.height {
            return self.clone();
        }

        let columns: Vec<usize> = (0..width)
            .map(|x| nearest_source(x, width, self.width) * CHANNELS)
            .collect();
        let src_stride = self.width as usize * CHANNELS;

        let mut data = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for y in 0..height {
            let row = nearest_source(y, height, self.height) * src_stride;
            for &column in &columns {
                let i = row + column;
                data.extend_from_slice(&self.data[i..i + CHANNELS]);
            }
        }

        Self {
            width,
            height,
            data,
        }
    }

    /// Composites the buffer over an opaque white background.
    ///
    /// Every pixel ends up with alpha 255; translucent pixels are blended
    /// towards white in proportion to their transparency.
    pub fn flatten_onto_white(&mut self) {
        for px in self.data.chunks_exact_mut(CHANNELS) {
            let alpha = f64::from(px[3]) / 255.0;
            for c in &mut px[..3] {
                *c = store_sample(f64::from(*c) * alpha + 255.0 * (1.0 - alpha));
            }
            px[3] = 255;
        }
    }

    /// Checks the monochrome invariant: `R == G == B` for every pixel.
    pub fn is_monochrome(&self) -> bool {
        self.data
            .chunks_exact(CHANNELS)
            .all(|px| px[0] == px[1] && px[1] == px[2])
    }

    /// Runs `f(y, row)` on every row of the buffer.
    ///
    /// Rows are handed out in parallel when the `rayon` feature is enabled,
    /// so `f` must only touch the row it is given.
    pub(crate) fn for_each_row<F>(&mut self, f: F)
    where
        F: Fn(usize, &mut [u8]) + Send + Sync,
    {
        let stride = self.width as usize * CHANNELS;

        #[cfg(feature = "rayon")]
        self.data
            .par_chunks_exact_mut(stride)
            .enumerate()
            .for_each(|(y, row)| f(y, row));

        #[cfg(not(feature = "rayon"))]
        self.data
            .chunks_exact_mut(stride)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    }
}

#[inline]
fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::ZeroDimension { width, height });
    }
    Ok(())
}

#[inline]
fn nearest_source(dst: u32, dst_len: u32, src_len: u32) -> usize {
    let src = ((u64::from(dst) * 2 + 1) * u64::from(src_len)) / (u64::from(dst_len) * 2);
    (src as usize).min(src_len as usize - 1)
}

#[cfg(feature = "image")]
impl TryFrom<image::RgbaImage> for PixelBuffer {
    type Error = Error;

    /// Fails only for images with a zero side.
    fn try_from(image: image::RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        Self::from_raw(width, height, image.into_raw())
    }
}

#[cfg(feature = "image")]
impl PixelBuffer {
    /// Converts into an [`image::RgbaImage`] for encoding.
    pub fn into_rgba_image(self) -> image::RgbaImage {
        let (width, height) = (self.width, self.height);
        // `data` always holds `width * height * 4` samples.
        image::RgbaImage::from_raw(width, height, self.data)
            .unwrap_or_else(|| image::RgbaImage::new(width, height))
    }
}
