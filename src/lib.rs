//! Deterministic black-and-white dithering of RGBA pixel buffers.
//!
//! `monodither` turns a continuous-tone raster into a bi-level one using
//! one of eleven methods:
//!
//! - Flat thresholding and contrast-stretched thresholding.
//! - Error diffusion: Floyd-Steinberg, Atkinson, Jarvis-Judice-Ninke and
//!   Stucki.
//! - Ordered dithering: Bayer 2x2, 4x4 and 8x8 and a clustered-dot 4x4
//!   screen.
//! - Random thresholding.
//!
//! Every method except random thresholding is fully deterministic, and all
//! fractional intermediate values are stored the same way (clamp, then round
//! half to even), so results are bit-identical across runs and platforms.
//!
//! ## Pipeline
//!
//! [`dither()`] resamples the source to a working resolution with
//! nearest-neighbour sampling, reduces it to BT.601 luma and runs the
//! selected method. The result is meant to be scaled back up, again without
//! smoothing, via [`PixelBuffer::resize_nearest()`].
//!
//! ```
//! use monodither::{DitherMethod, PixelBuffer, Settings, Threshold, dither};
//!
//! let source = PixelBuffer::from_luma(2, 2, &[0, 255, 128, 200]).unwrap();
//! let settings =
//!     Settings::new(100, Threshold::from_cutoff(128.0), DitherMethod::FlatThreshold);
//!
//! let result = dither(&source, &settings);
//! assert_eq!(result.luma(), vec![0, 255, 0, 255]);
//! ```
//!
//! ## Individual passes
//!
//! The passes can also be used on their own. They expect a grayscale buffer
//! (see [`grayscale()`]) and mutate it in place:
//!
//! ```
//! use monodither::{FLOYD_STEINBERG, PixelBuffer, diffuse};
//!
//! let mut buffer = PixelBuffer::from_luma(4, 1, &[100; 4]).unwrap();
//! diffuse(&mut buffer, &FLOYD_STEINBERG);
//!
//! assert_eq!(buffer.luma(), vec![0, 255, 0, 0]);
//! ```
//!
//! ## Features
//!
//! - `rayon` (default): grayscale, threshold, stretch and ordered passes
//!   process rows in parallel. Output is identical to sequential runs.
//! - `serde`: `Serialize`/`Deserialize` for [`Settings`], [`DitherMethod`]
//!   and [`Threshold`].
//! - `image`: conversions between [`PixelBuffer`] and `image::RgbaImage`.

mod buffer;
mod diffusion;
mod error;
mod grayscale;
mod matrix;
mod method;
mod ordered;
mod pipeline;
mod random;
mod threshold;

pub use buffer::{CHANNELS, PixelBuffer, store_sample};
pub use diffusion::{
    ATKINSON, DIFFUSION_MIDPOINT, FLOYD_STEINBERG, JARVIS_JUDICE_NINKE, Kernel, STUCKI, diffuse,
};
pub use error::{Error, Result};
pub use grayscale::{grayscale, luminance};
pub use matrix::{CLUSTERED_4X4, ThresholdMatrix, bayer, clustered_4x4};
pub use method::{Algorithm, DitherMethod};
pub use ordered::ordered_dither;
pub use pipeline::{Settings, dither, dither_with_rng, preview, working_size};
pub use random::random_dither;
pub use threshold::{Threshold, stretch, threshold};
