//! Error type for the fallible constructors of this crate.
//!
//! Dithering passes themselves never fail: every invariant they rely on is
//! checked once, when a [`PixelBuffer`](crate::PixelBuffer),
//! [`ThresholdMatrix`](crate::ThresholdMatrix) or [`Kernel`](crate::Kernel)
//! is built.

use thiserror::Error;

/// Precondition violations reported by `monodither`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The sample slice does not hold exactly `width * height * 4` bytes.
    #[error(
        "buffer of {width}x{height} needs {expected} samples, got {actual}"
    )]
    BufferLength {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    /// One of the buffer sides is zero.
    #[error("buffer dimensions must be at least 1x1, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },
    /// Bayer matrices only exist for powers of two of at least 2.
    #[error("bayer matrix size must be a power of two >= 2, got {0}")]
    BayerSize(usize),
    /// A custom threshold matrix is malformed.
    #[error("invalid threshold matrix: {0}")]
    Matrix(String),
    /// A custom diffusion kernel is malformed.
    #[error("invalid diffusion kernel: {0}")]
    Kernel(String),
    /// A method name that matches none of the known methods.
    #[error("unknown dithering method `{0}`")]
    UnknownMethod(String),
}

/// Shorthand for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
