//! Method selection and dispatch.
//!
//! [`DitherMethod`] is the closed set of user-selectable methods.
//! [`Algorithm`] is a method bound to exactly the parameters it needs, ready
//! to run on a grayscale buffer.

use crate::{
    Error, Kernel, PixelBuffer, Threshold, ThresholdMatrix,
    diffusion::{self, ATKINSON, FLOYD_STEINBERG, JARVIS_JUDICE_NINKE, STUCKI},
    matrix::{clustered_4x4, expand_bayer},
    ordered::ordered_dither,
    random::random_dither,
    threshold::{stretch, threshold},
};
use core::{fmt, str::FromStr};
use rand::Rng;

/// One of the eleven dithering methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum DitherMethod {
    /// Plain cutoff.
    #[default]
    FlatThreshold,
    /// Contrast stretch around the cutoff, then cutoff.
    Stretch,
    FloydSteinberg,
    Atkinson,
    JarvisJudiceNinke,
    Stucki,
    Bayer2,
    Bayer4,
    Bayer8,
    /// Clustered-dot 4x4 halftone screen.
    Clustered4x4,
    /// Uniform random cutoff per pixel.
    Random,
}

impl DitherMethod {
    /// Every method, in menu order.
    pub const ALL: [Self; 11] = [
        Self::FlatThreshold,
        Self::Stretch,
        Self::FloydSteinberg,
        Self::Atkinson,
        Self::JarvisJudiceNinke,
        Self::Stucki,
        Self::Bayer2,
        Self::Bayer4,
        Self::Bayer8,
        Self::Clustered4x4,
        Self::Random,
    ];

    /// Display name, as shown in the method menu.
    pub const fn name(self) -> &'static str {
        match self {
            Self::FlatThreshold => "BITMAP",
            Self::Stretch => "STRETCH",
            Self::FloydSteinberg => "FLOYD-STEINBERG",
            Self::Atkinson => "ATKINSON",
            Self::JarvisJudiceNinke => "JARVIS-JUDICE-NINKE",
            Self::Stucki => "STUCKI",
            Self::Bayer2 => "BAYER 2X2",
            Self::Bayer4 => "BAYER 4X4",
            Self::Bayer8 => "BAYER 8X8",
            Self::Clustered4x4 => "CLUSTERED 4X4",
            Self::Random => "RANDOM",
        }
    }

    /// Looks a method up by name, falling back to [`Self::FlatThreshold`]
    /// for names it does not know.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::debug!(name, "unknown dithering method, using flat threshold");
            Self::FlatThreshold
        })
    }

    /// Whether the user threshold has any effect on this method.
    pub const fn uses_threshold(self) -> bool {
        matches!(self, Self::FlatThreshold | Self::Stretch)
    }

    /// The diffusion kernel behind this method, if it is an error diffuser.
    pub const fn kernel(self) -> Option<Kernel<'static>> {
        match self {
            Self::FloydSteinberg => Some(FLOYD_STEINBERG),
            Self::Atkinson => Some(ATKINSON),
            Self::JarvisJudiceNinke => Some(JARVIS_JUDICE_NINKE),
            Self::Stucki => Some(STUCKI),
            _ => None,
        }
    }

    /// The threshold matrix behind this method, if it is an ordered dither.
    pub fn matrix(self) -> Option<ThresholdMatrix> {
        match self {
            Self::Bayer2 => Some(expand_bayer(2)),
            Self::Bayer4 => Some(expand_bayer(4)),
            Self::Bayer8 => Some(expand_bayer(8)),
            Self::Clustered4x4 => Some(clustered_4x4()),
            _ => None,
        }
    }

    /// Binds the method to its parameters.
    pub fn algorithm(self, cutoff: Threshold) -> Algorithm {
        match self {
            Self::FlatThreshold => Algorithm::Threshold(cutoff),
            Self::Stretch => Algorithm::Stretch(cutoff),
            Self::Random => Algorithm::Random,
            method => {
                if let Some(kernel) = method.kernel() {
                    Algorithm::Diffusion(kernel)
                } else if let Some(matrix) = method.matrix() {
                    Algorithm::Ordered(matrix)
                } else {
                    Algorithm::Threshold(cutoff)
                }
            }
        }
    }
}

impl fmt::Display for DitherMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DitherMethod {
    type Err = Error;

    /// Parses a menu name, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|method| method.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownMethod(s.to_owned()))
    }
}

impl TryFrom<String> for DitherMethod {
    type Error = Error;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<DitherMethod> for String {
    fn from(method: DitherMethod) -> Self {
        method.name().to_owned()
    }
}

/// A dithering pass with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Algorithm {
    /// Flat cutoff.
    Threshold(Threshold),
    /// Contrast stretch followed by a cutoff at the same level.
    Stretch(Threshold),
    /// Row-major error diffusion at the fixed midpoint.
    Diffusion(Kernel<'static>),
    /// Tiled threshold matrix.
    Ordered(ThresholdMatrix),
    /// Random cutoff per pixel; forces alpha to 255.
    Random,
}

impl Algorithm {
    /// Runs the pass on a grayscale buffer. `rng` is only drawn from by
    /// [`Algorithm::Random`].
    pub fn apply<R: Rng>(&self, buffer: &mut PixelBuffer, rng: &mut R) {
        match self {
            Self::Threshold(cutoff) => threshold(buffer, *cutoff),
            Self::Stretch(cutoff) => stretch(buffer, *cutoff),
            Self::Diffusion(kernel) => diffusion::diffuse(buffer, kernel),
            Self::Ordered(matrix) => ordered_dither(buffer, matrix),
            Self::Random => random_dither(buffer, rng),
        }
    }
}
