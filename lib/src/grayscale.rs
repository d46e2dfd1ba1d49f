use crate::buffer::PixelBuffer;
use crate::error::{RasterError, Result};
use crate::sample::round_to_byte;
use log::debug;

/// Per-channel coefficients for reducing R, G, B to one intensity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrayWeights {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl GrayWeights {
    /// Plain mean of the three color channels
    pub const EVEN_AVERAGE: GrayWeights = GrayWeights {
        r: 1.0 / 3.0,
        g: 1.0 / 3.0,
        b: 1.0 / 3.0,
    };

    /// Rec. 709 luma coefficients
    pub const PERCEPTUAL_LUMA: GrayWeights = GrayWeights {
        r: 0.2126,
        g: 0.7152,
        b: 0.0722,
    };

    /// Custom weights; each must be finite and non-negative
    pub fn new(r: f32, g: f32, b: f32) -> Result<Self> {
        let weights = Self { r, g, b };
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, w) in [("r", self.r), ("g", self.g), ("b", self.b)] {
            if !w.is_finite() || w < 0.0 {
                return Err(RasterError::InvalidWeights(format!(
                    "{} weight must be finite and non-negative, got {}",
                    name, w
                )));
            }
        }
        Ok(())
    }

    /// Weighted intensity of one pixel, rounded and capped at 255
    #[inline]
    pub fn intensity(&self, r: u8, g: u8, b: u8) -> u8 {
        round_to_byte(self.r * r as f32 + self.g * g as f32 + self.b * b as f32)
    }
}

/// Named grayscale policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrayscaleMode {
    Average,
    #[default]
    Luma,
}

impl GrayscaleMode {
    pub const ALL: [GrayscaleMode; 2] = [GrayscaleMode::Average, GrayscaleMode::Luma];

    pub fn weights(self) -> GrayWeights {
        match self {
            GrayscaleMode::Average => GrayWeights::EVEN_AVERAGE,
            GrayscaleMode::Luma => GrayWeights::PERCEPTUAL_LUMA,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GrayscaleMode::Average => "Even average",
            GrayscaleMode::Luma => "Perceptual luma",
        }
    }
}

/// Check that a buffer can be reduced to gray
pub(crate) fn check_grayscale_input(buffer: &PixelBuffer, weights: &GrayWeights) -> Result<()> {
    buffer.validate()?;
    if buffer.channels() < 3 {
        return Err(RasterError::InvalidBuffer(format!(
            "grayscale needs at least 3 channels, buffer has {}",
            buffer.channels()
        )));
    }
    weights.validate()
}

/// Reduce every whole pixel in `samples` to gray in place
///
/// `samples` must start on a pixel boundary; channels past the third are
/// left alone.
pub(crate) fn reduce_pixels(samples: &mut [u8], stride: usize, weights: GrayWeights) {
    for px in samples.chunks_exact_mut(stride) {
        let gray = weights.intensity(px[0], px[1], px[2]);
        px[0] = gray;
        px[1] = gray;
        px[2] = gray;
    }
}

/// Convert a buffer to grayscale on the calling thread
///
/// Each pixel's R, G and B samples are replaced by
/// `round(wR*R + wG*G + wB*B)` capped at 255. Alpha (and any further
/// channel) is untouched.
///
/// # Arguments
/// * `buffer` - Interleaved buffer with at least 3 channels
/// * `weights` - Channel coefficients, e.g. [`GrayWeights::PERCEPTUAL_LUMA`]
///
/// # Errors
/// `InvalidBuffer` or `InvalidWeights`; the buffer is unchanged on error.
pub fn apply_grayscale(buffer: &mut PixelBuffer, weights: GrayWeights) -> Result<()> {
    check_grayscale_input(buffer, &weights)?;
    debug!(
        "grayscale {}x{} with weights ({}, {}, {})",
        buffer.width(),
        buffer.height(),
        weights.r,
        weights.g,
        weights.b
    );
    let stride = buffer.channels();
    reduce_pixels(buffer.as_mut_slice(), stride, weights);
    Ok(())
}
