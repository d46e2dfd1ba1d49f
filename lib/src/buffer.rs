use crate::error::{RasterError, Result};
use image::RgbaImage;

/// Samples per pixel for buffers produced by the image source (R, G, B, A)
pub const RGBA_CHANNELS: usize = 4;

/// Flat interleaved 8-bit pixel buffer
///
/// Samples are stored row-major with `channels` interleaved components per
/// pixel, so the sample for `(row, col, channel)` lives at
/// `(row * width + col) * channels + channel`. The shape is fixed at
/// construction: transforms mutate samples in place but never resize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a zero-filled RGBA buffer
    ///
    /// # Panics
    /// If `width * height * 4` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Self {
        let len = rgba_len(width, height);
        Self {
            width,
            height,
            channels: RGBA_CHANNELS,
            data: vec![0; len],
        }
    }

    /// Create a buffer where every pixel holds the same samples
    ///
    /// # Panics
    /// If `width * height * 4` overflows `usize`.
    pub fn from_pixel(width: usize, height: usize, pixel: [u8; RGBA_CHANNELS]) -> Self {
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(rgba_len(width, height))
            .collect();
        Self {
            width,
            height,
            channels: RGBA_CHANNELS,
            data,
        }
    }

    /// Wrap an existing sample vector
    ///
    /// # Errors
    /// `InvalidBuffer` if `channels` is zero or `data.len()` is not exactly
    /// `width * height * channels`.
    pub fn from_raw(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        if channels == 0 {
            return Err(RasterError::InvalidBuffer(
                "channel count must be at least 1".to_string(),
            ));
        }
        let expected = sample_count(width, height, channels).ok_or_else(|| {
            RasterError::InvalidBuffer(format!(
                "{}x{}x{} overflows the address space",
                width, height, channels
            ))
        })?;
        if data.len() != expected {
            return Err(RasterError::InvalidBuffer(format!(
                "expected {} samples for {}x{}x{}, got {}",
                expected,
                width,
                height,
                channels,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Total number of samples (not pixels)
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Re-check the shape invariant
    ///
    /// Every constructor establishes it, so this only fails for a buffer
    /// whose backing storage was swapped out from under it.
    pub fn validate(&self) -> Result<()> {
        let expected = sample_count(self.width, self.height, self.channels);
        if self.channels == 0
            || !self.data.len().is_multiple_of(self.channels)
            || expected != Some(self.data.len())
        {
            return Err(RasterError::InvalidBuffer(format!(
                "{} samples do not match {}x{}x{}",
                self.data.len(),
                self.width,
                self.height,
                self.channels
            )));
        }
        Ok(())
    }

    /// Flat sample index of `(row, col, channel)`, or `None` when outside the image
    #[inline]
    pub fn index(&self, row: usize, col: usize, channel: usize) -> Option<usize> {
        (row < self.height && col < self.width && channel < self.channels)
            .then(|| (row * self.width + col) * self.channels + channel)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<u8> {
        self.index(row, col, channel).map(|i| self.data[i])
    }

    /// Write one sample; returns `false` (and writes nothing) when out of bounds
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, channel: usize, value: u8) -> bool {
        match self.index(row, col, channel) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    /// All samples of the pixel at `(row, col)`
    pub fn pixel(&self, row: usize, col: usize) -> Option<&[u8]> {
        let start = self.index(row, col, 0)?;
        Some(&self.data[start..start + self.channels])
    }

    /// Fail with `ChannelOutOfRange` unless `channel < channels`
    pub(crate) fn check_channel(&self, channel: usize) -> Result<()> {
        if channel >= self.channels {
            return Err(RasterError::ChannelOutOfRange {
                channel,
                channels: self.channels,
            });
        }
        Ok(())
    }

    /// Convert back into an `image` RGBA buffer for encoding
    ///
    /// # Errors
    /// `InvalidBuffer` unless the buffer has exactly four channels and
    /// dimensions that fit in `u32`.
    pub fn into_rgba_image(self) -> Result<RgbaImage> {
        if self.channels != RGBA_CHANNELS {
            return Err(RasterError::InvalidBuffer(format!(
                "RGBA output needs {} channels, buffer has {}",
                RGBA_CHANNELS, self.channels
            )));
        }
        let (width, height) = match (u32::try_from(self.width), u32::try_from(self.height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(RasterError::InvalidBuffer(format!(
                    "{}x{} exceeds RGBA image limits",
                    self.width, self.height
                )));
            }
        };
        RgbaImage::from_raw(width, height, self.data).ok_or_else(|| {
            RasterError::InvalidBuffer("sample count does not match dimensions".to_string())
        })
    }
}

/// `width * height * channels`, or `None` on overflow
fn sample_count(width: usize, height: usize, channels: usize) -> Option<usize> {
    width.checked_mul(height)?.checked_mul(channels)
}

fn rgba_len(width: usize, height: usize) -> usize {
    match sample_count(width, height, RGBA_CHANNELS) {
        Some(len) => len,
        None => panic!(
            "{}x{} RGBA buffer overflows the address space",
            width, height
        ),
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width: width as usize,
            height: height as usize,
            channels: RGBA_CHANNELS,
            data: img.into_raw(),
        }
    }
}
