//! Raster FX - in-memory RGBA image transforms
//!
//! This library converts interleaved 8-bit pixel buffers to grayscale
//! (sequentially or across a fork-join set of workers) and convolves single
//! channels with odd-sized kernels using zero padding at the borders.
//!
//! # Example
//! ```no_run
//! use raster_fx::{GrayWeights, Kernel, apply_convolution, apply_grayscale_parallel};
//! use raster_fx::io::{load_image, save_image};
//!
//! let mut buffer = load_image("photo.png").unwrap();
//! apply_grayscale_parallel(&mut buffer, GrayWeights::PERCEPTUAL_LUMA, 5).unwrap();
//! apply_convolution(&mut buffer, &Kernel::sobel_x(), 0).unwrap();
//! save_image("edges.png", &buffer).unwrap();
//! ```

pub mod adjust;
pub mod buffer;
pub mod config;
pub mod convolve;
pub mod error;
pub mod flip;
pub mod grayscale;
pub mod io;
pub mod kernel;
pub mod parallel;
pub mod processor;
pub mod sample;

// Re-export main types for convenience
pub use buffer::{PixelBuffer, RGBA_CHANNELS};
pub use config::PipelineConfig;
pub use convolve::{apply_convolution, apply_convolution_raw, convolved};
pub use error::{RasterError, Result};
pub use grayscale::{GrayWeights, GrayscaleMode, apply_grayscale};
pub use kernel::{Kernel, KernelPreset};
pub use parallel::{apply_grayscale_parallel, chunk_ranges};
pub use processor::process;
