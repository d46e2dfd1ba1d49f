use crate::adjust::{darken, lighten};
use crate::buffer::PixelBuffer;
use crate::config::PipelineConfig;
use crate::convolve::apply_convolution;
use crate::error::{RasterError, Result};
use crate::flip::{flip_x, flip_y};
use crate::grayscale::apply_grayscale;
use crate::parallel::apply_grayscale_parallel;
use log::debug;

/// Runs the configured pipeline over a copy of `input`
///
/// Stages run in this order:
/// 1. Mirror (x, then y)
/// 2. Darken, then lighten
/// 3. Grayscale, on the calling thread when `split_count == 1` and across
///    `split_count` workers otherwise
/// 4. Convolution with the selected kernel, once per listed channel
///
/// # Arguments
/// * `input` - The source buffer, left untouched
/// * `config` - Pipeline settings
///
/// # Returns
/// The transformed buffer, same dimensions as `input`
///
/// # Errors
/// `InvalidConfig` if `config.validate()` fails, otherwise whatever the
/// individual stages report. Nothing is computed when validation fails.
pub fn process(input: &PixelBuffer, config: &PipelineConfig) -> Result<PixelBuffer> {
    config.validate().map_err(RasterError::InvalidConfig)?;
    input.validate()?;
    for &channel in &config.channels {
        input.check_channel(channel)?;
    }

    let mut working = input.clone();

    // Step 1: Geometry
    if config.flip_x {
        flip_x(&mut working);
    }
    if config.flip_y {
        flip_y(&mut working);
    }

    // Step 2: Tone
    if config.darken > 0 {
        darken(&mut working, config.darken);
    }
    if config.lighten > 0 {
        lighten(&mut working, config.lighten);
    }

    // Step 3: Grayscale
    if let Some(mode) = config.grayscale {
        if config.split_count == 1 {
            apply_grayscale(&mut working, mode.weights())?;
        } else {
            apply_grayscale_parallel(&mut working, mode.weights(), config.split_count)?;
        }
    }

    // Step 4: Convolution
    if let Some(preset) = config.kernel {
        let kernel = preset.kernel();
        for &channel in &config.channels {
            apply_convolution(&mut working, &kernel, channel)?;
        }
    }

    debug!(
        "pipeline finished for {}x{} buffer",
        working.width(),
        working.height()
    );
    Ok(working)
}
