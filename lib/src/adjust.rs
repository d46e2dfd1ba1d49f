//! Whole-buffer tone adjustments
//!
//! Both operations touch every sample, alpha included.

use crate::buffer::PixelBuffer;
use crate::sample::truncate_to_byte;
use rayon::prelude::*;

fn fraction(percentage: u32) -> f32 {
    percentage.min(100) as f32 / 100.0
}

/// Scale every sample toward black
///
/// # Arguments
/// * `buffer` - Buffer to modify in place
/// * `percentage` - 0 leaves the image alone, 100 turns it black; larger
///   values are treated as 100
pub fn darken(buffer: &mut PixelBuffer, percentage: u32) {
    let shade = 1.0 - fraction(percentage);
    buffer
        .as_mut_slice()
        .par_iter_mut()
        .for_each(|v| *v = truncate_to_byte(*v as f32 * shade));
}

/// Move every sample toward white
///
/// # Arguments
/// * `buffer` - Buffer to modify in place
/// * `percentage` - 0 leaves the image alone, 100 turns it white; larger
///   values are treated as 100
pub fn lighten(buffer: &mut PixelBuffer, percentage: u32) {
    // Scales with the percentage like `darken`: 0 is a no-op, 100 is white
    let tint = fraction(percentage);
    buffer.as_mut_slice().par_iter_mut().for_each(|v| {
        let value = *v as f32;
        *v = truncate_to_byte(value + (255.0 - value) * tint);
    });
}
