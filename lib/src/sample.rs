//! Narrowing from floating-point intermediates back to 8-bit samples
//!
//! Both policies saturate: values below zero become 0 and values above 255
//! become 255. Nothing wraps around, so a Sobel response of -40 reads as 0,
//! not 216. NaN maps to 0.

/// Round to the nearest integer (half away from zero), then saturate
#[inline]
pub fn round_to_byte(value: f32) -> u8 {
    // `as` on floats saturates and maps NaN to 0
    value.round() as u8
}

/// Truncate toward zero, then saturate
#[inline]
pub fn truncate_to_byte(value: f32) -> u8 {
    value as u8
}
