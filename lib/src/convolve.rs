use crate::buffer::PixelBuffer;
use crate::error::Result;
use crate::kernel::Kernel;
use crate::sample::truncate_to_byte;
use log::debug;

/// Convolve one channel of `input`, returning a new buffer
///
/// For each pixel `(row, col)` the kernel is centered on the pixel and the
/// tap at kernel offset `(dr, dc)` reads the input at `(row - dr, col - dc)`.
/// This is true convolution (the kernel is flipped relative to a
/// correlation), so `Kernel::sobel_x` responds positively to a bright-to-dark
/// transition going left to right. Taps that fall outside the image
/// contribute zero. Sums are truncated toward zero and saturated into
/// `0..=255`; negative responses therefore read as 0.
///
/// Every other channel is copied through unchanged.
///
/// # Arguments
/// * `input` - Source buffer, never modified
/// * `kernel` - Odd-sized weight matrix
/// * `channel` - Interleaved channel to filter
///
/// # Errors
/// `ChannelOutOfRange` if `channel >= input.channels()`.
pub fn convolved(input: &PixelBuffer, kernel: &Kernel, channel: usize) -> Result<PixelBuffer> {
    input.validate()?;
    input.check_channel(channel)?;

    let width = input.width() as isize;
    let height = input.height() as isize;
    let stride = input.channels();
    let center_row = kernel.center_row() as isize;
    let center_col = kernel.center_col() as isize;
    let src = input.as_slice();
    let weights = kernel.weights();

    let mut output = input.clone();
    let dst = output.as_mut_slice();

    for row in 0..height {
        for col in 0..width {
            let mut sum = 0.0f32;

            for (kr, kernel_row) in weights.chunks_exact(kernel.width()).enumerate() {
                let src_row = row - (kr as isize - center_row);
                if src_row < 0 || src_row >= height {
                    continue;
                }
                for (kc, &weight) in kernel_row.iter().enumerate() {
                    let src_col = col - (kc as isize - center_col);
                    if src_col < 0 || src_col >= width {
                        continue;
                    }
                    let idx = (src_row * width + src_col) as usize * stride + channel;
                    sum += weight * src[idx] as f32;
                }
            }

            let idx = (row * width + col) as usize * stride + channel;
            dst[idx] = truncate_to_byte(sum);
        }
    }

    Ok(output)
}

/// Convolve one channel of `buffer` in place
///
/// The whole pass is computed into a scratch copy first, so no output value
/// ever feeds into a neighbour's sum. See [`convolved`] for the exact
/// arithmetic.
///
/// # Errors
/// `ChannelOutOfRange`; the buffer is untouched on error.
pub fn apply_convolution(buffer: &mut PixelBuffer, kernel: &Kernel, channel: usize) -> Result<()> {
    debug!(
        "convolving channel {} of {}x{} with {}x{} kernel",
        channel,
        buffer.width(),
        buffer.height(),
        kernel.width(),
        kernel.height()
    );
    *buffer = convolved(buffer, kernel, channel)?;
    Ok(())
}

/// [`apply_convolution`] taking the kernel as a bare row-major slice
///
/// # Errors
/// `InvalidKernel` for even or zero dimensions or a length mismatch,
/// otherwise as [`apply_convolution`].
pub fn apply_convolution_raw(
    buffer: &mut PixelBuffer,
    weights: &[f32],
    kernel_width: usize,
    kernel_height: usize,
    channel: usize,
) -> Result<()> {
    let kernel = Kernel::from_slice(weights, kernel_width, kernel_height)?;
    apply_convolution(buffer, &kernel, channel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RasterError;

    fn noisy(width: usize, height: usize) -> PixelBuffer {
        let data = (0..width * height * 4)
            .map(|i| ((i * 73 + 5) % 256) as u8)
            .collect();
        PixelBuffer::from_raw(width, height, 4, data).unwrap()
    }

    /// Single-channel-0 image from rows of values; other channels get 7
    fn channel0(rows: &[&[u8]]) -> PixelBuffer {
        let height = rows.len();
        let width = rows[0].len();
        let data = rows
            .iter()
            .flat_map(|r| r.iter().flat_map(|&v| [v, 7, 7, 7]))
            .collect();
        PixelBuffer::from_raw(width, height, 4, data).unwrap()
    }

    fn read_channel(buf: &PixelBuffer, channel: usize) -> Vec<u8> {
        buf.as_slice()
            .chunks_exact(buf.channels())
            .map(|px| px[channel])
            .collect()
    }

    #[test]
    fn test_identity_kernel_is_noop() {
        for channel in 0..4 {
            let mut buf = noisy(6, 5);
            let before = buf.clone();
            apply_convolution(&mut buf, &Kernel::identity_3x3(), channel).unwrap();
            assert_eq!(buf, before);
        }
    }

    #[test]
    fn test_zero_kernel_clears_channel() {
        let mut buf = noisy(4, 4);
        let before = buf.clone();
        apply_convolution_raw(&mut buf, &[0.0; 9], 3, 3, 2).unwrap();
        assert!(read_channel(&buf, 2).iter().all(|&v| v == 0));
        for channel in [0, 1, 3] {
            assert_eq!(read_channel(&buf, channel), read_channel(&before, channel));
        }
    }

    #[test]
    fn test_single_pixel_only_uses_center_weight() {
        let weights = [9.0, 9.0, 9.0, 9.0, 0.5, 9.0, 9.0, 9.0, 9.0];
        let mut buf = PixelBuffer::from_pixel(1, 1, [200, 1, 2, 3]);
        apply_convolution_raw(&mut buf, &weights, 3, 3, 0).unwrap();
        assert_eq!(buf.as_slice(), &[100, 1, 2, 3]);

        let weights = [9.0, 9.0, 9.0, 9.0, 0.33, 9.0, 9.0, 9.0, 9.0];
        let mut buf = PixelBuffer::from_pixel(1, 1, [100, 1, 2, 3]);
        apply_convolution_raw(&mut buf, &weights, 3, 3, 0).unwrap();
        assert_eq!(buf.get(0, 0, 0), Some(33));
    }

    #[test]
    fn test_other_channels_untouched() {
        let mut buf = noisy(9, 7);
        let before = buf.clone();
        apply_convolution(&mut buf, &Kernel::laplacian(), 0).unwrap();
        for channel in 1..4 {
            assert_eq!(read_channel(&buf, channel), read_channel(&before, channel));
        }
    }

    #[test]
    fn test_taps_read_row_minus_dr_col_minus_dc() {
        // Only the tap at dc = +1 is set, so output(col) = input(col - 1)
        let weights = [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0];
        let mut buf = channel0(&[&[10, 20, 30]]);
        apply_convolution_raw(&mut buf, &weights, 3, 3, 0).unwrap();
        assert_eq!(read_channel(&buf, 0), vec![0, 10, 20]);

        // Only the tap at dr = +1, so output(row) = input(row - 1)
        let weights = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let mut buf = channel0(&[&[10], &[20], &[30]]);
        apply_convolution_raw(&mut buf, &weights, 3, 3, 0).unwrap();
        assert_eq!(read_channel(&buf, 0), vec![0, 10, 20]);
    }

    #[test]
    fn test_zero_padding_at_borders() {
        let weights = [0.1; 9];
        let mut buf = channel0(&[&[100, 100, 100], &[100, 100, 100], &[100, 100, 100]]);
        apply_convolution_raw(&mut buf, &weights, 3, 3, 0).unwrap();
        assert_eq!(
            read_channel(&buf, 0),
            vec![40, 60, 40, 60, 90, 60, 40, 60, 40]
        );
    }

    #[test]
    fn test_sobel_x_orientation_and_saturation() {
        // Bright-to-dark left to right: strong positive response
        let mut falling = channel0(&[&[100, 100, 0], &[100, 100, 0], &[100, 100, 0]]);
        apply_convolution(&mut falling, &Kernel::sobel_x(), 0).unwrap();
        assert_eq!(falling.get(1, 1, 0), Some(255));

        // Dark-to-bright: negative sum saturates to zero instead of wrapping
        let mut rising = channel0(&[&[0, 0, 100], &[0, 0, 100], &[0, 0, 100]]);
        apply_convolution(&mut rising, &Kernel::sobel_x(), 0).unwrap();
        assert_eq!(rising.get(1, 1, 0), Some(0));
    }

    #[test]
    fn test_reads_original_values_not_updated_neighbours() {
        // Shifting right must move every value by exactly one column
        let weights = [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0];
        let mut buf = channel0(&[&[1, 2, 3, 4, 5, 6]]);
        apply_convolution_raw(&mut buf, &weights, 3, 3, 0).unwrap();
        assert_eq!(read_channel(&buf, 0), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_rectangular_kernel() {
        // 3 wide, 1 tall: horizontal sum of neighbours
        let mut buf = channel0(&[&[10, 20, 30], &[1, 2, 3]]);
        apply_convolution_raw(&mut buf, &[1.0, 1.0, 1.0], 3, 1, 0).unwrap();
        assert_eq!(read_channel(&buf, 0), vec![30, 60, 50, 3, 6, 5]);
    }

    #[test]
    fn test_channel_out_of_range() {
        let mut buf = noisy(2, 2);
        let before = buf.clone();
        let err = apply_convolution(&mut buf, &Kernel::sobel_y(), 4).unwrap_err();
        assert_eq!(
            err,
            RasterError::ChannelOutOfRange {
                channel: 4,
                channels: 4
            }
        );
        assert_eq!(buf, before);
    }

    #[test]
    fn test_invalid_kernel_leaves_buffer_untouched() {
        let mut buf = noisy(3, 3);
        let before = buf.clone();
        let err = apply_convolution_raw(&mut buf, &[1.0; 4], 2, 2, 0).unwrap_err();
        assert!(matches!(err, RasterError::InvalidKernel(_)));
        assert_eq!(buf, before);
    }

    #[test]
    fn test_convolved_does_not_mutate_input() {
        let input = noisy(5, 5);
        let before = input.clone();
        let out = convolved(&input, &Kernel::sharpen(), 1).unwrap();
        assert_eq!(input, before);
        assert_eq!((out.width(), out.height()), (5, 5));
    }
}
