use crate::buffer::PixelBuffer;
use crate::error::{RasterError, Result};
use crate::grayscale::{GrayWeights, check_grayscale_input, reduce_pixels};
use log::debug;
use std::ops::Range;

/// Partition `[0, len)` into `split_count` contiguous pixel-aligned ranges
///
/// Every range except the last spans `(len / stride) / split_count` whole
/// pixels. The last one runs to `len`, absorbing whatever the integer
/// division left over, so no pixel is dropped or visited twice. When there
/// are fewer pixels than splits the leading ranges are empty.
///
/// # Arguments
/// * `len` - Buffer length in samples (a multiple of `stride`)
/// * `stride` - Samples per pixel
/// * `split_count` - Number of ranges to produce (at least 1)
pub fn chunk_ranges(len: usize, stride: usize, split_count: usize) -> Result<Vec<Range<usize>>> {
    if split_count == 0 {
        return Err(RasterError::InvalidSplitCount(split_count));
    }
    if stride == 0 || !len.is_multiple_of(stride) {
        return Err(RasterError::InvalidBuffer(format!(
            "length {} is not a multiple of stride {}",
            len, stride
        )));
    }

    let chunk = (len / stride / split_count) * stride;
    let ranges = (0..split_count)
        .map(|i| {
            let start = i * chunk;
            let end = if i + 1 == split_count { len } else { start + chunk };
            start..end
        })
        .collect();
    Ok(ranges)
}

/// Convert a buffer to grayscale using `split_count` concurrent workers
///
/// The buffer is cut into the disjoint ranges from [`chunk_ranges`] and each
/// one is reduced by its own task inside a `rayon::scope`. The call returns
/// only after every task has finished, and the result is byte-for-byte the
/// same as [`apply_grayscale`](crate::grayscale::apply_grayscale).
///
/// # Errors
/// `InvalidSplitCount` for zero splits, plus the errors of the sequential
/// pass. All checks happen before any worker starts.
pub fn apply_grayscale_parallel(
    buffer: &mut PixelBuffer,
    weights: GrayWeights,
    split_count: usize,
) -> Result<()> {
    check_grayscale_input(buffer, &weights)?;
    let stride = buffer.channels();
    let ranges = chunk_ranges(buffer.len(), stride, split_count)?;
    debug!(
        "parallel grayscale {}x{} across {} chunks",
        buffer.width(),
        buffer.height(),
        ranges.len()
    );

    // Carve the buffer into one mutable slice per range
    let mut rest = buffer.as_mut_slice();
    let mut offset = 0;
    let mut chunks = Vec::with_capacity(ranges.len());
    for range in &ranges {
        let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(range.end - offset);
        chunks.push(chunk);
        rest = tail;
        offset = range.end;
    }

    rayon::scope(|s| {
        for chunk in chunks {
            s.spawn(move |_| reduce_pixels(chunk, stride, weights));
        }
    });

    Ok(())
}
