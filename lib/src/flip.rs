use crate::buffer::PixelBuffer;

/// Mirror the image left to right
///
/// Pixels move as whole units, so channel order inside each pixel is kept.
pub fn flip_x(buffer: &mut PixelBuffer) {
    if buffer.is_empty() {
        return;
    }
    let width = buffer.width();
    let stride = buffer.channels();
    for row in buffer.as_mut_slice().chunks_exact_mut(width * stride) {
        for col in 0..width / 2 {
            let mirror = width - 1 - col;
            for ch in 0..stride {
                row.swap(col * stride + ch, mirror * stride + ch);
            }
        }
    }
}

/// Mirror the image top to bottom
pub fn flip_y(buffer: &mut PixelBuffer) {
    if buffer.is_empty() {
        return;
    }
    let row_len = buffer.width() * buffer.channels();
    let half = buffer.height() / 2;
    let (top, bottom) = buffer.as_mut_slice().split_at_mut(half * row_len);
    for (upper, lower) in top
        .chunks_exact_mut(row_len)
        .zip(bottom.chunks_exact_mut(row_len).rev())
    {
        upper.swap_with_slice(lower);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: usize, height: usize) -> PixelBuffer {
        // Pixel n holds [n, n, n, 255]
        let data = (0..width * height)
            .flat_map(|n| [n as u8, n as u8, n as u8, 255])
            .collect();
        PixelBuffer::from_raw(width, height, 4, data).unwrap()
    }

    fn ids(buf: &PixelBuffer) -> Vec<u8> {
        buf.as_slice().chunks_exact(4).map(|px| px[0]).collect()
    }

    #[test]
    fn test_flip_x_odd_width() {
        let mut buf = numbered(3, 2);
        flip_x(&mut buf);
        assert_eq!(ids(&buf), vec![2, 1, 0, 5, 4, 3]);
    }

    #[test]
    fn test_flip_x_keeps_channel_order() {
        let mut buf = PixelBuffer::from_raw(2, 1, 4, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        flip_x(&mut buf);
        assert_eq!(buf.as_slice(), &[5, 6, 7, 8, 1, 2, 3, 4]);
    }

    #[test]
    fn test_flip_y_odd_height() {
        let mut buf = numbered(2, 3);
        flip_y(&mut buf);
        assert_eq!(ids(&buf), vec![4, 5, 2, 3, 0, 1]);
    }

    #[test]
    fn test_double_flip_restores() {
        let mut buf = numbered(5, 4);
        let before = buf.clone();
        flip_x(&mut buf);
        flip_y(&mut buf);
        flip_y(&mut buf);
        flip_x(&mut buf);
        assert_eq!(buf, before);
    }

    #[test]
    fn test_empty_buffer() {
        let mut buf = PixelBuffer::new(0, 3);
        flip_x(&mut buf);
        flip_y(&mut buf);
        assert!(buf.is_empty());
    }
}
