/// Edge detection example: grayscale then Sobel on a synthetic image
///
/// Draws a filled circle, reduces it to gray and runs horizontal and
/// vertical Sobel passes on separate channels so both gradients can be
/// inspected in one output file.
use raster_fx::io::save_image;
use raster_fx::{GrayWeights, Kernel, PixelBuffer, apply_convolution, apply_grayscale};

fn main() {
    println!("Raster FX - Edge Detection Example");
    println!("==================================\n");

    let width = 160;
    let height = 160;
    let mut buffer = PixelBuffer::from_pixel(width, height, [40, 60, 120, 255]);

    // Orange disc in the center
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 50.0;
    for row in 0..height {
        for col in 0..width {
            let dx = col as f32 - center_x;
            let dy = row as f32 - center_y;
            if (dx * dx + dy * dy).sqrt() < radius {
                buffer.set(row, col, 0, 250);
                buffer.set(row, col, 1, 160);
                buffer.set(row, col, 2, 30);
            }
        }
    }

    println!("Created test image: {}x{}", width, height);
    save_image("edge_input.png", &buffer).expect("Failed to save input");

    apply_grayscale(&mut buffer, GrayWeights::PERCEPTUAL_LUMA).expect("grayscale failed");

    // Red carries the X gradient, green the Y gradient, blue stays gray
    apply_convolution(&mut buffer, &Kernel::sobel_x(), 0).expect("sobel x failed");
    apply_convolution(&mut buffer, &Kernel::sobel_y(), 1).expect("sobel y failed");

    save_image("edge_output.png", &buffer).expect("Failed to save output");

    println!("✓ Saved input to:  edge_input.png");
    println!("✓ Saved output to: edge_output.png");
}
