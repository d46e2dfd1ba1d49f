use raster_fx::{GrayWeights, PixelBuffer, apply_grayscale, apply_grayscale_parallel};
use std::time::Instant;

fn main() {
    println!("Raster FX - Parallel Grayscale Demo");
    println!("===================================\n");

    // Sizes picked so most split counts leave a remainder
    let test_cases = vec![
        (101, 97, "101x97 (prime dimensions)"),
        (1920, 1080, "1920x1080 (Full HD)"),
        (3001, 2003, "3001x2003 (large, uneven)"),
    ];

    for (width, height, description) in test_cases {
        println!("Testing: {}", description);

        let data = (0..width * height * 4).map(|i| (i % 251) as u8).collect();
        let source = PixelBuffer::from_raw(width, height, 4, data).expect("valid buffer");

        let mut reference = source.clone();
        let start = Instant::now();
        apply_grayscale(&mut reference, GrayWeights::PERCEPTUAL_LUMA).expect("grayscale failed");
        println!("  sequential: {:.2} ms", start.elapsed().as_secs_f64() * 1000.0);

        for splits in [2, 3, 5, 7, 16] {
            let mut parallel = source.clone();
            let start = Instant::now();
            apply_grayscale_parallel(&mut parallel, GrayWeights::PERCEPTUAL_LUMA, splits)
                .expect("parallel grayscale failed");
            let elapsed = start.elapsed().as_secs_f64() * 1000.0;
            let verdict = if parallel == reference { "✓" } else { "✗ MISMATCH" };
            println!("  {:>2} splits: {:.2} ms {}", splits, elapsed, verdict);
        }
        println!();
    }
}
