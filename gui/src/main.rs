mod app;

use app::RasterApp;
use eframe::egui;
use log::info;
use std::path::PathBuf;

const ICON_SIZE: usize = 32;

/// Usage: `raster-gui [IMAGE]`
///
/// `RUST_LOG=debug` shows the per-pass details logged by the library.
fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let initial = std::env::args_os().nth(1).map(PathBuf::from);
    if let Some(path) = &initial {
        info!("Opening {} on startup", path.display());
    }

    eframe::run_native(
        "Raster FX",
        native_options(),
        Box::new(move |cc| Ok(Box::new(RasterApp::new(cc, initial)))),
    )
}

fn native_options() -> eframe::NativeOptions {
    let viewport = egui::ViewportBuilder::default()
        .with_title("Raster FX")
        .with_inner_size([1280.0, 720.0])
        .with_min_inner_size([800.0, 600.0])
        .with_icon(gradient_icon());
    eframe::NativeOptions {
        viewport,
        ..Default::default()
    }
}

/// Horizontal gray ramp crossed by an orange edge stripe
fn gradient_icon() -> egui::IconData {
    let stripe = ICON_SIZE / 2 - 1..=ICON_SIZE / 2;
    let rgba = (0..ICON_SIZE * ICON_SIZE)
        .flat_map(|i| {
            let x = i % ICON_SIZE;
            if stripe.contains(&x) {
                [255, 160, 0, 255]
            } else {
                let gray = (x * 255 / (ICON_SIZE - 1)) as u8;
                [gray, gray, gray, 255]
            }
        })
        .collect();

    egui::IconData {
        rgba,
        width: ICON_SIZE as u32,
        height: ICON_SIZE as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_dimensions() {
        let icon = gradient_icon();
        assert_eq!((icon.width, icon.height), (32, 32));
        assert_eq!(icon.rgba.len(), ICON_SIZE * ICON_SIZE * 4);
    }

    #[test]
    fn test_icon_ramp_and_stripe() {
        let icon = gradient_icon();
        let px = |x: usize, y: usize| {
            let i = (y * ICON_SIZE + x) * 4;
            &icon.rgba[i..i + 4]
        };
        assert_eq!(px(0, 5), &[0, 0, 0, 255]);
        assert_eq!(px(ICON_SIZE - 1, 5), &[255, 255, 255, 255]);
        assert_eq!(px(ICON_SIZE / 2, 20), &[255, 160, 0, 255]);
    }
}
