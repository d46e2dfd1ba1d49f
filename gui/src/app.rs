use eframe::egui;
use log::{info, warn};
use raster_fx::io::{load_image, save_image};
use raster_fx::{GrayscaleMode, KernelPreset, PipelineConfig, PixelBuffer, process};
use std::path::PathBuf;
use std::time::Instant;

const CHANNEL_NAMES: [&str; 4] = ["R", "G", "B", "A"];

/// Main application state for the raster transform GUI
pub struct RasterApp {
    /// Input image (original)
    input_image: Option<PixelBuffer>,
    /// Output image (transformed)
    output_image: Option<PixelBuffer>,
    /// Pipeline parameters
    config: PipelineConfig,

    /// Texture handle for input image display
    input_texture: Option<egui::TextureHandle>,
    /// Texture handle for output image display
    output_texture: Option<egui::TextureHandle>,

    /// Whether to automatically reprocess when parameters change
    auto_process: bool,
    /// Flag indicating parameters have changed and reprocessing is needed
    needs_reprocess: bool,

    /// Last processing time in milliseconds
    last_process_time_ms: f64,
    /// Error message to display (if any)
    error_message: Option<String>,
}

impl Default for RasterApp {
    fn default() -> Self {
        Self {
            input_image: None,
            output_image: None,
            config: PipelineConfig::default(),
            input_texture: None,
            output_texture: None,
            auto_process: true,
            needs_reprocess: false,
            last_process_time_ms: 0.0,
            error_message: None,
        }
    }
}

impl RasterApp {
    /// Create a new application, optionally opening `initial` right away
    pub fn new(_cc: &eframe::CreationContext<'_>, initial: Option<PathBuf>) -> Self {
        let mut app = Self::default();
        if let Some(path) = initial {
            app.load_image(&path);
        }
        app
    }

    /// Load an image from file path
    pub fn load_image(&mut self, path: &std::path::Path) {
        match load_image(path) {
            Ok(buffer) => {
                info!("Loaded {}x{} image", buffer.width(), buffer.height());
                self.input_image = Some(buffer);
                self.output_image = None;
                self.input_texture = None; // Clear old texture
                self.output_texture = None;
                self.needs_reprocess = true;
                self.error_message = None;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
                self.error_message = Some(format!("Failed to load image: {}", e));
            }
        }
    }

    /// Save the output image to file
    pub fn save_output(&self, path: &std::path::Path) -> Result<(), String> {
        match &self.output_image {
            Some(buffer) => save_image(path, buffer).map_err(|e| format!("Failed to save: {}", e)),
            None => Err("No output image to save".to_string()),
        }
    }

    /// Process the input image with current configuration
    fn process(&mut self) {
        if let Some(ref input) = self.input_image {
            let start = Instant::now();

            match process(input, &self.config) {
                Ok(output) => {
                    self.last_process_time_ms = start.elapsed().as_secs_f64() * 1000.0;
                    self.output_image = Some(output);
                    self.output_texture = None; // Clear old texture
                    self.error_message = None;
                }
                Err(e) => {
                    self.error_message = Some(e.to_string());
                }
            }
            self.needs_reprocess = false;
        }
    }

    /// Render the control panel UI
    fn render_controls(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;

        ui.heading("Controls");
        ui.separator();

        ui.collapsing("Geometry", |ui| {
            changed |= ui.checkbox(&mut self.config.flip_x, "Flip X").changed();
            changed |= ui.checkbox(&mut self.config.flip_y, "Flip Y").changed();
        });

        ui.add_space(8.0);

        ui.collapsing("Tone", |ui| {
            changed |= ui
                .add(egui::Slider::new(&mut self.config.darken, 0..=100).text("Darken %"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut self.config.lighten, 0..=100).text("Lighten %"))
                .changed();
        });

        ui.add_space(8.0);

        ui.collapsing("Grayscale", |ui| {
            let label = self.config.grayscale.map_or("Off", GrayscaleMode::label);
            egui::ComboBox::from_label("Weights")
                .selected_text(label)
                .show_ui(ui, |ui| {
                    changed |= ui
                        .selectable_value(&mut self.config.grayscale, None, "Off")
                        .changed();
                    for mode in GrayscaleMode::ALL {
                        changed |= ui
                            .selectable_value(&mut self.config.grayscale, Some(mode), mode.label())
                            .changed();
                    }
                });

            changed |= ui
                .add(egui::Slider::new(&mut self.config.split_count, 1..=16).text("Workers"))
                .on_hover_text("1 runs on the UI thread; more splits the buffer into chunks")
                .changed();
        });

        ui.add_space(8.0);

        ui.collapsing("Convolution", |ui| {
            let label = self.config.kernel.map_or("Off", KernelPreset::label);
            egui::ComboBox::from_label("Kernel")
                .selected_text(label)
                .show_ui(ui, |ui| {
                    changed |= ui
                        .selectable_value(&mut self.config.kernel, None, "Off")
                        .changed();
                    for preset in KernelPreset::ALL {
                        changed |= ui
                            .selectable_value(&mut self.config.kernel, Some(preset), preset.label())
                            .changed();
                    }
                });

            ui.horizontal(|ui| {
                ui.label("Channels");
                for (channel, name) in CHANNEL_NAMES.iter().enumerate() {
                    let mut enabled = self.config.channels.contains(&channel);
                    if ui.checkbox(&mut enabled, *name).changed() {
                        if enabled {
                            self.config.channels.push(channel);
                            self.config.channels.sort_unstable();
                        } else {
                            self.config.channels.retain(|&c| c != channel);
                        }
                        changed = true;
                    }
                }
            });
        });

        ui.add_space(16.0);
        ui.separator();

        // Auto-process toggle
        ui.checkbox(&mut self.auto_process, "Auto-process")
            .on_hover_text("Automatically reprocess when parameters change");

        // Manual process button
        ui.add_enabled_ui(!self.auto_process || !self.needs_reprocess, |ui| {
            if ui.button("Process").clicked() {
                self.process();
            }
        });

        // Show processing time
        if self.last_process_time_ms > 0.0 {
            ui.label(format!("Last process: {:.1} ms", self.last_process_time_ms));
        }

        changed
    }

    /// Convert a pixel buffer to egui ColorImage
    fn buffer_to_color_image(buffer: &PixelBuffer) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(
            [buffer.width(), buffer.height()],
            buffer.as_slice(),
        )
    }

    /// Display an image in the UI (standalone helper function)
    fn display_image(
        ui: &mut egui::Ui,
        image: Option<&PixelBuffer>,
        texture: &mut Option<egui::TextureHandle>,
        label: &str,
    ) {
        ui.vertical(|ui| {
            ui.heading(label);

            if let Some(buffer) = image {
                // Update texture if needed
                if texture.is_none() {
                    let color_image = Self::buffer_to_color_image(buffer);
                    *texture = Some(ui.ctx().load_texture(
                        label,
                        color_image,
                        egui::TextureOptions::default(),
                    ));
                }

                // Display the texture
                if let Some(tex) = texture {
                    let size = tex.size_vec2();
                    let max_size = ui.available_size();
                    // Allow upscaling for small images, but limit to reasonable max scale
                    let scale = ((max_size.x / size.x).min(max_size.y / size.y)).min(4.0);
                    let display_size = size * scale;

                    ui.image((tex.id(), display_size));
                    ui.label(format!(
                        "{}x{} (scale: {:.1}x)",
                        buffer.width(),
                        buffer.height(),
                        scale
                    ));
                }
            } else {
                ui.label("No image loaded");
            }
        });
    }
}

impl eframe::App for RasterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "tga"])
                            .pick_file()
                        {
                            self.load_image(&path);
                        }
                        ui.close();
                    }

                    if ui.button("Save Output...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("PNG", &["png"])
                            .add_filter("JPEG", &["jpg"])
                            .add_filter("BMP", &["bmp"])
                            .add_filter("TGA", &["tga"])
                            .save_file()
                            && let Err(e) = self.save_output(&path)
                        {
                            self.error_message = Some(e);
                        }
                        ui.close();
                    }

                    ui.separator();

                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.error_message = Some(
                            "Raster FX\nGrayscale and convolution playground\n\nBuilt with Rust + egui".to_string()
                        );
                        ui.close();
                    }
                });
            });
        });

        // Left panel: Controls
        egui::SidePanel::left("control_panel")
            .resizable(true)
            .default_width(250.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let changed = self.render_controls(ui);

                    if changed {
                        self.needs_reprocess = true;
                    }
                });
            });

        // Central panel: Image display
        egui::CentralPanel::default().show(ctx, |ui| {
            // Show error message if any
            if let Some(ref msg) = self.error_message {
                ui.colored_label(egui::Color32::RED, msg);
                if ui.button("Clear Error").clicked() {
                    self.error_message = None;
                }
                ui.separator();
            }

            // Auto-process if needed
            if self.auto_process && self.needs_reprocess && self.input_image.is_some() {
                self.process();
            }

            // Display images side-by-side
            ui.horizontal(|ui| {
                let available_width = ui.available_width();
                let half_width = available_width / 2.0 - 8.0;

                ui.allocate_ui_with_layout(
                    egui::vec2(half_width, ui.available_height()),
                    egui::Layout::top_down(egui::Align::Center),
                    |ui| {
                        Self::display_image(
                            ui,
                            self.input_image.as_ref(),
                            &mut self.input_texture,
                            "Original",
                        );
                    },
                );

                ui.separator();

                ui.allocate_ui_with_layout(
                    egui::vec2(half_width, ui.available_height()),
                    egui::Layout::top_down(egui::Align::Center),
                    |ui| {
                        Self::display_image(
                            ui,
                            self.output_image.as_ref(),
                            &mut self.output_texture,
                            "Output",
                        );
                    },
                );
            });
        });
    }
}
