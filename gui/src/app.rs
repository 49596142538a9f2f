use eframe::egui;
use image::RgbImage;
use memecap::{
    Alignment, FolderRevealer, FontProvider, FontSpec, MemeConfig, MemeError, MemeRequest,
    SystemFonts, generate, platform_revealer,
};
use std::path::PathBuf;

const MIN_FONT_SIZE: u32 = 10;
const MAX_FONT_SIZE: u32 = 200;

/// Main application state for the meme generator GUI
pub struct MemeApp {
    /// Selected source image
    image_path: Option<PathBuf>,
    /// Caption text per band
    top_text: String,
    bottom_text: String,
    /// Caption alignment per band
    top_align: Alignment,
    bottom_align: Alignment,

    /// Font choices, built-in font first
    font_names: Vec<String>,
    selected_font: String,
    font_size: u32,

    /// Host capabilities
    fonts: SystemFonts,
    revealer: Box<dyn FolderRevealer>,
    config: MemeConfig,

    /// Last generated meme and its texture
    preview: Option<RgbImage>,
    preview_texture: Option<egui::TextureHandle>,

    /// Status line under the buttons
    status: String,
    /// Error message to display (if any)
    error_message: Option<String>,
}

impl MemeApp {
    /// Create a new meme generator application
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let fonts = SystemFonts::scan();
        let font_names = fonts.font_names();
        let selected_font = font_names.first().cloned().unwrap_or_default();

        Self {
            image_path: None,
            top_text: String::new(),
            bottom_text: String::new(),
            top_align: Alignment::Center,
            bottom_align: Alignment::Center,
            font_names,
            selected_font,
            font_size: 50,
            fonts,
            revealer: platform_revealer(),
            config: MemeConfig::default(),
            preview: None,
            preview_texture: None,
            status: String::new(),
            error_message: None,
        }
    }

    /// Snapshot the form into a request
    fn to_request(&self) -> Result<MemeRequest, MemeError> {
        let path = self.image_path.clone().ok_or(MemeError::MissingImage)?;
        Ok(
            MemeRequest::new(path, FontSpec::new(&self.selected_font, self.font_size))
                .with_top(&self.top_text, self.top_align)
                .with_bottom(&self.bottom_text, self.bottom_align),
        )
    }

    /// Build a request from the form, generate, and report the outcome
    fn generate_meme(&mut self) {
        let request = match self.to_request() {
            Ok(request) => request,
            Err(e) => {
                self.report_error(generate_error_message(&e));
                return;
            }
        };

        match generate(&request, &self.config, &self.fonts) {
            Ok(generation) => {
                for warning in &generation.warnings {
                    show_dialog(rfd::MessageLevel::Warning, "Font Warning", &warning.to_string());
                }

                self.status = format!("Meme saved as: {}", generation.file_name());
                self.error_message = None;

                match image::open(&generation.path) {
                    Ok(img) => {
                        self.preview = Some(img.to_rgb8());
                        self.preview_texture = None; // Clear old texture
                    }
                    Err(e) => log::warn!("could not reload {}: {}", generation.path.display(), e),
                }

                show_dialog(rfd::MessageLevel::Info, "Success", "Meme generated successfully!");
            }
            Err(e) => self.report_error(generate_error_message(&e)),
        }
    }

    /// Open the output folder; failures never touch generation state
    fn open_memes_folder(&mut self) {
        if let Err(e) = self.revealer.reveal(&self.config.output_dir) {
            let message = match e {
                MemeError::FolderMissing(_) => "Memes folder not found!".to_string(),
                other => format!("Could not open memes folder: {}", other),
            };
            show_dialog(rfd::MessageLevel::Error, "Error", &message);
        }
    }

    fn report_error(&mut self, message: String) {
        log::error!("{}", message);
        show_dialog(rfd::MessageLevel::Error, "Error", &message);
        self.error_message = Some(message);
    }

    fn browse_image(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_title("Open an image")
            .add_filter("Image files", &["jpg", "jpeg", "png", "gif", "bmp"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            self.image_path = Some(path);
        }
    }

    /// Alignment radio buttons for one caption
    fn alignment_row(ui: &mut egui::Ui, alignment: &mut Alignment) {
        ui.horizontal(|ui| {
            ui.label("Alignment:");
            ui.radio_value(alignment, Alignment::Left, "Left");
            ui.radio_value(alignment, Alignment::Center, "Center");
            ui.radio_value(alignment, Alignment::Right, "Right");
        });
    }

    /// Render the form
    fn render_form(&mut self, ui: &mut egui::Ui) {
        // Image selection
        ui.horizontal(|ui| {
            ui.label("Image:");
            let mut shown = self
                .image_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            if ui
                .add(egui::TextEdit::singleline(&mut shown).desired_width(360.0))
                .changed()
            {
                self.image_path = (!shown.is_empty()).then(|| PathBuf::from(&shown));
            }
            if ui.button("Browse").clicked() {
                self.browse_image();
            }
        });

        ui.add_space(8.0);

        // Font settings
        ui.group(|ui| {
            ui.label("Font Settings");
            ui.horizontal(|ui| {
                egui::ComboBox::from_label("Font")
                    .selected_text(self.selected_font.as_str())
                    .width(220.0)
                    .show_ui(ui, |ui| {
                        for name in &self.font_names {
                            ui.selectable_value(&mut self.selected_font, name.clone(), name.as_str());
                        }
                    });

                ui.label("Font Size:");
                ui.add(
                    egui::DragValue::new(&mut self.font_size)
                        .range(MIN_FONT_SIZE..=MAX_FONT_SIZE),
                );
            });
        });

        ui.add_space(8.0);

        ui.group(|ui| {
            ui.label("Top Text");
            ui.add(egui::TextEdit::singleline(&mut self.top_text).desired_width(400.0));
            Self::alignment_row(ui, &mut self.top_align);
        });

        ui.group(|ui| {
            ui.label("Bottom Text");
            ui.add(egui::TextEdit::singleline(&mut self.bottom_text).desired_width(400.0));
            Self::alignment_row(ui, &mut self.bottom_align);
        });

        ui.add_space(16.0);

        ui.horizontal(|ui| {
            if ui.button("Generate Meme").clicked() {
                self.generate_meme();
            }
            if ui.button("Open Memes Folder").clicked() {
                self.open_memes_folder();
            }
        });

        ui.label(self.status.as_str());
    }

    /// Convert RgbImage to egui ColorImage
    fn rgb_to_color_image(img: &RgbImage) -> egui::ColorImage {
        let (width, height) = img.dimensions();
        egui::ColorImage::from_rgb([width as usize, height as usize], img.as_raw())
    }

    /// Display the last generated meme, scaled to fit
    fn display_preview(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading("Preview");

            let Some(img) = self.preview.as_ref() else {
                ui.label("No meme generated yet");
                return;
            };

            let texture = self.preview_texture.get_or_insert_with(|| {
                ui.ctx().load_texture(
                    "meme_preview",
                    Self::rgb_to_color_image(img),
                    egui::TextureOptions::default(),
                )
            });

            let size = texture.size_vec2();
            let max_size = ui.available_size();
            let scale = (max_size.x / size.x).min(max_size.y / size.y).min(1.0);
            ui.image((texture.id(), size * scale));
        });
    }
}

/// Dialog text for a failed Generate click
fn generate_error_message(err: &MemeError) -> String {
    match err {
        MemeError::MissingImage => "Please select an image first!".to_string(),
        other => format!("An error occurred: {}", other),
    }
}

fn show_dialog(level: rfd::MessageLevel, title: &str, description: &str) {
    rfd::MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(description)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

impl eframe::App for MemeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        self.browse_image();
                        ui.close();
                    }

                    if ui.button("Open Memes Folder").clicked() {
                        self.open_memes_folder();
                        ui.close();
                    }

                    ui.separator();

                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Left panel: form
        egui::SidePanel::left("form_panel")
            .resizable(true)
            .default_width(460.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.render_form(ui);
                });
            });

        // Central panel: preview
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(ref msg) = self.error_message {
                ui.colored_label(egui::Color32::RED, msg.as_str());
                if ui.button("Clear Error").clicked() {
                    self.error_message = None;
                }
                ui.separator();
            }

            self.display_preview(ui);
        });
    }
}
