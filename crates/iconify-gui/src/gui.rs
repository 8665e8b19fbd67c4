use eframe::egui;
use iconify_core::{IconPipeline, PHASE_COUNT, Phase, ProgressEvent};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

/// Application state machine states
#[derive(Debug, Clone)]
pub enum AppState {
    /// Initial state showing the drop zone and file picker button
    Welcome,
    /// User has picked a file with the dialog, ready to convert
    FileSelected { path: PathBuf },
    /// Conversion is running on the worker thread
    Converting {
        path: PathBuf,
        progress: f32,
        current_phase: Option<Phase>,
        completed_phases: usize,
        log: Vec<String>,
    },
    /// Icon created successfully
    Success { output: PathBuf, log: Vec<String> },
    /// An error occurred
    Error {
        message: String,
        details: Option<String>,
        show_details: bool,
        log: Vec<String>,
    },
}

/// Main application struct
pub struct IconifyApp {
    state: AppState,
    /// Channel for receiving progress updates from worker thread (Some while converting)
    progress_rx: Option<mpsc::Receiver<ProgressEvent>>,
    /// True while a file is being dragged over the window
    drop_hover: bool,
}

impl IconifyApp {
    pub fn new() -> Self {
        IconifyApp {
            state: AppState::Welcome,
            progress_rx: None,
            drop_hover: false,
        }
    }

    fn select_image(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "tiff", "gif", "bmp", "heic"])
            .pick_file()
        {
            self.state = AppState::FileSelected { path };
        }
    }

    fn start_convert(&mut self, source: PathBuf) {
        let (tx, rx) = mpsc::channel();
        self.progress_rx = Some(rx);

        self.state = AppState::Converting {
            path: source.clone(),
            progress: 0.0,
            current_phase: None,
            completed_phases: 0,
            log: Vec::new(),
        };

        // Worker thread creates and owns its own pipeline
        thread::spawn(move || {
            let pipeline = match IconPipeline::new(&source) {
                Ok(p) => p,
                Err(e) => {
                    let _ = tx.send(ProgressEvent::Error {
                        message: "Cannot convert this file".to_string(),
                        details: Some(e.to_string()),
                    });
                    return;
                }
            };

            let _ = pipeline.run(|event| {
                let _ = tx.send(event);
            });
        });
    }

    /// React to files dragged onto the window.
    ///
    /// Dropping starts a conversion immediately; a new drop in any settled
    /// state replaces whatever came before. Drops are ignored while a
    /// conversion is running.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        self.drop_hover = ctx.input(|i| !i.raw.hovered_files.is_empty());

        if matches!(self.state, AppState::Converting { .. }) {
            return;
        }

        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(path) = dropped.into_iter().filter_map(|f| f.path).next() {
            self.start_convert(path);
        }
    }

    fn process_progress_messages(&mut self) {
        // Collect messages first to avoid borrow issues
        let messages: Vec<_> = self
            .progress_rx
            .as_ref()
            .map(|rx| rx.try_iter().collect())
            .unwrap_or_default();

        let mut should_clear_rx = false;

        for event in messages {
            match event {
                ProgressEvent::PhaseStarted { phase } => {
                    if let AppState::Converting {
                        log,
                        current_phase,
                        completed_phases,
                        progress,
                        ..
                    } = &mut self.state
                    {
                        // Mark previous phase as complete
                        if current_phase.is_some() {
                            *completed_phases += 1;
                        }
                        *current_phase = Some(phase);
                        log.push(format!("[{}]", phase));
                        *progress = *completed_phases as f32 / PHASE_COUNT as f32;
                    }
                }
                ProgressEvent::Entry { file, index, total } => {
                    if let AppState::Converting {
                        log,
                        progress,
                        completed_phases,
                        ..
                    } = &mut self.state
                    {
                        log.push(format!("  [{}/{}] {}", index + 1, total, file));
                        // Progress: completed phases + current phase progress
                        let phase_progress = (index + 1) as f32 / total.max(1) as f32;
                        *progress =
                            (*completed_phases as f32 + phase_progress) / PHASE_COUNT as f32;
                    }
                }
                ProgressEvent::Done { output } => {
                    if let AppState::Converting { log, .. } = &self.state {
                        self.state = AppState::Success {
                            output,
                            log: log.clone(),
                        };
                    }
                    should_clear_rx = true;
                }
                ProgressEvent::Error { message, details } => {
                    let log = if let AppState::Converting { log, .. } = &self.state {
                        log.clone()
                    } else {
                        Vec::new()
                    };
                    self.state = AppState::Error {
                        message,
                        details,
                        show_details: false,
                        log,
                    };
                    should_clear_rx = true;
                }
            }
        }

        if should_clear_rx {
            self.progress_rx = None;
        }
    }

    /// Render a scrollable log area with fixed height
    fn render_log(ui: &mut egui::Ui, log: &[String]) {
        let height = 120.0;
        ui.group(|ui| {
            egui::ScrollArea::vertical()
                .max_height(height)
                .min_scrolled_height(height)
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    ui.set_min_height(height);
                    for line in log {
                        ui.label(egui::RichText::new(line).monospace().small());
                    }
                });
        });
    }

    /// Render the drop target, highlighted while a file hovers the window
    fn render_drop_zone(&self, ui: &mut egui::Ui) {
        let color = if self.drop_hover {
            egui::Color32::from_rgb(59, 130, 246)
        } else {
            egui::Color32::GRAY
        };
        ui.group(|ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.label(
                    egui::RichText::new("Drag and drop your icon image here")
                        .color(color)
                        .size(16.0),
                );
                ui.add_space(20.0);
            });
        });
    }

    fn render_welcome(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading("Iconify");
        });
        ui.add_space(16.0);

        self.render_drop_zone(ui);

        ui.add_space(16.0);
        ui.label("The image is treated as the 1024px master and scaled down");
        ui.label("to all ten iconset resolutions by the system tools.");

        ui.add_space(24.0);
        ui.horizontal(|ui| {
            if ui.button("Choose Image...").clicked() {
                self.select_image();
            }
        });
    }

    fn render_file_selected(&mut self, ui: &mut egui::Ui, path: PathBuf) {
        ui.heading("Ready to Convert");
        ui.add_space(16.0);

        ui.group(|ui| {
            ui.label("Source image:");
            ui.label(egui::RichText::new(path.display().to_string()).monospace());
        });

        ui.add_space(16.0);
        ui.label(format!(
            "The .icns file will be written to {}",
            iconify_core::iconset::icns_output_path(&path).display()
        ));

        ui.add_space(24.0);
        ui.horizontal(|ui| {
            if ui.button("Create Icon").clicked() {
                self.start_convert(path.clone());
            }
            if ui.button("Choose Another...").clicked() {
                self.select_image();
            }
        });

        ui.add_space(8.0);
        ui.label(
            egui::RichText::new("Or drop another file to replace")
                .color(egui::Color32::GRAY)
                .small(),
        );
    }

    fn render_converting(
        &mut self,
        ui: &mut egui::Ui,
        log: Vec<String>,
        progress: f32,
        current_phase: Option<Phase>,
    ) {
        ui.heading("Creating Icon...");
        ui.add_space(16.0);

        ui.add(egui::ProgressBar::new(progress).show_percentage());
        ui.add_space(8.0);

        if let Some(phase) = current_phase {
            ui.label(format!("Phase: {}", phase));
        }

        ui.add_space(8.0);
        Self::render_log(ui, &log);
    }

    fn render_success(
        &mut self,
        ctx: &egui::Context,
        ui: &mut egui::Ui,
        output: &PathBuf,
        log: &[String],
    ) {
        ui.vertical_centered(|ui| {
            ui.add_space(8.0);

            // Green circle with white checkmark
            let (rect, _) = ui.allocate_exact_size(egui::vec2(60.0, 60.0), egui::Sense::hover());
            ui.painter()
                .circle_filled(rect.center(), 30.0, egui::Color32::from_rgb(34, 197, 94));
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "\u{2713}",
                egui::FontId::proportional(36.0),
                egui::Color32::WHITE,
            );

            ui.add_space(8.0);
            ui.heading("Icon Created!");
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(output.display().to_string())
                    .monospace()
                    .small(),
            );
            ui.label(
                egui::RichText::new("Drop another image to convert it too")
                    .color(egui::Color32::GRAY)
                    .small(),
            );
        });

        ui.add_space(8.0);
        Self::render_log(ui, log);
        ui.add_space(8.0);

        ui.vertical_centered(|ui| {
            ui.horizontal(|ui| {
                if ui.button("Convert Another...").clicked() {
                    self.state = AppState::Welcome;
                }
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });
    }

    fn render_error(
        &mut self,
        ctx: &egui::Context,
        ui: &mut egui::Ui,
        message: String,
        details: Option<String>,
        show_details: bool,
        log: Vec<String>,
    ) {
        ui.vertical_centered(|ui| {
            ui.add_space(8.0);

            // Red circle with white X
            let (rect, _) = ui.allocate_exact_size(egui::vec2(60.0, 60.0), egui::Sense::hover());
            ui.painter()
                .circle_filled(rect.center(), 30.0, egui::Color32::from_rgb(239, 68, 68));
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "\u{2717}",
                egui::FontId::proportional(36.0),
                egui::Color32::WHITE,
            );

            ui.add_space(8.0);
            ui.heading("Error");
        });

        ui.add_space(4.0);
        ui.label(&message);

        if let Some(ref detail_text) = details {
            ui.add_space(4.0);
            let button_text = if show_details {
                "Hide Details"
            } else {
                "Show Details"
            };
            if ui.button(button_text).clicked() {
                self.state = AppState::Error {
                    message: message.clone(),
                    details: details.clone(),
                    show_details: !show_details,
                    log: log.clone(),
                };
            }

            if show_details {
                ui.add_space(4.0);
                egui::ScrollArea::vertical().max_height(60.0).show(ui, |ui| {
                    ui.label(egui::RichText::new(detail_text).monospace().small());
                });
            }
        }

        ui.add_space(8.0);
        Self::render_log(ui, &log);
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if ui.button("Try Again").clicked() {
                self.state = AppState::Welcome;
            }
            if ui.button("Quit").clicked() {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }
}

impl eframe::App for IconifyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Process any pending progress messages
        self.process_progress_messages();

        // React to drag-and-drop before rendering
        self.handle_dropped_files(ctx);

        // Request repaint if we're converting (to get progress updates)
        if matches!(self.state, AppState::Converting { .. }) {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(16.0);

            // Clone state to avoid borrow issues
            let state = self.state.clone();
            match state {
                AppState::Welcome => self.render_welcome(ui),
                AppState::FileSelected { path } => self.render_file_selected(ui, path),
                AppState::Converting {
                    log,
                    progress,
                    current_phase,
                    ..
                } => self.render_converting(ui, log, progress, current_phase),
                AppState::Success { output, log } => {
                    self.render_success(ctx, ui, &output, &log)
                }
                AppState::Error {
                    message,
                    details,
                    show_details,
                    log,
                } => self.render_error(ctx, ui, message, details, show_details, log),
            }
        });
    }
}

/// Run the GUI application
pub fn run() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 420.0])
            .with_min_inner_size([360.0, 380.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Iconify",
        options,
        Box::new(|cc| {
            // Use light theme
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(IconifyApp::new()))
        }),
    )
}
