//! The native confirmation dialog window.
//!
//! A small always-on-top window with the prompt title, message and the two
//! actions. `Sheet` style stacks full-width buttons, `Dialog` style lays
//! them out in a row; both resolve to exactly one choice.

use crate::error::{ReportError, Result};
use crate::prompt::{
    CANCEL_ACTION_TITLE, PromptChoice, PromptPresenter, PromptRequest, PromptStyle,
    REPORT_ACTION_TITLE,
};
use eframe::egui;
use std::sync::{Arc, Mutex};
use tracing::warn;

const WINDOW_SIZE: [f32; 2] = [380.0, 170.0];

/// The dialog application driven by the `eframe` event loop.
struct PromptDialog {
    request: PromptRequest,
    choice: Arc<Mutex<Option<PromptChoice>>>,
}

impl PromptDialog {
    fn new(request: PromptRequest, choice: Arc<Mutex<Option<PromptChoice>>>) -> Self {
        Self { request, choice }
    }

    /// Records the choice and closes the window. The first choice wins;
    /// later clicks racing the close are dropped.
    fn resolve(&self, ctx: &egui::Context, choice: PromptChoice) {
        if let Ok(mut slot) = self.choice.lock() {
            slot.get_or_insert(choice);
        }
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

impl eframe::App for PromptDialog {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Enforce dark mode
        ctx.set_visuals(egui::Visuals::dark());

        // Handle escape as a cancellation
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.resolve(ctx, PromptChoice::Cancel);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                ui.heading(self.request.title);
                ui.add_space(4.0);
                ui.label(self.request.message);
            });
            ui.add_space(16.0);

            match self.request.style {
                PromptStyle::Sheet => {
                    let width = ui.available_width();
                    let full = egui::vec2(width, 28.0);
                    if ui
                        .add(egui::Button::new(REPORT_ACTION_TITLE).min_size(full))
                        .clicked()
                    {
                        self.resolve(ctx, PromptChoice::Report);
                    }
                    ui.add_space(4.0);
                    if ui
                        .add(egui::Button::new(CANCEL_ACTION_TITLE).min_size(full))
                        .clicked()
                    {
                        self.resolve(ctx, PromptChoice::Cancel);
                    }
                }
                PromptStyle::Dialog => {
                    ui.vertical_centered(|ui| {
                        ui.horizontal(|ui| {
                            let spacing = ui.available_width() / 4.0;
                            ui.add_space(spacing);
                            if ui.button(REPORT_ACTION_TITLE).clicked() {
                                self.resolve(ctx, PromptChoice::Report);
                            }
                            ui.add_space(spacing / 4.0);
                            if ui.button(CANCEL_ACTION_TITLE).clicked() {
                                self.resolve(ctx, PromptChoice::Cancel);
                            }
                        });
                    });
                }
            }
        });
    }
}

/// Opens the dialog and blocks until the user chooses or closes it.
pub fn run(request: PromptRequest) -> Result<PromptChoice> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_resizable(false)
            .with_always_on_top(),
        ..Default::default()
    };

    let choice = Arc::new(Mutex::new(None));
    let app_choice = choice.clone();

    eframe::run_native(
        request.title,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(PromptDialog::new(request, app_choice)) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| ReportError::ui(format!("Failed to run prompt dialog: {}", e)))?;

    // Extract the choice from shared state
    let lock = choice
        .lock()
        .map_err(|_| ReportError::ui("Failed to acquire choice lock"))?;

    // A window closed without a click means no report
    Ok(lock.unwrap_or(PromptChoice::Cancel))
}

/// [`PromptPresenter`] backed by the native dialog window.
///
/// A dialog that fails to open is logged and treated as a cancellation,
/// which keeps the report flow quiet on headless sessions.
#[derive(Debug, Default)]
pub struct DialogPresenter;

impl DialogPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl PromptPresenter for DialogPresenter {
    fn present(&mut self, request: &PromptRequest) -> PromptChoice {
        match run(*request) {
            Ok(choice) => choice,
            Err(err) => {
                warn!("prompt dialog failed: {err}");
                PromptChoice::Cancel
            }
        }
    }
}
