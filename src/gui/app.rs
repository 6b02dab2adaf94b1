//! Silicon Scaling Projector Main Application
//! Main window with the prediction form, result panel, chart, and dialogs.

use crate::charts::{StaticChartRenderer, DEFAULT_PNG_NAME};
use crate::client::PredictionService;
use crate::config::AppConfig;
use crate::gui::{ChartViewer, ChartViewerAction, DialogAction, DialogLayer, FormPanel, FormPanelAction};
use crate::report::DEFAULT_REPORT_NAME;
use crate::state::{FormController, ModalController, Notice};
use egui::SidePanel;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// How often to poll the worker while a request is in flight
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Static chart export size
const PNG_WIDTH: u32 = 1400;
const PNG_HEIGHT: u32 = 900;

/// Main application window.
pub struct ProjectorApp {
    config: AppConfig,
    form: FormController,
    modals: ModalController,
}

impl ProjectorApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        service: Arc<dyn PredictionService>,
    ) -> Self {
        Self {
            config,
            form: FormController::new(service),
            modals: ModalController::new(),
        }
    }

    /// Check for a settled prediction
    fn check_prediction(&mut self) {
        if let Some(settlement) = self.form.poll() {
            debug!(?settlement, "Submission settled");
        }
    }

    /// Handle report export. Does nothing until a prediction has succeeded.
    fn handle_export_report(&mut self) {
        if self.form.export_binding().is_none() {
            return;
        }

        // Ask user for output location
        let output_path = match rfd::FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .set_directory(self.config.export_dir())
            .set_file_name(DEFAULT_REPORT_NAME)
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match self.form.export_report(&output_path) {
            Some(Ok(saved)) => {
                self.form
                    .notify(Notice::info(format!("Report saved: {}", saved.display())));
                if self.config.open_after_export {
                    if let Err(e) = open::that(&saved) {
                        warn!(error = %e, "Could not open report");
                    }
                }
            }
            Some(Err(e)) => self.form.notify(Notice::error(e.to_string())),
            None => {}
        }
    }

    /// Handle PNG export of the trend chart
    fn handle_save_chart(&mut self) {
        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_directory(self.config.export_dir())
            .set_file_name(DEFAULT_PNG_NAME)
            .save_file()
        {
            Some(path) => path,
            None => return,
        };

        match StaticChartRenderer::save_png(self.form.chart(), &output_path, PNG_WIDTH, PNG_HEIGHT) {
            Ok(()) => self.form.notify(Notice::info(format!(
                "Chart saved: {}",
                output_path.display()
            ))),
            Err(e) => self.form.notify(Notice::error(e.to_string())),
        }
    }
}

impl eframe::App for ProjectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_prediction();

        if self.form.is_busy() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }
        if self.form.chart_mut().take_redraw() {
            ctx.request_repaint();
        }

        // Left panel - Form
        SidePanel::left("form_panel")
            .min_width(320.0)
            .max_width(380.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match FormPanel::show(ui, &mut self.form) {
                        FormPanelAction::Submit => {
                            self.form.submit();
                        }
                        FormPanelAction::DismissNotices => self.form.dismiss_notices(),
                        FormPanelAction::Trigger(trigger) => {
                            self.modals.activate_trigger(trigger);
                        }
                        FormPanelAction::None => {}
                    }
                });
            });

        // Central panel - Results and chart
        let scroll_to_chart = self.form.take_scroll_request();
        let viewer_action = egui::CentralPanel::default()
            .show(ctx, |ui| ChartViewer::show(ui, &self.form, scroll_to_chart))
            .inner;
        match viewer_action {
            ChartViewerAction::ExportReport => self.handle_export_report(),
            ChartViewerAction::SaveChartPng => self.handle_save_chart(),
            ChartViewerAction::None => {}
        }

        // Dialogs
        for action in DialogLayer::show(ctx, &self.modals) {
            match action {
                DialogAction::Close(target) => {
                    self.modals.close_target(target);
                }
                DialogAction::Backdrop(owner) => self.modals.backdrop_clicked(owner),
            }
        }
    }
}
