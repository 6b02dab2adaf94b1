//! Chart Viewer Widget
//! Central scrollable area with the result panel and the trend chart card.

use crate::charts::ChartPlotter;
use crate::state::FormController;
use egui::{Color32, RichText, ScrollArea};

const CARD_SPACING: f32 = 15.0;
const CHART_HEIGHT: f32 = 420.0;

pub struct ChartViewer;

impl ChartViewer {
    /// Draw results and chart. `scroll_to_chart` brings the chart card into view.
    pub fn show(
        ui: &mut egui::Ui,
        form: &FormController,
        scroll_to_chart: bool,
    ) -> ChartViewerAction {
        let mut action = ChartViewerAction::None;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if let Some(panel) = form.result_panel() {
                    egui::Frame::none()
                        .rounding(8.0)
                        .stroke(egui::Stroke::new(2.0, Color32::from_rgb(0, 188, 212)))
                        .fill(ui.visuals().widgets.noninteractive.bg_fill)
                        .inner_margin(12.0)
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.label(RichText::new("📈 Projection").size(16.0).strong());
                            ui.add_space(6.0);
                            ui.label(
                                RichText::new(&panel.count)
                                    .size(28.0)
                                    .strong()
                                    .color(Color32::from_rgb(40, 167, 69)),
                            );
                            ui.label(format!("Confidence interval: {}", panel.interval));
                            ui.label(format!("Moore's Law comparison: {}", panel.comparison));
                            if let Some(projection) = &panel.moores_projection {
                                ui.label(
                                    RichText::new(format!("Moore's Law projection: {projection}"))
                                        .color(Color32::GRAY),
                                );
                            }

                            ui.add_space(8.0);
                            ui.horizontal(|ui| {
                                if ui.button("📄 Export PDF").clicked() {
                                    action = ChartViewerAction::ExportReport;
                                }
                                if ui.button("🖼 Save Chart PNG").clicked() {
                                    action = ChartViewerAction::SaveChartPng;
                                }
                            });
                        });
                    ui.add_space(CARD_SPACING);
                }

                let card = egui::Frame::none()
                    .rounding(8.0)
                    .stroke(egui::Stroke::new(1.0, Color32::from_gray(80)))
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(RichText::new("Scaling Trend").size(16.0).strong());
                        ui.add_space(6.0);
                        ChartPlotter::draw_trend_chart(ui, form.chart(), CHART_HEIGHT);
                    });

                if scroll_to_chart {
                    card.response.scroll_to_me(Some(egui::Align::TOP));
                }
            });

        action
    }
}

/// Actions triggered by the chart viewer
#[derive(Debug, Clone, PartialEq)]
pub enum ChartViewerAction {
    None,
    ExportReport,
    SaveChartPng,
}
