//! Form Panel Widget
//! Left side panel with the five process inputs, the submit button, and notices.

use crate::state::{DialogId, FormController, NoticeLevel};
use egui::{Color32, RichText};

/// Left side panel with the prediction form.
pub struct FormPanel;

impl FormPanel {
    /// Draw the form panel
    pub fn show(ui: &mut egui::Ui, form: &mut FormController) -> FormPanelAction {
        let mut action = FormPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🔬 Silicon Scaling Projector")
                    .size(20.0)
                    .color(Color32::from_rgb(0, 188, 212)),
            );
            ui.label(
                RichText::new("Transistor count projection")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Inputs Section =====
        ui.label(RichText::new("⚙️ Process Parameters").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 170.0;
        let busy = form.is_busy();
        let fields = &mut form.fields;
        let rows: [(&str, &mut String, &str); 5] = [
            ("Target Year:", &mut fields.year, "2030"),
            ("Node Size (nm):", &mut fields.node_size, "2"),
            ("Die Area (mm²):", &mut fields.area, "100"),
            ("Transistor Density (tr/mm²):", &mut fields.trans_density, "250"),
            ("Power Density (W/cm²):", &mut fields.power_density, "50"),
        ];

        for (label, value, hint) in rows {
            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new(label));
                let edit = egui::TextEdit::singleline(value)
                    .hint_text(hint)
                    .desired_width(110.0);
                let response = ui.add_enabled(!busy, edit);
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    action = FormPanelAction::Submit;
                }
            });
            ui.add_space(4.0);
        }

        ui.add_space(10.0);

        // ===== Submit =====
        ui.vertical_centered(|ui| {
            let control = form.submit_control();
            let button = egui::Button::new(RichText::new(control.label).size(16.0))
                .min_size(egui::vec2(200.0, 35.0));
            if ui.add_enabled(control.enabled, button).clicked() {
                action = FormPanelAction::Submit;
            }
            if busy {
                ui.add_space(5.0);
                ui.spinner();
            }
        });

        // ===== Notices =====
        if !form.notices().is_empty() {
            ui.add_space(15.0);
            ui.separator();
            ui.add_space(5.0);

            for notice in form.notices() {
                let color = match notice.level {
                    NoticeLevel::Error => Color32::from_rgb(220, 53, 69),
                    NoticeLevel::Warning => Color32::from_rgb(243, 156, 18),
                    NoticeLevel::Info => Color32::from_rgb(40, 167, 69),
                };
                ui.label(RichText::new(&notice.text).size(12.0).color(color));
            }
            if ui.small_button("Dismiss").clicked() {
                action = FormPanelAction::DismissNotices;
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Dialog triggers =====
        ui.horizontal(|ui| {
            for id in DialogId::ALL {
                if ui.button(id.title()).clicked() {
                    action = FormPanelAction::Trigger(id.trigger());
                }
            }
        });

        action
    }
}

/// Actions triggered by the form panel
#[derive(Debug, Clone, PartialEq)]
pub enum FormPanelAction {
    None,
    Submit,
    DismissNotices,
    /// A registered trigger identifier was clicked
    Trigger(&'static str),
}
