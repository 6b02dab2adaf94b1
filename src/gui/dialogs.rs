//! Dialog Layer
//! Draws every open dialog over a dimmed backdrop.

use crate::state::{DialogId, ModalController};
use egui::{Color32, RichText};

fn body(id: DialogId) -> &'static str {
    match id {
        DialogId::Creator => {
            "Silicon Scaling Projector compares a projected transistor count \
             against the historical Moore's Law trend."
        }
        DialogId::Contact => {
            "Questions or feedback about projections can be sent to the \
             maintainers of the prediction service."
        }
    }
}

/// Actions triggered inside the dialog layer
#[derive(Debug, Clone, PartialEq)]
pub enum DialogAction {
    /// Close affordance with its target identifier
    Close(&'static str),
    /// Click on the backdrop owned by a dialog
    Backdrop(DialogId),
}

pub struct DialogLayer;

impl DialogLayer {
    pub fn show(ctx: &egui::Context, modals: &ModalController) -> Vec<DialogAction> {
        let mut actions = Vec::new();
        let screen = ctx.screen_rect();

        for id in modals.open_dialogs() {
            let backdrop = egui::Area::new(egui::Id::new(("backdrop", id.as_str())))
                .order(egui::Order::Middle)
                .fixed_pos(screen.min)
                .show(ctx, |ui| {
                    let response = ui.allocate_rect(screen, egui::Sense::click());
                    ui.painter()
                        .rect_filled(screen, 0.0, Color32::from_black_alpha(160));
                    response
                })
                .inner;
            if backdrop.clicked() {
                actions.push(DialogAction::Backdrop(id));
            }

            egui::Window::new(id.title())
                .id(egui::Id::new(("dialog", id.as_str())))
                .order(egui::Order::Foreground)
                .title_bar(false)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.set_max_width(360.0);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(id.title()).size(18.0).strong());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("✖").clicked() {
                                actions.push(DialogAction::Close(id.as_str()));
                            }
                        });
                    });
                    ui.separator();
                    ui.label(body(id));
                });
        }

        actions
    }
}
