use eframe::egui;
use pdf_image_sheet::{REQUIRED_COUNT, SelectionMachine};

use super::{PreviewTextures, UiAction, thumbnail_card};

/// Manual pick over the overflow pool. Shown instead of the picker while
/// the selection is picking.
pub fn show_selection(
    ui: &mut egui::Ui,
    selection: &SelectionMachine,
    textures: &mut PreviewTextures,
) -> Vec<UiAction> {
    let mut actions = Vec::new();
    let count = selection.selected().len();

    ui.heading(format!(
        "Select exactly {} images ({}/{})",
        REQUIRED_COUNT, count, REQUIRED_COUNT
    ));
    ui.label("Click an image to add or remove it. Order of selection is column order.");

    ui.horizontal(|ui| {
        if ui
            .add_enabled(count == REQUIRED_COUNT, egui::Button::new("✔ Confirm"))
            .clicked()
        {
            actions.push(UiAction::Confirm);
        }
        if ui.button("Cancel").clicked() {
            actions.push(UiAction::Cancel);
        }
    });

    if count < REQUIRED_COUNT {
        ui.colored_label(
            ui.visuals().warn_fg_color,
            format!("Please select {} more image(s).", selection.remaining()),
        );
    }

    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.horizontal_wrapped(|ui| {
            for (index, asset) in selection.pool().iter().enumerate() {
                let picked = selection.is_selected(&asset.name);
                let response = thumbnail_card(ui, textures, selection, asset, picked);
                if response.clicked() {
                    actions.push(UiAction::Toggle(index));
                }
            }
        });
    });

    actions
}
