use eframe::egui;
use pdf_image_sheet::{CounterStore, Document, REQUIRED_COUNT, SelectionState, SheetSession};
use std::time::Instant;

use super::{PreviewTextures, UiAction, thumbnail_card};

/// Main screen: file picking, drop zone, the current selection and the
/// generate button.
pub fn show_picker<S: CounterStore>(
    ui: &mut egui::Ui,
    session: &SheetSession<S>,
    textures: &mut PreviewTextures,
    hovering_files: bool,
    last_document: Option<&Document>,
) -> Vec<UiAction> {
    let mut actions = Vec::new();
    let selection = session.selection();

    ui.heading("Image to PDF Sheet");
    ui.label(format!(
        "Pick {} images; they are placed side by side on one landscape A5 page.",
        REQUIRED_COUNT
    ));
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        if ui
            .add_enabled(!session.is_generating(), egui::Button::new("📂 Select Images"))
            .clicked()
        {
            actions.push(UiAction::PickFiles);
        }
        ui.label(format!("{} of {} selected", selection.selected().len(), REQUIRED_COUNT));
    });

    ui.add_space(8.0);
    drop_zone(ui, hovering_files);
    ui.add_space(8.0);

    if selection.selected().is_empty() {
        ui.weak("No images selected yet");
    } else {
        ui.horizontal_wrapped(|ui| {
            for (index, asset) in selection.selected().iter().enumerate() {
                ui.vertical(|ui| {
                    thumbnail_card(ui, textures, selection, asset, false);
                    if ui
                        .add_enabled(!session.is_generating(), egui::Button::new("🗑 Remove"))
                        .clicked()
                    {
                        actions.push(UiAction::Remove(index));
                    }
                });
            }
        });
    }

    if let SelectionState::Direct(_) = session.state() {
        ui.colored_label(
            ui.visuals().warn_fg_color,
            format!("Please select {} more image(s).", selection.remaining()),
        );
    }

    ui.separator();

    ui.horizontal(|ui| {
        let generate = egui::Button::new(format!(
            "📄 Generate PDF ({})",
            session.next_document_name()
        ));
        if ui.add_enabled(session.can_generate(), generate).clicked() {
            actions.push(UiAction::Generate);
        }

        let has_anything = !selection.selected().is_empty() || !selection.pool().is_empty();
        if ui
            .add_enabled(
                has_anything && !session.is_generating(),
                egui::Button::new("✖ Clear"),
            )
            .clicked()
        {
            actions.push(UiAction::ClearAll);
        }

        if let Some(document) = last_document {
            if ui
                .button(format!("💾 Save again ({})…", document.name))
                .on_hover_text("Save another copy of the last generated PDF")
                .clicked()
            {
                actions.push(UiAction::SaveAgain);
            }
        }

        if session.is_generating() {
            ui.spinner();
            ui.label("Generating...");
        }
    });

    if selection.cleared_notice_active(Instant::now()) {
        ui.colored_label(egui::Color32::from_rgb(80, 160, 80), "Images cleared");
    }

    actions
}

fn drop_zone(ui: &mut egui::Ui, hovering: bool) {
    let stroke = if hovering {
        egui::Stroke::new(2.0, ui.visuals().selection.stroke.color)
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke
    };

    egui::Frame::group(ui.style()).stroke(stroke).show(ui, |ui| {
        ui.set_min_height(60.0);
        ui.set_width(ui.available_width());
        ui.centered_and_justified(|ui| {
            if hovering {
                ui.strong("Release to add");
            } else {
                ui.weak("Drop images here");
            }
        });
    });
}
