pub mod picker;
pub mod previews;
pub mod selection;

pub use picker::show_picker;
pub use previews::PreviewTextures;
pub use selection::show_selection;

use eframe::egui;
use pdf_image_sheet::{ImageAsset, SelectionMachine};

/// Edge of a thumbnail card on screen (points)
pub const CARD_EDGE: f32 = 120.0;

/// What the user asked for during this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiAction {
    PickFiles,
    Remove(usize),
    Generate,
    SaveAgain,
    ClearAll,
    Toggle(usize),
    Confirm,
    Cancel,
}

/// Clickable thumbnail with a caption
pub(crate) fn thumbnail_card(
    ui: &mut egui::Ui,
    textures: &mut PreviewTextures,
    selection: &SelectionMachine,
    asset: &ImageAsset,
    highlighted: bool,
) -> egui::Response {
    let frame = if highlighted {
        egui::Frame::group(ui.style()).stroke(egui::Stroke::new(
            2.0,
            ui.visuals().selection.stroke.color,
        ))
    } else {
        egui::Frame::group(ui.style())
    };

    frame
        .show(ui, |ui| {
            ui.set_width(CARD_EDGE);
            ui.vertical_centered(|ui| {
                let size = egui::vec2(CARD_EDGE, CARD_EDGE);
                let texture = selection
                    .preview(asset.id)
                    .and_then(|handle| textures.get_or_load(ui.ctx(), handle, asset));
                let response = match texture {
                    Some(texture) => ui.add(
                        egui::Image::new(texture)
                            .fit_to_exact_size(size)
                            .sense(egui::Sense::click()),
                    ),
                    None => ui.add_sized(size, egui::Button::new("🖼")),
                };
                let caption = if highlighted {
                    format!("✔ {}", asset.name)
                } else {
                    asset.name.clone()
                };
                ui.add(egui::Label::new(caption).truncate());
                response
            })
            .inner
        })
        .inner
}
