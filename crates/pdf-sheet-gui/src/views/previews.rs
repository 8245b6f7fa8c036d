use eframe::egui;
use pdf_image_sheet::{AssetId, ImageAsset, PreviewHandle};
use std::collections::{HashMap, HashSet};

/// Longest edge of a preview texture (pixels)
const PREVIEW_EDGE_PX: u32 = 160;

/// GPU textures attached to the selection's preview handles.
///
/// Textures are created lazily on first draw and dropped when the selection
/// revokes their handle.
#[derive(Default)]
pub struct PreviewTextures {
    textures: HashMap<PreviewHandle, egui::TextureHandle>,
    failed: HashSet<PreviewHandle>,
}

impl PreviewTextures {
    pub fn get_or_load(
        &mut self,
        ctx: &egui::Context,
        handle: PreviewHandle,
        asset: &ImageAsset,
    ) -> Option<&egui::TextureHandle> {
        if !self.textures.contains_key(&handle) {
            if self.failed.contains(&handle) {
                return None;
            }
            match load_preview(asset) {
                Ok(image) => {
                    let texture = ctx.load_texture(
                        format!("preview-{}", handle.0),
                        image,
                        egui::TextureOptions::LINEAR,
                    );
                    self.textures.insert(handle, texture);
                }
                Err(e) => {
                    log::warn!("No preview for '{}': {}", asset.name, e);
                    self.failed.insert(handle);
                    return None;
                }
            }
        }
        self.textures.get(&handle)
    }

    /// Free textures whose handles were revoked
    pub fn release(&mut self, revoked: Vec<(AssetId, PreviewHandle)>) {
        for (_, handle) in revoked {
            self.textures.remove(&handle);
            self.failed.remove(&handle);
        }
    }
}

fn load_preview(asset: &ImageAsset) -> Result<egui::ColorImage, image::ImageError> {
    let image = image::load_from_memory(&asset.bytes)?;
    let rgba = image.thumbnail(PREVIEW_EDGE_PX, PREVIEW_EDGE_PX).to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
