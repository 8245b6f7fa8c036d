//! Image decoding for assembly

use crate::types::{ImageAsset, Result, SheetError};

/// Pixel layout of a [`Bitmap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitmapFormat {
    /// 8-bit red, green, blue, alpha; row-major, top row first
    Rgba8,
}

/// Decoded, pixel-addressable image
#[derive(Debug, Clone)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub format: BitmapFormat,
    pub pixels: Vec<u8>,
}

/// Decode an asset's bytes into an RGBA bitmap
pub fn decode_asset(asset: &ImageAsset) -> Result<Bitmap> {
    let image = image::load_from_memory(&asset.bytes).map_err(|source| SheetError::Decode {
        name: asset.name.clone(),
        source,
    })?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Bitmap {
        width,
        height,
        format: BitmapFormat::Rgba8,
        pixels: rgba.into_raw(),
    })
}

/// Decode on the blocking pool so the caller keeps responding
pub async fn decode_asset_async(asset: ImageAsset) -> Result<Bitmap> {
    tokio::task::spawn_blocking(move || decode_asset(&asset)).await?
}
