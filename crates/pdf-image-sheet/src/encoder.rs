//! PDF encoding
//!
//! Assembly talks to the encoder through [`PdfEncoder`]: the page geometry is
//! fixed at construction, images are added one placement at a time, and the
//! finished document comes back as bytes. [`PrintPdfEncoder`] is the
//! production implementation.

use printpdf::*;

use crate::assembly::{Bitmap, BitmapFormat};
use crate::constants::mm_to_pt;
use crate::geometry::{PageGeometry, PlacementRect};
use crate::types::{Result, SheetError};

pub trait PdfEncoder: Sized + Send + 'static {
    fn create(geometry: &PageGeometry, title: &str) -> Result<Self>;

    /// Draw `bitmap` into `rect` (millimeters, top-left origin)
    fn add_image(&mut self, bitmap: Bitmap, rect: &PlacementRect) -> Result<()>;

    /// Called on the blocking pool
    fn finish(self) -> Result<Vec<u8>>;
}

/// Single-page encoder on top of `printpdf`.
///
/// `PdfDocument` is not `Send`, so images are only queued here and the
/// document is built in [`PdfEncoder::finish`].
pub struct PrintPdfEncoder {
    title: String,
    geometry: PageGeometry,
    images: Vec<(Bitmap, PlacementRect)>,
}

impl PdfEncoder for PrintPdfEncoder {
    fn create(geometry: &PageGeometry, title: &str) -> Result<Self> {
        if geometry.page_width_mm <= 0.0 || geometry.page_height_mm <= 0.0 {
            return Err(SheetError::Encoding(format!(
                "Invalid page size {}x{}mm",
                geometry.page_width_mm, geometry.page_height_mm
            )));
        }
        Ok(Self {
            title: title.to_string(),
            geometry: *geometry,
            images: Vec::new(),
        })
    }

    fn add_image(&mut self, bitmap: Bitmap, rect: &PlacementRect) -> Result<()> {
        if bitmap.width == 0 || bitmap.height == 0 {
            return Err(SheetError::Encoding("Cannot embed an empty image".to_string()));
        }
        self.images.push((bitmap, *rect));
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>> {
        let mut doc = PdfDocument::new(&self.title);
        let mut ops = Vec::with_capacity(self.images.len());

        for (bitmap, rect) in self.images {
            let width_px = bitmap.width as f32;
            let height_px = bitmap.height as f32;
            let raw = RawImage {
                pixels: RawImageData::U8(bitmap.pixels),
                width: bitmap.width as usize,
                height: bitmap.height as usize,
                data_format: match bitmap.format {
                    BitmapFormat::Rgba8 => RawImageFormat::RGBA8,
                },
                tag: Vec::new(),
            };
            let image_id = doc.add_image(&raw);

            // PDF space has its origin at the bottom-left corner.
            let bottom_mm = rect.pdf_bottom_mm(self.geometry.page_height_mm);

            // At 72 dpi one pixel is one point, so the scale maps pixels onto the target size.
            ops.push(Op::UseXobject {
                id: image_id,
                transform: XObjectTransform {
                    translate_x: Some(Mm(rect.x).into_pt()),
                    translate_y: Some(Mm(bottom_mm).into_pt()),
                    scale_x: Some(mm_to_pt(rect.width) / width_px),
                    scale_y: Some(mm_to_pt(rect.height) / height_px),
                    dpi: Some(72.0),
                    ..Default::default()
                },
            });
        }

        let page = PdfPage::new(
            Mm(self.geometry.page_width_mm),
            Mm(self.geometry.page_height_mm),
            ops,
        );
        doc.pages = vec![page];

        let mut warnings = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            log::debug!("PDF encoder reported {} warnings", warnings.len());
        }
        if bytes.is_empty() {
            return Err(SheetError::Encoding("Encoder produced no output".to_string()));
        }
        Ok(bytes)
    }
}
