//! Document assembly
//!
//! Turns the ordered selection into a single-page PDF:
//! 1. Decode each image, in selection order, off the async executor
//! 2. Ask the layout engine where it goes
//! 3. Hand bitmap and placement to the encoder
//! 4. Name the result after the counter
//!
//! Any failure aborts the whole document; there are no partial sheets.

mod decode;
mod in_flight;

pub use decode::{Bitmap, BitmapFormat, decode_asset, decode_asset_async};
pub use in_flight::{InFlight, InFlightGuard};

use crate::constants::DOCUMENT_TITLE;
use crate::counter::document_name;
use crate::encoder::PdfEncoder;
use crate::geometry::{PageGeometry, PlacementRect};
use crate::layout::compute_placement;
use crate::types::{ImageAsset, Result, SheetError};

/// A produced document, ready for delivery
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    /// Counter value the document was named after
    pub counter: u32,
    pub bytes: Vec<u8>,
    /// Where each image was placed, in selection order
    pub placements: Vec<PlacementRect>,
}

/// Compose `assets` onto one page named after `counter`
pub async fn produce_document<E: PdfEncoder>(
    assets: &[ImageAsset],
    geometry: &PageGeometry,
    counter: u32,
) -> Result<Document> {
    if assets.is_empty() {
        return Err(SheetError::EmptySelection);
    }

    let mut encoder = E::create(geometry, DOCUMENT_TITLE)?;
    let mut placements = Vec::with_capacity(assets.len());

    for (index, asset) in assets.iter().enumerate() {
        let Some(rect) = compute_placement(index, geometry.columns, geometry) else {
            log::warn!("Skipping '{}': no column left on the page", asset.name);
            continue;
        };
        let bitmap = decode_asset_async(asset.clone()).await?;
        log::debug!(
            "Placing '{}' ({}x{}px) at {:.2},{:.2}mm",
            asset.name,
            bitmap.width,
            bitmap.height,
            rect.x,
            rect.y
        );
        encoder.add_image(bitmap, &rect)?;
        placements.push(rect);
    }

    // Serialization is CPU-bound, spawn blocking
    let bytes = tokio::task::spawn_blocking(move || encoder.finish()).await??;

    let name = document_name(counter);
    log::info!("Produced {} with {} images", name, placements.len());

    Ok(Document {
        name,
        counter,
        bytes,
        placements,
    })
}

/// Snapshot of a selection about to become a document.
///
/// Holds the in-flight guard: no other generation can start until the job
/// has run and its [`CompletedJob`] has been dropped or finished.
#[derive(Debug)]
pub struct GenerationJob {
    assets: Vec<ImageAsset>,
    geometry: PageGeometry,
    counter: u32,
    guard: InFlightGuard,
}

impl GenerationJob {
    pub(crate) fn new(
        assets: Vec<ImageAsset>,
        geometry: PageGeometry,
        counter: u32,
        guard: InFlightGuard,
    ) -> Self {
        Self {
            assets,
            geometry,
            counter,
            guard,
        }
    }

    pub fn document_name(&self) -> String {
        document_name(self.counter)
    }

    pub fn image_count(&self) -> usize {
        self.assets.len()
    }

    /// Decode and encode. Never fails by itself: the outcome travels inside
    /// the returned [`CompletedJob`] together with the guard.
    pub async fn run<E: PdfEncoder>(self) -> CompletedJob {
        let outcome = produce_document::<E>(&self.assets, &self.geometry, self.counter).await;
        if let Err(e) = &outcome {
            log::warn!("Generation of {} failed: {}", self.document_name(), e);
        }
        CompletedJob {
            outcome,
            guard: self.guard,
        }
    }
}

/// Outcome of a [`GenerationJob`], still holding the in-flight guard
#[derive(Debug)]
pub struct CompletedJob {
    outcome: Result<Document>,
    guard: InFlightGuard,
}

impl CompletedJob {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub(crate) fn into_parts(self) -> (Result<Document>, InFlightGuard) {
        (self.outcome, self.guard)
    }
}
