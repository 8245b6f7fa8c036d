//! Compose a fixed number of images into a single-page PDF sheet.
//!
//! Images are picked through a [`SelectionMachine`], laid out in evenly
//! spaced columns by [`compute_placement`], encoded by a [`PdfEncoder`] and
//! named after a persisted [`DocumentCounter`]. [`SheetSession`] ties these
//! together.

pub mod assembly;
pub mod constants;
mod config;
mod counter;
mod delivery;
mod encoder;
mod geometry;
mod layout;
mod selection;
mod session;
mod types;

pub use assembly::{Bitmap, BitmapFormat, CompletedJob, Document, GenerationJob, produce_document};
pub use config::SheetConfig;
pub use constants::REQUIRED_COUNT;
pub use counter::{CounterStore, DocumentCounter, JsonCounterStore, MemoryCounterStore, document_name};
pub use delivery::{DirectorySink, DocumentSink, FileSink, MemorySink};
pub use encoder::{PdfEncoder, PrintPdfEncoder};
pub use geometry::{Orientation, PageGeometry, PlacementRect};
pub use layout::{column_start, column_width, compute_placement, placements};
pub use selection::{PreviewHandles, SelectionMachine, SelectionState, ToggleOutcome};
pub use session::{GenerationReport, SheetSession};
pub use types::*;
