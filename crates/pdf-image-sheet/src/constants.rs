//! Shared constants for sheet composition
//!
//! This module centralizes the fixed page geometry, selection limits and
//! naming rules used throughout the crate.

use std::time::Duration;

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Millimeters per inch
const MM_PER_INCH: f32 = 25.4;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Reference Page Geometry
// =============================================================================

/// Page width (mm), landscape
pub const PAGE_WIDTH_MM: f32 = 210.0;

/// Page height (mm), landscape
pub const PAGE_HEIGHT_MM: f32 = 148.0;

/// Left and right margin (mm)
pub const SIDE_MARGIN_MM: f32 = 10.0;

/// Top margin (mm). Part of the page geometry, not used for placement.
pub const TOP_MARGIN_MM: f32 = 10.0;

/// Distance from the bottom edge to the image baseline: 3/8 inch
pub const BOTTOM_PADDING_MM: f32 = 0.375 * MM_PER_INCH; // 9.525

/// Gap between adjacent columns (mm)
pub const COLUMN_GAP_MM: f32 = 10.0;

/// Square image edge: 2 inches
pub const IMAGE_EDGE_MM: f32 = 2.0 * MM_PER_INCH; // 50.8

// =============================================================================
// Selection
// =============================================================================

/// Number of images a sheet is composed of. Also the column count.
pub const REQUIRED_COUNT: usize = 3;

/// Media-type prefix accepted by the selection
pub const IMAGE_MEDIA_PREFIX: &str = "image/";

/// How long the "cleared" notice stays visible after a clear
pub const CLEARED_NOTICE_TTL: Duration = Duration::from_secs(3);

// =============================================================================
// Output Naming & Persistence
// =============================================================================

/// Prefix of every produced document name
pub const DOCUMENT_PREFIX: &str = "finaloutput";

/// Persistence key of the document counter
pub const COUNTER_KEY: &str = "pdfFileCounter";

/// Counter value used when nothing has been persisted yet
pub const COUNTER_START: u32 = 1;

/// Title embedded in produced documents
pub const DOCUMENT_TITLE: &str = "Image Sheet";
