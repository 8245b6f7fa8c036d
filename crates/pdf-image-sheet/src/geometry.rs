use crate::constants::*;

/// Paper orientation, derived from the page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Fixed physical page the sheet is composed on. All lengths in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub side_margin_mm: f32,
    pub top_margin_mm: f32,
    /// Distance from the bottom edge to the common image baseline
    pub bottom_padding_mm: f32,
    pub column_gap_mm: f32,
    pub columns: usize,
    /// Edge length of every (square) image
    pub image_edge_mm: f32,
}

impl PageGeometry {
    /// 210 × 148mm landscape, three 2" squares along the bottom
    pub const REFERENCE: PageGeometry = PageGeometry {
        page_width_mm: PAGE_WIDTH_MM,
        page_height_mm: PAGE_HEIGHT_MM,
        side_margin_mm: SIDE_MARGIN_MM,
        top_margin_mm: TOP_MARGIN_MM,
        bottom_padding_mm: BOTTOM_PADDING_MM,
        column_gap_mm: COLUMN_GAP_MM,
        columns: REQUIRED_COUNT,
        image_edge_mm: IMAGE_EDGE_MM,
    };

    /// Width between the side margins
    pub fn available_width_mm(&self) -> f32 {
        self.page_width_mm - 2.0 * self.side_margin_mm
    }

    /// Landscape when wider than tall
    pub fn orientation(&self) -> Orientation {
        if self.page_height_mm > self.page_width_mm {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Placement of one image on the page, in millimeters.
///
/// The origin is the top-left corner of the page and `y` grows downward.
/// Encoders working in PDF space flip it with [`PlacementRect::pdf_bottom_mm`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PlacementRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Distance of the rectangle's lower edge from the bottom of the page
    pub fn pdf_bottom_mm(&self, page_height_mm: f32) -> f32 {
        page_height_mm - self.bottom()
    }
}
