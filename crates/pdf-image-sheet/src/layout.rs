//! Column layout for the sheet
//!
//! The page is split into `columns` equal columns between the side margins,
//! separated by a fixed gap. Every image is a square of fixed edge length,
//! centered horizontally in its column and resting on a common baseline near
//! the bottom edge. Nothing is clipped: an image wider than its column simply
//! overlaps its neighbours.

use crate::geometry::{PageGeometry, PlacementRect};

/// Width of a single column
pub fn column_width(total_columns: usize, geometry: &PageGeometry) -> f32 {
    let gaps = total_columns.saturating_sub(1) as f32 * geometry.column_gap_mm;
    (geometry.available_width_mm() - gaps) / total_columns as f32
}

/// Left edge of column `index`
pub fn column_start(index: usize, total_columns: usize, geometry: &PageGeometry) -> f32 {
    geometry.side_margin_mm
        + index as f32 * (column_width(total_columns, geometry) + geometry.column_gap_mm)
}

/// Calculate where image `index` lands on the page.
///
/// Returns `None` for `index >= total_columns` (and for a zero column count):
/// only the first `total_columns` images are ever placed.
pub fn compute_placement(
    index: usize,
    total_columns: usize,
    geometry: &PageGeometry,
) -> Option<PlacementRect> {
    if index >= total_columns {
        return None;
    }

    let edge = geometry.image_edge_mm;
    let width = column_width(total_columns, geometry);

    // Negative when the image is wider than the column; accepted as-is.
    let x = column_start(index, total_columns, geometry) + (width - edge) / 2.0;
    let y = geometry.page_height_mm - geometry.bottom_padding_mm - edge;

    Some(PlacementRect::new(x, y, edge, edge))
}

/// Placements for the first `min(count, columns)` images, in selection order
pub fn placements(count: usize, geometry: &PageGeometry) -> Vec<PlacementRect> {
    (0..count.min(geometry.columns))
        .filter_map(|i| compute_placement(i, geometry.columns, geometry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.01;

    #[test]
    fn test_column_width_reference() {
        let width = column_width(3, &PageGeometry::REFERENCE);
        // (190 - 20) / 3
        assert!((width - 56.667).abs() < EPS);
    }

    #[test]
    fn test_single_column_spans_available_width() {
        let geometry = PageGeometry::REFERENCE;
        assert!((column_width(1, &geometry) - 190.0).abs() < EPS);
        assert!((column_start(0, 1, &geometry) - 10.0).abs() < EPS);
    }

    #[test]
    fn test_columns_are_evenly_spaced() {
        let geometry = PageGeometry::REFERENCE;
        let starts: Vec<f32> = (0..3).map(|i| column_start(i, 3, &geometry)).collect();
        let step = starts[1] - starts[0];
        assert!((starts[2] - starts[1] - step).abs() < EPS);
        assert!((step - (column_width(3, &geometry) + 10.0)).abs() < EPS);
    }

    #[test]
    fn test_last_column_ends_at_right_margin() {
        let geometry = PageGeometry::REFERENCE;
        let end = column_start(2, 3, &geometry) + column_width(3, &geometry);
        assert!((end - (geometry.page_width_mm - geometry.side_margin_mm)).abs() < EPS);
    }

    #[test]
    fn test_index_beyond_columns_is_ignored() {
        let geometry = PageGeometry::REFERENCE;
        assert!(compute_placement(3, 3, &geometry).is_none());
        assert!(compute_placement(0, 0, &geometry).is_none());
        assert_eq!(placements(5, &geometry).len(), 3);
    }

    #[test]
    fn test_oversized_image_bleeds_left() {
        let geometry = PageGeometry {
            image_edge_mm: 80.0,
            ..PageGeometry::REFERENCE
        };
        let rect = compute_placement(0, 3, &geometry).unwrap();
        // Centering offset is negative: the image starts left of its column.
        assert!(rect.x < geometry.side_margin_mm);
        assert!((rect.width - 80.0).abs() < EPS);
    }
}
