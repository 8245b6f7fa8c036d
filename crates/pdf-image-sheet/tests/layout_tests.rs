use pdf_image_sheet::*;

const EPS: f32 = 0.01;

#[test]
fn test_reference_geometry() {
    let geometry = PageGeometry::default();
    assert_eq!(geometry.orientation(), Orientation::Landscape);
    assert_eq!(geometry.page_width_mm, 210.0);
    assert_eq!(geometry.page_height_mm, 148.0);
    assert_eq!(geometry.columns, REQUIRED_COUNT);
    assert!((geometry.bottom_padding_mm - 9.525).abs() < 1e-4);
    assert!((geometry.image_edge_mm - 50.8).abs() < 1e-4);
    assert!((geometry.available_width_mm() - 190.0).abs() < EPS);
}

#[test]
fn test_first_image_placement() {
    let rect = compute_placement(0, 3, &PageGeometry::REFERENCE).unwrap();

    // Column width (190 - 20) / 3 ≈ 56.67, centered 50.8 square
    assert!((rect.x - 12.933).abs() < EPS, "x = {}", rect.x);
    assert!((rect.y - 87.675).abs() < EPS, "y = {}", rect.y);
    assert!((rect.width - 50.8).abs() < EPS);
    assert!((rect.height - 50.8).abs() < EPS);
}

#[test]
fn test_all_images_share_baseline() {
    let rects = placements(3, &PageGeometry::REFERENCE);
    assert_eq!(rects.len(), 3);
    for rect in &rects {
        assert!((rect.y - rects[0].y).abs() < f32::EPSILON);
        // Bottom edge sits 3/8" above the page bottom
        assert!((rect.pdf_bottom_mm(148.0) - 9.525).abs() < EPS);
    }
}

#[test]
fn test_images_are_centered_in_columns() {
    let geometry = PageGeometry::REFERENCE;
    let width = column_width(3, &geometry);
    for i in 0..3 {
        let rect = compute_placement(i, 3, &geometry).unwrap();
        let start = column_start(i, 3, &geometry);
        let left_gap = rect.x - start;
        let right_gap = start + width - rect.right();
        assert!((left_gap - right_gap).abs() < EPS);
    }
}

#[test]
fn test_placements_follow_selection_order() {
    let rects = placements(3, &PageGeometry::REFERENCE);
    assert!(rects[0].x < rects[1].x);
    assert!(rects[1].x < rects[2].x);
    // Symmetric around the page center
    assert!((rects[0].x + rects[2].right() - 210.0).abs() < EPS);
}

#[test]
fn test_fewer_images_than_columns() {
    let rects = placements(2, &PageGeometry::REFERENCE);
    assert_eq!(rects.len(), 2);
    assert_eq!(rects[0], compute_placement(0, 3, &PageGeometry::REFERENCE).unwrap());
}

#[test]
fn test_orientation_follows_page_size() {
    let portrait = PageGeometry {
        page_width_mm: 148.0,
        page_height_mm: 210.0,
        ..PageGeometry::REFERENCE
    };
    assert_eq!(portrait.orientation(), Orientation::Portrait);
    assert_eq!(PageGeometry::default().orientation(), Orientation::Landscape);
}
