#![allow(dead_code)]

use pdf_image_sheet::Candidate;

/// Solid-color PNG of the given size
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 30, 30, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

pub fn png(name: &str) -> Candidate {
    Candidate::new(name, "image/png", png_bytes(8, 8))
}

pub fn png_sized(name: &str, width: u32) -> Candidate {
    Candidate::new(name, "image/png", png_bytes(width, width))
}

/// Tagged as an image but not decodable
pub fn broken_png(name: &str) -> Candidate {
    Candidate::new(name, "image/png", b"definitely not a png".to_vec())
}

pub fn text(name: &str) -> Candidate {
    Candidate::new(name, "text/plain", b"hello".to_vec())
}

pub fn pngs(names: &[&str]) -> Vec<Candidate> {
    names.iter().map(|n| png(n)).collect()
}

pub fn selected_names(selection: &pdf_image_sheet::SelectionMachine) -> Vec<String> {
    selection.selected().iter().map(|a| a.name.clone()).collect()
}
