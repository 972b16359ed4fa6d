use std::io::Cursor;

use super::*;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions() {
    let measured = decode_image(&png_bytes(8, 4)).unwrap();
    assert_eq!(measured, MeasuredImage { width: 8, height: 4 });
    assert_eq!(measured.natural_size(), Size::new(8.0, 4.0));
    assert_eq!(measured.aspect(), 2.0);
}

#[test]
fn decode_image_rejects_garbage() {
    let err = decode_image(b"not an image").unwrap_err();
    assert!(err.to_string().contains("decode image from memory"));
}
