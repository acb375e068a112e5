use std::io::Cursor;

use super::*;

fn encode_png(img: image::DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_rgba_png_keeps_alpha_channel() {
    let src = image::RgbaImage::from_raw(2, 1, vec![255, 0, 51, 255, 0, 255, 0, 0]).unwrap();
    let img = decode_image(&encode_png(image::DynamicImage::ImageRgba8(src))).unwrap();

    assert_eq!(img.format(), PixelFormat::RgbaF32);
    assert_eq!(img.dimensions(), (2, 1));
    let px = img.pixel(0, 0);
    for (got, want) in px.iter().zip([1.0, 0.0, 0.2, 1.0]) {
        assert!((got - want).abs() < 1e-6, "{px:?}");
    }
    assert_eq!(img.pixel(1, 0)[3], 0.0);
}

#[test]
fn decode_rgb_png_has_no_alpha() {
    let src = image::RgbImage::from_raw(1, 1, vec![0, 255, 0]).unwrap();
    let img = decode_image(&encode_png(image::DynamicImage::ImageRgb8(src))).unwrap();
    assert_eq!(img.format(), PixelFormat::RgbF32);
    assert_eq!(img.pixel(0, 0), &[0.0, 1.0, 0.0]);
}

#[test]
fn garbage_bytes_fail_to_decode() {
    assert!(decode_image(b"not an image").is_err());
}
