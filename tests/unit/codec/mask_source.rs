use super::*;
use crate::codec::decode::save_mask;
use crate::raster::image::PixelFormat;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_mask_source").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn mask_file_round_trips_bytes() {
    let path = scratch_dir("round_trip").join("mask.png");
    let mask = Mask::from_raw(3, 2, vec![0, 255, 255, 12, 0, 255]).unwrap();
    save_mask(&path, &mask).unwrap();

    let source = MaskFile::new(&path);
    assert_eq!(source.produce(3, 2).unwrap(), mask);
    assert!(source.describe().contains("mask.png"));
}

#[test]
fn mask_file_with_other_size_is_rejected() {
    let path = scratch_dir("size").join("mask.png");
    save_mask(&path, &Mask::new_filled(4, 4, 255).unwrap()).unwrap();

    let err = MaskFile::new(&path).produce(8, 4).unwrap_err();
    assert!(matches!(err, TexpandError::DimensionMismatch { .. }));
    let msg = err.to_string();
    assert!(msg.contains("texture vs mask file"));
    assert!(msg.contains("8x4"));
    assert!(msg.contains("4x4"));
}

#[test]
fn missing_mask_file_is_an_error() {
    assert!(MaskFile::new("target/does/not/exist.png").produce(1, 1).is_err());
}

#[test]
fn alpha_mask_marks_opaque_texels() {
    let img = ImageF32::from_raw(
        2,
        1,
        PixelFormat::RgbaF32,
        vec![0.1, 0.2, 0.3, 1.0, 0.4, 0.5, 0.6, 0.0],
    )
    .unwrap();
    let mask = AlphaMask { image: &img }.produce(2, 1).unwrap();
    assert_eq!(mask.as_raw(), &[255, 0]);
}

#[test]
fn alpha_mask_needs_alpha() {
    let img = ImageF32::filled(2, 2, PixelFormat::RgbF32, [0.0; 4]).unwrap();
    assert!(matches!(
        AlphaMask { image: &img }.produce(2, 2),
        Err(TexpandError::FormatMismatch { .. })
    ));
}
