use super::*;

#[test]
fn only_full_byte_is_valid() {
    let mask = Mask::from_raw(4, 1, vec![0, 128, 254, 255]).unwrap();
    assert!(!mask.is_valid(0, 0));
    assert!(!mask.is_valid(1, 0));
    assert!(!mask.is_valid(2, 0));
    assert!(mask.is_valid(3, 0));
    assert_eq!(mask.valid_count(), 1);
}

#[test]
fn coverage_ratio_counts_valid_fraction() {
    let mut mask = Mask::new_filled(4, 4, 0).unwrap();
    assert_eq!(coverage_ratio(&mask), 0.0);

    mask.set(0, 0, MASK_VALID);
    mask.set(3, 3, MASK_VALID);
    assert_eq!(coverage_ratio(&mask), 2.0 / 16.0);

    let full = Mask::new_filled(3, 5, MASK_VALID).unwrap();
    assert_eq!(coverage_ratio(&full), 1.0);
}

#[test]
fn from_raw_rejects_wrong_length() {
    assert!(Mask::from_raw(3, 3, vec![0; 8]).is_err());
    assert!(Mask::from_raw(0, 3, vec![]).is_err());
}

#[test]
fn from_alpha_uses_opaque_texels() {
    let img = ImageF32::from_raw(
        3,
        1,
        PixelFormat::RgbaF32,
        vec![
            1.0, 0.0, 0.0, 1.0, //
            0.0, 1.0, 0.0, 0.5, //
            0.0, 0.0, 1.0, 0.0,
        ],
    )
    .unwrap();
    let mask = Mask::from_alpha(&img).unwrap();
    assert_eq!(mask.as_raw(), &[255, 128, 0]);
    assert!(mask.is_valid(0, 0));
    assert!(!mask.is_valid(1, 0));
}

#[test]
fn from_alpha_requires_alpha_channel() {
    let img = ImageF32::filled(2, 2, PixelFormat::RgbF32, [0.0; 4]).unwrap();
    assert!(matches!(
        Mask::from_alpha(&img),
        Err(TexpandError::FormatMismatch { .. })
    ));
}

#[test]
fn luma_round_trip_keeps_bytes() {
    let mask = Mask::from_raw(2, 2, vec![0, 255, 7, 255]).unwrap();
    let back = Mask::from_luma8(mask.to_luma8()).unwrap();
    assert_eq!(back, mask);
}
