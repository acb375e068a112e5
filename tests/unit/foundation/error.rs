use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TexpandError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        TexpandError::dimension_mismatch("image vs mask", (4, 4), (4, 2))
            .to_string()
            .contains("dimension mismatch:")
    );
    assert!(
        TexpandError::format_mismatch("image", PixelFormat::RgbaF32, "1 channel")
            .to_string()
            .contains("format mismatch:")
    );
}

#[test]
fn dimension_mismatch_names_both_sizes() {
    let msg = TexpandError::dimension_mismatch("texture vs mask", (512, 256), (256, 256))
        .to_string();
    assert!(msg.contains("texture vs mask"));
    assert!(msg.contains("512x256"));
    assert!(msg.contains("256x256"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TexpandError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
