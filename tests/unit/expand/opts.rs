use super::*;

#[test]
fn defaults_match_documented_values() {
    let opts = ExpandOpts::default();
    assert!(opts.radius.is_unbounded());
    assert_eq!(opts.block_rows, DEFAULT_BLOCK_ROWS);
    assert!(opts.parallel);
    assert_eq!(opts.threads, None);
    assert_eq!(opts.miss_policy, MissPolicy::AbortRow);
}

#[test]
fn partial_json_keeps_defaults() {
    let json = r#"{ "radius": 16, "threads": 4, "miss_policy": "skip_pixel" }"#;
    let opts = ExpandOpts::from_reader(json.as_bytes()).unwrap();
    assert_eq!(opts.radius, SearchRadius::new(16));
    assert_eq!(opts.threads, Some(4));
    assert_eq!(opts.miss_policy, MissPolicy::SkipPixel);
    assert_eq!(opts.block_rows, DEFAULT_BLOCK_ROWS);
    assert!(opts.parallel);
}

#[test]
fn row_range_parses_from_json() {
    let json = r#"{ "rows": { "start": 8, "end": 24 }, "parallel": false }"#;
    let opts = ExpandOpts::from_reader(json.as_bytes()).unwrap();
    assert_eq!(opts.rows, Some(RowRange { start: 8, end: 24 }));
    assert!(!opts.parallel);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = ExpandOpts::from_reader(r#"{ "radiuss": 3 }"#.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("parse expand options JSON"));
}

#[test]
fn zero_block_rows_normalizes_to_one() {
    let opts = ExpandOpts {
        block_rows: 0,
        ..ExpandOpts::default()
    };
    assert_eq!(opts.normalized_block_rows(), 1);
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = ExpandOpts::from_path("definitely/not/here.json").unwrap_err();
    assert!(matches!(err, TexpandError::Validation(_)));
}
