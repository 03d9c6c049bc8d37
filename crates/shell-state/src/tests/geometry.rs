use crate::WindowGeometry;

use googletest::assert_that;
use googletest::prelude::{eq, none, some};

#[test]
fn given_default_when_constructed_then_800_by_600() {
    let geometry = WindowGeometry::default();

    assert_that!(geometry.width, eq(800));
    assert_that!(geometry.height, eq(600));
}

#[test]
fn given_valid_record_when_from_json_then_parsed() {
    let geometry = WindowGeometry::from_json(r#"{"width": 1024, "height": 768}"#);

    assert_that!(geometry, some(eq(WindowGeometry::new(1024, 768).unwrap())));
}

#[test]
fn given_extra_fields_when_from_json_then_ignored() {
    let geometry = WindowGeometry::from_json(r#"{"width": 900, "height": 700, "x": 10}"#);

    assert_that!(geometry, some(eq(WindowGeometry::new(900, 700).unwrap())));
}

#[test]
fn given_float_with_zero_fraction_when_from_json_then_accepted() {
    let geometry = WindowGeometry::from_json(r#"{"width": 900.0, "height": 700.0}"#);

    assert_that!(geometry, some(eq(WindowGeometry::new(900, 700).unwrap())));
}

#[test]
fn given_malformed_records_when_from_json_then_none() {
    let cases = [
        "",
        "not json",
        "[]",
        "{}",
        r#"{"width": 800}"#,
        r#"{"width": "800", "height": "600"}"#,
        r#"{"width": 0, "height": 600}"#,
        r#"{"width": -800, "height": 600}"#,
        r#"{"width": 800.5, "height": 600}"#,
        r#"{"width": 1e300, "height": 600}"#,
        r#"{"width": null, "height": 600}"#,
    ];

    for case in cases {
        assert!(
            WindowGeometry::from_json(case).is_none(),
            "expected {case:?} to be rejected"
        );
    }
}

#[test]
fn given_zero_dimension_when_new_then_none() {
    assert_that!(WindowGeometry::new(0, 600), none());
    assert_that!(WindowGeometry::new(800, 0), none());
}

#[test]
fn given_fractional_logical_size_when_from_logical_then_rounded() {
    let geometry = WindowGeometry::from_logical(1023.6, 767.4);

    assert_that!(geometry, some(eq(WindowGeometry::new(1024, 767).unwrap())));
}

#[test]
fn given_non_finite_logical_size_when_from_logical_then_none() {
    assert_that!(WindowGeometry::from_logical(f64::NAN, 600.0), none());
    assert_that!(WindowGeometry::from_logical(800.0, f64::INFINITY), none());
    assert_that!(WindowGeometry::from_logical(0.2, 600.0), none());
}

#[test]
fn given_geometry_when_serialized_then_plain_width_height_object() {
    let json = serde_json::to_value(WindowGeometry::new(1280, 720).unwrap()).unwrap();

    assert_eq!(json, serde_json::json!({"width": 1280, "height": 720}));
}
