//! Loading range specs from configuration files.

#![cfg(feature = "serde")]

use densebits::{FloatRangeSpec, RangeSpec};

#[test]
fn int_spec_from_json() -> Result<(), serde_json::Error> {
    let spec: RangeSpec<i32> = serde_json::from_str(r#"{ "min": -5, "max": 10 }"#)?;

    assert_eq!(spec, RangeSpec::new(-5, 10));
    assert_eq!(spec.bits_required(), 4);

    let json = serde_json::to_string(&spec)?;
    assert_eq!(json, r#"{"min":-5,"max":10}"#);

    Ok(())
}

#[test]
fn inverted_int_spec_is_rejected() {
    let res = serde_json::from_str::<RangeSpec<u8>>(r#"{ "min": 10, "max": 2 }"#);
    assert!(res.is_err());
}

#[test]
fn float_spec_from_json() -> Result<(), serde_json::Error> {
    let spec: FloatRangeSpec<f64> =
        serde_json::from_str(r#"{ "min": 0.0, "max": 1.0, "precision": 0.25 }"#)?;
    assert_eq!(spec.bits_required(), 3);
    assert_eq!(spec, FloatRangeSpec::new(0.0, 1.0, 0.25));

    let spec: FloatRangeSpec<f32> =
        serde_json::from_str(r#"{ "min": -1.0, "max": 1.0, "bits": 12 }"#)?;
    assert_eq!(spec.bits_required(), 12);

    let reloaded: FloatRangeSpec<f32> = serde_json::from_str(&serde_json::to_string(&spec)?)?;
    assert_eq!(reloaded, spec);

    Ok(())
}

#[test]
fn ambiguous_float_spec_is_rejected() {
    for json in [
        r#"{ "min": 0.0, "max": 1.0 }"#,
        r#"{ "min": 0.0, "max": 1.0, "precision": 0.1, "bits": 4 }"#,
        r#"{ "min": 0.0, "max": 1.0, "precision": -0.1 }"#,
    ] {
        assert!(serde_json::from_str::<FloatRangeSpec<f64>>(json).is_err(), "{json}");
    }
}
