//! Helpers for pulling typed sprite parameters out of a JSON object.
//!
//! Numeric helpers never fail: a missing key or a value of the wrong type
//! yields the default. Colors are stricter because a typo in a hex string
//! should not silently turn a lemon orange.

use serde_json::Value;

use crate::argb::Argb;
use crate::error::CitrusError;

/// Extracts an `f32` from `params[name]`, returning `default` if missing or wrong type.
///
/// Integers are accepted and widened.
pub fn param_f32(params: &Value, name: &str, default: f32) -> f32 {
    params
        .get(name)
        .and_then(Value::as_f64)
        .map(|v| v as f32)
        .unwrap_or(default)
}

/// Extracts a `u32` from `params[name]`, returning `default` if missing,
/// negative, fractional, or larger than `u32::MAX`.
pub fn param_u32(params: &Value, name: &str, default: u32) -> u32 {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts a color from `params[name]`.
///
/// A missing key or `null` yields `default`. Strings are parsed as hex
/// (`"#rrggbb"` or `"#aarrggbb"`), integers as a packed ARGB value.
///
/// # Errors
///
/// `CitrusError::InvalidColor` for an unparseable string or an integer
/// outside `u32`, `CitrusError::ParamTypeMismatch` for any other JSON type.
pub fn param_color(params: &Value, name: &str, default: Argb) -> Result<Argb, CitrusError> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::String(s)) => Argb::from_hex(s),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .map(Argb)
            .ok_or_else(|| CitrusError::InvalidColor(format!("{n} is not a packed ARGB value"))),
        Some(other) => Err(CitrusError::ParamTypeMismatch {
            name: name.to_string(),
            expected: "hex string or integer".to_string(),
            got: json_type_name(other).to_string(),
        }),
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- param_f32 --

    #[test]
    fn param_f32_extracts_existing_float() {
        let params = json!({"radius": 42.5});
        assert_eq!(param_f32(&params, "radius", 1.0), 42.5);
    }

    #[test]
    fn param_f32_extracts_integer_as_float() {
        let params = json!({"radius": 50});
        assert_eq!(param_f32(&params, "radius", 0.0), 50.0);
    }

    #[test]
    fn param_f32_returns_default_when_key_missing_or_wrong_type() {
        assert_eq!(param_f32(&json!({}), "radius", 3.0), 3.0);
        assert_eq!(param_f32(&json!({"radius": "big"}), "radius", 3.0), 3.0);
        assert_eq!(param_f32(&json!("not an object"), "radius", 7.0), 7.0);
    }

    // -- param_u32 --

    #[test]
    fn param_u32_extracts_existing_integer() {
        assert_eq!(param_u32(&json!({"vesicle_count": 12}), "vesicle_count", 8), 12);
    }

    #[test]
    fn param_u32_rejects_negative_fractional_and_oversized() {
        assert_eq!(param_u32(&json!({"n": -1}), "n", 5), 5);
        assert_eq!(param_u32(&json!({"n": 2.5}), "n", 5), 5);
        assert_eq!(param_u32(&json!({"n": 5_000_000_000_u64}), "n", 5), 5);
    }

    // -- param_color --

    #[test]
    fn param_color_defaults_when_missing_or_null() {
        let d = Argb(0xFF00_FF00);
        assert_eq!(param_color(&json!({}), "base_color", d).unwrap(), d);
        assert_eq!(
            param_color(&json!({"base_color": null}), "base_color", d).unwrap(),
            d
        );
    }

    #[test]
    fn param_color_parses_hex_and_packed() {
        let d = Argb::WHITE;
        let hex = json!({"base_color": "#ffd800"});
        assert_eq!(param_color(&hex, "base_color", d).unwrap(), Argb(0xFFFF_D800));
        let packed = json!({"base_color": 4_294_934_528_u64});
        assert_eq!(
            param_color(&packed, "base_color", d).unwrap(),
            Argb(0xFFFF_8000)
        );
    }

    #[test]
    fn param_color_rejects_bad_hex() {
        let params = json!({"base_color": "#zzzzzz"});
        assert!(matches!(
            param_color(&params, "base_color", Argb::WHITE),
            Err(CitrusError::InvalidColor(_))
        ));
    }

    #[test]
    fn param_color_rejects_wrong_type() {
        let params = json!({"base_color": [255, 128, 0]});
        match param_color(&params, "base_color", Argb::WHITE) {
            Err(CitrusError::ParamTypeMismatch { name, got, .. }) => {
                assert_eq!(name, "base_color");
                assert_eq!(got, "array");
            }
            other => panic!("expected type mismatch, got {other:?}"),
        }
    }
}
