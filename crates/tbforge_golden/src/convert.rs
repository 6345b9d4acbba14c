//! Conversion of values between JSON and the script engine.

use rhai::Dynamic;
use serde_json::{Map, Value};

use crate::error::GoldenError;

/// Converts a JSON value into a script value.
///
/// Integers outside the engine's `i64` range are rejected rather than
/// widened to a float.
pub fn to_script(value: &Value) -> Result<Dynamic, GoldenError> {
    check_integers(value)?;
    rhai::serde::to_dynamic(value).map_err(|e| GoldenError::Conversion {
        reason: e.to_string(),
    })
}

fn check_integers(value: &Value) -> Result<(), GoldenError> {
    match value {
        Value::Number(n) if n.is_u64() && n.as_i64().is_none() => Err(GoldenError::Conversion {
            reason: format!("integer {n} does not fit in a signed 64-bit value"),
        }),
        Value::Array(items) => items.iter().try_for_each(check_integers),
        Value::Object(fields) => fields.values().try_for_each(check_integers),
        _ => Ok(()),
    }
}

/// Converts an entry point's return value into an output map.
///
/// Unit means the model produced nothing. Anything that is not an object map
/// is rejected with its script type name.
pub fn outputs_from_script(result: Dynamic) -> Result<Map<String, Value>, GoldenError> {
    if result.is_unit() {
        return Err(GoldenError::NoOutputs);
    }
    if !result.is_map() {
        return Err(GoldenError::NotAMap {
            type_name: result.type_name().to_string(),
        });
    }
    match rhai::serde::from_dynamic::<Value>(&result) {
        Ok(Value::Object(outputs)) => Ok(outputs),
        Ok(other) => Err(GoldenError::NotAMap {
            type_name: format!("{other}"),
        }),
        Err(e) => Err(GoldenError::Conversion {
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_cross_over() {
        assert_eq!(to_script(&json!(3)).unwrap().as_int().unwrap(), 3);
        assert!(to_script(&json!(true)).unwrap().as_bool().unwrap());
        assert_eq!(
            to_script(&json!("4'b1010")).unwrap().into_string().unwrap(),
            "4'b1010"
        );
    }

    #[test]
    fn oversized_integers_are_rejected() {
        let err = to_script(&json!(u64::MAX)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "value conversion failed: integer 18446744073709551615 does not fit in a signed 64-bit value"
        );
        assert!(to_script(&json!({"bus": [1, u64::MAX]})).is_err());
        assert_eq!(
            to_script(&json!(i64::MAX as u64)).unwrap().as_int().unwrap(),
            i64::MAX
        );
        assert!(to_script(&json!(-1)).is_ok());
        assert!(to_script(&json!(0.5)).is_ok());
    }

    #[test]
    fn map_result_converts() {
        let engine = rhai::Engine::new();
        let result: Dynamic = engine.eval(r#"#{ sum: 7, carry: false }"#).unwrap();
        let outputs = outputs_from_script(result).unwrap();
        assert_eq!(outputs["sum"], json!(7));
        assert_eq!(outputs["carry"], json!(false));
    }

    #[test]
    fn unit_result_is_no_outputs() {
        assert!(matches!(
            outputs_from_script(Dynamic::UNIT),
            Err(GoldenError::NoOutputs)
        ));
    }

    #[test]
    fn scalar_result_is_rejected() {
        let err = outputs_from_script(Dynamic::from(5_i64)).unwrap_err();
        assert!(matches!(err, GoldenError::NotAMap { .. }));
    }
}
