//! Decoding of the model's JSON test-pattern list into test vectors.

use serde_json::{Map, Value};
use tbforge_common::{Stimulus, TestVector};

use crate::error::PatternError;

/// Members a pattern may carry that are owned by the reference model.
const VERDICT_MEMBERS: [&str; 2] = ["expected_outputs", "error"];

/// Decodes a JSON array of test patterns into pending [`TestVector`]s.
///
/// Each element must be an object. If it has an `inputs` member, that member
/// is the stimulus (object → named, array → positional, anything else → a
/// single argument) and the remaining members are kept as extras. Otherwise
/// the whole object is the named stimulus. Any `expected_outputs` or `error`
/// the model volunteered is discarded: expectations come from the reference
/// model only.
///
/// Blank input decodes to an empty list.
pub fn decode_patterns(json: &str) -> Result<Vec<TestVector>, PatternError> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    let document: Value = serde_json::from_str(json)?;
    let Value::Array(items) = document else {
        return Err(PatternError::NotAnArray {
            found: json_type(&document),
        });
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| pattern_to_vector(index, item))
        .collect()
}

fn pattern_to_vector(index: usize, item: Value) -> Result<TestVector, PatternError> {
    let Value::Object(mut members) = item else {
        return Err(PatternError::NotAnObject {
            index,
            found: json_type(&item),
        });
    };
    for key in VERDICT_MEMBERS {
        members.remove(key);
    }

    let inputs = match members.remove("inputs") {
        Some(Value::Object(map)) => Stimulus::Named(map),
        Some(Value::Array(values)) => Stimulus::Positional(values),
        Some(scalar) => Stimulus::Scalar(scalar),
        None => return Ok(TestVector::new(Stimulus::Named(members))),
    };

    let mut vector = TestVector::new(inputs);
    vector.extra = members;
    Ok(vector)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Builds a named stimulus from `(port, value)` pairs.
pub fn named_stimulus<I, K>(pairs: I) -> Stimulus
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    Stimulus::Named(
        pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect::<Map<String, Value>>(),
    )
}
