//! Test vectors: one stimulus plus the reference model's verdict on it.
//!
//! A vector is created from a decoded test pattern with a [`Golden::Pending`]
//! verdict, resolved exactly once by the reference-model runner, and read by
//! the testbench rewriter. The JSON form distinguishes the three verdicts:
//!
//! | verdict    | `expected_outputs` | `error`  |
//! |------------|--------------------|----------|
//! | `Pending`  | omitted            | omitted  |
//! | `Computed` | object             | omitted  |
//! | `Failed`   | `null`             | string   |

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The input half of a test vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stimulus {
    /// Port name to value, bound to reference-model parameters by name.
    Named(Map<String, Value>),
    /// Ordered values, bound to reference-model parameters by position.
    Positional(Vec<Value>),
    /// A single value passed as the only argument.
    Scalar(Value),
}

impl Stimulus {
    /// Returns the number of values carried by this stimulus.
    pub fn len(&self) -> usize {
        match self {
            Stimulus::Named(map) => map.len(),
            Stimulus::Positional(values) => values.len(),
            Stimulus::Scalar(_) => 1,
        }
    }

    /// Returns `true` if the stimulus carries no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Stimulus {
    fn default() -> Self {
        Stimulus::Named(Map::new())
    }
}

/// The reference model's verdict for one vector.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Golden {
    /// The vector has not been through the reference model.
    #[default]
    Pending,
    /// The reference model returned these output values, keyed by port name.
    Computed(Map<String, Value>),
    /// The reference model failed on this vector.
    Failed(String),
}

/// One stimulus/expected-response record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTestVector", into = "RawTestVector")]
pub struct TestVector {
    /// The stimulus applied to the design and the reference model.
    pub inputs: Stimulus,
    /// The reference model's verdict.
    pub golden: Golden,
    /// Any other members the pattern carried (test number, comments, ...).
    pub extra: Map<String, Value>,
}

impl TestVector {
    /// Creates a pending vector from a stimulus.
    pub fn new(inputs: Stimulus) -> Self {
        Self {
            inputs,
            golden: Golden::Pending,
            extra: Map::new(),
        }
    }

    /// Returns a copy of this vector carrying the given verdict.
    pub fn with_golden(&self, golden: Golden) -> Self {
        Self {
            golden,
            ..self.clone()
        }
    }

    /// Returns the expected outputs if the reference model produced them.
    pub fn expected_outputs(&self) -> Option<&Map<String, Value>> {
        match &self.golden {
            Golden::Computed(outputs) => Some(outputs),
            _ => None,
        }
    }

    /// Returns the failure description if the reference model failed.
    pub fn error(&self) -> Option<&str> {
        match &self.golden {
            Golden::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Returns `true` once the reference model has produced a verdict.
    pub fn is_resolved(&self) -> bool {
        !matches!(self.golden, Golden::Pending)
    }
}

/// On-disk shape of a [`TestVector`].
#[derive(Serialize, Deserialize)]
struct RawTestVector {
    #[serde(default)]
    inputs: Stimulus,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    expected_outputs: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Keeps an explicit `null` distinct from a missing member.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl From<RawTestVector> for TestVector {
    fn from(raw: RawTestVector) -> Self {
        let golden = match (raw.expected_outputs, raw.error) {
            (_, Some(error)) => Golden::Failed(error),
            (Some(Value::Object(outputs)), None) => Golden::Computed(outputs),
            (Some(Value::Null), None) => {
                Golden::Failed("reference model produced no outputs".to_string())
            }
            (Some(other), None) => Golden::Failed(format!(
                "expected outputs must be an object, found {other}"
            )),
            (None, None) => Golden::Pending,
        };
        Self {
            inputs: raw.inputs,
            golden,
            extra: raw.extra,
        }
    }
}

impl From<TestVector> for RawTestVector {
    fn from(vector: TestVector) -> Self {
        let (expected_outputs, error) = match vector.golden {
            Golden::Pending => (None, None),
            Golden::Computed(outputs) => (Some(Value::Object(outputs)), None),
            Golden::Failed(error) => (Some(Value::Null), Some(error)),
        };
        Self {
            inputs: vector.inputs,
            expected_outputs,
            error,
            extra: vector.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn named(value: Value) -> Stimulus {
        match value {
            Value::Object(map) => Stimulus::Named(map),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn pending_omits_verdict_members() {
        let v = TestVector::new(named(json!({"a": 1, "b": 0})));
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json, json!({"inputs": {"a": 1, "b": 0}}));
    }

    #[test]
    fn computed_serializes_outputs() {
        let v = TestVector::new(named(json!({"a": 1})))
            .with_golden(Golden::Computed(json!({"y": 1}).as_object().unwrap().clone()));
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json, json!({"inputs": {"a": 1}, "expected_outputs": {"y": 1}}));
    }

    #[test]
    fn failed_serializes_null_marker_and_error() {
        let v = TestVector::new(named(json!({"a": 1})))
            .with_golden(Golden::Failed("boom".to_string()));
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(
            json,
            json!({"inputs": {"a": 1}, "expected_outputs": null, "error": "boom"})
        );
    }

    #[test]
    fn deserialize_distinguishes_null_from_missing() {
        let pending: TestVector = serde_json::from_str(r#"{"inputs": {"a": 1}}"#).unwrap();
        assert_eq!(pending.golden, Golden::Pending);
        assert!(!pending.is_resolved());

        let failed: TestVector =
            serde_json::from_str(r#"{"inputs": {"a": 1}, "expected_outputs": null, "error": "x"}"#)
                .unwrap();
        assert_eq!(failed.error(), Some("x"));
        assert!(failed.expected_outputs().is_none());
        assert!(failed.is_resolved());
    }

    #[test]
    fn extra_members_are_preserved() {
        let text = r#"{"test": 3, "inputs": {"a": 1}, "note": "corner"}"#;
        let v: TestVector = serde_json::from_str(text).unwrap();
        assert_eq!(v.extra.get("test"), Some(&json!(3)));
        assert_eq!(v.extra.get("note"), Some(&json!("corner")));
        let back = serde_json::to_value(&v).unwrap();
        assert_eq!(back["test"], 3);
        assert_eq!(back["inputs"]["a"], 1);
    }

    #[test]
    fn positional_inputs() {
        let v: TestVector = serde_json::from_str(r#"{"inputs": [1, 0, 1]}"#).unwrap();
        assert_eq!(v.inputs, Stimulus::Positional(vec![json!(1), json!(0), json!(1)]));
        assert_eq!(v.inputs.len(), 3);
    }

    #[test]
    fn scalar_inputs() {
        let v: TestVector = serde_json::from_str(r#"{"inputs": 7}"#).unwrap();
        assert_eq!(v.inputs, Stimulus::Scalar(json!(7)));
        assert_eq!(v.inputs.len(), 1);
    }

    #[test]
    fn non_object_outputs_become_failure() {
        let v: TestVector =
            serde_json::from_str(r#"{"inputs": {}, "expected_outputs": 5}"#).unwrap();
        assert!(v.error().unwrap().contains("must be an object"));
    }

    #[test]
    fn with_golden_keeps_inputs_and_extras() {
        let mut v = TestVector::new(named(json!({"a": 1})));
        v.extra.insert("test".to_string(), json!(1));
        let resolved = v.with_golden(Golden::Failed("e".to_string()));
        assert_eq!(resolved.inputs, v.inputs);
        assert_eq!(resolved.extra, v.extra);
        assert_eq!(v.golden, Golden::Pending);
    }
}
