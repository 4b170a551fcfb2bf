use serde_json::Value;

/// Product of the transform stage: the converted document and its
/// serialized JSON text.
///
/// The value uses insertion-ordered maps, so `json_output` is stable
/// across runs for the same source document.
#[derive(Debug, Clone)]
pub struct TransformResult {
    pub value: Value,
    pub json_output: String,
}
