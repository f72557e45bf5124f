use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::RecordError;

/// Key holding the layout type used for dispatch.
pub const JSON_KEY_TYPE: &str = "type";

/// Key under which the answer is logged.
pub const JSON_KEY_KEY: &str = "key";

/// Key holding the question text.
pub const JSON_KEY_QUESTION: &str = "question";

/// Key holding the instruction shown below the question.
pub const JSON_KEY_INSTRUCTION: &str = "instruction";

/// One element of a questionnaire array.
///
/// Records are opaque to the engine apart from the `type` discriminator.
/// Layouts read whatever additional keys they need.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionRecord {
    fields: Map<String, Value>,
}

impl QuestionRecord {
    /// Create a record from a JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Create a record from any JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(RecordError::NotAnObject {
                index: 0,
                actual: json_type_name(&other),
            }),
        }
    }

    /// Get a raw JSON value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Check if the record has the given key.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// The layout type this record asks for.
    pub fn record_type(&self) -> Result<&str, RecordError> {
        self.get_str(JSON_KEY_TYPE)
    }

    /// Get a required string value.
    pub fn get_str(&self, key: &str) -> Result<&str, RecordError> {
        self.opt_str(key)?
            .ok_or_else(|| RecordError::MissingKey(key.to_string()))
    }

    /// Get an optional string value. `null` counts as absent.
    pub fn opt_str(&self, key: &str) -> Result<Option<&str>, RecordError> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(wrong_type(key, "string", other)),
        }
    }

    /// Get an optional integer value. `null` counts as absent.
    pub fn opt_i64(&self, key: &str) -> Result<Option<i64>, RecordError> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value @ Value::Number(n)) => n
                .as_i64()
                .map(Some)
                .ok_or_else(|| wrong_type(key, "integer", value)),
            Some(other) => Err(wrong_type(key, "integer", other)),
        }
    }

    /// Get an optional array value. `null` counts as absent.
    pub fn opt_array(&self, key: &str) -> Result<Option<&[Value]>, RecordError> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(other) => Err(wrong_type(key, "array", other)),
        }
    }

    /// Borrow the underlying JSON object.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for QuestionRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// Parse a questionnaire: a JSON array of objects.
///
/// # Example
/// ```
/// use que_types::parse_records;
///
/// let records = parse_records(r#"[{"type": "text", "key": "name", "question": "Name?"}]"#).unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].record_type().unwrap(), "text");
/// ```
pub fn parse_records(json: &str) -> Result<Vec<QuestionRecord>, RecordError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(items) = value else {
        return Err(RecordError::NotAnArray(json_type_name(&value)));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Ok(QuestionRecord::new(fields)),
            other => Err(RecordError::NotAnObject {
                index,
                actual: json_type_name(&other),
            }),
        })
        .collect()
}

fn wrong_type(key: &str, expected: &'static str, actual: &Value) -> RecordError {
    RecordError::WrongType {
        key: key.to_string(),
        expected,
        actual: json_type_name(actual),
    }
}

/// Name of a JSON value's type for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
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

    fn record(value: Value) -> QuestionRecord {
        QuestionRecord::from_value(value).unwrap()
    }

    #[test]
    fn parse_array_of_objects() {
        let records = parse_records(
            r#"[
                {"type": "text", "key": "name", "question": "Name?"},
                {"type": "radio", "key": "mood", "question": "Mood?"}
            ]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get_str("key").unwrap(), "mood");
    }

    #[test]
    fn parse_empty_array() {
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = parse_records("[{\"type\": ").unwrap_err();
        assert!(err.is_syntax());
    }

    #[test]
    fn top_level_object_is_rejected() {
        let err = parse_records(r#"{"type": "text"}"#).unwrap_err();
        assert!(matches!(err, RecordError::NotAnArray("object")));
    }

    #[test]
    fn non_object_element_is_rejected() {
        let err = parse_records(r#"[{"type": "text"}, 42]"#).unwrap_err();
        assert!(matches!(
            err,
            RecordError::NotAnObject {
                index: 1,
                actual: "number"
            }
        ));
    }

    #[test]
    fn missing_and_wrong_type_keys() {
        let rec = record(json!({"key": 7}));

        assert!(matches!(
            rec.record_type(),
            Err(RecordError::MissingKey(ref key)) if key == "type"
        ));
        assert!(matches!(
            rec.get_str("key"),
            Err(RecordError::WrongType {
                expected: "string",
                actual: "number",
                ..
            })
        ));
    }

    #[test]
    fn null_counts_as_absent() {
        let rec = record(json!({"instruction": null, "min": null}));
        assert_eq!(rec.opt_str("instruction").unwrap(), None);
        assert_eq!(rec.opt_i64("min").unwrap(), None);
    }

    #[test]
    fn integer_accessor_rejects_fractions() {
        let rec = record(json!({"min": 1.5}));
        assert!(rec.opt_i64("min").is_err());
    }
}
