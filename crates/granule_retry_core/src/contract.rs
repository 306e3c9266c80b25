use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Upstream marker for a package that failed processing. Only
/// `package_name` is read; everything else on the record is ignored.
///
/// An absent `package_name` decodes as `None`, while an explicit `null`
/// decodes as `Some(Value::Null)` and takes part in matching.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailureMarker {
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub package_name: Option<Value>,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

static NULL: Value = Value::Null;

/// A file record, kept exactly as received.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FileEntry {
    pub fields: Map<String, Value>,
}

impl FileEntry {
    /// The `name` value, with a missing key read as `null`.
    pub fn name(&self) -> &Value {
        self.fields.get("name").unwrap_or(&NULL)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Granule {
    #[serde(default)]
    pub files: Vec<FileEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Payload {
    #[serde(default)]
    pub granules: Vec<Granule>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Typed view of the retry callback event. Missing `fail` and `payload`
/// decode as empty; an explicit `null` in either is a shape violation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RetryEvent {
    #[serde(default)]
    pub fail: Vec<FailureMarker>,
    #[serde(default)]
    pub payload: Payload,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterResult {
    pub payload: Payload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputShapeError {
    message: String,
}

impl InputShapeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for InputShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for InputShapeError {}

impl From<serde_json::Error> for InputShapeError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(format!("malformed retry event: {error}"))
    }
}

impl RetryEvent {
    /// Decodes the typed view without consuming the raw event, so callers can
    /// still write the filtered payload back into the original object.
    pub fn from_value(event: &Value) -> Result<Self, InputShapeError> {
        if !event.is_object() {
            return Err(InputShapeError::new("retry event must be a JSON object"));
        }
        Ok(Self::deserialize(event)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_fail_and_payload_default_to_empty() {
        let event = RetryEvent::from_value(&json!({})).expect("empty object should decode");
        assert!(event.fail.is_empty());
        assert!(event.payload.granules.is_empty());
        assert!(event.payload.extra.is_empty());
    }

    #[test]
    fn absent_and_null_package_names_decode_differently() {
        let event = RetryEvent::from_value(&json!({
            "fail": [
                {},
                {"package_name": null},
                {"package_name": "a.zip", "reason": "timeout"},
                {"package_name": 7}
            ]
        }))
        .expect("markers should decode");

        let names: Vec<Option<&Value>> = event
            .fail
            .iter()
            .map(|marker| marker.package_name.as_ref())
            .collect();
        assert_eq!(
            names,
            vec![None, Some(&Value::Null), Some(&json!("a.zip")), Some(&json!(7))]
        );
    }

    #[test]
    fn file_name_reads_missing_key_as_null() {
        let event = RetryEvent::from_value(&json!({
            "payload": {"granules": [{"files": [{"bucket": "raw"}, {"name": 123}]}]}
        }))
        .expect("files should decode");

        let files = &event.payload.granules[0].files;
        assert_eq!(files[0].name(), &Value::Null);
        assert_eq!(files[1].name(), &json!(123));
    }

    #[test]
    fn unknown_fields_are_kept_in_passthrough_maps() {
        let event = RetryEvent::from_value(&json!({
            "payload": {
                "collection": "S6_L2",
                "granules": [
                    {"granuleId": "g-1", "files": [{"name": "a.zip", "bucket": "raw"}]}
                ]
            }
        }))
        .expect("payload should decode");

        assert_eq!(event.payload.extra["collection"], json!("S6_L2"));
        let granule = &event.payload.granules[0];
        assert_eq!(granule.extra["granuleId"], json!("g-1"));
        assert_eq!(granule.files[0].name(), &json!("a.zip"));
        assert_eq!(granule.files[0].fields["bucket"], json!("raw"));
    }

    #[test]
    fn rejects_non_object_event() {
        let error = RetryEvent::from_value(&json!([1, 2])).expect_err("array event should fail");
        assert_eq!(error.message(), "retry event must be a JSON object");
    }

    #[test]
    fn rejects_null_payload() {
        let error = RetryEvent::from_value(&json!({"payload": null}))
            .expect_err("null payload should fail");
        assert!(error.message().starts_with("malformed retry event"));
    }

    #[test]
    fn rejects_file_entries_that_are_not_records() {
        let error = RetryEvent::from_value(&json!({
            "payload": {"granules": [{"files": ["a.zip"]}]}
        }))
        .expect_err("string file entry should fail");
        assert!(error.message().starts_with("malformed retry event"));
    }
}
