use granule_retry_core::contract::{InputShapeError, RetryEvent};
use granule_retry_core::filter::filter_failed_granules;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::HandlerConfig;
use crate::logging::{log_error, log_info};

/// Response shape consumed by the orchestrator: the whole event, with its
/// payload swapped for the filtered one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplaceResponse {
    pub replace: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerError {
    pub message: String,
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HandlerError {}

impl From<InputShapeError> for HandlerError {
    fn from(error: InputShapeError) -> Self {
        Self {
            message: error.message().to_string(),
        }
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(error: serde_json::Error) -> Self {
        Self {
            message: format!("failed to serialize filtered payload: {error}"),
        }
    }
}

pub fn handle_retry_event(
    event: Value,
    config: &HandlerConfig,
) -> Result<ReplaceResponse, HandlerError> {
    log_info("event_received", received_details(&event, config));

    match replace_payload(event) {
        Ok(response) => {
            log_info(
                "granules_filtered",
                json!({ "granule_count": granule_count(&response.replace) }),
            );
            Ok(response)
        }
        Err(error) => {
            log_error(
                "retry_filter_failed",
                json!({ "message": error.message.clone() }),
            );
            Err(error)
        }
    }
}

fn replace_payload(mut event: Value) -> Result<ReplaceResponse, HandlerError> {
    let retry_event = RetryEvent::from_value(&event)?;
    let filtered = filter_failed_granules(retry_event);
    let payload = serde_json::to_value(filtered.payload)?;

    // `from_value` only accepts objects.
    if let Value::Object(object) = &mut event {
        object.insert("payload".to_string(), payload);
    }

    Ok(ReplaceResponse { replace: event })
}

fn received_details(event: &Value, config: &HandlerConfig) -> Value {
    if config.log_received_event {
        return json!({ "event": event });
    }

    json!({
        "fail_count": event.get("fail").and_then(Value::as_array).map(Vec::len),
        "granule_count": granule_count(event),
    })
}

fn granule_count(event: &Value) -> Option<usize> {
    event
        .get("payload")
        .and_then(|payload| payload.get("granules"))
        .and_then(Value::as_array)
        .map(Vec::len)
}
