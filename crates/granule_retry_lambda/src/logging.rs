use serde_json::{json, Value};

const COMPONENT: &str = "retry_handler";

pub fn log_info(event: &str, details: Value) {
    eprintln!("{}", info_line(event, details));
}

pub fn log_error(event: &str, details: Value) {
    eprintln!("{}", error_line(event, details));
}

fn info_line(event: &str, details: Value) -> Value {
    json!({
        "component": COMPONENT,
        "event": event,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "details": details,
    })
}

fn error_line(event: &str, details: Value) -> Value {
    json!({
        "component": COMPONENT,
        "level": "error",
        "event": event,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "details": details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_lines_carry_level() {
        let line = error_line("retry_filter_failed", json!({"message": "boom"}));
        assert_eq!(line["component"], json!("retry_handler"));
        assert_eq!(line["level"], json!("error"));
        assert_eq!(line["details"]["message"], json!("boom"));
    }

    #[test]
    fn info_lines_have_no_level() {
        let line = info_line("granules_filtered", json!({"granule_count": 2}));
        assert!(line.get("level").is_none());
        assert!(line["timestamp"].is_string());
    }
}
