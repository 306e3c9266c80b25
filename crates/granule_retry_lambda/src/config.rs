pub const LOG_EVENT_ENV: &str = "RETRY_LOG_EVENT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Include the whole received event in the `event_received` log line.
    pub log_received_event: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            log_received_event: true,
        }
    }
}

impl HandlerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_received_event: lookup(LOG_EVENT_ENV)
                .and_then(|value| parse_flag(&value))
                .unwrap_or(defaults.log_received_event),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
