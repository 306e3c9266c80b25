use std::collections::HashSet;

use serde_json::Value;

use crate::contract::{FailureMarker, FilterResult, Granule, Payload, RetryEvent};

/// Canonical JSON text of a name. Keeps `"7"` and `7` apart and lets `null`
/// act as an ordinary key.
fn name_key(value: &Value) -> String {
    value.to_string()
}

/// Deduplicated keys of every marker that carries a `package_name`,
/// including an explicit `null` one.
pub fn failure_names(markers: &[FailureMarker]) -> HashSet<String> {
    markers
        .iter()
        .filter_map(|marker| marker.package_name.as_ref())
        .map(name_key)
        .collect()
}

pub fn references_failure(granule: &Granule, failed: &HashSet<String>) -> bool {
    granule
        .files
        .iter()
        .any(|file| failed.contains(&name_key(file.name())))
}

/// Keeps only the granules with at least one file named by a failure marker.
///
/// Surviving granules are moved into the result in their original order and
/// every non-`granules` payload field is carried over as received.
pub fn filter_failed_granules(event: RetryEvent) -> FilterResult {
    let RetryEvent { fail, payload } = event;
    let failed = failure_names(&fail);

    let Payload { granules, extra } = payload;
    let granules = if failed.is_empty() {
        Vec::new()
    } else {
        granules
            .into_iter()
            .filter(|granule| references_failure(granule, &failed))
            .collect()
    };

    FilterResult {
        payload: Payload { granules, extra },
    }
}
